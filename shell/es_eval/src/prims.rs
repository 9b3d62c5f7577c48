//! Built-in primitives (`$&name`).
//!
//! Every primitive has the [`Primitive`] signature: it receives its
//! arguments without the head, the caller's binding and the evaluation
//! flags. Failures use the `$&name` context.
//!
//! - `control` - `if`, `and`, `or`, `not`, `seq`, `forever`, `catch`,
//!   `throw`, `return`, `break`, `noreturn`, `exec`, `exitonfalse`
//! - `etc` - `result`, `echo`, `count`, `flatten`, `split`, `fsplit`,
//!   `whatis`, `pathsearch`, `setmaxevaldepth`, `vars`, `var`

mod control;
mod etc;

use crate::interpreter::{Interpreter, Primitive};

const BUILTINS: &[(&str, Primitive)] = &[
    // control
    ("seq", control::seq),
    ("if", control::if_),
    ("not", control::not),
    ("and", control::and),
    ("or", control::or),
    ("forever", control::forever),
    ("throw", control::throw),
    ("catch", control::catch),
    ("return", control::return_),
    ("break", control::break_),
    ("noreturn", control::noreturn),
    ("exec", control::exec),
    ("exitonfalse", control::exitonfalse),
    // etc
    ("result", etc::result),
    ("echo", etc::echo),
    ("count", etc::count),
    ("flatten", etc::flatten),
    ("split", etc::split),
    ("fsplit", etc::fsplit),
    ("whatis", etc::whatis),
    ("pathsearch", etc::pathsearch),
    ("setmaxevaldepth", etc::setmaxevaldepth),
    ("vars", etc::vars),
    ("var", etc::var),
];

/// Install every built-in primitive.
pub fn register_builtins(interp: &mut Interpreter) {
    for &(name, primitive) in BUILTINS {
        interp.register_primitive(name, primitive);
    }
}
