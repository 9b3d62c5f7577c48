//! Shared helpers for script tests.

use es_eval::{buffer_handler, Interpreter, InterpreterBuilder, TreeRef};
use es_ir::{list, prim, thunk};

/// An interpreter whose output is captured.
pub fn shell() -> Interpreter {
    InterpreterBuilder::new().print_handler(buffer_handler()).build()
}

/// A command: the head followed by its arguments.
pub fn cmd(items: impl IntoIterator<Item = TreeRef>) -> TreeRef {
    list(items).expect("a command has at least a head")
}

/// `$&name args ...`
pub fn prim_cmd(name: &str, args: impl IntoIterator<Item = TreeRef>) -> TreeRef {
    cmd(std::iter::once(prim(name)).chain(args))
}

pub fn echo(args: impl IntoIterator<Item = TreeRef>) -> TreeRef {
    prim_cmd("echo", args)
}

pub fn result(args: impl IntoIterator<Item = TreeRef>) -> TreeRef {
    prim_cmd("result", args)
}

/// `{tree}`
pub fn block(tree: TreeRef) -> TreeRef {
    thunk(Some(tree))
}

/// Run `tree` and return its result as strings.
pub fn run(interp: &mut Interpreter, tree: &TreeRef) -> Vec<String> {
    interp.run(tree).unwrap().to_strings()
}

pub fn output(interp: &Interpreter) -> String {
    interp.print_handler().get_output()
}

