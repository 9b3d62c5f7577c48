//! es Eval - the evaluator of the es shell.
//!
//! # Architecture
//!
//! Evaluation is three mutually recursive operations on an [`Interpreter`]:
//!
//! - `glom`: expand a word-class tree into a [`List`], including variable
//!   references, cartesian concatenation and filename globbing
//! - `walk`: evaluate a command tree (assignment, `let`, `local`, `for`,
//!   `~`, or a command to hand to `eval`)
//! - `eval`: run a list as a command, dispatching on its head (primitive,
//!   thunk, lambda, function, external program)
//!
//! Tail positions (`let` bodies, function name resolution) loop instead of
//! recursing. Everything that unwinds is an [`es_runtime::Signal`].
//!
//! # Re-exports
//!
//! The runtime value types from `es_runtime` and the tree types from
//! `es_ir` are re-exported so hosts only need this crate.

mod flags;
mod glob;
pub mod interpreter;
mod pattern;
mod print_handler;
pub mod prims;

use std::sync::Once;

pub use es_ir::{Tree, TreeRef};
pub use es_runtime::{
    Binding, Closure, Dict, EvalError, EvalErrorKind, EvalResult, List, Quote, Signal, Term,
};

pub use flags::EvalFlags;
pub use glob::glob;
pub use interpreter::{Interpreter, InterpreterBuilder, Primitive, ScopedVar};
pub use pattern::{extract_matches, list_match, matches};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, BufferPrintHandler, PrintHandlerImpl,
    SharedPrintHandler, StdoutPrintHandler,
};

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset, and only ever runs once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
