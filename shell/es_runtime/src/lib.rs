//! Runtime values of the es shell.
//!
//! Everything the evaluator manipulates lives here: [`Term`]s and the
//! persistent [`List`]s built from them, open-addressing [`Dict`]ionaries,
//! lexical [`Binding`] chains and the [`Closure`]s that capture them, plus
//! the [`Signal`] type used for every non-local exit.
//!
//! Values are reference counted. Lists and bindings share structure
//! freely and are never mutated once another owner can observe them, with
//! the single exception of a binding frame's definition, which assignment
//! updates in place.

mod binding;
mod closure;
mod dict;
pub mod errors;
mod list;
mod quote;
mod status;
mod term;

pub use binding::{validate_var, Binding, Frame, Frames};
pub use closure::{extract_bindings, Closure};
pub use dict::{fnv1a, Dict};
pub use errors::{EvalError, EvalErrorKind, EvalResult, Signal};
pub use list::{Iter, List, ListBuilder};
pub use quote::Quote;
pub use status::{
    atoi, exit_status, is_true, lfalse, ltrue, signal_name, status_from_exit, status_from_signal,
};
pub use term::Term;
