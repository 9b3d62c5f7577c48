//! Tree-walking interpreter for es.
//!
//! # Architecture
//!
//! The [`Interpreter`] owns everything that outlives a single command: the
//! global variable table, the primitive table, the evaluation depth counter
//! and the output sink. Lexical state travels as an explicit [`Binding`]
//! argument instead.
//!
//! The evaluator is split by concern:
//!
//! - `glom.rs` - word expansion, subscripts, concatenation
//! - `walk.rs` - command trees
//! - `control.rs` - assignment, `let`, `local`, `for`, `~`, `~~`
//! - `dispatch.rs` - `eval` and argument binding
//! - `vars.rs` - the variable store (lexical, then global)
//! - `process.rs` - path search and running external programs
//!
//! # Depth accounting
//!
//! Every `eval` entry bumps `eval_depth` and every exit, including an
//! unwinding one, drops it again. Reaching `max_eval_depth` raises
//! `es:eval max-eval-depth exceeded`, which scripts can tell apart from
//! ordinary failures.

mod builder;
mod control;
mod dispatch;
mod glom;
mod process;
mod scope_guard;
mod vars;
mod walk;

pub use builder::InterpreterBuilder;
pub use dispatch::bindargs;
pub use glom::{concat, subscript};
pub use process::{check_executable, is_absolute};
pub use scope_guard::ScopedVar;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use es_ir::TreeRef;
use es_runtime::errors::{interrupted, unknown_primitive};
use es_runtime::{Binding, Dict, EvalResult, List, Term};

use crate::print_handler::SharedPrintHandler;
use crate::EvalFlags;

/// A built-in command, called with its arguments (the head removed).
pub type Primitive = fn(&mut Interpreter, List, &Binding, EvalFlags) -> EvalResult;

/// Depth limit used until a script changes it.
pub const DEFAULT_MAX_EVAL_DEPTH: usize = 640;

/// Smallest limit `$&setmaxevaldepth` accepts.
pub const MIN_MAX_EVAL_DEPTH: usize = 100;

/// The es evaluator.
///
/// Create one with [`InterpreterBuilder`]; [`Interpreter::new`] gives the
/// default configuration.
pub struct Interpreter {
    /// Global (dynamic) variables.
    vars: Dict<List>,
    prims: Dict<Primitive>,
    eval_depth: usize,
    max_eval_depth: usize,
    print_handler: SharedPrintHandler,
    /// Set by the host when the user interrupts; cleared when noticed.
    interrupt: Arc<AtomicBool>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    /// Evaluate a top-level command tree in the global scope.
    pub fn run(&mut self, tree: &TreeRef) -> EvalResult {
        self.walk(Some(tree), &Binding::new(), EvalFlags::empty())
    }

    /// Run a single term as a command in the global scope.
    pub fn eval1(&mut self, term: Term, flags: EvalFlags) -> EvalResult {
        self.eval(List::single(term), &Binding::new(), flags)
    }

    /// Call primitive `name`.
    pub fn prim(
        &mut self,
        name: &str,
        args: List,
        binding: &Binding,
        flags: EvalFlags,
    ) -> EvalResult {
        let Some(&primitive) = self.prims.get(name) else {
            return Err(unknown_primitive(name).into());
        };
        primitive(self, args, binding, flags)
    }

    /// Add or replace primitive `name`.
    pub fn register_primitive(&mut self, name: &str, primitive: Primitive) {
        self.prims.insert(name, primitive);
    }

    pub fn has_primitive(&self, name: &str) -> bool {
        self.prims.get(name).is_some()
    }

    /// Names of all primitives, sorted.
    pub fn primitive_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.prims.iter().map(|(name, _)| name.to_string()).collect();
        names.sort();
        names
    }

    /// Raise `signal sigint` if an interrupt arrived since the last check.
    pub fn check_interrupt(&self) -> EvalResult<()> {
        if self.interrupt.swap(false, Ordering::SeqCst) {
            return Err(interrupted());
        }
        Ok(())
    }

    /// The flag a host sets to interrupt evaluation.
    pub fn interrupt_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupt)
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    /// Number of `eval` calls currently active.
    pub fn eval_depth(&self) -> usize {
        self.eval_depth
    }

    pub fn max_eval_depth(&self) -> usize {
        self.max_eval_depth
    }

    pub fn set_max_eval_depth(&mut self, depth: usize) {
        self.max_eval_depth = depth;
    }
}
