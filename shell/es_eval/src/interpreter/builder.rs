//! `InterpreterBuilder` for creating Interpreter instances with various configurations.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use es_ir::prim;
use es_runtime::{Binding, Closure, Dict, List, Term};

use super::{Interpreter, DEFAULT_MAX_EVAL_DEPTH};
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::prims;

/// Builder for creating Interpreter instances.
///
/// Defaults: output to stdout, a depth limit of
/// [`DEFAULT_MAX_EVAL_DEPTH`], the built-in primitives, and
/// `fn-%pathsearch` bound to `$&pathsearch`.
pub struct InterpreterBuilder {
    max_eval_depth: usize,
    print_handler: Option<SharedPrintHandler>,
    interrupt: Option<Arc<AtomicBool>>,
    default_pathsearch: bool,
    path: Option<Vec<String>>,
}

impl Default for InterpreterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self {
            max_eval_depth: DEFAULT_MAX_EVAL_DEPTH,
            print_handler: None,
            interrupt: None,
            default_pathsearch: true,
            path: None,
        }
    }

    /// Set the evaluation depth limit.
    ///
    /// Taken as given; only `$&setmaxevaldepth` enforces a minimum.
    #[must_use]
    pub fn max_eval_depth(mut self, depth: usize) -> Self {
        self.max_eval_depth = depth;
        self
    }

    /// Set where `echo` and diagnostics go. Default is stdout.
    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    /// Share an interrupt flag with the host.
    #[must_use]
    pub fn interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = Some(flag);
        self
    }

    /// Leave `fn-%pathsearch` undefined.
    #[must_use]
    pub fn without_default_pathsearch(mut self) -> Self {
        self.default_pathsearch = false;
        self
    }

    /// Initial value of `$path`.
    #[must_use]
    pub fn path<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.path = Some(dirs.into_iter().map(Into::into).collect());
        self
    }

    pub fn build(self) -> Interpreter {
        let mut interp = Interpreter {
            vars: Dict::new(),
            prims: Dict::new(),
            eval_depth: 0,
            max_eval_depth: self.max_eval_depth,
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            interrupt: self.interrupt.unwrap_or_default(),
        };
        prims::register_builtins(&mut interp);

        if self.default_pathsearch {
            let search = Closure::new(prim("pathsearch"), Binding::new());
            interp.set_global("fn-%pathsearch", List::single(Term::closure(search)));
        }
        if let Some(dirs) = self.path {
            let path = dirs.into_iter().map(Term::from).collect();
            interp.set_global("path", path);
        }
        interp
    }
}
