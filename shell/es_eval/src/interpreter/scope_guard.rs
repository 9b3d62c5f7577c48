//! RAII guard for dynamically scoped variables.
//!
//! `local` and the `$0` of a function call temporarily replace a global
//! variable. [`ScopedVar`] puts the old value back when dropped, so the
//! restore happens on every way out of the scope: normal return, an
//! error or control signal propagated with `?`, or a panic.
//!
//! # Design
//!
//! The guard holds `&mut Interpreter` and implements `Deref`/`DerefMut`,
//! so the body of the scope runs through the guard itself:
//!
//! ```text
//! let mut scoped = interpreter.scoped_var("x", value)?;
//! scoped.walk(body, &binding, flags)?;
//! // `x` restored here
//! ```

use std::ops::{Deref, DerefMut};

use es_runtime::{validate_var, EvalResult, List};
use tracing::warn;

use super::Interpreter;

/// Restores a global variable on drop.
///
/// Both setting and restoring go through the variable's settor, like any
/// other assignment. A settor that fails while restoring cannot propagate
/// its error from `drop`; the saved value is then restored as is.
pub struct ScopedVar<'a> {
    interpreter: &'a mut Interpreter,
    name: String,
    saved: List,
}

impl Drop for ScopedVar<'_> {
    fn drop(&mut self) {
        let saved = std::mem::take(&mut self.saved);
        let restored = match self.interpreter.call_settor(&self.name, saved.clone()) {
            Ok(value) => value,
            Err(signal) => {
                warn!(variable = %self.name, %signal, "settor failed while restoring");
                saved
            }
        };
        self.interpreter.set_global(&self.name, restored);
    }
}

impl Deref for ScopedVar<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedVar<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl Interpreter {
    /// Give the global `name` the value `defn` until the guard is dropped.
    pub fn scoped_var(&mut self, name: &str, defn: List) -> EvalResult<ScopedVar<'_>> {
        validate_var(name)?;
        let defn = self.call_settor(name, defn)?;
        let saved = self.get_global(name);
        self.set_global(name, defn);
        Ok(ScopedVar {
            interpreter: self,
            name: name.to_string(),
            saved,
        })
    }

    /// Run `f` with the global `name` set to `defn`.
    pub fn with_var<T>(
        &mut self,
        name: &str,
        defn: List,
        f: impl FnOnce(&mut Interpreter) -> EvalResult<T>,
    ) -> EvalResult<T> {
        let mut scoped = self.scoped_var(name, defn)?;
        f(&mut *scoped)
    }
}
