//! The variable store.
//!
//! Lookups search the lexical [`Binding`] first and fall back to the global
//! table. Names made only of digits (other than `0`) are positional and
//! index `$*`.

use es_runtime::{validate_var, Binding, EvalResult, List, Term};
use tracing::trace;

use super::Interpreter;
use crate::EvalFlags;

/// `$1`, `$2`, ...
fn is_counting(name: &str) -> bool {
    !name.is_empty() && name != "0" && name.bytes().all(|b| b.is_ascii_digit())
}

/// Variables a settor is never called for.
fn is_special(name: &str) -> bool {
    name == "*" || name == "0"
}

impl Interpreter {
    /// Value of `name`; empty when unset.
    pub fn varlookup(&self, name: &str, binding: &Binding) -> EvalResult {
        if is_counting(name) {
            let args = self.varlookup("*", binding)?;
            let value = name
                .parse::<i64>()
                .ok()
                .and_then(|n| args.nth(n).cloned())
                .map(List::single)
                .unwrap_or_default();
            return Ok(value);
        }
        validate_var(name)?;
        if let Some(frame) = binding.frame(name) {
            return Ok(frame.defn());
        }
        Ok(self.get_global(name))
    }

    /// Value of the variable named `prefix` followed by `name`.
    pub fn varlookup2(&self, prefix: &str, name: &str, binding: &Binding) -> List {
        if let Some(defn) = binding.lookup2(prefix, name) {
            return defn;
        }
        self.vars.get2(prefix, name).cloned().unwrap_or_default()
    }

    /// Assign `defn` to `name`.
    ///
    /// A lexically bound name is updated in its frame. Otherwise the value
    /// goes through the `set-NAME` settor, if any, and into the global
    /// table; an empty value unsets the global.
    pub fn vardef(&mut self, name: &str, binding: &Binding, defn: List) -> EvalResult<()> {
        validate_var(name)?;
        if let Some(frame) = binding.frame(name) {
            frame.set_defn(defn);
            return Ok(());
        }
        let defn = self.call_settor(name, defn)?;
        self.set_global(name, defn);
        Ok(())
    }

    /// Pass `defn` through `set-NAME`, returning what the settor returns.
    pub(super) fn call_settor(&mut self, name: &str, defn: List) -> EvalResult {
        if is_special(name) {
            return Ok(defn);
        }
        let settor = self.varlookup2("set-", name, &Binding::new());
        if settor.is_empty() {
            return Ok(defn);
        }
        trace!(variable = name, "calling settor");
        let mut scoped = self.scoped_var("0", List::single(Term::from(name)))?;
        let result = scoped.eval(settor.append(&defn), &Binding::new(), EvalFlags::empty())?;
        Ok(result.copy())
    }

    /// Global value of `name`, ignoring lexical bindings.
    pub fn get_global(&self, name: &str) -> List {
        self.vars.get(name).cloned().unwrap_or_default()
    }

    /// Set a global without calling its settor. Empty unsets it.
    pub fn set_global(&mut self, name: &str, defn: List) {
        if defn.is_empty() {
            self.vars.remove(name);
        } else {
            self.vars.insert(name, defn);
        }
    }

    /// Names of all global variables, sorted.
    pub fn global_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.vars.iter().map(|(name, _)| name.to_string()).collect();
        names.sort();
        names
    }
}
