//! Assignment, `let`, `local`, `for`, and the `~`/`~~` tests.

use es_ir::{Tree, TreeRef};
use es_runtime::errors::null_variable_name;
use es_runtime::{lfalse, ltrue, Binding, EvalResult, List, Signal, Term};
use tracing::debug;

use super::Interpreter;
use crate::pattern::{extract_matches, list_match};
use crate::EvalFlags;

/// Hand out `values` to `names` positionally.
///
/// Each name takes one value, except that the last name, or a name that
/// sees only one value left, takes everything remaining. Names past the
/// end of the values get the empty list.
pub(super) fn distribute<N, E>(
    names: impl IntoIterator<Item = N>,
    mut values: List,
    mut bind: impl FnMut(&str, List) -> Result<(), E>,
) -> Result<(), E>
where
    N: AsRef<str>,
{
    let mut names = names.into_iter().peekable();
    while let Some(name) = names.next() {
        let value = if values.is_empty() {
            List::new()
        } else if names.peek().is_none() || values.rest().is_empty() {
            std::mem::take(&mut values)
        } else {
            let value: List = values.iter().take(1).cloned().collect();
            values = values.rest();
            value
        };
        bind(name.as_ref(), value)?;
    }
    Ok(())
}

fn definition(def: &TreeRef) -> (&TreeRef, Option<&TreeRef>) {
    match &**def {
        Tree::Assign { lhs, rhs } => (lhs, rhs.as_ref()),
        other => panic!("definition is not an assignment: {other}"),
    }
}

impl Interpreter {
    /// `a b c = values`. Returns the values.
    pub(super) fn assign(
        &mut self,
        lhs: &TreeRef,
        rhs: Option<&TreeRef>,
        binding: &Binding,
    ) -> EvalResult {
        let vars = self.glom(Some(lhs), binding, false)?;
        if vars.is_empty() {
            return Err(null_variable_name("es:assign").into());
        }
        let values = self.glom(rhs, binding, true)?;
        let result = values.clone();
        distribute(vars.iter().map(Term::text), values, |name, value| {
            self.vardef(name, binding, value)
        })?;
        Ok(result)
    }

    /// Frames for the definitions of a `let`, pushed onto `outer`.
    ///
    /// Names and values are expanded in `context`, so definitions cannot
    /// see each other.
    pub fn letbindings(
        &mut self,
        defs: Option<&TreeRef>,
        outer: &Binding,
        context: &Binding,
    ) -> EvalResult<Binding> {
        let mut binding = outer.clone();
        for def in Tree::elements(defs) {
            let (lhs, rhs) = definition(def);
            let vars = self.glom(Some(lhs), context, false)?;
            let values = self.glom(rhs, context, true)?;
            if vars.is_empty() {
                return Err(null_variable_name("es:let").into());
            }
            distribute(vars.iter().map(Term::text), values, |name, value| {
                binding = Binding::bind(name, value, &binding)?;
                Ok::<_, Signal>(())
            })?;
        }
        Ok(binding)
    }

    /// `local (defs) body`: set globals for the duration of `body`.
    pub(super) fn local(
        &mut self,
        defs: Option<&TreeRef>,
        body: Option<&TreeRef>,
        binding: &Binding,
        flags: EvalFlags,
    ) -> EvalResult {
        let dynamic = self.letbindings(defs, &Binding::new(), binding)?.reverse();
        let frames: Vec<(String, List)> = dynamic
            .frames()
            .map(|frame| (frame.name().to_string(), frame.defn()))
            .collect();
        self.localbind(&frames, body, binding, flags)
    }

    fn localbind(
        &mut self,
        frames: &[(String, List)],
        body: Option<&TreeRef>,
        lexical: &Binding,
        flags: EvalFlags,
    ) -> EvalResult {
        match frames.split_first() {
            None => self.walk(body, lexical, flags),
            Some(((name, defn), rest)) => {
                let mut scoped = self.scoped_var(name, defn.clone())?;
                scoped.localbind(rest, body, lexical, flags)
            }
        }
    }

    /// `for (vars = list; ...) body`.
    ///
    /// All clauses advance together, one element per iteration, until every
    /// list is used up; an exhausted list binds its variables to the empty
    /// list. Every variable of one clause sees the same element. `break`
    /// ends the loop with its value.
    pub(super) fn forloop(
        &mut self,
        defs: Option<&TreeRef>,
        body: Option<&TreeRef>,
        binding: &Binding,
        flags: EvalFlags,
    ) -> EvalResult {
        let mut clauses: Vec<(Vec<String>, List)> = Vec::new();
        for def in Tree::elements(defs) {
            let (lhs, rhs) = definition(def);
            let vars = self.glom(Some(lhs), binding, false)?;
            let values = self.glom(rhs, binding, true)?;
            if vars.is_empty() {
                return Err(null_variable_name("es:for").into());
            }
            let names = vars.iter().map(|t| t.text().into_owned()).collect();
            clauses.push((names, values));
            self.check_interrupt()?;
        }

        let mut result = ltrue();
        loop {
            let mut exhausted = true;
            let mut frame = binding.clone();
            for (names, values) in &mut clauses {
                let value = match values.first().cloned() {
                    Some(term) => {
                        exhausted = false;
                        *values = values.rest();
                        List::single(term)
                    }
                    None => List::new(),
                };
                for name in names.iter() {
                    frame = Binding::bind(name, value.clone(), &frame)?;
                }
            }
            if exhausted {
                return Ok(result);
            }
            match self.walk(body, &frame, flags & EvalFlags::EXIT_ON_FALSE) {
                Ok(list) => result = list,
                Err(Signal::Break(value)) => {
                    debug!("break caught by for");
                    return Ok(value);
                }
                Err(signal) => return Err(signal),
            }
            self.check_interrupt()?;
        }
    }

    /// `~ subject patterns`
    pub(super) fn match_pattern(
        &mut self,
        subject: Option<&TreeRef>,
        pattern: Option<&TreeRef>,
        binding: &Binding,
    ) -> EvalResult {
        let subjects = self.glom(subject, binding, true)?;
        let (patterns, quotes) = self.glom2(pattern, binding)?;
        Ok(if list_match(&subjects, &patterns, &quotes) {
            ltrue()
        } else {
            lfalse()
        })
    }

    /// `~~ subject patterns`: the text matched by each wildcard.
    pub(super) fn extract_pattern(
        &mut self,
        subject: Option<&TreeRef>,
        pattern: Option<&TreeRef>,
        binding: &Binding,
    ) -> EvalResult {
        let subjects = self.glom(subject, binding, true)?;
        let (patterns, quotes) = self.glom2(pattern, binding)?;
        Ok(extract_matches(&subjects, &patterns, &quotes))
    }
}
