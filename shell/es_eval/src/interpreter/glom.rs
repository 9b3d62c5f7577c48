//! Word expansion.
//!
//! `glom1` turns a word-class tree into a list. `glom2` does the same and
//! also reports, per element, which bytes came from unquoted text, so the
//! result can be globbed or used as a pattern.

use std::rc::Rc;

use es_ir::{Tree, TreeRef};
use es_runtime::errors::{bad_subscript, multi_word_subscript_variable, null_subscript_variable};
use es_runtime::{
    atoi, extract_bindings, Binding, Closure, EvalError, EvalResult, List, ListBuilder, Quote,
    Term,
};
use es_stack::ensure_sufficient_stack;

use super::Interpreter;
use crate::glob::glob;
use crate::EvalFlags;

fn termcat(left: &Term, right: &Term) -> Term {
    Term::from(format!("{}{}", left.text(), right.text()))
}

/// Cartesian concatenation: every element of `left` joined with every
/// element of `right`, the right operand varying fastest.
pub fn concat(left: &List, right: &List) -> List {
    let mut out = ListBuilder::with_capacity(left.len() * right.len());
    for l in left {
        for r in right {
            out.push(termcat(l, r));
        }
    }
    out.finish()
}

/// [`concat`] that also combines the quote states of the operands.
fn qconcat(
    (left, left_quotes): (&List, &[Quote]),
    (right, right_quotes): (&List, &[Quote]),
    out: &mut ListBuilder,
    quotes: &mut Vec<Quote>,
) {
    for (l, lq) in left.iter().zip(left_quotes) {
        let ltext = l.text();
        for (r, rq) in right.iter().zip(right_quotes) {
            let rtext = r.text();
            quotes.push(lq.concat(&ltext, rq, &rtext));
            out.push(Term::from(format!("{ltext}{rtext}")));
        }
    }
}

fn bound(text: &str) -> Result<usize, EvalError> {
    let n = atoi(text);
    if n < 1 {
        return Err(bad_subscript(text));
    }
    Ok(usize::try_from(n).unwrap_or(usize::MAX))
}

/// Select elements of `list` by 1-based subscripts.
///
/// Subscripts are `N`, `N ... M`, `N ...`, `... M` and `...`; an upper
/// bound past the end is clamped, a lower bound past the end selects
/// nothing.
pub fn subscript(list: &List, subscripts: &List) -> Result<List, EvalError> {
    let items: Vec<&Term> = list.iter().collect();
    let subs: Vec<_> = subscripts.iter().map(Term::text).collect();
    let len = items.len();
    let mut out = ListBuilder::default();

    let mut i = 0;
    while i < subs.len() {
        let leading = i == 0 && subs[0] == "...";
        let lo = if leading {
            1
        } else {
            i += 1;
            bound(&subs[i - 1])?
        };
        let hi = if leading || subs.get(i).is_some_and(|s| s == "...") {
            i += 1;
            match subs.get(i) {
                None => len,
                Some(s) => {
                    i += 1;
                    bound(s)?.min(len)
                }
            }
        } else {
            lo
        };
        if lo > len || hi < lo {
            continue;
        }
        for term in &items[lo - 1..hi] {
            out.push((*term).clone());
        }
    }
    Ok(out.finish())
}

impl Interpreter {
    /// Expand `tree`; with `globit`, wildcards are matched against the
    /// filesystem.
    pub fn glom(&mut self, tree: Option<&TreeRef>, binding: &Binding, globit: bool) -> EvalResult {
        if globit {
            let (list, quotes) = self.glom2(tree, binding)?;
            Ok(glob(list, &quotes))
        } else {
            self.glom1(tree, binding)
        }
    }

    /// Expand without tracking quotes.
    pub fn glom1(&mut self, tree: Option<&TreeRef>, binding: &Binding) -> EvalResult {
        let mut out = ListBuilder::default();
        let mut next = tree;
        while let Some(node) = next {
            next = None;
            match &**node {
                Tree::Word(s) | Tree::Qword(s) => out.push(Term::str(s.as_str())),
                Tree::Thunk(_) | Tree::Lambda { .. } => {
                    out.push(Term::closure(Closure::new(Rc::clone(node), binding.clone())));
                }
                Tree::Prim(_) => {
                    out.push(Term::closure(Closure::new(Rc::clone(node), Binding::new())));
                }
                Tree::Closure { .. } => {
                    out.push(Term::closure(extract_bindings(node, &mut Vec::new())?));
                }
                Tree::Var(name) => {
                    let names = self.glom1(Some(name), binding)?;
                    for name in &names {
                        out.extend_from(&self.varlookup(&name.text(), binding)?);
                    }
                }
                Tree::Varsub { name, subscript: index } => {
                    let names = self.glom1(Some(name), binding)?;
                    let name = match (names.first(), names.len()) {
                        (None, _) => return Err(null_subscript_variable().into()),
                        (Some(name), 1) => name.text().into_owned(),
                        _ => return Err(multi_word_subscript_variable().into()),
                    };
                    let value = self.varlookup(&name, binding)?;
                    let index = self.glom1(Some(index), binding)?;
                    out.extend_from(&subscript(&value, &index)?);
                }
                Tree::Call(body) => {
                    let result = ensure_sufficient_stack(|| {
                        self.walk(Some(body), binding, EvalFlags::empty())
                    })?;
                    out.extend_from(&result);
                }
                Tree::List { car, cdr } => {
                    let head = ensure_sufficient_stack(|| self.glom1(Some(car), binding))?;
                    out.extend_from(&head);
                    next = cdr.as_ref();
                }
                Tree::Concat(left, right) => {
                    let left = ensure_sufficient_stack(|| self.glom1(Some(left), binding))?;
                    let right = ensure_sufficient_stack(|| self.glom1(Some(right), binding))?;
                    out.extend_from(&concat(&left, &right));
                }
                other => {
                    return Err(EvalError::custom(
                        "es:glom",
                        format!("bad node kind {:?}", other.kind()),
                    )
                    .into());
                }
            }
        }
        Ok(out.finish())
    }

    /// Expand, reporting the quote state of every element.
    ///
    /// Only bare words produce unquoted text; anything expanded by
    /// [`Interpreter::glom1`] counts as quoted.
    pub fn glom2(
        &mut self,
        tree: Option<&TreeRef>,
        binding: &Binding,
    ) -> EvalResult<(List, Vec<Quote>)> {
        let mut out = ListBuilder::default();
        let mut quotes = Vec::new();
        let mut next = tree;
        while let Some(node) = next {
            next = None;
            match &**node {
                Tree::Word(s) => {
                    out.push(Term::str(s.as_str()));
                    quotes.push(Quote::Unquoted);
                }
                Tree::List { car, cdr } => {
                    let (head, head_quotes) =
                        ensure_sufficient_stack(|| self.glom2(Some(car), binding))?;
                    out.extend_from(&head);
                    quotes.extend(head_quotes);
                    next = cdr.as_ref();
                }
                Tree::Concat(left, right) => {
                    let (left, lq) = ensure_sufficient_stack(|| self.glom2(Some(left), binding))?;
                    let (right, rq) = ensure_sufficient_stack(|| self.glom2(Some(right), binding))?;
                    qconcat((&left, &lq), (&right, &rq), &mut out, &mut quotes);
                }
                _ => {
                    let list = self.glom1(Some(node), binding)?;
                    quotes.extend(std::iter::repeat(Quote::Quoted).take(list.len()));
                    out.extend_from(&list);
                }
            }
        }
        Ok((out.finish(), quotes))
    }
}
