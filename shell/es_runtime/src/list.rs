//! Persistent singly linked lists of terms.
//!
//! Cells are immutable and shared. `append` copies the cells of its left
//! operand and shares the right one, so a list can be extended at the
//! front or spliced in front of another without disturbing existing
//! owners. `reverse` consumes its input and reuses any cell nobody else
//! holds.

use std::fmt;
use std::rc::Rc;

use crate::Term;

struct Node {
    term: Term,
    next: Option<Rc<Node>>,
}

/// A list of terms. The empty list is the absence of a cell.
#[derive(Clone, Default)]
pub struct List {
    head: Option<Rc<Node>>,
}

impl List {
    pub const fn new() -> Self {
        List { head: None }
    }

    /// Allocate one cell in front of `next`.
    pub fn cons(term: Term, next: List) -> Self {
        List {
            head: Some(Rc::new(Node {
                term,
                next: next.into_head(),
            })),
        }
    }

    pub fn single(term: impl Into<Term>) -> Self {
        List::cons(term.into(), List::new())
    }

    pub fn from_strs(items: &[&str]) -> Self {
        items.iter().map(|s| Term::from(*s)).collect()
    }

    fn into_head(mut self) -> Option<Rc<Node>> {
        self.head.take()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn first(&self) -> Option<&Term> {
        self.head.as_ref().map(|n| &n.term)
    }

    /// Everything after the first cell, shared.
    pub fn rest(&self) -> List {
        List {
            head: self.head.as_ref().and_then(|n| n.next.clone()),
        }
    }

    /// The sublist starting at cell `n` (0-based), shared.
    pub fn skip(&self, n: usize) -> List {
        let mut cur = self.head.as_ref();
        for _ in 0..n {
            match cur {
                Some(node) => cur = node.next.as_ref(),
                None => break,
            }
        }
        List { head: cur.cloned() }
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// 1-based element access; negative indices count from the end and
    /// zero is never a valid index.
    pub fn nth(&self, index: i64) -> Option<&Term> {
        let len = i64::try_from(self.len()).ok()?;
        let pos = if index < 0 { len + index + 1 } else { index };
        if pos < 1 || pos > len {
            return None;
        }
        self.iter().nth(usize::try_from(pos - 1).ok()?)
    }

    /// Reverse in place, reusing every cell that has no other owner.
    #[must_use]
    pub fn reverse(mut self) -> List {
        let mut prev: Option<Rc<Node>> = None;
        let mut cur = self.head.take();
        while let Some(mut node) = cur {
            if let Some(cell) = Rc::get_mut(&mut node) {
                cur = std::mem::replace(&mut cell.next, prev);
                prev = Some(node);
            } else {
                cur = node.next.clone();
                prev = Some(Rc::new(Node {
                    term: node.term.clone(),
                    next: prev,
                }));
            }
        }
        List { head: prev }
    }

    /// Copy the cells of `self` in front of `tail`, which is shared.
    pub fn append(&self, tail: &List) -> List {
        let mut builder = ListBuilder::with_capacity(self.len());
        builder.extend_from(self);
        builder.finish_onto(tail.clone())
    }

    /// A fresh copy of every cell.
    pub fn copy(&self) -> List {
        self.append(&List::new())
    }

    /// Sort by string value. Lists of fewer than two elements are
    /// returned untouched.
    #[must_use]
    pub fn sorted(self) -> List {
        if self.head.as_ref().map_or(true, |n| n.next.is_none()) {
            return self;
        }
        let mut terms: Vec<Term> = self.iter().cloned().collect();
        terms.sort_by(|a, b| a.text().cmp(&b.text()));
        terms.into_iter().collect()
    }

    /// Whether both lists start at the same cell.
    pub fn ptr_eq(&self, other: &List) -> bool {
        match (&self.head, &other.head) {
            (None, None) => true,
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    pub fn to_strings(&self) -> Vec<String> {
        self.iter().map(|t| t.text().into_owned()).collect()
    }

    /// Join the string forms of all terms with `sep`.
    pub fn join(&self, sep: &str) -> String {
        self.to_strings().join(sep)
    }
}

impl Drop for List {
    fn drop(&mut self) {
        let mut cur = self.head.take();
        while let Some(node) = cur {
            match Rc::try_unwrap(node) {
                Ok(mut cell) => cur = cell.next.take(),
                Err(_) => break,
            }
        }
    }
}

impl PartialEq for List {
    fn eq(&self, other: &Self) -> bool {
        self.iter().eq(other.iter())
    }
}

impl Eq for List {}

impl fmt::Debug for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl fmt::Display for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{term}")?;
        }
        Ok(())
    }
}

impl FromIterator<Term> for List {
    fn from_iter<I: IntoIterator<Item = Term>>(iter: I) -> Self {
        let mut builder = ListBuilder::default();
        for term in iter {
            builder.push(term);
        }
        builder.finish()
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Term;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Borrowing iterator over a [`List`].
pub struct Iter<'a> {
    next: Option<&'a Node>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Term;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next.as_deref();
        Some(&node.term)
    }
}

/// Accumulates terms left to right and links them once at the end.
#[derive(Default)]
pub struct ListBuilder {
    terms: Vec<Term>,
}

impl ListBuilder {
    pub fn with_capacity(n: usize) -> Self {
        ListBuilder {
            terms: Vec::with_capacity(n),
        }
    }

    pub fn push(&mut self, term: Term) {
        self.terms.push(term);
    }

    pub fn extend_from(&mut self, list: &List) {
        self.terms.extend(list.iter().cloned());
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn finish(self) -> List {
        self.finish_onto(List::new())
    }

    /// Link the collected terms in front of `tail`.
    pub fn finish_onto(self, tail: List) -> List {
        self.terms
            .into_iter()
            .rev()
            .fold(tail, |rest, term| List::cons(term, rest))
    }
}
