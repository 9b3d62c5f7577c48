use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;

use crate::Closure;

/// An atomic shell value: a string or a closure.
#[derive(Clone, Debug)]
pub enum Term {
    Str(Rc<str>),
    Closure(Rc<Closure>),
}

impl Term {
    pub fn str(s: impl Into<Rc<str>>) -> Self {
        Term::Str(s.into())
    }

    pub fn closure(closure: Rc<Closure>) -> Self {
        Term::Closure(closure)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Term::Str(s) => Some(s),
            Term::Closure(_) => None,
        }
    }

    pub fn as_closure(&self) -> Option<&Rc<Closure>> {
        match self {
            Term::Str(_) => None,
            Term::Closure(c) => Some(c),
        }
    }

    pub fn is_closure(&self) -> bool {
        matches!(self, Term::Closure(_))
    }

    /// The string form of the term. Closures are unparsed.
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Term::Str(s) => Cow::Borrowed(s),
            Term::Closure(c) => Cow::Owned(c.to_string()),
        }
    }

    /// Whether this is the string `s`. Closures never compare equal.
    pub fn is(&self, s: &str) -> bool {
        self.as_str() == Some(s)
    }
}

impl PartialEq for Term {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Term::Str(a), Term::Str(b)) => a == b,
            (Term::Closure(a), Term::Closure(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for Term {}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Str(s) => f.write_str(s),
            Term::Closure(c) => write!(f, "{c}"),
        }
    }
}

impl From<&str> for Term {
    fn from(s: &str) -> Self {
        Term::str(s)
    }
}

impl From<String> for Term {
    fn from(s: String) -> Self {
        Term::str(s)
    }
}
