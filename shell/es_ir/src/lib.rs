//! Syntax trees for the es shell.
//!
//! The evaluator never mutates a tree: nodes are built once by the front end
//! (or by the construction helpers in [`build`]) and shared through
//! [`TreeRef`] so closures can hold on to the fragment they were created
//! from. Empty sub-trees are `None` wherever the grammar allows them to be
//! missing (`{}`, `x =`, `let () ...`).

use std::rc::Rc;

pub mod build;
mod unparse;

pub use build::*;
pub use unparse::{needs_quotes, quote_word};

/// Shared handle to a syntax tree node.
pub type TreeRef = Rc<Tree>;

/// A node of the es syntax tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tree {
    /// Unquoted word. Glob characters in it are live.
    Word(String),
    /// Quoted word.
    Qword(String),
    /// `$&name`
    Prim(String),
    /// `<={...}`: the body is evaluated and its result used as a value.
    Call(TreeRef),
    /// `{...}`
    Thunk(Option<TreeRef>),
    /// `@ params {body}`
    Lambda {
        params: Option<TreeRef>,
        body: Option<TreeRef>,
    },
    /// `$name`
    Var(TreeRef),
    /// `$name(subscript)`
    Varsub { name: TreeRef, subscript: TreeRef },
    /// `a^b`
    Concat(TreeRef, TreeRef),
    /// One cell of a tree list.
    List {
        car: TreeRef,
        cdr: Option<TreeRef>,
    },
    /// `lhs = rhs`
    Assign {
        lhs: TreeRef,
        rhs: Option<TreeRef>,
    },
    /// `let (defs) body`
    Let {
        defs: Option<TreeRef>,
        body: Option<TreeRef>,
    },
    /// `%closure (defs) body`
    Closure {
        defs: Option<TreeRef>,
        body: Option<TreeRef>,
    },
    /// `local (defs) body`
    Local {
        defs: Option<TreeRef>,
        body: Option<TreeRef>,
    },
    /// `for (defs) body`
    For {
        defs: Option<TreeRef>,
        body: Option<TreeRef>,
    },
    /// `~ subject pattern`
    Match {
        subject: Option<TreeRef>,
        pattern: Option<TreeRef>,
    },
    /// `~~ subject pattern`
    Extract {
        subject: Option<TreeRef>,
        pattern: Option<TreeRef>,
    },
}

/// Discriminant of a [`Tree`], for diagnostics and tracing.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Word,
    Qword,
    Prim,
    Call,
    Thunk,
    Lambda,
    Var,
    Varsub,
    Concat,
    List,
    Assign,
    Let,
    Closure,
    Local,
    For,
    Match,
    Extract,
}

impl Tree {
    pub fn kind(&self) -> NodeKind {
        match self {
            Tree::Word(_) => NodeKind::Word,
            Tree::Qword(_) => NodeKind::Qword,
            Tree::Prim(_) => NodeKind::Prim,
            Tree::Call(_) => NodeKind::Call,
            Tree::Thunk(_) => NodeKind::Thunk,
            Tree::Lambda { .. } => NodeKind::Lambda,
            Tree::Var(_) => NodeKind::Var,
            Tree::Varsub { .. } => NodeKind::Varsub,
            Tree::Concat(..) => NodeKind::Concat,
            Tree::List { .. } => NodeKind::List,
            Tree::Assign { .. } => NodeKind::Assign,
            Tree::Let { .. } => NodeKind::Let,
            Tree::Closure { .. } => NodeKind::Closure,
            Tree::Local { .. } => NodeKind::Local,
            Tree::For { .. } => NodeKind::For,
            Tree::Match { .. } => NodeKind::Match,
            Tree::Extract { .. } => NodeKind::Extract,
        }
    }

    /// The literal text of a `Word` or `Qword`.
    pub fn as_word(&self) -> Option<&str> {
        match self {
            Tree::Word(s) | Tree::Qword(s) => Some(s),
            _ => None,
        }
    }

    /// Iterate over the elements of a tree list.
    ///
    /// A node that is not a `List` is treated as a one-element list.
    pub fn elements(this: Option<&TreeRef>) -> Elements<'_> {
        Elements { next: this }
    }
}

/// Iterator over the `car`s of a tree list. See [`Tree::elements`].
pub struct Elements<'a> {
    next: Option<&'a TreeRef>,
}

impl<'a> Iterator for Elements<'a> {
    type Item = &'a TreeRef;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        match &**node {
            Tree::List { car, cdr } => {
                self.next = cdr.as_ref();
                Some(car)
            }
            _ => {
                self.next = None;
                Some(node)
            }
        }
    }
}
