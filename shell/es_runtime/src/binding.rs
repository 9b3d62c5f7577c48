//! Lexical environments.
//!
//! A [`Binding`] is a chain of frames, newest first. Frames are shared by
//! every closure that captured them; the definition held by a frame is the
//! only mutable part, so assignment to a lexically bound variable is seen
//! by all of them.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::errors::{invalid_variable_name, zero_length_variable_name};
use crate::{EvalError, List};

/// One `name = definition` association.
pub struct Frame {
    name: Rc<str>,
    defn: RefCell<List>,
    next: Option<Rc<Frame>>,
}

impl Frame {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn defn(&self) -> List {
        self.defn.borrow().clone()
    }

    pub fn set_defn(&self, defn: List) {
        *self.defn.borrow_mut() = defn;
    }
}

/// A chain of frames. The empty chain is the global scope.
#[derive(Clone, Default)]
pub struct Binding {
    head: Option<Rc<Frame>>,
}

/// Reject names the variable store cannot hold.
pub fn validate_var(name: &str) -> Result<(), EvalError> {
    if name.is_empty() {
        return Err(zero_length_variable_name());
    }
    if name.contains(['=', '\0']) {
        return Err(invalid_variable_name(name));
    }
    Ok(())
}

impl Binding {
    pub const fn new() -> Self {
        Binding { head: None }
    }

    /// Push a frame binding `name` to `defn` in front of `next`.
    pub fn bind(name: &str, defn: List, next: &Binding) -> Result<Binding, EvalError> {
        validate_var(name)?;
        Ok(Binding {
            head: Some(Rc::new(Frame {
                name: name.into(),
                defn: RefCell::new(defn),
                next: next.head.clone(),
            })),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn frames(&self) -> Frames<'_> {
        Frames {
            next: self.head.as_deref(),
        }
    }

    /// The innermost frame for `name`.
    pub fn frame(&self, name: &str) -> Option<&Frame> {
        self.frames().find(|f| f.name() == name)
    }

    pub fn lookup(&self, name: &str) -> Option<List> {
        self.frame(name).map(Frame::defn)
    }

    /// Like [`Binding::lookup`] for the name `prefix ++ name`.
    pub fn lookup2(&self, prefix: &str, name: &str) -> Option<List> {
        self.frames()
            .find(|f| {
                let n = f.name();
                n.len() == prefix.len() + name.len()
                    && n.starts_with(prefix)
                    && n.ends_with(name)
            })
            .map(Frame::defn)
    }

    /// Reverse the chain, reusing frames no one else holds.
    #[must_use]
    pub fn reverse(mut self) -> Binding {
        let mut prev: Option<Rc<Frame>> = None;
        let mut cur = self.head.take();
        while let Some(mut frame) = cur {
            if let Some(f) = Rc::get_mut(&mut frame) {
                cur = std::mem::replace(&mut f.next, prev);
                prev = Some(frame);
            } else {
                cur = frame.next.clone();
                prev = Some(Rc::new(Frame {
                    name: Rc::clone(&frame.name),
                    defn: RefCell::new(frame.defn()),
                    next: prev,
                }));
            }
        }
        Binding { head: prev }
    }

    pub fn ptr_eq(&self, other: &Binding) -> bool {
        match (&self.head, &other.head) {
            (None, None) => true,
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Drop for Binding {
    fn drop(&mut self) {
        let mut cur = self.head.take();
        while let Some(frame) = cur {
            match Rc::try_unwrap(frame) {
                Ok(mut f) => cur = f.next.take(),
                Err(_) => break,
            }
        }
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.frames().map(|fr| (fr.name(), fr.defn())))
            .finish()
    }
}

/// Iterator over the frames of a [`Binding`], innermost first.
pub struct Frames<'a> {
    next: Option<&'a Frame>,
}

impl<'a> Iterator for Frames<'a> {
    type Item = &'a Frame;

    fn next(&mut self) -> Option<Self::Item> {
        let frame = self.next?;
        self.next = frame.next.as_deref();
        Some(frame)
    }
}
