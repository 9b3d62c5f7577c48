//! Closures and `%closure` literals.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use es_ir::{quote_word, thunk, Tree, TreeRef};

use crate::errors::{
    bad_closure_primitive, bad_nested_binding_count, improper_nested_binding, null_closure_body,
};
use crate::{atoi, Binding, EvalError, ListBuilder, Term};

/// A tree fragment together with the environment it was created in.
pub struct Closure {
    tree: TreeRef,
    binding: RefCell<Binding>,
}

impl Closure {
    pub fn new(tree: TreeRef, binding: Binding) -> Rc<Closure> {
        assert!(
            !matches!(*tree, Tree::Prim(_)) || binding.is_empty(),
            "primitive closures capture no binding"
        );
        Rc::new(Closure {
            tree,
            binding: RefCell::new(binding),
        })
    }

    pub fn tree(&self) -> &TreeRef {
        &self.tree
    }

    pub fn binding(&self) -> Binding {
        self.binding.borrow().clone()
    }

    /// The primitive name, for `$&name` closures.
    pub fn prim_name(&self) -> Option<&str> {
        match &*self.tree {
            Tree::Prim(name) => Some(name),
            _ => None,
        }
    }

    /// Build a closure from a `%closure(...)` literal.
    pub fn from_literal(tree: &TreeRef) -> Result<Rc<Closure>, EvalError> {
        extract_bindings(tree, &mut Vec::new())
    }

    fn render(&self, out: &mut String, active: &mut Vec<*const Closure>) {
        active.push(std::ptr::from_ref(self));
        let binding = self.binding.borrow();
        if !binding.is_empty() {
            out.push_str("%closure(");
            for (i, frame) in binding.frames().enumerate() {
                if i > 0 {
                    out.push(';');
                }
                out.push_str(&quote_word(frame.name()));
                out.push('=');
                for (j, term) in frame.defn().iter().enumerate() {
                    if j > 0 {
                        out.push(' ');
                    }
                    match term {
                        Term::Str(s) => out.push_str(&quote_word(s)),
                        Term::Closure(c) => {
                            let target = Rc::as_ptr(c);
                            match active.iter().rev().position(|p| std::ptr::eq(*p, target)) {
                                Some(depth) => {
                                    out.push_str(&format!("$&nestedbinding {depth}"));
                                }
                                None => c.render(out, active),
                            }
                        }
                    }
                }
            }
            out.push(')');
        }
        out.push_str(&self.tree.to_string());
        active.pop();
    }
}

impl fmt::Display for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.render(&mut out, &mut Vec::new());
        f.write_str(&out)
    }
}

impl fmt::Debug for Closure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Closure({self})")
    }
}

fn unwrap_single(tree: &TreeRef) -> TreeRef {
    match &**tree {
        Tree::List { car, cdr: None } => Rc::clone(car),
        _ => Rc::clone(tree),
    }
}

/// Turn one `(name=values;...)` layer into frames on top of `bindings`.
///
/// `chain` holds the closures whose literals are being extracted, the
/// innermost last; `$&nestedbinding N` refers to the N-th from the end.
fn extract(
    defs: Option<&TreeRef>,
    mut bindings: Binding,
    chain: &[Rc<Closure>],
) -> Result<Binding, EvalError> {
    for def in Tree::elements(defs) {
        let Tree::Assign { lhs, rhs } = &**def else {
            panic!("%closure definition is not an assignment: {def}");
        };
        let Some(name) = lhs.as_word() else {
            panic!("%closure variable is not a word: {lhs}");
        };

        let mut values = ListBuilder::default();
        let mut items = Tree::elements(rhs.as_ref());
        while let Some(item) = items.next() {
            let term = match &**item {
                Tree::Word(s) | Tree::Qword(s) => Term::str(s.as_str()),
                Tree::Prim(p) if p == "nestedbinding" => {
                    let count = match items.next().map(|t| &**t) {
                        Some(Tree::Word(n)) => atoi(n),
                        _ => return Err(improper_nested_binding()),
                    };
                    if count < 0 {
                        return Err(improper_nested_binding());
                    }
                    let target = usize::try_from(count)
                        .ok()
                        .and_then(|n| chain.iter().rev().nth(n));
                    match target {
                        Some(closure) => Term::closure(Rc::clone(closure)),
                        None => return Err(bad_nested_binding_count(count)),
                    }
                }
                Tree::Prim(p) => return Err(bad_closure_primitive(p)),
                other => panic!("unexpected {:?} in %closure value", other.kind()),
            };
            values.push(term);
        }
        bindings = Binding::bind(name, values.finish(), &bindings)?;
    }
    Ok(bindings)
}

/// Rebuild a closure from a `%closure(defs) body` literal.
///
/// Nested `%closure` layers accumulate frames. The new closure sits on
/// `chain` while its bindings are extracted, so `$&nestedbinding 0` refers
/// to the closure itself. `chain` is restored before returning, error or not.
pub fn extract_bindings(
    tree: &TreeRef,
    chain: &mut Vec<Rc<Closure>>,
) -> Result<Rc<Closure>, EvalError> {
    let mut tree = unwrap_single(tree);
    let mut layers = Vec::new();
    let mut body_missing = false;
    while let Tree::Closure { defs, body } = &*tree {
        layers.push(defs.clone());
        match body {
            Some(body) => tree = unwrap_single(body),
            None => {
                body_missing = true;
                break;
            }
        }
    }

    let closure = Rc::new(Closure {
        tree: if body_missing { thunk(None) } else { tree },
        binding: RefCell::new(Binding::new()),
    });
    chain.push(Rc::clone(&closure));
    let extracted = layers
        .iter()
        .try_fold(Binding::new(), |acc, defs| extract(defs.as_ref(), acc, chain));
    chain.pop();

    let binding = extracted?;
    if body_missing {
        return Err(null_closure_body());
    }
    *closure.binding.borrow_mut() = binding;
    Ok(closure)
}
