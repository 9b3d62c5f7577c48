//! Evaluation of command trees.

use es_ir::{Tree, TreeRef};
use es_runtime::{ltrue, Binding, EvalResult};
use tracing::trace;

use super::Interpreter;
use crate::EvalFlags;

impl Interpreter {
    /// Evaluate a command tree. An absent tree is `true`.
    ///
    /// `let` bodies are entered by looping, so a chain of nested `let`s
    /// runs in constant native stack.
    pub fn walk(&mut self, tree: Option<&TreeRef>, binding: &Binding, flags: EvalFlags) -> EvalResult {
        self.check_interrupt()?;
        let mut tree = tree.cloned();
        let mut binding = binding.clone();
        loop {
            let Some(node) = tree else {
                return Ok(ltrue());
            };
            trace!(kind = ?node.kind(), "walk");
            match &*node {
                Tree::Word(_)
                | Tree::Qword(_)
                | Tree::Prim(_)
                | Tree::Call(_)
                | Tree::Thunk(_)
                | Tree::Lambda { .. }
                | Tree::Var(_)
                | Tree::Varsub { .. }
                | Tree::Concat(..)
                | Tree::List { .. } => {
                    let list = self.glom(Some(&node), &binding, true)?;
                    return self.eval(list, &binding, flags);
                }
                Tree::Assign { lhs, rhs } => return self.assign(lhs, rhs.as_ref(), &binding),
                Tree::Let { defs, body } | Tree::Closure { defs, body } => {
                    binding = self.letbindings(defs.as_ref(), &binding, &binding)?;
                    tree = body.clone();
                }
                Tree::Local { defs, body } => {
                    return self.local(defs.as_ref(), body.as_ref(), &binding, flags);
                }
                Tree::For { defs, body } => {
                    return self.forloop(defs.as_ref(), body.as_ref(), &binding, flags);
                }
                Tree::Match { subject, pattern } => {
                    return self.match_pattern(subject.as_ref(), pattern.as_ref(), &binding);
                }
                Tree::Extract { subject, pattern } => {
                    return self.extract_pattern(subject.as_ref(), pattern.as_ref(), &binding);
                }
            }
        }
    }
}
