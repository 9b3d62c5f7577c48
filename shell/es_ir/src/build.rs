//! Tree construction helpers.
//!
//! These are the building blocks the front end uses to assemble trees, and
//! the easiest way to write trees by hand in tests. List-shaped helpers take
//! and return `Option<TreeRef>` because the empty tree list is `None`.

use std::rc::Rc;

use crate::{Tree, TreeRef};

pub fn word(s: impl Into<String>) -> TreeRef {
    Rc::new(Tree::Word(s.into()))
}

pub fn qword(s: impl Into<String>) -> TreeRef {
    Rc::new(Tree::Qword(s.into()))
}

pub fn prim(name: impl Into<String>) -> TreeRef {
    Rc::new(Tree::Prim(name.into()))
}

pub fn var(name: TreeRef) -> TreeRef {
    Rc::new(Tree::Var(name))
}

/// `$name` for a literal name.
pub fn var_named(name: &str) -> TreeRef {
    var(word(name))
}

pub fn varsub(name: TreeRef, subscript: TreeRef) -> TreeRef {
    Rc::new(Tree::Varsub { name, subscript })
}

pub fn concat(left: TreeRef, right: TreeRef) -> TreeRef {
    Rc::new(Tree::Concat(left, right))
}

pub fn call(body: TreeRef) -> TreeRef {
    Rc::new(Tree::Call(body))
}

pub fn thunk(body: Option<TreeRef>) -> TreeRef {
    Rc::new(Tree::Thunk(body))
}

pub fn lambda(params: Option<TreeRef>, body: Option<TreeRef>) -> TreeRef {
    Rc::new(Tree::Lambda { params, body })
}

pub fn assign(lhs: TreeRef, rhs: Option<TreeRef>) -> TreeRef {
    Rc::new(Tree::Assign { lhs, rhs })
}

pub fn let_block(defs: Option<TreeRef>, body: Option<TreeRef>) -> TreeRef {
    Rc::new(Tree::Let { defs, body })
}

pub fn local_block(defs: Option<TreeRef>, body: Option<TreeRef>) -> TreeRef {
    Rc::new(Tree::Local { defs, body })
}

pub fn for_loop(defs: Option<TreeRef>, body: Option<TreeRef>) -> TreeRef {
    Rc::new(Tree::For { defs, body })
}

pub fn closure_literal(defs: Option<TreeRef>, body: Option<TreeRef>) -> TreeRef {
    Rc::new(Tree::Closure { defs, body })
}

pub fn match_test(subject: Option<TreeRef>, pattern: Option<TreeRef>) -> TreeRef {
    Rc::new(Tree::Match { subject, pattern })
}

pub fn extract_test(subject: Option<TreeRef>, pattern: Option<TreeRef>) -> TreeRef {
    Rc::new(Tree::Extract { subject, pattern })
}

/// Cons `car` onto the tree list `cdr`.
pub fn treecons(car: TreeRef, cdr: Option<TreeRef>) -> TreeRef {
    debug_assert!(cdr
        .as_ref()
        .map_or(true, |t| matches!(**t, Tree::List { .. })));
    Rc::new(Tree::List { car, cdr })
}

/// Like [`treecons`], but a missing `car` leaves `cdr` unchanged.
pub fn treecons2(car: Option<TreeRef>, cdr: Option<TreeRef>) -> Option<TreeRef> {
    match car {
        Some(car) => Some(treecons(car, cdr)),
        None => cdr,
    }
}

/// Concatenate two tree lists. `head` is rebuilt, `tail` is shared.
pub fn treeappend(head: Option<TreeRef>, tail: Option<TreeRef>) -> Option<TreeRef> {
    let cars: Vec<TreeRef> = Tree::elements(head.as_ref()).cloned().collect();
    cars.into_iter()
        .rev()
        .fold(tail, |rest, car| Some(treecons(car, rest)))
}

/// Append a single element to the end of a tree list.
pub fn treeconsend(head: Option<TreeRef>, tree: TreeRef) -> Option<TreeRef> {
    treeappend(head, Some(treecons(tree, None)))
}

/// Build a tree list from its elements.
pub fn list<I>(items: I) -> Option<TreeRef>
where
    I: IntoIterator<Item = TreeRef>,
{
    let items: Vec<TreeRef> = items.into_iter().collect();
    items
        .into_iter()
        .rev()
        .fold(None, |rest, car| Some(treecons(car, rest)))
}

/// A tree list of unquoted words.
pub fn words(items: &[&str]) -> Option<TreeRef> {
    list(items.iter().map(|s| word(*s)))
}

/// Wrap `tree` in a thunk unless it already is one.
pub fn thunkify(tree: Option<TreeRef>) -> TreeRef {
    if let Some(t) = &tree {
        match &**t {
            Tree::Thunk(_) => return Rc::clone(t),
            Tree::List { car, cdr: None } if matches!(**car, Tree::Thunk(_)) => {
                return Rc::clone(t);
            }
            _ => {}
        }
    }
    thunk(tree)
}

/// Put `head` in front of a tree list.
pub fn prefix(head: TreeRef, tree: Option<TreeRef>) -> TreeRef {
    treecons(head, tree)
}

/// `$^var` style flattening: `<={$&flatten sep tree}`.
pub fn flatten(tree: TreeRef, sep: &str) -> TreeRef {
    let args = treecons(qword(sep), Some(treecons(tree, None)));
    call(thunkify(Some(prefix(prim("flatten"), Some(args)))))
}

/// `fn name params {body}` as an assignment to `fn-name`.
pub fn fn_assign(name: &str, params: Option<TreeRef>, body: Option<TreeRef>) -> TreeRef {
    assign(word(format!("fn-{name}")), Some(lambda(params, body)))
}

/// Run commands in order: `$&seq {c1} {c2} ...`.
pub fn seq(commands: Vec<TreeRef>) -> TreeRef {
    let thunks = list(commands.into_iter().map(|c| thunkify(Some(c))));
    prefix(prim("seq"), thunks)
}

/// Rewrite `match subject (pattern {cmd} ...)` into `local` plus `$&if`.
///
/// Each case becomes a `{~ $matchexpr patterns} {cmd}` pair.
pub fn mk_match(subject: Option<TreeRef>, cases: Vec<(Option<TreeRef>, Option<TreeRef>)>) -> TreeRef {
    const VARNAME: &str = "matchexpr";
    let subject_var = var_named(VARNAME);
    let mut arms = None;
    for (patterns, command) in cases {
        let test = thunkify(Some(match_test(Some(Rc::clone(&subject_var)), patterns)));
        arms = treeconsend(arms, test);
        arms = treeconsend(arms, thunkify(command));
    }
    let body = thunkify(Some(prefix(prim("if"), arms)));
    let defs = treecons(assign(word(VARNAME), subject), None);
    local_block(Some(defs), Some(body))
}
