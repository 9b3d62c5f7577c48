//! Word expansion through whole commands.

use std::fs;
use std::rc::Rc;

use es_eval::{List, Term, Tree};
use es_ir::{
    assign, closure_literal, concat, flatten, list, prim, qword, var_named, varsub, word, words,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::common::{block, cmd, result, run, shell};

#[test]
fn concatenation_with_variables() {
    let mut sh = shell();
    sh.set_global("x", List::from_strs(&["a", "b"]));
    sh.set_global("y", List::from_strs(&["1", "2"]));
    let tree = result([concat(concat(var_named("x"), word("-")), var_named("y"))]);
    assert_eq!(run(&mut sh, &tree), ["a-1", "a-2", "b-1", "b-2"]);
}

#[test]
fn concatenation_with_empty_variable_is_empty() {
    let mut sh = shell();
    let tree = result([word("before"), concat(word("x"), var_named("empty")), word("after")]);
    assert_eq!(run(&mut sh, &tree), ["before", "after"]);
}

#[test]
fn subscript_ranges() {
    let mut sh = shell();
    sh.set_global("x", List::from_strs(&["a", "b", "c", "d"]));
    let tree = result([varsub(word("x"), words(&["2", "..."]).unwrap())]);
    assert_eq!(run(&mut sh, &tree), ["b", "c", "d"]);

    let tree = result([varsub(word("x"), words(&["4", "1", "9"]).unwrap())]);
    assert_eq!(run(&mut sh, &tree), ["d", "a"]);
}

#[test]
fn flatten_joins_a_variable() {
    let mut sh = shell();
    sh.set_global("x", List::from_strs(&["a", "b", "c"]));
    let tree = result([flatten(var_named("x"), ":")]);
    assert_eq!(run(&mut sh, &tree), ["a:b:c"]);
}

#[test]
fn glob_expands_unquoted_words() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["b.c", "a.c", "c.h", ".hidden.c"] {
        fs::write(dir.path().join(name), "").unwrap();
    }
    let base = dir.path().to_str().unwrap();
    let mut sh = shell();

    let tree = result([word(format!("{base}/*.c"))]);
    assert_eq!(run(&mut sh, &tree), [format!("{base}/a.c"), format!("{base}/b.c")]);

    let tree = result([word(format!("{base}/.*.c"))]);
    assert_eq!(run(&mut sh, &tree), [format!("{base}/.hidden.c")]);

    let tree = result([qword(format!("{base}/*.c"))]);
    assert_eq!(run(&mut sh, &tree), [format!("{base}/*.c")]);

    let tree = result([word(format!("{base}/*.z"))]);
    assert_eq!(run(&mut sh, &tree), [format!("{base}/*.z")]);
}

#[test]
fn glob_through_concatenation_keeps_quotes() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("f1"), "").unwrap();
    fs::write(dir.path().join("f2"), "").unwrap();
    let base = dir.path().to_str().unwrap();
    let mut sh = shell();

    let tree = result([concat(qword(format!("{base}/")), word("f?"))]);
    assert_eq!(run(&mut sh, &tree), [format!("{base}/f1"), format!("{base}/f2")]);
}

#[test]
fn variable_values_are_not_globbed() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("file"), "").unwrap();
    let pattern = format!("{}/*", dir.path().to_str().unwrap());
    let mut sh = shell();
    sh.set_global("p", List::from_strs(&[pattern.as_str()]));

    let tree = result([var_named("p")]);
    assert_eq!(run(&mut sh, &tree), [pattern]);
}

#[test]
fn closure_literal_restores_bindings() {
    let mut sh = shell();
    let defs = list([assign(word("x"), words(&["1", "2"]))]);
    let literal = closure_literal(defs, Some(block(result([var_named("x")]))));
    let tree = cmd([literal]);
    assert_eq!(run(&mut sh, &tree), ["1", "2"]);
}

#[test]
fn closure_literal_prints_back() {
    let mut sh = shell();
    let defs = list([assign(word("x"), words(&["1", "2"]))]);
    let literal = closure_literal(defs, Some(block(result([var_named("x")]))));
    let value = sh.glom(Some(&literal), &es_eval::Binding::new(), false).unwrap();
    assert_eq!(value.to_strings(), ["%closure(x=1 2){$&result $x}"]);
}

#[test]
fn nested_binding_refers_to_the_closure_itself() {
    let mut sh = shell();
    let rhs = list([prim("nestedbinding"), word("0")]);
    let defs = list([assign(word("self"), rhs)]);
    let literal = closure_literal(defs, Some(block(result([word("ok")]))));
    let value = sh.glom(Some(&literal), &es_eval::Binding::new(), false).unwrap();

    let Some(Term::Closure(closure)) = value.first() else {
        panic!("expected a closure");
    };
    let inner = closure.binding().lookup("self").unwrap();
    let Some(Term::Closure(inner)) = inner.first() else {
        panic!("expected a closure in the binding");
    };
    assert!(Rc::ptr_eq(closure, inner));
    assert!(matches!(**closure.tree(), Tree::Thunk(_)));
}

#[test]
fn bad_closure_primitive_is_an_error() {
    let mut sh = shell();
    let defs = list([assign(word("x"), list([prim("echo")]))]);
    let literal = closure_literal(defs, Some(block(result([word("unused")]))));
    let err = sh.run(&cmd([literal])).unwrap_err();
    assert_eq!(
        err.to_list().to_strings(),
        ["error", "$&parse", "bad unquoted primitive in %closure: $&echo"]
    );
}

proptest! {
    #[test]
    fn concatenation_is_cartesian(
        left in prop::collection::vec("[a-z]{1,3}", 0..6),
        right in prop::collection::vec("[0-9]{1,3}", 0..6),
    ) {
        let mut sh = shell();
        let strs = |items: &[String]| items.iter().map(|s| Term::from(s.as_str())).collect::<List>();
        sh.set_global("l", strs(&left));
        sh.set_global("r", strs(&right));

        let tree = result([concat(var_named("l"), var_named("r"))]);
        let got = sh.run(&tree).unwrap().to_strings();
        let expected: Vec<String> = left
            .iter()
            .flat_map(|l| right.iter().map(move |r| format!("{l}{r}")))
            .collect();
        prop_assert_eq!(got.len(), left.len() * right.len());
        prop_assert_eq!(got, expected);
    }
}
