//! Assignment, lexical and dynamic scope, settors.

use es_eval::{List, Signal};
use es_ir::{
    assign, fn_assign, lambda, let_block, list, local_block, seq, var_named, word, words,
};
use pretty_assertions::assert_eq;

use crate::common::{cmd, echo, output, prim_cmd, result, run, shell};

#[test]
fn multiple_assignment_spreads_values() {
    let mut sh = shell();
    let names = list([word("a"), word("b"), word("c")]).unwrap();
    let tree = assign(names, words(&["1", "2", "3", "4"]));
    assert_eq!(run(&mut sh, &tree), ["1", "2", "3", "4"]);
    assert_eq!(sh.get_global("a").to_strings(), ["1"]);
    assert_eq!(sh.get_global("b").to_strings(), ["2"]);
    assert_eq!(sh.get_global("c").to_strings(), ["3", "4"]);
}

#[test]
fn short_assignment_clears_trailing_names() {
    let mut sh = shell();
    sh.set_global("b", List::from_strs(&["old"]));
    let names = list([word("a"), word("b")]).unwrap();
    run(&mut sh, &assign(names, words(&["1"])));
    assert_eq!(sh.get_global("a").to_strings(), ["1"]);
    assert!(sh.get_global("b").is_empty());
}

#[test]
fn functions_capture_let_bindings() {
    let mut sh = shell();
    let defs = list([assign(word("x"), words(&["captured"]))]);
    let define = fn_assign("get", None, Some(result([var_named("x")])));
    run(&mut sh, &let_block(defs, Some(define)));

    assert_eq!(run(&mut sh, &cmd([word("get")])), ["captured"]);
    assert!(sh.get_global("x").is_empty());
}

#[test]
fn closures_share_their_frames() {
    let mut sh = shell();
    let defs = list([assign(word("c"), words(&["0"]))]);
    let setter = fn_assign("set", words(&["v"]), Some(assign(word("c"), Some(var_named("v")))));
    let reader = fn_assign("read", None, Some(result([var_named("c")])));
    run(&mut sh, &let_block(defs, Some(seq(vec![setter, reader]))));

    assert_eq!(run(&mut sh, &cmd([word("read")])), ["0"]);
    run(&mut sh, &cmd([word("set"), word("5")]));
    assert_eq!(run(&mut sh, &cmd([word("read")])), ["5"]);
    assert!(sh.get_global("c").is_empty());
}

#[test]
fn local_is_seen_by_called_functions() {
    let mut sh = shell();
    sh.set_global("x", List::from_strs(&["global"]));
    run(&mut sh, &fn_assign("show", None, Some(echo([var_named("x")]))));

    let defs = list([assign(word("x"), words(&["dynamic"]))]);
    run(&mut sh, &local_block(defs, Some(cmd([word("show")]))));
    run(&mut sh, &cmd([word("show")]));
    assert_eq!(output(&sh), "dynamic\nglobal\n");
}

#[test]
fn local_is_restored_after_an_exception() {
    let mut sh = shell();
    sh.set_global("x", List::from_strs(&["outer"]));
    let defs = list([assign(word("x"), words(&["inner"]))]);
    let body = prim_cmd("throw", [word("oops")]);
    let err = sh.run(&local_block(defs, Some(body))).unwrap_err();

    assert_eq!(err, Signal::Throw(List::from_strs(&["oops"])));
    assert_eq!(sh.get_global("x").to_strings(), ["outer"]);
}

#[test]
fn settor_can_mirror_assignments() {
    let mut sh = shell();
    let body = seq(vec![
        assign(word("mirror"), Some(var_named("*"))),
        result([var_named("*")]),
    ]);
    run(&mut sh, &assign(word("set-x"), Some(lambda(None, Some(body)))));

    run(&mut sh, &assign(word("x"), words(&["a", "b"])));
    assert_eq!(sh.get_global("x").to_strings(), ["a", "b"]);
    assert_eq!(sh.get_global("mirror").to_strings(), ["a", "b"]);
}

#[test]
fn settor_result_is_stored() {
    let mut sh = shell();
    let settor = lambda(None, Some(result([word("fixed")])));
    run(&mut sh, &assign(word("set-x"), Some(settor)));
    run(&mut sh, &assign(word("x"), words(&["anything"])));
    assert_eq!(sh.get_global("x").to_strings(), ["fixed"]);
}

#[test]
fn settor_runs_for_local_and_its_restore() {
    let mut sh = shell();
    let body = seq(vec![
        echo([es_ir::concat(word("set:"), var_named("*"))]),
        result([var_named("*")]),
    ]);
    run(&mut sh, &assign(word("set-x"), Some(lambda(None, Some(body)))));
    sh.set_global("x", List::from_strs(&["old"]));

    let defs = list([assign(word("x"), words(&["new"]))]);
    run(&mut sh, &local_block(defs, Some(result([word("body")]))));
    assert_eq!(output(&sh), "set:new\nset:old\n");
    assert_eq!(sh.get_global("x").to_strings(), ["old"]);
}
