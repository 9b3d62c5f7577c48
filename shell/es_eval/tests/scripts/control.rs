//! Loops, conditionals and the evaluation depth limit.

use es_eval::{buffer_handler, InterpreterBuilder, List};
use es_ir::{assign, fn_assign, for_loop, list, match_test, thunk, var_named, word, words};
use pretty_assertions::assert_eq;

use crate::common::{block, cmd, echo, output, prim_cmd, result, run, shell};

fn nested_thunks(count: usize) -> es_eval::TreeRef {
    let mut tree = thunk(None);
    for _ in 1..count {
        tree = thunk(Some(tree));
    }
    tree
}

#[test]
fn for_walks_lists_in_lock_step() {
    let mut sh = shell();
    let defs = list([
        assign(word("x"), words(&["1", "2", "3"])),
        assign(word("y"), words(&["a", "b"])),
    ]);
    run(&mut sh, &for_loop(defs, Some(echo([var_named("x"), var_named("y")]))));
    assert_eq!(output(&sh), "1 a\n2 b\n3\n");
}

#[test]
fn break_in_nested_loops() {
    let mut sh = shell();
    let inner_body = prim_cmd(
        "if",
        [
            block(match_test(Some(var_named("j")), Some(word("2")))),
            block(cmd([es_ir::prim("break")])),
            block(echo([var_named("i"), var_named("j")])),
        ],
    );
    let inner = for_loop(list([assign(word("j"), words(&["1", "2", "3"]))]), Some(inner_body));
    let outer = for_loop(list([assign(word("i"), words(&["a", "b"]))]), Some(inner));
    run(&mut sh, &outer);
    assert_eq!(output(&sh), "a 1\nb 1\n");
}

#[test]
fn break_value_is_the_loop_value() {
    let mut sh = shell();
    let body = prim_cmd("break", [var_named("i")]);
    let tree = for_loop(list([assign(word("i"), words(&["first", "second"]))]), Some(body));
    assert_eq!(run(&mut sh, &tree), ["first"]);
}

#[test]
fn if_else_chain() {
    let mut sh = shell();
    let test = |value: &str| block(match_test(Some(var_named("v")), Some(word(value))));
    let tree = prim_cmd(
        "if",
        [
            test("a"),
            block(result([word("is-a")])),
            test("b"),
            block(result([word("is-b")])),
            block(result([word("other")])),
        ],
    );
    for (value, expected) in [("a", "is-a"), ("b", "is-b"), ("c", "other")] {
        sh.set_global("v", List::from_strs(&[value]));
        assert_eq!(run(&mut sh, &tree), [expected]);
    }
}

#[test]
fn exact_default_depth_limit() {
    let mut sh = shell();
    let limit = sh.max_eval_depth();
    assert!(sh.run(&nested_thunks(limit - 1)).is_ok());
    let err = sh.run(&nested_thunks(limit)).unwrap_err();
    assert!(err.is_max_eval_depth());
}

#[test]
fn runaway_recursion_is_catchable() {
    let mut sh = shell();
    run(&mut sh, &fn_assign("recurse", None, Some(cmd([word("recurse")]))));
    let catcher = es_ir::lambda(None, Some(result([var_named("*")])));
    let tree = prim_cmd("catch", [catcher, block(cmd([word("recurse")]))]);
    assert_eq!(run(&mut sh, &tree), ["error", "es:eval", "max-eval-depth exceeded"]);
    assert_eq!(sh.eval_depth(), 0);
}

#[test]
fn depth_limit_can_be_raised() {
    let mut sh = InterpreterBuilder::new()
        .print_handler(buffer_handler())
        .max_eval_depth(100)
        .build();
    assert!(sh.run(&nested_thunks(150)).is_err());
    run(&mut sh, &prim_cmd("setmaxevaldepth", [word("200")]));
    assert!(sh.run(&nested_thunks(150)).is_ok());
}
