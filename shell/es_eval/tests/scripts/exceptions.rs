//! `catch`, `throw`, `retry` and exit-on-false.

use es_eval::Signal;
use es_ir::{assign, call, lambda, list, match_test, prim, seq, var_named, word, words};
use pretty_assertions::assert_eq;

use crate::common::{block, echo, output, prim_cmd, result, run, shell};

/// `@ { $&result caught $* }`
fn reporting_catcher() -> es_eval::TreeRef {
    lambda(None, Some(result([word("caught"), var_named("*")])))
}

#[test]
fn thrown_exception_reaches_the_catcher() {
    let mut sh = shell();
    let body = block(prim_cmd("throw", [word("myexc"), word("a"), word("b")]));
    let tree = prim_cmd("catch", [reporting_catcher(), body]);
    assert_eq!(run(&mut sh, &tree), ["caught", "myexc", "a", "b"]);
}

#[test]
fn errors_are_caught_as_lists() {
    let mut sh = shell();
    let body = block(assign(var_named("nothing"), words(&["x"])));
    let tree = prim_cmd("catch", [reporting_catcher(), body]);
    assert_eq!(run(&mut sh, &tree), ["caught", "error", "es:assign", "null variable name"]);
}

#[test]
fn uncaught_exception_leaves_run() {
    let mut sh = shell();
    let err = sh.run(&prim_cmd("throw", [word("error"), word("ctx"), word("msg")])).unwrap_err();
    let Signal::Error(err) = err else {
        panic!("expected an error");
    };
    assert_eq!(err.context, "ctx");
    assert_eq!(err.message, "msg");
}

#[test]
fn retry_runs_the_body_again() {
    let mut sh = shell();
    let count = call(block(prim_cmd("count", [var_named("tries")])));
    let catcher = lambda(
        words(&["e"]),
        Some(seq(vec![
            assign(word("tries"), list([var_named("tries"), word("x")])),
            prim_cmd(
                "if",
                [
                    block(match_test(Some(count), Some(word("3")))),
                    block(result([word("done")])),
                    block(prim_cmd("throw", [word("retry")])),
                ],
            ),
        ])),
    );
    let body = block(seq(vec![
        echo([word("attempt")]),
        prim_cmd("throw", [word("oops")]),
    ]));

    let tree = prim_cmd("catch", [catcher, body]);
    assert_eq!(run(&mut sh, &tree), ["done"]);
    assert_eq!(output(&sh), "attempt\nattempt\nattempt\n");
    assert_eq!(sh.get_global("tries").to_strings(), ["x", "x", "x"]);
}

#[test]
fn rethrow_from_a_catcher() {
    let mut sh = shell();
    let inner_catcher = lambda(None, Some(prim_cmd("throw", [word("wrapped"), var_named("*")])));
    let inner = prim_cmd(
        "catch",
        [inner_catcher, block(prim_cmd("throw", [word("original")]))],
    );
    let tree = prim_cmd("catch", [reporting_catcher(), block(inner)]);
    assert_eq!(run(&mut sh, &tree), ["caught", "wrapped", "original"]);
}

#[test]
fn rethrown_errors_arrive_unchanged() {
    for thrown in [
        &["error"][..],
        &["error", "ctx"][..],
        &["error", "ctx", "a", "b"][..],
    ] {
        let mut sh = shell();
        let passthrough = lambda(None, Some(prim_cmd("throw", [var_named("*")])));
        let inner = prim_cmd(
            "catch",
            [passthrough, block(prim_cmd("throw", thrown.iter().copied().map(word)))],
        );
        let tree = prim_cmd("catch", [reporting_catcher(), block(inner)]);
        let mut expected = vec!["caught"];
        expected.extend_from_slice(thrown);
        assert_eq!(run(&mut sh, &tree), expected);
    }
}

#[test]
fn exit_on_false_is_not_caught() {
    let mut sh = shell();
    let body = block(prim_cmd("exitonfalse", [block(result([word("3")]))]));
    let tree = prim_cmd("catch", [reporting_catcher(), body]);
    assert_eq!(sh.run(&tree).unwrap_err(), Signal::Exit(3));
}

#[test]
fn exit_on_false_spares_true_results_and_conditions() {
    let mut sh = shell();
    let cond = prim_cmd(
        "if",
        [
            block(result([word("1")])),
            block(result([word("then")])),
            block(result([word("0")])),
        ],
    );
    let tree = prim_cmd("exitonfalse", [block(cond)]);
    assert_eq!(run(&mut sh, &tree), ["0"]);
}

#[test]
fn not_inverts_under_exit_on_false() {
    let mut sh = shell();
    let tree = prim_cmd("exitonfalse", [prim("not"), block(result([word("1")]))]);
    assert_eq!(run(&mut sh, &tree), ["0"]);
}
