//! Function calls, program lookup and external commands.

use std::os::unix::fs::symlink;

use es_eval::{buffer_handler, InterpreterBuilder, Signal, Term};
use es_ir::{fn_assign, prim, seq, var_named, word, words};
use pretty_assertions::assert_eq;

use crate::common::{cmd, echo, output, prim_cmd, result, run, shell};

#[test]
fn function_sees_arguments_and_name() {
    let mut sh = shell();
    let body = echo([var_named("0"), var_named("b"), var_named("a")]);
    run(&mut sh, &fn_assign("show", words(&["a", "b"]), Some(body)));
    run(&mut sh, &cmd([word("show"), word("1"), word("2"), word("3")]));
    assert_eq!(output(&sh), "show 2 3 1\n");
}

#[test]
fn return_leaves_the_function() {
    let mut sh = shell();
    let body = seq(vec![
        echo([word("before")]),
        prim_cmd("return", [word("value")]),
        echo([word("after")]),
    ]);
    run(&mut sh, &fn_assign("f", None, Some(body)));
    assert_eq!(run(&mut sh, &cmd([word("f")])), ["value"]);
    assert_eq!(output(&sh), "before\n");
}

#[test]
fn functions_shadow_programs() {
    let mut sh = shell();
    run(&mut sh, &fn_assign("/bin/sh", None, Some(result([word("shadowed"), var_named("*")]))));
    let tree = cmd([word("/bin/sh"), word("-c"), word("exit 1")]);
    assert_eq!(run(&mut sh, &tree), ["shadowed", "-c", "exit 1"]);
}

#[test]
fn external_program_status_is_the_result() {
    let mut sh = shell();
    let tree = cmd([word("/bin/sh"), word("-c"), word("exit 5")]);
    assert_eq!(run(&mut sh, &tree), ["5"]);
    let tree = cmd([word("/bin/sh"), word("-c"), word("exit 0")]);
    assert_eq!(run(&mut sh, &tree), ["0"]);
}

#[test]
fn programs_are_found_through_path() {
    let dir = tempfile::tempdir().unwrap();
    symlink("/bin/sh", dir.path().join("es-script-sh")).unwrap();
    let mut sh = InterpreterBuilder::new()
        .print_handler(buffer_handler())
        .path([dir.path().to_str().unwrap()])
        .build();

    let tree = cmd([word("es-script-sh"), word("-c"), word("exit 2")]);
    assert_eq!(run(&mut sh, &tree), ["2"]);

    let found = run(&mut sh, &prim_cmd("whatis", [word("es-script-sh")]));
    assert_eq!(found, [dir.path().join("es-script-sh").to_str().unwrap()]);
}

#[test]
fn missing_program_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut sh = InterpreterBuilder::new()
        .print_handler(buffer_handler())
        .path([dir.path().to_str().unwrap()])
        .build();

    let err = sh.run(&cmd([word("es-script-missing")])).unwrap_err();
    assert!(matches!(err, Signal::Error(_)));
}

#[test]
fn whatis_reports_functions_and_programs() {
    let mut sh = shell();
    run(&mut sh, &fn_assign("f", None, Some(result([word("x")]))));

    let defn = sh.run(&prim_cmd("whatis", [word("f")])).unwrap();
    assert!(matches!(defn.first(), Some(Term::Closure(_))));
    assert_eq!(run(&mut sh, &prim_cmd("whatis", [word("/bin/sh")])), ["/bin/sh"]);
}

#[test]
fn pathsearch_can_be_replaced() {
    let mut sh = shell();
    let search = seq(vec![
        echo([word("searching"), var_named("prog")]),
        result([word("/bin/sh")]),
    ]);
    run(&mut sh, &fn_assign("%pathsearch", words(&["prog"]), Some(search)));

    let tree = cmd([word("anything"), word("-c"), word("exit 4")]);
    assert_eq!(run(&mut sh, &tree), ["4"]);
    assert_eq!(output(&sh), "searching anything\n");
}

#[test]
fn undefined_pathsearch_is_an_error() {
    let mut sh = InterpreterBuilder::new()
        .print_handler(buffer_handler())
        .without_default_pathsearch()
        .build();
    let err = sh.run(&cmd([word("anything")])).unwrap_err();
    let Signal::Error(err) = err else {
        panic!("expected an error");
    };
    assert_eq!(err.context, "es:pathsearch");
}

#[test]
fn primitives_run_directly() {
    let mut sh = shell();
    let tree = cmd([prim("count"), word("a"), word("b")]);
    assert_eq!(run(&mut sh, &tree), ["2"]);
}
