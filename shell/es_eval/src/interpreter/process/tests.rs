use super::*;
use std::os::unix::fs::{symlink, PermissionsExt};

use es_ir::{lambda, list, prim, var_named, word};
use es_runtime::{Closure, Signal};
use pretty_assertions::assert_eq;

use crate::interpreter::InterpreterBuilder;
use crate::print_handler::buffer_handler;

fn buffered() -> Interpreter {
    InterpreterBuilder::new().print_handler(buffer_handler()).build()
}

#[test]
fn absolute_names() {
    assert!(is_absolute("/bin/sh"));
    assert!(is_absolute("./run"));
    assert!(is_absolute("../run"));
    assert!(!is_absolute("run"));
    assert!(!is_absolute(".hidden"));
    assert!(!is_absolute("dir/run"));
}

#[test]
fn check_executable_reasons() {
    let dir = tempfile::tempdir().unwrap();
    let plain = dir.path().join("plain");
    fs::write(&plain, "data").unwrap();
    fs::set_permissions(&plain, fs::Permissions::from_mode(0o644)).unwrap();

    let missing = dir.path().join("missing");
    assert_eq!(
        check_executable(missing.to_str().unwrap()),
        Err("No such file or directory".to_string())
    );
    assert_eq!(
        check_executable(dir.path().to_str().unwrap()),
        Err("not a regular file".to_string())
    );
    assert_eq!(
        check_executable(plain.to_str().unwrap()),
        Err("permission denied".to_string())
    );
    assert_eq!(check_executable("/bin/sh"), Ok(()));
}

#[test]
fn exit_status_of_a_program() {
    let mut interp = buffered();
    let argv = List::from_strs(&["sh", "-c", "exit 3"]);
    let status = interp.forkexec("/bin/sh", &argv, false).unwrap();
    assert_eq!(status.to_strings(), ["3"]);
}

#[test]
fn killed_program_reports_the_signal() {
    let mut interp = buffered();
    let argv = List::from_strs(&["sh", "-c", "kill -9 $$"]);
    let status = interp.forkexec("/bin/sh", &argv, false).unwrap();
    assert_eq!(status.to_strings(), ["sigkill"]);
}

#[test]
fn exec_failure_is_reported() {
    let mut interp = buffered();
    let argv = List::from_strs(&["prog", "arg"]);
    let status = interp.forkexec("/nonexistent/prog", &argv, false).unwrap();
    assert_eq!(status.to_strings(), ["1"]);
    assert_eq!(
        interp.print_handler().get_errors(),
        "/nonexistent/prog: No such file or directory\n"
    );
}

#[test]
fn exec_failure_hook_runs_first() {
    let mut interp = buffered();
    let body = list([prim("echo"), word("failed"), var_named("*")]);
    let hook = Closure::new(lambda(None, body), Binding::new());
    interp.set_global("fn-%exec-failure", List::single(Term::closure(hook)));

    let argv = List::from_strs(&["prog", "arg"]);
    interp.forkexec("/nonexistent/prog", &argv, false).unwrap();
    assert_eq!(
        interp.print_handler().get_output(),
        "failed /nonexistent/prog prog arg\n"
    );
}

#[test]
fn default_pathsearch_finds_programs_in_path() {
    let dir = tempfile::tempdir().unwrap();
    symlink("/bin/sh", dir.path().join("es-test-sh")).unwrap();
    let mut interp = InterpreterBuilder::new()
        .print_handler(buffer_handler())
        .path(["/nonexistent", dir.path().to_str().unwrap()])
        .build();

    let tree = list([word("es-test-sh"), word("-c"), word("exit 7")]).unwrap();
    assert_eq!(interp.run(&tree).unwrap().to_strings(), ["7"]);
}

#[test]
fn unknown_program_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let mut interp = InterpreterBuilder::new()
        .print_handler(buffer_handler())
        .path([dir.path().to_str().unwrap()])
        .build();

    let err = interp.run(&word("es-no-such-program")).unwrap_err();
    let Signal::Error(err) = err else {
        panic!("expected an error");
    };
    assert_eq!(err.context, "$&pathsearch");
    assert_eq!(err.message, "es-no-such-program not found");
}
