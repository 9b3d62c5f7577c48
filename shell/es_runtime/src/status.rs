//! Truth values and exit statuses.
//!
//! A list is true when every element is a string that is empty or `0`.
//! Exit statuses are strings: a decimal code for normal termination, the
//! signal name otherwise.

use crate::{List, Term};

pub fn ltrue() -> List {
    List::single("0")
}

pub fn lfalse() -> List {
    List::single("1")
}

pub fn is_true(list: &List) -> bool {
    list.iter()
        .all(|t| matches!(t.as_str(), Some(s) if s.is_empty() || s == "0"))
}

/// The process exit code a result list stands for.
pub fn exit_status(list: &List) -> i32 {
    let Some(term) = list.first() else {
        return 0;
    };
    if list.len() > 1 {
        return i32::from(!is_true(list));
    }
    match term.as_str() {
        None => 1,
        Some("") => 0,
        Some(s) if s.bytes().all(|b| b.is_ascii_digit()) => s.parse::<u8>().map_or(1, i32::from),
        Some(_) => 1,
    }
}

/// Conventional lower-case name of signal `n`.
pub fn signal_name(n: i32) -> String {
    let name = match n {
        1 => "sighup",
        2 => "sigint",
        3 => "sigquit",
        4 => "sigill",
        5 => "sigtrap",
        6 => "sigabrt",
        7 => "sigbus",
        8 => "sigfpe",
        9 => "sigkill",
        10 => "sigusr1",
        11 => "sigsegv",
        12 => "sigusr2",
        13 => "sigpipe",
        14 => "sigalrm",
        15 => "sigterm",
        _ => return format!("sig{n}"),
    };
    name.to_string()
}

/// Status term for a process that exited with `code`.
pub fn status_from_exit(code: i32) -> Term {
    Term::str(code.to_string())
}

/// Status term for a process killed by `signal`.
pub fn status_from_signal(signal: i32, core_dumped: bool) -> Term {
    let mut name = signal_name(signal);
    if core_dumped {
        name.push_str("+core");
    }
    Term::str(name)
}

/// Leading decimal integer of `s`, 0 when there is none.
pub fn atoi(s: &str) -> i64 {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    sign * digits[..end].parse::<i64>().unwrap_or(0)
}
