//! Finding and running external programs.

use std::fs;
use std::io;
use std::process::{Command, ExitStatus};

use es_runtime::errors::pathsearch_undefined;
use es_runtime::{status_from_exit, Binding, EvalResult, List, Term};
use tracing::debug;

use super::Interpreter;
use crate::EvalFlags;

/// Whether `path` names a program directly rather than through `$path`.
pub fn is_absolute(path: &str) -> bool {
    path.starts_with('/') || path.starts_with("./") || path.starts_with("../")
}

/// The text of an I/O error without Rust's ` (os error N)` suffix.
fn error_text(err: &io::Error) -> String {
    let text = err.to_string();
    match text.rfind(" (os error ") {
        Some(end) => text[..end].to_string(),
        None => text,
    }
}

/// Check that `path` is an executable regular file.
///
/// On failure, returns the reason in the form es prints after the path.
pub fn check_executable(path: &str) -> Result<(), String> {
    let meta = fs::metadata(path).map_err(|err| error_text(&err))?;
    if !meta.is_file() {
        return Err("not a regular file".to_string());
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if meta.permissions().mode() & 0o111 == 0 {
            return Err("permission denied".to_string());
        }
    }
    Ok(())
}

fn status_term(status: ExitStatus) -> Term {
    if let Some(code) = status.code() {
        return status_from_exit(code);
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return es_runtime::status_from_signal(signal, status.core_dumped());
        }
    }
    status_from_exit(1)
}

impl Interpreter {
    /// Resolve a command name through `fn-%pathsearch`.
    pub fn pathsearch(&mut self, term: &Term) -> EvalResult {
        let search = self.get_global("fn-%pathsearch");
        if search.is_empty() {
            return Err(pathsearch_undefined(&term.text()).into());
        }
        let call = search.append(&List::single(term.clone()));
        self.eval(call, &Binding::new(), EvalFlags::empty())
    }

    /// Run the program at `path` with `argv` (`argv[0]` included) and wait
    /// for it. Returns its exit status as a one-element list.
    ///
    /// With `in_child`, the shell's own process is replaced by the program.
    #[tracing::instrument(level = "debug", skip(self, argv))]
    pub fn forkexec(&mut self, path: &str, argv: &List, in_child: bool) -> EvalResult {
        self.print_handler.flush();
        let mut args = argv.iter().map(|t| t.text().into_owned());
        let arg0 = args.next().unwrap_or_else(|| path.to_string());
        let mut command = Command::new(path);
        command.args(args);

        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            command.arg0(&arg0);
            if in_child {
                let err = command.exec();
                self.exec_failure(path, argv, &err)?;
                return Err(es_runtime::Signal::Exit(1));
            }
        }
        #[cfg(not(unix))]
        let _ = (arg0, in_child);

        match command.status() {
            Ok(status) => {
                let term = status_term(status);
                debug!(status = %term, "child exited");
                self.check_interrupt()?;
                Ok(List::single(term))
            }
            Err(err) => self.exec_failure(path, argv, &err),
        }
    }

    /// A program could not be started: give `fn-%exec-failure` a chance,
    /// then report the error. The command's status is `1`.
    fn exec_failure(&mut self, path: &str, argv: &List, err: &io::Error) -> EvalResult {
        let handler = self.get_global("fn-%exec-failure");
        if !handler.is_empty() {
            let call = handler.append(&List::cons(Term::from(path), argv.clone()));
            self.eval(call, &Binding::new(), EvalFlags::empty())?;
        }
        let reason = error_text(err);
        debug!(path, %reason, "exec failed");
        self.print_handler.eprintln(&format!("{path}: {reason}"));
        Ok(List::single("1"))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, reason = "tests unwrap for brevity")]
mod tests;
