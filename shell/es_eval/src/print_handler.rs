//! Output sinks for primitives such as `echo`.
//!
//! - Stdout: the process's standard streams (default)
//! - Buffer: captured output, for tests and embedding
//! - Silent: output discarded
//!
//! Enum dispatch rather than trait objects; the handler is hit on every
//! `echo`.

use std::io::Write;

use parking_lot::Mutex;

/// Writes to the process's stdout and stderr.
#[derive(Default)]
pub struct StdoutPrintHandler;

impl StdoutPrintHandler {
    pub fn print(&self, msg: &str) {
        print!("{msg}");
    }

    pub fn eprint(&self, msg: &str) {
        eprint!("{msg}");
    }

    /// Flush stdout so child processes do not overtake buffered text.
    pub fn flush(&self) {
        let _ = std::io::stdout().flush();
    }
}

/// Captures output and error text in memory.
#[derive(Default)]
pub struct BufferPrintHandler {
    output: Mutex<String>,
    errors: Mutex<String>,
}

impl BufferPrintHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn print(&self, msg: &str) {
        self.output.lock().push_str(msg);
    }

    pub fn eprint(&self, msg: &str) {
        self.errors.lock().push_str(msg);
    }

    pub fn get_output(&self) -> String {
        self.output.lock().clone()
    }

    pub fn get_errors(&self) -> String {
        self.errors.lock().clone()
    }

    pub fn clear(&self) {
        self.output.lock().clear();
        self.errors.lock().clear();
    }
}

pub enum PrintHandlerImpl {
    Stdout(StdoutPrintHandler),
    Buffer(BufferPrintHandler),
    Silent,
}

impl PrintHandlerImpl {
    pub fn print(&self, msg: &str) {
        match self {
            Self::Stdout(h) => h.print(msg),
            Self::Buffer(h) => h.print(msg),
            Self::Silent => {}
        }
    }

    pub fn println(&self, msg: &str) {
        self.print(msg);
        self.print("\n");
    }

    /// Diagnostic output (stderr for the stdout handler).
    pub fn eprintln(&self, msg: &str) {
        match self {
            Self::Stdout(h) => {
                h.eprint(msg);
                h.eprint("\n");
            }
            Self::Buffer(h) => {
                h.eprint(msg);
                h.eprint("\n");
            }
            Self::Silent => {}
        }
    }

    pub fn flush(&self) {
        if let Self::Stdout(h) = self {
            h.flush();
        }
    }

    /// Captured output; empty for handlers that do not capture.
    pub fn get_output(&self) -> String {
        match self {
            Self::Buffer(h) => h.get_output(),
            Self::Stdout(_) | Self::Silent => String::new(),
        }
    }

    /// Captured diagnostics; empty for handlers that do not capture.
    pub fn get_errors(&self) -> String {
        match self {
            Self::Buffer(h) => h.get_errors(),
            Self::Stdout(_) | Self::Silent => String::new(),
        }
    }

    pub fn clear(&self) {
        if let Self::Buffer(h) = self {
            h.clear();
        }
    }
}

/// Print handler shared between an interpreter and its host.
pub type SharedPrintHandler = std::sync::Arc<PrintHandlerImpl>;

pub fn stdout_handler() -> SharedPrintHandler {
    std::sync::Arc::new(PrintHandlerImpl::Stdout(StdoutPrintHandler))
}

pub fn buffer_handler() -> SharedPrintHandler {
    std::sync::Arc::new(PrintHandlerImpl::Buffer(BufferPrintHandler::new()))
}

pub fn silent_handler() -> SharedPrintHandler {
    std::sync::Arc::new(PrintHandlerImpl::Silent)
}
