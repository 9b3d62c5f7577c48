//! Evaluation flags threaded through `walk` and `eval`.

use bitflags::bitflags;

bitflags! {
    /// How a command's result is treated.
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    pub struct EvalFlags: u8 {
        /// A false result terminates the shell with its exit status.
        const EXIT_ON_FALSE = 1 << 0;
        /// The shell process itself may be replaced by an external program.
        const IN_CHILD = 1 << 1;
    }
}
