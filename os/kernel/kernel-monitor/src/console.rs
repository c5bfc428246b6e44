//! Operator I/O.

use alloc::string::String;
use core::fmt;

/// A line-oriented terminal.
///
/// Output goes through [`fmt::Write`]; input is read a line at a time.
pub trait Console: fmt::Write {
    /// Show `prompt` and block until a line is entered.
    ///
    /// Returns `None` if no line could be read; the caller prompts again.
    fn read_line(&mut self, prompt: &str) -> Option<String>;
}
