//! # Command Line Tokenizer
//!
//! Splits one line of input into whitespace-separated arguments. There is no
//! quoting or escaping. The line is copied once and arguments are kept as
//! byte spans into that copy.

use crate::error::CommandError;
use alloc::string::String;
use alloc::vec::Vec;
use core::ops::Range;

/// Capacity of the argument vector, including the terminating slot.
pub const MAX_ARGS: usize = 16;

const WHITESPACE: &[u8] = b"\t\r\n ";

#[inline]
fn is_whitespace(b: u8) -> bool {
    WHITESPACE.contains(&b)
}

/// A tokenized command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLine {
    buf: String,
    spans: Vec<Range<usize>>,
}

impl CommandLine {
    /// Tokenize `line`.
    ///
    /// # Errors
    /// [`CommandError::TooManyArguments`] if the line holds more than
    /// `MAX_ARGS - 1` arguments.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let bytes = line.as_bytes();
        let mut spans = Vec::with_capacity(MAX_ARGS - 1);
        let mut pos = 0;

        loop {
            while pos < bytes.len() && is_whitespace(bytes[pos]) {
                pos += 1;
            }
            if pos == bytes.len() {
                break;
            }

            if spans.len() == MAX_ARGS - 1 {
                return Err(CommandError::TooManyArguments { max: MAX_ARGS });
            }
            let start = pos;
            while pos < bytes.len() && !is_whitespace(bytes[pos]) {
                pos += 1;
            }
            spans.push(start..pos);
        }

        Ok(Self {
            buf: String::from(line),
            spans,
        })
    }

    /// Number of arguments, including the command name.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Argument `index`; `0` is the command name.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        // Spans start and end next to ASCII whitespace or the line ends, so
        // they are always on char boundaries.
        self.spans.get(index).and_then(|span| self.buf.get(span.clone()))
    }

    /// The command name, if the line is not blank.
    #[inline]
    #[must_use]
    pub fn command(&self) -> Option<&str> {
        self.get(0)
    }

    /// All arguments in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        (0..self.len()).filter_map(|i| self.get(i))
    }
}
