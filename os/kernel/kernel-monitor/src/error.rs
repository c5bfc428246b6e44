use alloc::string::String;
use core::fmt;
use kernel_memory_addresses::RangeError;

/// Why a command did not run to completion.
///
/// The `Display` text of each variant is exactly what the operator sees.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Usage: {name} {args}")]
    Usage {
        name: &'static str,
        args: &'static str,
    },
    #[error("Invalid address!")]
    InvalidAddress,
    #[error("Invalid permission!")]
    InvalidPermission,
    #[error("Invalid address type!")]
    InvalidAddressType,
    #[error("No trapframe found.")]
    NoTrapFrame,
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),
    #[error("Too many arguments (max {max})")]
    TooManyArguments { max: usize },
    #[error("console write failed")]
    Console,
}

impl From<ParseNumberError> for CommandError {
    fn from(err: ParseNumberError) -> Self {
        log::debug!("{err}");
        Self::InvalidAddress
    }
}

impl From<RangeError> for CommandError {
    fn from(err: RangeError) -> Self {
        log::debug!("{err}");
        Self::InvalidAddress
    }
}

impl From<fmt::Error> for CommandError {
    fn from(_: fmt::Error) -> Self {
        Self::Console
    }
}

/// A token that is not a hexadecimal, octal or decimal `u64`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a number")]
pub struct ParseNumberError(pub String);
