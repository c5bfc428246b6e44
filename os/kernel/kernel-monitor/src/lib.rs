//! # Kernel Monitor
//!
//! The interactive debug shell of the kernel: a read-eval-print loop over a
//! [`Console`] that inspects and edits live kernel state through a
//! [`Machine`].
//!
//! ## Commands
//!
//! | Command        | Arguments          | Effect                                          |
//! |----------------|--------------------|-------------------------------------------------|
//! | `help`         |                    | list all commands                               |
//! | `kerninfo`     |                    | kernel image addresses and footprint            |
//! | `backtrace`    |                    | unwind the frame pointer chain                  |
//! | `shutdown`     |                    | power off                                       |
//! | `restart`      |                    | reset (panics if the reset does not happen)     |
//! | `showmappings` | `START [END]`      | physical frame and permissions of each page     |
//! | `setperm`      | `PERM START [END]` | set user/write bits, `PERM` is `[U-][W-]`       |
//! | `dump`         | `TYPE START [END]` | hex dump, `TYPE` is `V`irtual or `P`hysical     |
//! | `c`            |                    | clear the trap flag and resume                  |
//! | `s`            |                    | set the trap flag and resume for one instruction|
//!
//! Numbers are hexadecimal with `0x`, octal with a leading `0`, decimal
//! otherwise.
//!
//! ## Entering the monitor
//!
//! ```rust,ignore
//! use kernel_monitor::{LiveMachine, Monitor, MonitorOptions, SymbolTable};
//!
//! fn on_breakpoint(tf: &mut TrapFrame, console: SerialConsole) {
//!     let machine = unsafe { LiveMachine::new(kernel_layout(), SymbolTable::empty()) };
//!     let mut monitor = Monitor::new(console, machine, MonitorOptions::default());
//!     monitor.run(Some(tf));
//! }
//! ```
//!
//! `run` returns once `c` or `s` has updated the trap frame; the trap
//! handler then returns into the interrupted context.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

extern crate alloc;

pub mod commands;
pub mod console;
mod error;
pub mod line;
#[cfg(target_arch = "x86_64")]
pub mod live;
pub mod machine;
mod options;
pub mod parsing;
mod shell;
pub mod symbols;

pub use crate::console::Console;
pub use crate::error::{CommandError, ParseNumberError};
pub use crate::line::{CommandLine, MAX_ARGS};
#[cfg(target_arch = "x86_64")]
pub use crate::live::LiveMachine;
pub use crate::machine::{EnvId, Machine, SymbolInfo};
pub use crate::options::MonitorOptions;
pub use crate::shell::{Monitor, PROMPT};
pub use crate::symbols::{Symbol, SymbolTable};

/// What the shell does after a command.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Flow {
    /// Keep reading commands.
    Continue,
    /// Leave the monitor and resume the trapped context.
    Resume,
}

impl Flow {
    /// Integer status: `0` to continue, `-1` to leave the monitor.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Continue => 0,
            Self::Resume => -1,
        }
    }
}
