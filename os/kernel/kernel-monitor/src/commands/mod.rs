//! # Command Table and Dispatch
//!
//! The commands are a fixed, ordered table keyed by [`CommandId`]. Lookup is
//! an exact, case-sensitive match on the name; the handler is chosen by
//! matching on the id. Each handler lives in the submodule for its area as a
//! method on [`Monitor`].

mod backtrace;
mod control;
mod dump;
mod info;
mod mappings;
mod system;

use crate::console::Console;
use crate::error::CommandError;
use crate::line::CommandLine;
use crate::machine::Machine;
use crate::{Flow, Monitor};
use alloc::string::String;
use core::fmt::Write;
use kernel_registers::TrapFrame;
use log::debug;

pub use backtrace::{FRAME_ARGS, Frame};
pub use dump::AddressKind;
pub use mappings::Permission;

/// Identifies a monitor command.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CommandId {
    Help,
    KernInfo,
    Backtrace,
    Shutdown,
    Restart,
    ShowMappings,
    SetPerm,
    Dump,
    Continue,
    Step,
}

/// A monitor command.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Command {
    pub id: CommandId,
    pub name: &'static str,
    pub description: &'static str,
    /// Argument synopsis printed after `Usage: <name>`.
    pub usage: &'static str,
}

impl Command {
    const fn usage_error(&self) -> CommandError {
        CommandError::Usage {
            name: self.name,
            args: self.usage,
        }
    }
}

/// All commands, in the order `help` lists them.
pub static COMMANDS: &[Command] = &[
    Command {
        id: CommandId::Help,
        name: "help",
        description: "Display this list of commands",
        usage: "",
    },
    Command {
        id: CommandId::KernInfo,
        name: "kerninfo",
        description: "Display information about the kernel",
        usage: "",
    },
    Command {
        id: CommandId::Backtrace,
        name: "backtrace",
        description: "Display stack backtrace",
        usage: "",
    },
    Command {
        id: CommandId::Shutdown,
        name: "shutdown",
        description: "Shutdown the kernel",
        usage: "",
    },
    Command {
        id: CommandId::Restart,
        name: "restart",
        description: "Restart the kernel",
        usage: "",
    },
    Command {
        id: CommandId::ShowMappings,
        name: "showmappings",
        description: "Display the physical page mappings of a virtual range",
        usage: "START [END]",
    },
    Command {
        id: CommandId::SetPerm,
        name: "setperm",
        description: "Set the user/write permissions of a virtual range",
        usage: "PERM START [END]",
    },
    Command {
        id: CommandId::Dump,
        name: "dump",
        description: "Dump the contents of a virtual or physical range",
        usage: "TYPE START [END]",
    },
    Command {
        id: CommandId::Continue,
        name: "c",
        description: "Continue execution of the trapped context",
        usage: "",
    },
    Command {
        id: CommandId::Step,
        name: "s",
        description: "Execute one instruction of the trapped context",
        usage: "",
    },
];

/// Find a command by its exact name.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static Command> {
    COMMANDS.iter().find(|cmd| cmd.name == name)
}

impl<C: Console, M: Machine> Monitor<C, M> {
    /// Run one tokenized line. Errors are reported on the console and do not
    /// end the loop.
    pub(crate) fn dispatch(&mut self, line: &CommandLine, tf: Option<&mut TrapFrame>) -> Flow {
        let Some(name) = line.command() else {
            return Flow::Continue;
        };

        let result = match lookup(name) {
            Some(cmd) => {
                debug!("dispatching {} with {} argument(s)", cmd.name, line.len() - 1);
                self.invoke(cmd, line, tf)
            }
            None => Err(CommandError::UnknownCommand(String::from(name))),
        };

        match result {
            Ok(flow) => flow,
            Err(err) => {
                self.report(&err);
                Flow::Continue
            }
        }
    }

    fn invoke(
        &mut self,
        cmd: &'static Command,
        line: &CommandLine,
        tf: Option<&mut TrapFrame>,
    ) -> Result<Flow, CommandError> {
        match cmd.id {
            CommandId::Help => self.cmd_help(),
            CommandId::KernInfo => self.cmd_kerninfo(),
            CommandId::Backtrace => self.cmd_backtrace(),
            CommandId::Shutdown => self.cmd_shutdown(),
            CommandId::Restart => self.cmd_restart(),
            CommandId::ShowMappings => {
                let start = line.get(1).ok_or_else(|| cmd.usage_error())?;
                self.cmd_showmappings(start, line.get(2))
            }
            CommandId::SetPerm => {
                let (Some(perm), Some(start)) = (line.get(1), line.get(2)) else {
                    return Err(cmd.usage_error());
                };
                self.cmd_setperm(perm, start, line.get(3))
            }
            CommandId::Dump => {
                let (Some(kind), Some(start)) = (line.get(1), line.get(2)) else {
                    return Err(cmd.usage_error());
                };
                self.cmd_dump(kind, start, line.get(3))
            }
            CommandId::Continue => Self::cmd_continue(tf),
            CommandId::Step => Self::cmd_step(tf),
        }
    }

    pub(crate) fn report(&mut self, err: &CommandError) {
        // Nothing left to tell the operator if the console itself failed.
        let _ = writeln!(self.console, "{err}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_order_and_names_are_unique() {
        let names: alloc::vec::Vec<_> = COMMANDS.iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            [
                "help",
                "kerninfo",
                "backtrace",
                "shutdown",
                "restart",
                "showmappings",
                "setperm",
                "dump",
                "c",
                "s"
            ]
        );
    }

    #[test]
    fn lookup_is_exact_and_case_sensitive() {
        assert_eq!(lookup("dump").map(|c| c.id), Some(CommandId::Dump));
        assert_eq!(lookup("c").map(|c| c.id), Some(CommandId::Continue));
        assert!(lookup("Help").is_none());
        assert!(lookup("hel").is_none());
        assert!(lookup("helpx").is_none());
    }

    #[test]
    fn usage_line_comes_from_the_table() {
        let err = lookup("setperm").map(Command::usage_error);
        assert_eq!(
            err.map(|e| alloc::string::ToString::to_string(&e)).as_deref(),
            Some("Usage: setperm PERM START [END]")
        );
    }
}
