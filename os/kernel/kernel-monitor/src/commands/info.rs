//! `help` and `kerninfo`.

use super::COMMANDS;
use crate::console::Console;
use crate::error::CommandError;
use crate::machine::Machine;
use crate::{Flow, Monitor};
use core::fmt::Write;
use kernel_info::layout::KernelLayout;

impl<C: Console, M: Machine> Monitor<C, M> {
    pub(super) fn cmd_help(&mut self) -> Result<Flow, CommandError> {
        for cmd in COMMANDS {
            writeln!(self.console, "{} - {}", cmd.name, cmd.description)?;
        }
        Ok(Flow::Continue)
    }

    pub(super) fn cmd_kerninfo(&mut self) -> Result<Flow, CommandError> {
        let layout = self.machine.layout();
        let c = &mut self.console;

        writeln!(c, "Special kernel symbols:")?;
        writeln!(c, "  _start{:28}{} (phys)", "", layout.start)?;
        for (name, va) in [
            ("entry", layout.entry),
            ("etext", layout.etext),
            ("edata", layout.edata),
            ("end", layout.end),
        ] {
            writeln!(
                c,
                "  {name:<6} {va} (virt)  {} (phys)",
                KernelLayout::to_physical(va)
            )?;
        }
        writeln!(
            c,
            "Kernel executable memory footprint: {}KB",
            layout.footprint_kib()
        )?;
        Ok(Flow::Continue)
    }
}
