//! `shutdown` and `restart`.

use crate::console::Console;
use crate::error::CommandError;
use crate::machine::Machine;
use crate::{Flow, Monitor};
use core::fmt::Write;
use log::{error, warn};

impl<C: Console, M: Machine> Monitor<C, M> {
    pub(super) fn cmd_shutdown(&mut self) -> Result<Flow, CommandError> {
        self.machine.power_off();

        warn!("power-off request returned");
        writeln!(self.console, "Shutdown failed!")?;
        Ok(Flow::Continue)
    }

    pub(super) fn cmd_restart(&mut self) -> Result<Flow, CommandError> {
        self.machine.reset();

        error!("reset request returned");
        panic!("Restart failed!");
    }
}
