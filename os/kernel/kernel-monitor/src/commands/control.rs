//! `c` and `s`: resume the trapped context, optionally for one instruction.

use crate::console::Console;
use crate::error::CommandError;
use crate::machine::Machine;
use crate::{Flow, Monitor};
use kernel_registers::TrapFrame;
use log::info;

impl<C: Console, M: Machine> Monitor<C, M> {
    pub(super) fn cmd_continue(tf: Option<&mut TrapFrame>) -> Result<Flow, CommandError> {
        let tf = tf.ok_or(CommandError::NoTrapFrame)?;
        tf.disarm_single_step();
        info!("continuing at rip {:#018x}", tf.rip);
        Ok(Flow::Resume)
    }

    pub(super) fn cmd_step(tf: Option<&mut TrapFrame>) -> Result<Flow, CommandError> {
        let tf = tf.ok_or(CommandError::NoTrapFrame)?;
        tf.arm_single_step();
        info!("single-stepping at rip {:#018x}", tf.rip);
        Ok(Flow::Resume)
    }
}
