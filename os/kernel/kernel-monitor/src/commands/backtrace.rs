//! `backtrace`: unwind the frame pointer chain.
//!
//! Each frame is laid out by the standard prologue (`push rbp; mov rbp, rsp`):
//!
//! ```text
//!   fp + 16 ..   caller-pushed words (shown as "args")
//!   fp + 8       return address
//!   fp           saved rbp of the caller  ← fp
//! ```

use crate::console::Console;
use crate::error::CommandError;
use crate::machine::{Machine, SymbolInfo};
use crate::{Flow, Monitor};
use core::fmt::Write;
use kernel_memory_addresses::VirtualAddress;

/// Number of words after the return address printed per frame.
pub const FRAME_ARGS: usize = 6;

const WORD: u64 = size_of::<u64>() as u64;

const UNKNOWN: SymbolInfo<'static> = SymbolInfo {
    file: "<unknown>",
    line: 0,
    function: "<unknown>",
    function_start: 0,
};

/// One reconstructed stack frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Frame {
    pub fp: u64,
    pub ret: u64,
    pub args: [u64; FRAME_ARGS],
    /// The caller's frame pointer.
    pub next: u64,
}

impl Frame {
    /// Read the frame at `fp`.
    pub fn read<M: Machine + ?Sized>(machine: &M, fp: u64) -> Self {
        let word = |i: u64| machine.read_word(VirtualAddress::new(fp.wrapping_add(i * WORD)));
        let mut args = [0; FRAME_ARGS];
        for (i, arg) in (2..).zip(args.iter_mut()) {
            *arg = word(i);
        }
        Self {
            fp,
            ret: word(1),
            args,
            next: word(0),
        }
    }
}

impl<C: Console, M: Machine> Monitor<C, M> {
    pub(super) fn cmd_backtrace(&mut self) -> Result<Flow, CommandError> {
        writeln!(self.console, "Stack backtrace:")?;

        let floor = self.options.kernel_stack_floor.as_u64();
        let in_user_env = self.machine.current_env().is_some();
        let mut fp = self.machine.frame_pointer();
        let mut printed = 0;

        while fp != 0 {
            if in_user_env && fp < floor {
                writeln!(
                    self.console,
                    "  <frame pointer 0x{fp:016x}: below kernel stack, continues in another address space>"
                )?;
                break;
            }
            if printed == self.options.max_frames {
                writeln!(self.console, "  <frame limit reached>")?;
                break;
            }

            let frame = Frame::read(&self.machine, fp);
            write!(self.console, "  rbp {:016x}  rip {:016x}  args", frame.fp, frame.ret)?;
            for arg in frame.args {
                write!(self.console, " {arg:016x}")?;
            }
            writeln!(self.console)?;

            let info = self.machine.resolve(frame.ret);
            let (info, offset) = match info {
                Some(info) => (info, frame.ret.wrapping_sub(info.function_start)),
                None => (UNKNOWN, 0),
            };
            writeln!(
                self.console,
                "         {}:{}: {}+{offset}",
                info.file, info.line, info.function
            )?;

            fp = frame.next;
            printed += 1;
        }
        Ok(Flow::Continue)
    }
}
