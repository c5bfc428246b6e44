//! # Shell Loop
//!
//! Banner, optional trap frame, then prompt/read/dispatch until a command
//! resumes the trapped context.

use crate::console::Console;
use crate::line::CommandLine;
use crate::machine::Machine;
use crate::options::MonitorOptions;
use crate::Flow;
use alloc::format;
use alloc::string::String;
use core::fmt::Write;
use kernel_registers::TrapFrame;

/// Prompt outside of single-step mode.
pub const PROMPT: &str = "K> ";

/// An interactive kernel monitor bound to a console and a machine.
pub struct Monitor<C, M> {
    pub(crate) console: C,
    pub(crate) machine: M,
    pub(crate) options: MonitorOptions,
    welcomed: bool,
}

impl<C: Console, M: Machine> Monitor<C, M> {
    #[must_use]
    pub const fn new(console: C, machine: M, options: MonitorOptions) -> Self {
        Self {
            console,
            machine,
            options,
            welcomed: false,
        }
    }

    #[must_use]
    pub const fn options(&self) -> &MonitorOptions {
        &self.options
    }

    pub const fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    pub const fn machine_mut(&mut self) -> &mut M {
        &mut self.machine
    }

    /// Give back the console and the machine.
    pub fn into_parts(self) -> (C, M) {
        (self.console, self.machine)
    }

    /// Enter the monitor and serve commands until one resumes `tf`.
    ///
    /// Without a trap frame nothing can resume, so this never returns and the
    /// monitor serves as the kernel's idle shell. A failed `read_line` is
    /// retried.
    pub fn run(&mut self, mut tf: Option<&mut TrapFrame>) -> Flow {
        let stepping = tf.as_deref().is_some_and(TrapFrame::is_single_step);
        let prompt = if stepping {
            self.step_prompt()
        } else {
            String::from(PROMPT)
        };

        // Console failures while greeting are not worth stopping for.
        let _ = self.greet(tf.as_deref(), stepping);

        loop {
            let Some(line) = self.console.read_line(&prompt) else {
                continue;
            };
            if self.run_command(&line, tf.as_deref_mut()) == Flow::Resume {
                return Flow::Resume;
            }
        }
    }

    /// Tokenize and run a single line.
    pub fn run_command(&mut self, line: &str, tf: Option<&mut TrapFrame>) -> Flow {
        match CommandLine::parse(line) {
            Ok(line) => self.dispatch(&line, tf),
            Err(err) => {
                self.report(&err);
                Flow::Continue
            }
        }
    }

    fn greet(&mut self, tf: Option<&TrapFrame>, stepping: bool) -> core::fmt::Result {
        match tf {
            Some(tf) if stepping => {
                writeln!(self.console, "Single-step trap at rip 0x{:016x}", tf.rip)?;
            }
            _ if !self.welcomed => {
                writeln!(self.console, "Welcome to the kernel monitor!")?;
                writeln!(self.console, "Type 'help' for a list of commands.")?;
            }
            _ => {}
        }
        self.welcomed = true;

        if let Some(tf) = tf
            && self.options.print_trapframe
        {
            write!(self.console, "{tf}")?;
        }
        Ok(())
    }

    fn step_prompt(&self) -> String {
        match self.machine.current_env() {
            Some(env) => format!("[{env:08x}] step> "),
            None => String::from("[--------] step> "),
        }
    }
}
