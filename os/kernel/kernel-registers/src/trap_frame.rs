//! # Trap Frame
//!
//! The register snapshot the trap entry stubs push before calling into Rust.
//! Field order matches the push order of the stubs (general registers last
//! pushed first), followed by the vector number, the error code (or a dummy
//! zero) and the frame the CPU pushes itself.
//!
//! ```text
//!   higher addresses
//!   ss
//!   rsp
//!   rflags          ← pushed by the CPU
//!   cs
//!   rip
//!   error_code      ← CPU or stub (0)
//!   trap_number     ← stub
//!   rax .. r15      ← stub
//!   lower addresses (pointer passed to the handler)
//! ```
//!
//! The debugger only ever changes the trap flag, through
//! [`arm_single_step`](TrapFrame::arm_single_step) and
//! [`disarm_single_step`](TrapFrame::disarm_single_step).

use crate::Rflags;
use core::fmt;

/// Vector of the debug exception raised after a single step.
pub const DEBUG_VECTOR: u64 = 1;

/// Vector of the breakpoint exception (`int3`).
pub const BREAKPOINT_VECTOR: u64 = 3;

/// General-purpose registers as saved by the trap entry stubs.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct GeneralRegisters {
    pub r15: u64,
    pub r14: u64,
    pub r13: u64,
    pub r12: u64,
    pub r11: u64,
    pub r10: u64,
    pub r9: u64,
    pub r8: u64,
    pub rbp: u64,
    pub rdi: u64,
    pub rsi: u64,
    pub rdx: u64,
    pub rcx: u64,
    pub rbx: u64,
    pub rax: u64,
}

/// Captured execution context of a trapped instruction.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TrapFrame {
    pub regs: GeneralRegisters,
    pub trap_number: u64,
    pub error_code: u64,
    pub rip: u64,
    pub cs: u64,
    pub rflags: Rflags,
    pub rsp: u64,
    pub ss: u64,
}

impl TrapFrame {
    /// An all-zero frame with architecturally valid flags.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            regs: GeneralRegisters {
                r15: 0,
                r14: 0,
                r13: 0,
                r12: 0,
                r11: 0,
                r10: 0,
                r9: 0,
                r8: 0,
                rbp: 0,
                rdi: 0,
                rsi: 0,
                rdx: 0,
                rcx: 0,
                rbx: 0,
                rax: 0,
            },
            trap_number: 0,
            error_code: 0,
            rip: 0,
            cs: 0,
            rflags: Rflags::new(),
            rsp: 0,
            ss: 0,
        }
    }

    /// `true` if resuming this context executes one instruction and traps.
    #[inline]
    #[must_use]
    pub const fn is_single_step(&self) -> bool {
        self.rflags.tf_trap()
    }

    /// Set the trap flag so that resuming raises `#DB` after one instruction.
    #[inline]
    pub fn arm_single_step(&mut self) {
        self.rflags.set_tf_trap(true);
    }

    /// Clear the trap flag so that resuming runs freely.
    #[inline]
    pub fn disarm_single_step(&mut self) {
        self.rflags.set_tf_trap(false);
    }
}

impl Default for TrapFrame {
    fn default() -> Self {
        Self::new()
    }
}

/// Human-readable name of an exception or interrupt vector.
#[must_use]
pub const fn trap_name(vector: u64) -> &'static str {
    match vector {
        0 => "Divide error",
        DEBUG_VECTOR => "Debug",
        2 => "Non-Maskable Interrupt",
        BREAKPOINT_VECTOR => "Breakpoint",
        4 => "Overflow",
        5 => "BOUND Range Exceeded",
        6 => "Invalid Opcode",
        7 => "Device Not Available",
        8 => "Double Fault",
        9 => "Coprocessor Segment Overrun",
        10 => "Invalid TSS",
        11 => "Segment Not Present",
        12 => "Stack Fault",
        13 => "General Protection",
        14 => "Page Fault",
        16 => "x87 FPU Floating-Point Error",
        17 => "Alignment Check",
        18 => "Machine-Check",
        19 => "SIMD Floating-Point Exception",
        20 => "Virtualization Exception",
        21 => "Control Protection Exception",
        32..=255 => "Hardware Interrupt",
        _ => "(unknown trap)",
    }
}

impl fmt::Display for TrapFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.regs;
        writeln!(f, "TRAP frame")?;
        for (name, value) in [
            ("rax", r.rax),
            ("rbx", r.rbx),
            ("rcx", r.rcx),
            ("rdx", r.rdx),
            ("rsi", r.rsi),
            ("rdi", r.rdi),
            ("rbp", r.rbp),
            ("r8 ", r.r8),
            ("r9 ", r.r9),
            ("r10", r.r10),
            ("r11", r.r11),
            ("r12", r.r12),
            ("r13", r.r13),
            ("r14", r.r14),
            ("r15", r.r15),
        ] {
            writeln!(f, "  {name}  0x{value:016x}")?;
        }
        writeln!(
            f,
            "  trap 0x{:08x} {}",
            self.trap_number,
            trap_name(self.trap_number)
        )?;
        writeln!(f, "  err  0x{:08x}", self.error_code)?;
        writeln!(f, "  rip  0x{:016x}", self.rip)?;
        writeln!(f, "  cs   0x----{:04x}", self.cs & 0xFFFF)?;
        writeln!(f, "  flag 0x{:016x}", self.rflags.into_bits())?;
        writeln!(f, "  rsp  0x{:016x}", self.rsp)?;
        writeln!(f, "  ss   0x----{:04x}", self.ss & 0xFFFF)
    }
}
