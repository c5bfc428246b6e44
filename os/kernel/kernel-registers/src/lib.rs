//! # Typed `X84_64` Registers
//!
//! Bitfield models of the registers the debugger touches and the layout of a
//! trapped execution context:
//!
//! - [`rflags::Rflags`]: the flags register, including the trap flag used for
//!   single-stepping.
//! - [`trap_frame::TrapFrame`]: the register snapshot saved by the trap entry
//!   stubs, with named accessors for the single-step state.
//! - [`cr3::Cr3`] (feature `cr3`): the page-map base register, used to find the
//!   active PML4.
//! - [`read_frame_pointer`] (feature `asm`): the current `rbp`.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

#[cfg(feature = "cr3")]
pub mod cr3;

pub mod rflags;
pub mod trap_frame;

pub use crate::rflags::Rflags;
pub use crate::trap_frame::{GeneralRegisters, TrapFrame};

pub trait LoadRegisterUnsafe {
    /// # Safety
    /// The caller must uphold the implementation-specific safety requirements.
    /// For example, the register access might be privileged and require kernel mode (Ring 0).
    unsafe fn load_unsafe() -> Self;
}

/// Read the frame pointer (`rbp`) of the calling function.
///
/// Inlined into the caller so the value is the caller's frame, not a frame of
/// this helper. Only meaningful when the kernel is built with frame pointers
/// (`-C force-frame-pointers=yes`).
#[cfg(all(feature = "asm", target_arch = "x86_64"))]
#[allow(clippy::inline_always)]
#[inline(always)]
#[must_use]
pub fn read_frame_pointer() -> u64 {
    let rbp: u64;
    unsafe {
        core::arch::asm!("mov {}, rbp", out(reg) rbp, options(nomem, nostack, preserves_flags));
    }
    rbp
}
