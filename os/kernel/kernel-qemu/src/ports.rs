//! # x86 I/O Port Access
//!
//! Thin wrappers around the `out` instruction for the legacy 16-bit
//! I/O port space. Used for the QEMU debug console and the platform power
//! controls.
//!
//! ```text
//! 0x0064          Keyboard controller command/status
//! 0x0402          QEMU debug console (-debugcon)
//! 0x0604          QEMU ACPI PM1a control
//! 0xB004          Bochs / older QEMU ACPI PM1a control
//! ```
//!
//! # Safety
//!
//! Every function here requires CPL0 (or an I/O permission bitmap granting the
//! port) and that the write is meaningful for the device behind `port`.

/// Write one byte to an I/O port. Uses `out dx, al`.
///
/// # Safety
/// See the [module documentation](self).
#[inline]
pub unsafe fn outb(port: u16, val: u8) {
    unsafe {
        core::arch::asm!("out dx, al", in("dx") port, in("al") val, options(nomem, nostack, preserves_flags));
    }
}

/// Write one 16-bit word to an I/O port. Uses `out dx, ax`.
///
/// # Safety
/// See the [module documentation](self).
#[inline]
pub unsafe fn outw(port: u16, val: u16) {
    unsafe {
        core::arch::asm!("out dx, ax", in("dx") port, in("ax") val, options(nomem, nostack, preserves_flags));
    }
}

/// Mask maskable interrupts on this CPU.
///
/// # Safety
/// Must run at CPL0 (or with sufficient IOPL).
#[inline]
pub unsafe fn cli() {
    unsafe {
        core::arch::asm!("cli", options(nomem, nostack));
    }
}
