//! # Platform Power Control
//!
//! Power-off and reset as understood by QEMU and Bochs. Neither sequence is
//! guaranteed to take effect on other platforms; both functions return if the
//! machine keeps running, and the caller decides what that means.

/// ACPI PM1a writes that request soft-off (`SLP_TYPa = 5`, `SLP_EN`), in the
/// order they are tried: Bochs and older QEMU first, then current QEMU.
pub const POWER_OFF_SEQUENCE: [(u16, u16); 2] = [(0xB004, 0x2000), (0x604, 0x2000)];

/// Keyboard controller command port.
pub const KBC_COMMAND_PORT: u16 = 0x64;

/// Keyboard controller command that pulses the CPU reset line.
pub const KBC_PULSE_RESET: u8 = 0xFE;

/// Disable interrupts and ask the platform to power off.
///
/// Returns only if the platform ignored every request.
///
/// # Safety
/// Must run at CPL0. Interrupts stay disabled if this returns.
#[cfg(target_arch = "x86_64")]
pub unsafe fn power_off() {
    unsafe {
        crate::ports::cli();
        for (port, value) in POWER_OFF_SEQUENCE {
            crate::ports::outw(port, value);
        }
    }
}

/// Pulse the reset line through the keyboard controller.
///
/// Returns only if the controller did not reset the machine.
///
/// # Safety
/// Must run at CPL0.
#[cfg(target_arch = "x86_64")]
pub unsafe fn reset() {
    unsafe {
        crate::ports::outb(KBC_COMMAND_PORT, KBC_PULSE_RESET);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bochs_port_is_tried_first() {
        assert_eq!(POWER_OFF_SEQUENCE[0], (0xB004, 0x2000));
        assert_eq!(POWER_OFF_SEQUENCE[1].0, 0x604);
    }
}
