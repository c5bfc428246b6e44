use bitfield_struct::bitfield;

/// Architectural RFLAGS model for x86-64.
///
/// Bits that are architecturally fixed in 64-bit mode are modeled as padding
/// with their fixed default, so they cannot be changed through this type.
#[bitfield(u64, order = Lsb)]
#[derive(PartialEq, Eq)]
pub struct Rflags {
    /// Carry Flag
    pub cf_carry: bool, // 0

    /// Always 1 in 64-bit mode.
    #[bits(default = true)]
    _always1: bool, // 1

    /// Parity Flag
    pub pf_parity: bool, // 2

    #[bits(default = false)]
    _rsvd3: bool, // 3

    /// Adjust Flag
    pub af_adjust: bool, // 4

    #[bits(default = false)]
    _rsvd5: bool, // 5

    /// Zero Flag
    pub zf_zero: bool, // 6

    /// Sign Flag
    pub sf_sign: bool, // 7

    /// Trap Flag: raise `#DB` after the next instruction.
    pub tf_trap: bool, // 8

    /// Interrupt Enable Flag
    pub if_interrupt_enable: bool, // 9

    /// Direction Flag
    pub df_direction: bool, // 10

    /// Overflow Flag
    pub of_overflow: bool, // 11

    /// I/O Privilege Level
    #[bits(2)]
    pub iopl: u8, // 12–13

    /// Nested Task
    pub nt_nested: bool, // 14

    #[bits(default = false)]
    _rsvd15: bool, // 15

    /// Resume Flag
    pub rf_resume: bool, // 16

    /// Virtual 8086 mode, must be 0 in 64-bit mode.
    #[bits(default = false)]
    _vm: bool, // 17

    /// Alignment Check
    pub ac_alignment_check: bool, // 18

    /// Virtual Interrupt Flag
    pub vif_virtual_interrupt: bool, // 19

    /// Virtual Interrupt Pending
    pub vip_virtual_interrupt_pending: bool, // 20

    /// ID Flag: allows toggling CPUID.
    pub id_cpuid: bool, // 21

    #[bits(42, default = false)]
    _reserved_rest: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trap_flag_is_bit_8() {
        let flags = Rflags::new().with_tf_trap(true);
        assert_eq!(flags.into_bits(), 0x102);
        assert!(Rflags::from_bits(0x302).tf_trap());
        assert!(!Rflags::from_bits(0x202).tf_trap());
    }

    #[test]
    fn interrupt_flag_survives_trap_toggle() {
        let mut flags = Rflags::from_bits(0x246);
        flags.set_tf_trap(true);
        flags.set_tf_trap(false);
        assert_eq!(flags.into_bits(), 0x246);
        assert!(flags.if_interrupt_enable());
        assert!(flags.zf_zero());
    }
}
