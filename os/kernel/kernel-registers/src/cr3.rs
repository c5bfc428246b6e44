use crate::LoadRegisterUnsafe;
use bitfield_struct::bitfield;
use kernel_memory_addresses::PhysicalAddress;

/// CR3: Page-Map Level-4 Base Register (IA-32e, PCID disabled).
///
/// Holds the physical base address of the active PML4 table. Only reading is
/// modeled; the debugger never switches address spaces.
#[bitfield(u64)]
pub struct Cr3 {
    #[bits(3)]
    _reserved0: u8,

    /// Bit 3: Page-level Write-Through for PML4 accesses.
    pub pwt: bool,

    /// Bit 4: Page-level Cache Disable for PML4 accesses.
    pub pcd: bool,

    #[bits(7)]
    _reserved1: u8,

    /// Bits 12–51: PML4 physical base >> 12.
    #[bits(40)]
    pml4_base_4k: u64,

    #[bits(12)]
    _reserved2: u16,
}

impl Cr3 {
    /// Full physical address of the PML4 base.
    #[must_use]
    pub const fn pml4_phys(&self) -> PhysicalAddress {
        PhysicalAddress::new(self.pml4_base_4k() << 12)
    }
}

#[cfg(all(feature = "asm", target_arch = "x86_64"))]
impl LoadRegisterUnsafe for Cr3 {
    unsafe fn load_unsafe() -> Self {
        let cr3: u64;
        unsafe {
            core::arch::asm!("mov {}, cr3", out(reg) cr3, options(nomem, nostack, preserves_flags));
        }
        Self::from_bits(cr3)
    }
}
