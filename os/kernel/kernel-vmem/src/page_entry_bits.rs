use bitfield_struct::bitfield;
use kernel_memory_addresses::PhysicalAddress;

/// A single 64-bit x86-64 page table entry in its raw bitfield form.
///
/// This models the **common superset** of fields found in all four paging
/// levels (PML4E, PDPTE, PDE, PTE). An entry either points to the next-level
/// table or, when `large_page` is set at the PDPT/PD level, maps a 1 GiB or
/// 2 MiB page directly.
///
/// | Bits  | Mnemonic | Meaning                      |
/// |-------|----------|------------------------------|
/// | 0     | `P`      | Valid entry if set           |
/// | 1     | `RW`     | Writable if set              |
/// | 2     | `US`     | User-mode accessible if set  |
/// | 3     | `PWT`    | Write-through caching        |
/// | 4     | `PCD`    | Disable caching              |
/// | 5     | `A`      | Accessed                     |
/// | 6     | `D`      | Dirty (leaf only)            |
/// | 7     | `PS`     | Large page flag              |
/// | 8     | `G`      | Global (leaf only)           |
/// | 9–11  |          | OS available                 |
/// | 12–51 | `addr`   | Physical frame bits [51:12]  |
/// | 52–58 |          | OS available                 |
/// | 59–62 | `PKU`    | Protection key               |
/// | 63    | `NX`     | Execute disable              |
///
/// ### Example
/// ```rust
/// # use kernel_memory_addresses::PhysicalAddress;
/// # use kernel_vmem::PageEntryBits;
/// let mut e = PageEntryBits::new();
/// e.set_present(true);
/// e.set_writable(true);
/// e.set_physical_address(PhysicalAddress::new(0x12_3000));
/// assert!(e.present());
/// assert_eq!(e.physical_address().as_u64(), 0x12_3000);
/// ```
#[bitfield(u64)]
#[derive(PartialEq, Eq)]
pub struct PageEntryBits {
    /// Present (P, bit 0).
    pub present: bool,

    /// Writable (RW, bit 1). Clear for read-only.
    pub writable: bool,

    /// User/Supervisor (US, bit 2). Set to allow user-mode access.
    pub user_access: bool,

    /// Page Write-Through (PWT, bit 3).
    pub write_through: bool,

    /// Page Cache Disable (PCD, bit 4).
    pub cache_disabled: bool,

    /// Accessed (A, bit 5). Set by the CPU on first access.
    pub accessed: bool,

    /// Dirty (D, bit 6), **leaf only**.
    pub dirty: bool,

    /// Large Page / Page Size (PS, bit 7).
    ///
    /// In a PDPTE or PDE a set bit makes the entry a 1 GiB or 2 MiB leaf. In a
    /// 4 KiB PTE the same position is PAT and is not interpreted here.
    pub large_page: bool,

    /// Global (G, bit 8), **leaf only**.
    pub global_translation: bool,

    #[bits(3)]
    pub os_available_low: u8,

    /// Physical address bits [51:12].
    ///
    /// For large pages bit 12 of this field is PAT; use
    /// [`frame_base`](Self::frame_base) to strip it.
    #[bits(40)]
    phys_addr_bits_51_12: u64,

    #[bits(7)]
    pub os_available_high: u8,

    /// Protection Key (PKU, bits 59..=62) if supported; otherwise OS use.
    #[bits(4)]
    pub protection_key: u8,

    /// No-Execute (NX, bit 63).
    pub no_execute: bool,
}

impl PageEntryBits {
    #[inline]
    pub const fn set_physical_address(&mut self, phys: PhysicalAddress) {
        self.set_phys_addr_bits_51_12(phys.as_u64() >> 12);
    }

    #[inline]
    #[must_use]
    pub const fn physical_address(&self) -> PhysicalAddress {
        PhysicalAddress::new(self.phys_addr_bits_51_12() << 12)
    }

    /// The base of the frame this entry maps, aligned to `page_bytes`.
    ///
    /// Masks out the PAT bit that large-page entries keep at bit 12.
    #[inline]
    #[must_use]
    pub const fn frame_base(&self, page_bytes: u64) -> PhysicalAddress {
        PhysicalAddress::new(self.physical_address().as_u64() & !(page_bytes - 1))
    }
}
