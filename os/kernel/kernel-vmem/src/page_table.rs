//! # Page Table
//!
//! One 4 KiB-aligned table of 512 entries. The same layout is used at every
//! level of the hierarchy; what an entry means depends on the level it is
//! read at.

use crate::PageEntryBits;
use kernel_memory_addresses::VirtualAddress;

/// Number of entries in one table at every level.
pub const ENTRIES: usize = 512;

/// A 4 KiB-aligned array of 512 entries.
#[doc(alias = "PT")]
#[repr(C, align(4096))]
pub struct PageTable {
    entries: [PageEntryBits; ENTRIES],
}

impl PageTable {
    /// An all-empty table.
    #[must_use]
    pub const fn zeroed() -> Self {
        Self {
            entries: [PageEntryBits::new(); ENTRIES],
        }
    }

    /// Read the entry at `index`.
    #[inline]
    #[must_use]
    pub const fn entry(&self, index: usize) -> PageEntryBits {
        self.entries[index]
    }

    /// Borrow the entry at `index` for in-place edits.
    #[inline]
    pub const fn entry_mut(&mut self, index: usize) -> &mut PageEntryBits {
        &mut self.entries[index]
    }

    /// Overwrite the entry at `index`.
    #[inline]
    pub const fn set(&mut self, index: usize, entry: PageEntryBits) {
        self.entries[index] = entry;
    }
}

impl Default for PageTable {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// Per-level table indices of a virtual address.
///
/// ```text
/// | 47‒39 | 38‒30 | 29‒21 | 20‒12 | 11‒0   |
/// |  PML4 |  PDPT |   PD  |   PT  | Offset |
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TableIndices {
    pub pml4: usize,
    pub pdpt: usize,
    pub pd: usize,
    pub pt: usize,
}

impl TableIndices {
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn of(va: VirtualAddress) -> Self {
        let v = va.as_u64();
        Self {
            pml4: ((v >> 39) & 0x1FF) as usize,
            pdpt: ((v >> 30) & 0x1FF) as usize,
            pd: ((v >> 21) & 0x1FF) as usize,
            pt: ((v >> 12) & 0x1FF) as usize,
        }
    }
}
