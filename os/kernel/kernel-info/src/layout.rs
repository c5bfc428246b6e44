//! # Kernel Image Layout
//!
//! Addresses of the linker-provided section boundaries. The kernel fills a
//! [`KernelLayout`] from its linker symbols (`_start`, `entry`, `etext`,
//! `edata`, `end`) and hands it to whoever wants to describe the image.

use crate::memory::{KERNEL_BASE, PHYS_LOAD};
use kernel_memory_addresses::{PhysicalAddress, VirtualAddress};

/// Section boundaries of the loaded kernel image.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct KernelLayout {
    /// Physical address of the boot entry stub (`_start`).
    pub start: PhysicalAddress,
    /// Virtual address of the kernel entry point.
    pub entry: VirtualAddress,
    /// End of the text section.
    pub etext: VirtualAddress,
    /// End of the initialized data section.
    pub edata: VirtualAddress,
    /// End of the image, including BSS.
    pub end: VirtualAddress,
}

impl KernelLayout {
    /// Physical (load) address of a virtual address inside the kernel image.
    #[inline]
    #[must_use]
    pub const fn to_physical(va: VirtualAddress) -> PhysicalAddress {
        PhysicalAddress::new(va.as_u64().wrapping_sub(KERNEL_BASE).wrapping_add(PHYS_LOAD))
    }

    /// Memory footprint of the image, rounded up to whole KiB.
    #[inline]
    #[must_use]
    pub fn footprint_kib(&self) -> u64 {
        let bytes = self.end.as_u64().saturating_sub(self.entry.as_u64());
        bytes.div_ceil(1024)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> KernelLayout {
        KernelLayout {
            start: PhysicalAddress::new(PHYS_LOAD),
            entry: VirtualAddress::new(KERNEL_BASE + 0x20),
            etext: VirtualAddress::new(KERNEL_BASE + 0x1_8000),
            edata: VirtualAddress::new(KERNEL_BASE + 0x2_0000),
            end: VirtualAddress::new(KERNEL_BASE + 0x2_0421),
        }
    }

    #[test]
    fn virtual_to_load_address() {
        let pa = KernelLayout::to_physical(layout().etext);
        assert_eq!(pa.as_u64(), PHYS_LOAD + 0x1_8000);
    }

    #[test]
    fn footprint_rounds_up() {
        // 0x2_0401 bytes = 132_097 bytes -> 130 KiB (rounded up).
        assert_eq!(layout().footprint_kib(), 130);
    }
}
