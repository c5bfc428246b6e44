//! # Virtual Memory Support
//!
//! Minimal x86-64 paging helpers for inspecting and editing live mappings.
//!
//! ## What you get
//! - [`PageEntryBits`]: the page table entry bitfield shared by all levels.
//! - [`PageTable`]: a 4 KiB-aligned table of 512 entries.
//! - [`PageWalk`]: "which leaf maps this virtual address?", the seam the
//!   debugger uses for `showmappings`/`setperm`.
//! - [`PhysMapper`]: how a physical address is reached from the current
//!   address space, with the higher-half direct map in [`HhdmPhysMapper`].
//! - [`AddressSpace`]: a [`PageWalk`] over a PML4-rooted hierarchy.
//!
//! ## x86-64 Virtual Address → Physical Address Walk
//!
//! ```text
//!  PML4  →  PDPT  →  PD  →  PT  →  Physical Page
//!   │        │        │        │
//!   │        │        │        └───► PTE   → maps 4 KiB page
//!   │        │        └────────────► PDE   → PS=1 → 2 MiB page
//!   │        └─────────────────────► PDPTE → PS=1 → 1 GiB page
//!   └──────────────────────────────► PML4E
//! ```
//!
//! A **leaf entry** maps physical memory directly (a PTE, or a PDE/PDPTE with
//! `PS=1`); a **non-leaf entry** points to the next lower table. The low bits
//! of the virtual address below the leaf's page size select the byte inside
//! the page.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

extern crate alloc;

pub mod address_space;
mod page_entry_bits;
mod page_table;

pub use crate::address_space::{AddressSpace, Leaf, MappedSize};
pub use crate::page_entry_bits::PageEntryBits;
pub use crate::page_table::{ENTRIES, PageTable, TableIndices};
use kernel_memory_addresses::{PhysicalAddress, VirtualAddress};

/// Re-export constants as info module.
pub use kernel_info::memory as info;

/// Finds the leaf entry mapping a virtual address.
pub trait PageWalk {
    /// The leaf that maps `va`, or `None` if any level is not present.
    fn leaf_mut(&mut self, va: VirtualAddress) -> Option<Leaf<'_>>;

    /// Translate `va` to the physical address it maps to, if mapped.
    fn translate(&mut self, va: VirtualAddress) -> Option<PhysicalAddress> {
        self.leaf_mut(va).map(|leaf| leaf.translate(va))
    }
}

/// Converts physical addresses to usable addresses in the current virtual
/// address space (e.g., via identity map or a higher-half direct map, HHDM).
pub trait PhysMapper {
    /// The virtual alias of `pa`.
    fn phys_to_virt(&self, pa: PhysicalAddress) -> VirtualAddress;

    /// Convert a *physical* address to a usable mutable reference.
    ///
    /// # Safety
    /// - `pa` must be mapped writable through [`phys_to_virt`](Self::phys_to_virt).
    /// - The mapping must remain valid for `'a`.
    /// - The bytes at `pa` must be a valid `T` and must not be aliased.
    unsafe fn phys_to_mut<'a, T>(&self, pa: PhysicalAddress) -> &'a mut T {
        unsafe { &mut *self.phys_to_virt(pa).as_mut_ptr::<T>() }
    }
}

/// [`PhysMapper`] for kernels with a higher-half direct map: every physical
/// address `pa` is visible at `HHDM_BASE + pa`.
#[derive(Debug, Copy, Clone, Default)]
pub struct HhdmPhysMapper;

impl PhysMapper for HhdmPhysMapper {
    #[inline]
    fn phys_to_virt(&self, pa: PhysicalAddress) -> VirtualAddress {
        VirtualAddress::new(info::HHDM_BASE + pa.as_u64())
    }
}

/// Invalidate the TLB entry of the page containing `va` on this CPU.
///
/// # Safety
/// Must run at CPL0.
#[cfg(target_arch = "x86_64")]
#[inline]
pub unsafe fn flush_page(va: VirtualAddress) {
    unsafe {
        core::arch::asm!("invlpg [{}]", in(reg) va.as_u64(), options(nostack, preserves_flags));
    }
}
