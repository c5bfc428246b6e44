//! # Address Space (x86-64, PML4-rooted)
//!
//! A read/modify view of a live four-level hierarchy. The walker never
//! allocates or links tables; it only finds the leaf entry that maps a virtual
//! address so that callers can read its frame and flip its permission bits.
//!
//! ## Safety
//!
//! - Editing a leaf of the active space requires TLB maintenance for the page
//!   (see [`flush_page`](crate::flush_page)).
//! - The [`PhysMapper`] must yield writable references to table frames.

use crate::page_table::{PageTable, TableIndices};
use crate::{PageEntryBits, PageWalk, PhysMapper};
use kernel_memory_addresses::{
    PageSize, PhysicalAddress, Size1G, Size2M, Size4K, VirtualAddress,
};
use log::trace;

/// Size of the page a leaf entry maps.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MappedSize {
    /// 4 KiB page mapped by a PTE.
    Size4K,
    /// 2 MiB page mapped by a PDE with `PS=1`.
    Size2M,
    /// 1 GiB page mapped by a PDPTE with `PS=1`.
    Size1G,
}

impl MappedSize {
    #[inline]
    #[must_use]
    pub const fn bytes(self) -> u64 {
        match self {
            Self::Size4K => Size4K::SIZE,
            Self::Size2M => Size2M::SIZE,
            Self::Size1G => Size1G::SIZE,
        }
    }
}

/// The leaf entry that maps some virtual address.
#[derive(Debug)]
pub struct Leaf<'a> {
    entry: &'a mut PageEntryBits,
    size: MappedSize,
}

impl<'a> Leaf<'a> {
    #[inline]
    pub const fn new(entry: &'a mut PageEntryBits, size: MappedSize) -> Self {
        Self { entry, size }
    }

    #[inline]
    #[must_use]
    pub const fn size(&self) -> MappedSize {
        self.size
    }

    #[inline]
    #[must_use]
    pub const fn entry(&self) -> PageEntryBits {
        *self.entry
    }

    #[inline]
    pub const fn entry_mut(&mut self) -> &mut PageEntryBits {
        &mut *self.entry
    }

    /// Physical address `va` resolves to through this leaf.
    ///
    /// For large pages this is the frame base plus the offset of `va` inside
    /// the large page.
    #[inline]
    #[must_use]
    pub const fn translate(&self, va: VirtualAddress) -> PhysicalAddress {
        let bytes = self.size.bytes();
        let base = self.entry.frame_base(bytes);
        PhysicalAddress::new(base.as_u64() + (va.as_u64() & (bytes - 1)))
    }
}

/// Handle to a single, concrete address space.
pub struct AddressSpace<'m, M: PhysMapper> {
    root: PhysicalAddress,
    mapper: &'m M,
}

impl<'m, M: PhysMapper> AddressSpace<'m, M> {
    /// View the **currently active** address space by reading CR3.
    ///
    /// # Safety
    /// - Must run at CPL0 with paging enabled.
    /// - `mapper` must cover every table frame reachable from CR3.
    #[cfg(target_arch = "x86_64")]
    #[inline]
    pub unsafe fn from_current(mapper: &'m M) -> Self {
        use kernel_registers::LoadRegisterUnsafe;
        use kernel_registers::cr3::Cr3;

        let root = unsafe { Cr3::load_unsafe() }.pml4_phys();
        Self { root, mapper }
    }

    /// View the hierarchy rooted at the PML4 frame `root`.
    ///
    /// # Safety
    /// `root` must be a PML4 frame and `mapper` must yield valid, writable
    /// references for it and every table reachable from it.
    #[inline]
    pub const unsafe fn from_root(mapper: &'m M, root: PhysicalAddress) -> Self {
        Self { root, mapper }
    }

    /// Physical address of the PML4.
    #[inline]
    #[must_use]
    pub const fn root(&self) -> PhysicalAddress {
        self.root
    }

    /// Borrow the table in frame `pa`.
    ///
    /// # Safety
    /// `pa` must be a page table frame of this hierarchy.
    #[inline]
    unsafe fn table<'t>(&self, pa: PhysicalAddress) -> &'t mut PageTable {
        unsafe { self.mapper.phys_to_mut::<PageTable>(pa) }
    }
}

impl<M: PhysMapper> PageWalk for AddressSpace<'_, M> {
    fn leaf_mut(&mut self, va: VirtualAddress) -> Option<Leaf<'_>> {
        let idx = TableIndices::of(va);

        // SAFETY: `from_root`/`from_current` guarantee every present non-leaf
        // entry points to a table frame the mapper can reach.
        let pml4 = unsafe { self.table(self.root) };
        let e4 = pml4.entry(idx.pml4);
        if !e4.present() {
            trace!("{va}: PML4[{}] not present", idx.pml4);
            return None;
        }

        let pdpt = unsafe { self.table(e4.physical_address()) };
        let e3 = pdpt.entry_mut(idx.pdpt);
        if !e3.present() {
            trace!("{va}: PDPT[{}] not present", idx.pdpt);
            return None;
        }
        if e3.large_page() {
            return Some(Leaf::new(e3, MappedSize::Size1G));
        }

        let pd = unsafe { self.table(e3.physical_address()) };
        let e2 = pd.entry_mut(idx.pd);
        if !e2.present() {
            trace!("{va}: PD[{}] not present", idx.pd);
            return None;
        }
        if e2.large_page() {
            return Some(Leaf::new(e2, MappedSize::Size2M));
        }

        let pt = unsafe { self.table(e2.physical_address()) };
        let e1 = pt.entry_mut(idx.pt);
        if !e1.present() {
            trace!("{va}: PT[{}] not present", idx.pt);
            return None;
        }
        Some(Leaf::new(e1, MappedSize::Size4K))
    }
}
