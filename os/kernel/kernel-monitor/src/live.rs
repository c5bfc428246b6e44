//! # Live Machine
//!
//! [`Machine`] over the running kernel: the active page tables through the
//! higher-half direct map, raw memory reads, `rbp`, the linked-in symbol
//! table and the QEMU power controls.

use crate::machine::{EnvId, Machine, SymbolInfo};
use crate::symbols::SymbolTable;
use kernel_info::layout::KernelLayout;
use kernel_memory_addresses::{PhysicalAddress, VirtualAddress};
use kernel_vmem::{AddressSpace, HhdmPhysMapper, PageWalk, PhysMapper};

static HHDM: HhdmPhysMapper = HhdmPhysMapper;

/// The machine the monitor runs on.
pub struct LiveMachine {
    space: AddressSpace<'static, HhdmPhysMapper>,
    layout: KernelLayout,
    symbols: SymbolTable,
    env: Option<EnvId>,
}

impl LiveMachine {
    /// Bind to the address space that is active right now.
    ///
    /// # Safety
    /// - Must run at CPL0 with paging enabled and the direct map in place.
    /// - Reads issued through this machine are raw loads from whatever
    ///   address the operator names; the caller accepts that a bad address
    ///   faults like any other kernel access.
    #[must_use]
    pub unsafe fn new(layout: KernelLayout, symbols: SymbolTable) -> Self {
        Self {
            space: unsafe { AddressSpace::from_current(&HHDM) },
            layout,
            symbols,
            env: None,
        }
    }

    /// Record the user environment the trap came from.
    #[must_use]
    pub const fn with_current_env(mut self, env: Option<EnvId>) -> Self {
        self.env = env;
        self
    }
}

impl PhysMapper for LiveMachine {
    #[inline]
    fn phys_to_virt(&self, pa: PhysicalAddress) -> VirtualAddress {
        HHDM.phys_to_virt(pa)
    }
}

impl Machine for LiveMachine {
    fn page_walk(&mut self) -> &mut dyn PageWalk {
        &mut self.space
    }

    fn flush_page(&mut self, va: VirtualAddress) {
        unsafe { kernel_vmem::flush_page(va) }
    }

    fn read_byte(&self, va: VirtualAddress) -> u8 {
        unsafe { core::ptr::read_volatile(va.as_ptr::<u8>()) }
    }

    fn read_word(&self, va: VirtualAddress) -> u64 {
        unsafe { core::ptr::read_unaligned(va.as_ptr::<u64>()) }
    }

    #[allow(clippy::inline_always)]
    #[inline(always)]
    fn frame_pointer(&self) -> u64 {
        kernel_registers::read_frame_pointer()
    }

    fn resolve(&self, addr: u64) -> Option<SymbolInfo<'_>> {
        self.symbols.resolve(addr)
    }

    fn current_env(&self) -> Option<EnvId> {
        self.env
    }

    fn layout(&self) -> KernelLayout {
        self.layout
    }

    fn power_off(&mut self) {
        unsafe { kernel_qemu::power::power_off() }
    }

    fn reset(&mut self) {
        unsafe { kernel_qemu::power::reset() }
    }
}
