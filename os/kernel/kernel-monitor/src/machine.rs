//! # Machine Access
//!
//! Everything the monitor needs from the kernel it is embedded in, behind one
//! trait so that the command handlers can be exercised against a model of a
//! machine as well as against the live one.

use kernel_info::layout::KernelLayout;
use kernel_memory_addresses::VirtualAddress;
use kernel_vmem::{PageWalk, PhysMapper};

/// Identifier of a user environment.
pub type EnvId = u32;

/// Source location of a code address.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SymbolInfo<'a> {
    pub file: &'a str,
    pub line: u32,
    pub function: &'a str,
    /// Address of the first instruction of `function`.
    pub function_start: u64,
}

/// The collaborators of the monitor.
///
/// [`PhysMapper`] is how physical memory is reached for `dump P`.
pub trait Machine: PhysMapper {
    /// The address space the monitor inspects and edits.
    fn page_walk(&mut self) -> &mut dyn PageWalk;

    /// Invalidate the TLB entry of the page containing `va`.
    fn flush_page(&mut self, va: VirtualAddress);

    fn read_byte(&self, va: VirtualAddress) -> u8;

    fn read_word(&self, va: VirtualAddress) -> u64;

    /// The frame pointer to start unwinding from.
    fn frame_pointer(&self) -> u64;

    /// Where `addr` lives in the kernel sources, if known.
    fn resolve(&self, addr: u64) -> Option<SymbolInfo<'_>>;

    /// The user environment whose address space is active, if any.
    fn current_env(&self) -> Option<EnvId>;

    fn layout(&self) -> KernelLayout;

    /// Ask the platform to power off. Returns only if that failed.
    fn power_off(&mut self);

    /// Ask the platform to reset. Returns only if that failed.
    fn reset(&mut self);
}
