//! # Memory Layout

/// Size of a base page.
pub const PAGE_SIZE: u64 = 4096;

/// End of userspace VA range after which Kernel space begins.
pub const USERSPACE_END: u64 = 0xffff_0000_0000_0000;

/// A simple Higher Half Direct Map (HHDM) base.
/// Anything you map at [`HHDM_BASE`] + `pa` lets the kernel
/// access physical memory via a fixed offset.
pub const HHDM_BASE: u64 = 0xffff_8880_0000_0000;

/// Where the kernel executes (VMA), matches the linker script.
pub const KERNEL_BASE: u64 = 0xffff_ffff_8000_0000;

/// Where the kernel image bytes are placed in *physical* memory (LMA).
pub const PHYS_LOAD: u64 = 0x0010_0000; // 1 MiB

/// The size of one kernel stack.
pub const KERNEL_STACK_SIZE: u64 = 32 * 1024;

/// Virtual base of the per-CPU kernel-stack region.
///
/// Every CPU owns one [`KSTACK_CPU_STRIDE`] slot starting here: an unmapped
/// guard page at the bottom, then the mapped stack.
pub const KSTACK_BASE: u64 = 0xffff_ff00_0000_0000;

/// Virtual span reserved per CPU.
pub const KSTACK_CPU_STRIDE: u64 = 0x10_0000; // 1 MiB per CPU

/// Unmapped guard page at the bottom of each slot.
pub const KSTACK_GUARD: u64 = PAGE_SIZE;

/// Highest address (exclusive) of the kernel stack of `cpu_id`; the stack
/// grows down towards the guard page.
#[inline]
#[must_use]
pub const fn kernel_stack_top(cpu_id: u64) -> u64 {
    KSTACK_BASE + cpu_id * KSTACK_CPU_STRIDE + KSTACK_GUARD + KERNEL_STACK_SIZE
}

/// Top of the boot CPU's kernel stack.
pub const KERNEL_STACK_TOP: u64 = kernel_stack_top(0);

/// Lowest address of the kernel-stack region.
///
/// A saved frame pointer below this value cannot belong to a kernel frame;
/// while a user environment is current it points into that environment's
/// stack instead.
pub const KERNEL_STACK_FLOOR: u64 = KSTACK_BASE;

const _: () = {
    assert!(PAGE_SIZE.is_power_of_two());
    assert!(KERNEL_STACK_SIZE.is_multiple_of(PAGE_SIZE));
    assert!(KSTACK_CPU_STRIDE.is_multiple_of(PAGE_SIZE));
    assert!(KERNEL_STACK_SIZE <= KSTACK_CPU_STRIDE - KSTACK_GUARD);
    assert!(HHDM_BASE >= USERSPACE_END);
    assert!(KERNEL_BASE > HHDM_BASE);
    assert!(KSTACK_BASE > HHDM_BASE);
    assert!(KSTACK_BASE < KERNEL_BASE);
};
