use kernel_info::memory::KERNEL_STACK_FLOOR;
use kernel_memory_addresses::VirtualAddress;

/// Runtime knobs of a [`Monitor`](crate::Monitor).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MonitorOptions {
    /// Lowest address of the kernel stack. While a user environment is
    /// current, the unwinder stops at a frame pointer below this bound.
    pub kernel_stack_floor: VirtualAddress,
    /// Upper bound on the frames `backtrace` prints.
    pub max_frames: usize,
    /// Print the trap frame when the monitor is entered with one.
    pub print_trapframe: bool,
}

impl MonitorOptions {
    pub const DEFAULT_MAX_FRAMES: usize = 64;

    #[must_use]
    pub const fn new() -> Self {
        Self {
            kernel_stack_floor: VirtualAddress::new(KERNEL_STACK_FLOOR),
            max_frames: Self::DEFAULT_MAX_FRAMES,
            print_trapframe: true,
        }
    }

    #[must_use]
    pub const fn with_kernel_stack_floor(mut self, floor: VirtualAddress) -> Self {
        self.kernel_stack_floor = floor;
        self
    }

    #[must_use]
    pub const fn with_max_frames(mut self, max_frames: usize) -> Self {
        self.max_frames = max_frames;
        self
    }

    #[must_use]
    pub const fn with_print_trapframe(mut self, print: bool) -> Self {
        self.print_trapframe = print;
        self
    }
}

impl Default for MonitorOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel_info::memory::KSTACK_BASE;

    #[test]
    fn defaults_follow_the_kernel_layout() {
        let opts = MonitorOptions::default();
        assert_eq!(opts.kernel_stack_floor.as_u64(), KSTACK_BASE);
        assert_eq!(opts.max_frames, 64);
        assert!(opts.print_trapframe);
    }

    #[test]
    fn builders_override_single_fields() {
        let opts = MonitorOptions::new().with_max_frames(3).with_print_trapframe(false);
        assert_eq!(opts.max_frames, 3);
        assert!(!opts.print_trapframe);
        assert_eq!(opts.kernel_stack_floor, MonitorOptions::new().kernel_stack_floor);
    }
}
