//! # QEMU Development and Debug Support
//!
//! Platform glue for a kernel running under QEMU:
//!
//! * [`QemuLogger`]: a `log::Log` backend that writes to the debug console.
//! * [`qemu_trace!`]: formatted output to the debug console, bypassing `log`.
//! * [`ports`]: `in`/`out` primitives for the legacy I/O port space.
//! * [`power`]: the power-off and reset sequences QEMU and Bochs understand.
//!
//! ## Debug console
//!
//! QEMU's `-debugcon` device captures every byte written to port `0x402`:
//!
//! ```bash
//! qemu-system-x86_64 -kernel kernel.bin -debugcon stdio
//! ```
//!
//! ## Features
//!
//! `enabled` (default) compiles the port writes in. Without it the trace
//! macro and the logger are no-ops.
//!
//! ## Basic Logging Setup
//! ```rust,no_run
//! use kernel_qemu::QemuLogger;
//! use log::{LevelFilter, info};
//!
//! QemuLogger::new(LevelFilter::Debug).init().ok();
//! info!("monitor ready");
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

mod logger;
#[cfg(target_arch = "x86_64")]
pub mod ports;
pub mod power;

pub use logger::QemuLogger;

#[cfg(all(feature = "enabled", target_arch = "x86_64"))]
#[doc(hidden)]
pub mod qemu_fmt {
    use core::fmt::{self, Write};

    /// The port number for QEMU's debug console.
    pub const QEMU_DEBUG_PORT: u16 = 0x402;

    /// Sink that forwards every byte to the debug console.
    pub struct QemuSink;

    impl Write for QemuSink {
        #[inline]
        fn write_str(&mut self, s: &str) -> fmt::Result {
            for b in s.bytes() {
                unsafe { crate::ports::outb(QEMU_DEBUG_PORT, b) }
            }
            Ok(())
        }
    }

    #[doc(hidden)]
    #[inline]
    pub fn qemu_write(args: fmt::Arguments) {
        // Best-effort debug output.
        let _ = fmt::write(&mut QemuSink, args);
    }
}

#[cfg(not(all(feature = "enabled", target_arch = "x86_64")))]
#[doc(hidden)]
pub mod qemu_fmt {
    use core::fmt;

    #[doc(hidden)]
    #[inline]
    pub fn qemu_write(_: fmt::Arguments) {}
}

/// Formatted output to the QEMU debug console, without allocating.
#[macro_export]
macro_rules! qemu_trace {
    ($($arg:tt)*) => {{
        $crate::qemu_fmt::qemu_write(core::format_args!($($arg)*));
    }};
}
