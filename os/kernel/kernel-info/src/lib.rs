//! # Kernel Layout Information
//!
//! Compile-time layout constants and the kernel image description shared by
//! the kernel and its debugging tools.
//!
//! ## Virtual Address Space
//!
//! ```text
//! 0x0000_0000_0000_0000 ┌─────────────────────────────────┐
//!                       │         User Space              │
//! USERSPACE_END         ├─────────────────────────────────┤ 0xffff_0000_0000_0000
//!                       │        Guard Region             │
//! HHDM_BASE             ├─────────────────────────────────┤ 0xffff_8880_0000_0000
//!                       │   Higher Half Direct Mapping    │
//! KSTACK_BASE           ├─────────────────────────────────┤ 0xffff_ff00_0000_0000
//!                       │  Per-CPU Kernel Stacks (1 MiB)  │
//!                       │    guard page + 32 KiB stack    │
//!                       ├─────────────────────────────────┤
//!                       │        (unused)                 │
//! KERNEL_BASE           ├─────────────────────────────────┤ 0xffff_ffff_8000_0000
//!                       │       Kernel Text & Data        │
//! 0xFFFF_FFFF_FFFF_FFFF └─────────────────────────────────┘
//! ```
//!
//! The [`memory`] module holds the constants; [`layout`] describes where the
//! linker placed the kernel image, which is what `kerninfo` reports.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![deny(unsafe_code)]

pub mod layout;
pub mod memory;
