//! # Static Symbol Table
//!
//! A sorted table of functions with their line tables, generated at build
//! time from the kernel's debug info and linked into the image. Resolves a
//! return address to file, line and function the way `backtrace` prints
//! them.

use crate::machine::SymbolInfo;

/// One function of the kernel image.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// First instruction.
    pub start: u64,
    /// One past the last instruction.
    pub end: u64,
    pub function: &'static str,
    pub file: &'static str,
    /// `(address, line)` pairs sorted by address; the line of an address is
    /// the one of the last pair at or below it.
    pub lines: &'static [(u64, u32)],
}

impl Symbol {
    fn line_of(&self, addr: u64) -> u32 {
        let idx = self.lines.partition_point(|&(at, _)| at <= addr);
        idx.checked_sub(1).map_or(0, |i| self.lines[i].1)
    }
}

/// Functions sorted by start address, non-overlapping.
#[derive(Debug, Copy, Clone, Default)]
pub struct SymbolTable {
    symbols: &'static [Symbol],
}

impl SymbolTable {
    #[must_use]
    pub const fn new(symbols: &'static [Symbol]) -> Self {
        Self { symbols }
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self { symbols: &[] }
    }

    /// The function containing `addr`.
    #[must_use]
    pub fn resolve(&self, addr: u64) -> Option<SymbolInfo<'static>> {
        let idx = self.symbols.partition_point(|s| s.start <= addr);
        let symbol = self.symbols.get(idx.checked_sub(1)?)?;
        if addr >= symbol.end {
            return None;
        }
        Some(SymbolInfo {
            file: symbol.file,
            line: symbol.line_of(addr),
            function: symbol.function,
            function_start: symbol.start,
        })
    }
}
