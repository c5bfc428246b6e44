//! `dump`: hex dump of a virtual or physical byte range.

use crate::console::Console;
use crate::error::CommandError;
use crate::machine::Machine;
use crate::parsing::parse_number;
use crate::{Flow, Monitor};
use core::fmt::Write;
use kernel_memory_addresses::{PhysicalAddress, VirtualAddress};

/// Bytes per output row.
const BYTES_PER_LINE: u64 = 16;

/// Which address space `dump` reads from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AddressKind {
    Virtual,
    Physical,
}

impl AddressKind {
    /// # Errors
    /// [`CommandError::InvalidAddressType`] unless `token` is `V` or `P`.
    pub fn parse(token: &str) -> Result<Self, CommandError> {
        match token {
            "V" => Ok(Self::Virtual),
            "P" => Ok(Self::Physical),
            _ => Err(CommandError::InvalidAddressType),
        }
    }
}

impl<C: Console, M: Machine> Monitor<C, M> {
    pub(super) fn cmd_dump(
        &mut self,
        kind: &str,
        start: &str,
        end: Option<&str>,
    ) -> Result<Flow, CommandError> {
        let kind = AddressKind::parse(kind)?;
        let start = parse_number(start)?;
        let end = match end {
            Some(end) => parse_number(end)?,
            None => start
                .checked_add(BYTES_PER_LINE)
                .ok_or(CommandError::InvalidAddress)?,
        };
        if start >= end {
            return Err(CommandError::InvalidAddress);
        }

        let mut row = start;
        while row < end {
            let row_end = end.min(row.saturating_add(BYTES_PER_LINE));
            write!(self.console, "0x{row:016x}:")?;
            for addr in row..row_end {
                let byte = self.read_byte_in(kind, addr);
                write!(self.console, " {byte:02x}")?;
            }
            writeln!(self.console)?;
            row = row_end;
        }
        Ok(Flow::Continue)
    }

    fn read_byte_in(&self, kind: AddressKind, addr: u64) -> u8 {
        let va = match kind {
            AddressKind::Virtual => VirtualAddress::new(addr),
            AddressKind::Physical => self.machine.phys_to_virt(PhysicalAddress::new(addr)),
        };
        self.machine.read_byte(va)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_kinds() {
        assert_eq!(AddressKind::parse("V"), Ok(AddressKind::Virtual));
        assert_eq!(AddressKind::parse("P"), Ok(AddressKind::Physical));
        for bad in ["v", "p", "VP", "", "X"] {
            assert_eq!(AddressKind::parse(bad), Err(CommandError::InvalidAddressType));
        }
    }
}
