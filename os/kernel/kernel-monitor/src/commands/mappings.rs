//! `showmappings` and `setperm`: inspect and edit the leaf entries that map a
//! page-aligned virtual range.

use crate::console::Console;
use crate::error::CommandError;
use crate::machine::Machine;
use crate::parsing::parse_page_range;
use crate::{Flow, Monitor};
use core::fmt::{self, Write};
use kernel_memory_addresses::{PageSize, PhysicalAddress, Size4K, VirtualAddress};
use kernel_vmem::{Leaf, PageEntryBits};
use log::{info, trace, warn};

/// The permission a `setperm` applies, from a `[U-][W-]` token.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Permission {
    pub user: bool,
    pub writable: bool,
}

impl Permission {
    /// # Errors
    /// [`CommandError::InvalidPermission`] unless `token` is exactly two
    /// characters, `U` or `-` followed by `W` or `-`.
    pub fn parse(token: &str) -> Result<Self, CommandError> {
        match token.as_bytes() {
            &[u @ (b'U' | b'-'), w @ (b'W' | b'-')] => Ok(Self {
                user: u == b'U',
                writable: w == b'W',
            }),
            _ => Err(CommandError::InvalidPermission),
        }
    }

    fn apply(self, entry: &mut PageEntryBits) {
        entry.set_user_access(self.user);
        entry.set_writable(self.writable);
    }
}

/// One output row for a page.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct MappingLine {
    page: VirtualAddress,
    mapping: Option<(PhysicalAddress, PageEntryBits)>,
}

impl MappingLine {
    fn new(page: VirtualAddress, leaf: Option<&Leaf<'_>>) -> Self {
        Self {
            page,
            mapping: leaf.map(|leaf| (leaf.translate(page), leaf.entry())),
        }
    }
}

impl fmt::Display for MappingLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}  ", self.page, self.page + Size4K::SIZE)?;
        let Some((pa, entry)) = self.mapping else {
            return f.write_str("Not mapped");
        };
        let flag = |set: bool, c: char| if set { c } else { '-' };
        write!(
            f,
            "{pa}  {}R{}{}",
            flag(entry.user_access(), 'U'),
            flag(entry.writable(), 'W'),
            flag(entry.present(), 'P'),
        )
    }
}

impl<C: Console, M: Machine> Monitor<C, M> {
    pub(super) fn cmd_showmappings(
        &mut self,
        start: &str,
        end: Option<&str>,
    ) -> Result<Flow, CommandError> {
        let range = parse_page_range(start, end)?;

        for page in range {
            let leaf = self.machine.page_walk().leaf_mut(page);
            let line = MappingLine::new(page, leaf.as_ref());
            trace!("{line}");
            writeln!(self.console, "{line}")?;
        }
        Ok(Flow::Continue)
    }

    pub(super) fn cmd_setperm(
        &mut self,
        perm: &str,
        start: &str,
        end: Option<&str>,
    ) -> Result<Flow, CommandError> {
        let perm = Permission::parse(perm)?;
        let range = parse_page_range(start, end)?;

        for page in range {
            let edited = self.machine.page_walk().leaf_mut(page).map(|mut leaf| {
                perm.apply(leaf.entry_mut());
                MappingLine::new(page, Some(&leaf))
            });

            match edited {
                Some(line) => {
                    self.machine.flush_page(page);
                    info!("setperm {line}");
                    writeln!(self.console, "{line}")?;
                }
                None => {
                    warn!("setperm: {page} not mapped, skipped");
                    writeln!(self.console, "{page}: not mapped, skipped")?;
                }
            }
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn permission_tokens() {
        assert_eq!(
            Permission::parse("UW"),
            Ok(Permission {
                user: true,
                writable: true
            })
        );
        assert_eq!(
            Permission::parse("-W"),
            Ok(Permission {
                user: false,
                writable: true
            })
        );
        assert_eq!(
            Permission::parse("--"),
            Ok(Permission {
                user: false,
                writable: false
            })
        );
        for bad in ["", "U", "UWX", "WU", "uw", "U+", "ÜW"] {
            assert_eq!(
                Permission::parse(bad),
                Err(CommandError::InvalidPermission),
                "{bad}"
            );
        }
    }

    #[test]
    fn mapping_line_formats() {
        let page = VirtualAddress::new(0x1000);
        let mut entry = PageEntryBits::new().with_present(true).with_writable(true);
        entry.set_physical_address(PhysicalAddress::new(0x0020_3000));
        let mapped = MappingLine {
            page,
            mapping: Some((entry.physical_address(), entry)),
        };
        assert_eq!(
            mapped.to_string(),
            "0x0000000000001000-0x0000000000002000  0x0000000000203000  -RWP"
        );

        let unmapped = MappingLine {
            page,
            mapping: None,
        };
        assert_eq!(
            unmapped.to_string(),
            "0x0000000000001000-0x0000000000002000  Not mapped"
        );
    }
}
