//! # Page-Aligned Virtual Ranges
//!
//! A [`PageRange`] is the half-open interval `[start, end)` of virtual
//! addresses with both bounds aligned to the page size `S` and `start < end`.
//! Anything that walks page tables page by page takes one of these, so
//! validation happens once, before the first lookup or edit.

use crate::{PageSize, Size4K, VirtualAddress};
use core::iter::FusedIterator;
use core::marker::PhantomData;

/// Why a pair of bounds does not form a [`PageRange`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    #[error("address {0} is not aligned to a {1} page")]
    Unaligned(VirtualAddress, &'static str),
    #[error("range [{0}, {1}) is empty")]
    Empty(VirtualAddress, VirtualAddress),
    #[error("range starting at {0} overflows the address space")]
    Overflow(VirtualAddress),
}

/// Validated, page-aligned, non-empty virtual range `[start, end)`.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PageRange<S: PageSize = Size4K> {
    start: VirtualAddress,
    end: VirtualAddress,
    _size: PhantomData<S>,
}

impl<S: PageSize> PageRange<S> {
    /// Validate `start` and `end` and build the range.
    ///
    /// # Errors
    /// - [`RangeError::Unaligned`] if either bound is not a page base.
    /// - [`RangeError::Empty`] if `start >= end`.
    pub fn new(start: VirtualAddress, end: VirtualAddress) -> Result<Self, RangeError> {
        if !start.is_aligned::<S>() {
            return Err(RangeError::Unaligned(start, S::LABEL));
        }
        if !end.is_aligned::<S>() {
            return Err(RangeError::Unaligned(end, S::LABEL));
        }
        if start >= end {
            return Err(RangeError::Empty(start, end));
        }
        Ok(Self {
            start,
            end,
            _size: PhantomData,
        })
    }

    /// The range covering exactly the one page starting at `start`.
    ///
    /// # Errors
    /// - [`RangeError::Unaligned`] if `start` is not a page base.
    /// - [`RangeError::Overflow`] if the page would end past the address space.
    pub fn single(start: VirtualAddress) -> Result<Self, RangeError> {
        let end = start
            .checked_add(S::SIZE)
            .ok_or(RangeError::Overflow(start))?;
        Self::new(start, end)
    }

    #[inline]
    #[must_use]
    pub const fn start(&self) -> VirtualAddress {
        self.start
    }

    #[inline]
    #[must_use]
    pub const fn end(&self) -> VirtualAddress {
        self.end
    }

    /// Number of pages in the range.
    #[inline]
    #[must_use]
    pub fn page_count(&self) -> u64 {
        (self.end - self.start) >> S::SHIFT
    }

    /// Iterate the page bases in ascending order.
    #[inline]
    #[must_use]
    pub const fn pages(&self) -> Pages<S> {
        Pages {
            next: self.start,
            end: self.end,
            _size: PhantomData,
        }
    }
}

impl<S: PageSize> IntoIterator for PageRange<S> {
    type Item = VirtualAddress;
    type IntoIter = Pages<S>;

    fn into_iter(self) -> Self::IntoIter {
        self.pages()
    }
}

/// Iterator over the page bases of a [`PageRange`].
#[derive(Clone, Debug)]
pub struct Pages<S: PageSize> {
    next: VirtualAddress,
    end: VirtualAddress,
    _size: PhantomData<S>,
}

impl<S: PageSize> Iterator for Pages<S> {
    type Item = VirtualAddress;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let page = self.next;
        // `end` is aligned and above `page`, so this cannot overflow.
        self.next = page + S::SIZE;
        Some(page)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from((self.end - self.next.min(self.end)) >> S::SHIFT).ok();
        (remaining.unwrap_or(usize::MAX), remaining)
    }
}

impl<S: PageSize> FusedIterator for Pages<S> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Size2M;

    fn va(v: u64) -> VirtualAddress {
        VirtualAddress::new(v)
    }

    #[test]
    fn visits_every_page_once_in_order() {
        let range = PageRange::<Size4K>::new(va(0x1000), va(0x5000)).unwrap();
        let pages: Vec<u64> = range.pages().map(VirtualAddress::as_u64).collect();
        assert_eq!(pages, vec![0x1000, 0x2000, 0x3000, 0x4000]);
        assert_eq!(range.page_count(), 4);
    }

    #[test]
    fn rejects_unaligned_bounds() {
        assert_eq!(
            PageRange::<Size4K>::new(va(0x1001), va(0x2000)),
            Err(RangeError::Unaligned(va(0x1001), "4K"))
        );
        assert_eq!(
            PageRange::<Size4K>::new(va(0x1000), va(0x2fff)),
            Err(RangeError::Unaligned(va(0x2fff), "4K"))
        );
        assert!(PageRange::<Size2M>::new(va(0x1000), va(0x40_0000)).is_err());
    }

    #[test]
    fn rejects_empty_and_reversed() {
        assert_eq!(
            PageRange::<Size4K>::new(va(0x2000), va(0x2000)),
            Err(RangeError::Empty(va(0x2000), va(0x2000)))
        );
        assert!(PageRange::<Size4K>::new(va(0x3000), va(0x1000)).is_err());
    }

    #[test]
    fn single_page_shorthand() {
        let range = PageRange::<Size4K>::single(va(0x7000)).unwrap();
        assert_eq!(range.end(), va(0x8000));
        assert_eq!(range.pages().count(), 1);

        assert_eq!(
            PageRange::<Size4K>::single(va(u64::MAX - 0xFFF)),
            Err(RangeError::Overflow(va(u64::MAX - 0xFFF)))
        );
    }

    #[test]
    fn error_messages_are_readable() {
        let err = PageRange::<Size4K>::new(va(0x10), va(0x1000)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "address 0x0000000000000010 is not aligned to a 4K page"
        );
    }
}
