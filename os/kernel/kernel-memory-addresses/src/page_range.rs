use crate::{MemoryPage, PageSize, VirtualPage};
use core::iter::FusedIterator;

/// An inclusive, ascending range of virtual pages.
///
/// Iterates over page *numbers* internally, so a range ending at the last
/// page of the address space terminates instead of wrapping to page zero.
///
/// ```rust
/// # use kernel_memory_addresses::*;
/// let last = VirtualAddress::new(0xFFFF_F000).page::<Size4K>();
/// let range = PageRange::inclusive(VirtualAddress::new(0xFFFF_E000).page(), last);
/// let bases: Vec<u32> = range.map(|p| p.base().as_u32()).collect();
/// assert_eq!(bases, [0xFFFF_E000, 0xFFFF_F000]);
/// ```
#[derive(Clone, Debug)]
pub struct PageRange<S: PageSize> {
    next: u32,
    last: u32,
    done: bool,
    _size: core::marker::PhantomData<S>,
}

impl<S: PageSize> PageRange<S> {
    /// All pages from `first` to `last`, both included. Empty if `first > last`.
    #[must_use]
    pub const fn inclusive(first: VirtualPage<S>, last: VirtualPage<S>) -> Self {
        Self {
            next: first.number(),
            last: last.number(),
            done: first.number() > last.number(),
            _size: core::marker::PhantomData,
        }
    }

    /// Number of pages not yet yielded.
    #[must_use]
    pub const fn len(&self) -> usize {
        if self.done {
            0
        } else {
            (self.last - self.next) as usize + 1
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.done
    }
}

impl<S: PageSize> Iterator for PageRange<S> {
    type Item = VirtualPage<S>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let page = VirtualPage::from_page(MemoryPage::from_number(self.next));
        if self.next == self.last {
            self.done = true;
        } else {
            self.next += 1;
        }
        Some(page)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len();
        (n, Some(n))
    }
}

impl<S: PageSize> ExactSizeIterator for PageRange<S> {}

impl<S: PageSize> FusedIterator for PageRange<S> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Size4K, VirtualAddress};

    #[test]
    fn reversed_range_is_empty() {
        let range = PageRange::<Size4K>::inclusive(
            VirtualAddress::new(0x3000).page(),
            VirtualAddress::new(0x1000).page(),
        );
        assert!(range.is_empty());
        assert_eq!(range.count(), 0);
    }

    #[test]
    fn single_page_range_yields_once() {
        let page = VirtualAddress::new(0xF000_0000).page::<Size4K>();
        let mut range = PageRange::inclusive(page, page);
        assert_eq!(range.len(), 1);
        assert_eq!(range.next(), Some(page));
        assert_eq!(range.next(), None);
    }
}
