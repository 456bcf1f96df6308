//! # i386 Page Table
//!
//! The leaf level. Every present entry maps exactly one 4 KiB page; the base
//! address stored in a PTE is 4 KiB-aligned.

use crate::PageEntryBits;
use crate::page_table::ENTRIES_PER_TABLE;
use kernel_memory_addresses::{PhysicalPage, Size4K, VirtualAddress};

/// A single page-table entry.
#[doc(alias = "PTE")]
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PtEntry(PageEntryBits);

/// A page table: 1024 entries, 4 KiB-aligned.
#[doc(alias = "PT")]
#[repr(C, align(4096))]
pub struct PageTable {
    entries: [PtEntry; ENTRIES_PER_TABLE],
}

impl PtEntry {
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self(PageEntryBits::new())
    }

    #[inline]
    #[must_use]
    pub const fn is_present(self) -> bool {
        self.0.present()
    }

    #[inline]
    #[must_use]
    pub const fn flags(self) -> PageEntryBits {
        self.0
    }

    /// Create a 4 KiB leaf: sets `present=1` and writes the page base.
    #[inline]
    #[must_use]
    pub const fn make_4k(page: PhysicalPage<Size4K>, flags: PageEntryBits) -> Self {
        Self(flags.with_present(true).with_frame_address(page.base()))
    }
}

impl PageTable {
    #[inline]
    #[must_use]
    pub const fn zeroed() -> Self {
        Self {
            entries: [PtEntry::zero(); ENTRIES_PER_TABLE],
        }
    }

    /// Read the entry governing `va`.
    #[inline]
    #[must_use]
    pub const fn get(&self, va: VirtualAddress) -> PtEntry {
        self.entries[va.table_index()]
    }

    /// Write the entry governing `va`.
    #[inline]
    pub const fn set(&mut self, va: VirtualAddress, e: PtEntry) {
        self.entries[va.table_index()] = e;
    }

    #[inline]
    pub fn zero(&mut self) {
        self.entries.fill(PtEntry::zero());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel_memory_addresses::PhysicalAddress;

    #[test]
    fn pte_4k_leaf() {
        let page = PhysicalAddress::new(0x5555_0000).page();
        let e = PtEntry::make_4k(page, PageEntryBits::user_ro());
        assert!(e.is_present());
        assert_eq!(e.flags().frame_address().as_u32(), 0x5555_0000);
        assert!(e.flags().user_access());
        assert!(!e.flags().writable());
    }

    #[test]
    fn index_uses_middle_bits() {
        let mut pt = PageTable::zeroed();
        let va = VirtualAddress::new(0xF0_3FF_123);
        let e = PtEntry::make_4k(PhysicalAddress::new(0x1000).page(), PageEntryBits::kernel_rw());
        pt.set(va, e);
        assert_eq!(pt.get(VirtualAddress::new(0x003F_F000)), e);
    }
}
