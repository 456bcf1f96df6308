//! # i386 Page Directory
//!
//! - [`PdEntry`]: a PDE that is either a pointer to a page table (`PS=0`) or a 4 MiB leaf (`PS=1`).
//! - [`PdEntryKind`]: decoded view of a present entry.
//! - [`PageDirectory`]: a 4 KiB-aligned array of 1024 PDEs.

use crate::PageEntryBits;
use crate::page_table::ENTRIES_PER_TABLE;
use kernel_memory_addresses::{PhysicalPage, Size4K, Size4M, VirtualAddress};

/// A single page-directory entry.
#[doc(alias = "PDE")]
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PdEntry(PageEntryBits);

/// Decoded view of a **present** [`PdEntry`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PdEntryKind {
    /// `PS=0`: the entry links to a page table.
    NextPageTable(PhysicalPage<Size4K>, PageEntryBits),
    /// `PS=1`: the entry maps a 4 MiB page directly.
    Leaf4MiB(PhysicalPage<Size4M>, PageEntryBits),
}

/// The page directory: 1024 entries, 4 KiB-aligned.
#[doc(alias = "PD")]
#[repr(C, align(4096))]
pub struct PageDirectory {
    entries: [PdEntry; ENTRIES_PER_TABLE],
}

impl PdEntry {
    /// Create a zero (non-present) entry.
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

    /// Expose the underlying bitfield.
    #[inline]
    #[must_use]
    pub const fn flags(self) -> PageEntryBits {
        self.0
    }

    /// Decode a present entry; `None` if not present.
    #[inline]
    #[must_use]
    pub const fn kind(self) -> Option<PdEntryKind> {
        if !self.is_present() {
            return None;
        }
        let base = self.0.frame_address();
        if self.0.large_page() {
            Some(PdEntryKind::Leaf4MiB(base.page(), self.0))
        } else {
            Some(PdEntryKind::NextPageTable(base.page(), self.0))
        }
    }

    /// Link to a page table (`PS=0`, `present=1`).
    #[inline]
    #[must_use]
    pub const fn make_next(table: PhysicalPage<Size4K>, flags: PageEntryBits) -> Self {
        Self(
            flags
                .with_large_page(false)
                .with_present(true)
                .with_frame_address(table.base()),
        )
    }

    /// Map a 4 MiB page directly (`PS=1`, `present=1`).
    #[inline]
    #[must_use]
    pub const fn make_4m(page: PhysicalPage<Size4M>, flags: PageEntryBits) -> Self {
        Self(
            flags
                .with_large_page(true)
                .with_present(true)
                .with_frame_address(page.base()),
        )
    }
}

impl PageDirectory {
    /// Create a fully zeroed page directory (all entries non-present).
    #[inline]
    #[must_use]
    pub const fn zeroed() -> Self {
        Self {
            entries: [PdEntry::zero(); ENTRIES_PER_TABLE],
        }
    }

    /// Read the entry governing `va`.
    #[inline]
    #[must_use]
    pub const fn get(&self, va: VirtualAddress) -> PdEntry {
        self.entries[va.directory_index()]
    }

    /// Write the entry governing `va`.
    ///
    /// Caller must handle any required TLB invalidation when changing active mappings.
    #[inline]
    pub const fn set(&mut self, va: VirtualAddress, e: PdEntry) {
        self.entries[va.directory_index()] = e;
    }

    /// Clear all entries.
    #[inline]
    pub fn zero(&mut self) {
        self.entries.fill(PdEntry::zero());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel_memory_addresses::PhysicalAddress;

    #[test]
    fn large_page_decodes_as_leaf() {
        let page = PhysicalAddress::new(0x0040_0000).page::<Size4M>();
        let e = PdEntry::make_4m(page, PageEntryBits::kernel_rw());
        assert_eq!(
            e.kind(),
            Some(PdEntryKind::Leaf4MiB(page, e.flags()))
        );
        assert!(e.flags().large_page());
    }

    #[test]
    fn absent_entry_has_no_kind() {
        assert_eq!(PdEntry::zero().kind(), None);
    }
}
