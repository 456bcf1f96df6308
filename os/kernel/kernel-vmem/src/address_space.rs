//! # Address Space (i386, page-directory rooted)
//!
//! A handle to one virtual address space: the physical frame of its page
//! directory plus a [`PhysMapper`] that makes table frames addressable.
//!
//! ## Highlights
//!
//! - [`AddressSpace::lookup`] returns the entry governing a virtual address
//!   (the PTE, or the PDE itself for a 4 MiB page). This is the read-only
//!   page-table walk the kernel monitor relies on. It only ever takes shared
//!   references to the tables.
//! - [`AddressSpace::map_one`] / [`AddressSpace::map_large`] install mappings,
//!   allocating a page table on demand.
//!
//! ## Safety
//!
//! - Mutating active mappings requires appropriate **TLB maintenance**.
//! - The provided `PhysMapper` must yield **writable** references to table frames.

use crate::addresses::{PhysicalAddress, PhysicalPage, Size4K, Size4M, VirtualAddress};
use crate::page_table::pd::{PageDirectory, PdEntry, PdEntryKind};
use crate::page_table::pt::{PageTable, PtEntry};
use crate::{EntryLookup, FrameAlloc, PageEntryBits, PhysMapper};
use log::warn;

/// Handle to a single, concrete address space.
pub struct AddressSpace<'m, M: PhysMapper> {
    root: PhysicalPage<Size4K>, // page directory frame
    mapper: &'m M,
}

/// The page-directory root page for an [`AddressSpace`].
pub type RootPage = PhysicalPage<Size4K>;

/// Error returned when installing a mapping fails.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MapError {
    #[error("out of memory (page table)")]
    OutOfMemory,
    #[error("a 4 MiB mapping already covers {0}")]
    LargePageInTheWay(VirtualAddress),
    #[error("a page table is already linked for {0}")]
    PageTableInTheWay(VirtualAddress),
    #[error("address {0} is not aligned to the page size")]
    Misaligned(PhysicalAddress),
}

impl<'m, M: PhysMapper> AddressSpace<'m, M> {
    /// View the **currently active** address space by reading CR3.
    ///
    /// # Safety
    /// - Must run at CPL0 with paging enabled.
    /// - Assumes CR3 points at a valid page-directory frame.
    #[cfg(target_arch = "x86")]
    #[inline]
    pub unsafe fn from_current(mapper: &'m M) -> Self {
        use kernel_registers::LoadRegisterUnsafe;
        let cr3 = unsafe { kernel_registers::Cr3::load_unsafe() };
        let root = PhysicalPage::<Size4K>::from_addr(cr3.page_directory());
        Self { root, mapper }
    }

    /// Use an explicitly known page-directory frame.
    #[inline]
    pub const fn from_root(mapper: &'m M, root: RootPage) -> Self {
        Self { root, mapper }
    }

    /// Physical page of the page directory.
    #[inline]
    pub const fn root_page(&self) -> RootPage {
        self.root
    }

    #[inline]
    fn pd(&self) -> &PageDirectory {
        // SAFETY: `root` was handed to us as a page-directory frame.
        unsafe { self.mapper.phys_to_ref::<PageDirectory>(self.root.base()) }
    }

    #[inline]
    fn pt(&self, page: PhysicalPage<Size4K>) -> &PageTable {
        // SAFETY: `page` comes from a present, non-PS directory entry.
        unsafe { self.mapper.phys_to_ref::<PageTable>(page.base()) }
    }

    #[inline]
    fn pd_mut(&self) -> &mut PageDirectory {
        // SAFETY: `root` was handed to us as a page-directory frame.
        unsafe { self.mapper.phys_to_mut::<PageDirectory>(self.root.base()) }
    }

    #[inline]
    fn pt_mut(&self, page: PhysicalPage<Size4K>) -> &mut PageTable {
        // SAFETY: `page` comes from a present, non-PS directory entry.
        unsafe { self.mapper.phys_to_mut::<PageTable>(page.base()) }
    }

    /// Return a copy of the entry that governs `va`.
    ///
    /// - PDE not present: `None`.
    /// - PDE with `PS=1`: the PDE itself.
    /// - Otherwise: the PTE, present or not. Callers check [`PageEntryBits::present`].
    #[must_use]
    pub fn lookup(&self, va: VirtualAddress) -> Option<PageEntryBits> {
        match self.pd().get(va).kind()? {
            PdEntryKind::Leaf4MiB(_, flags) => Some(flags),
            PdEntryKind::NextPageTable(pt_page, _) => Some(self.pt(pt_page).get(va).flags()),
        }
    }

    /// Map **one** 4 KiB page at `va → pa` with `leaf_flags`.
    ///
    /// The page table is allocated from `alloc` and linked with
    /// [`PageEntryBits::table_link`] if missing.
    ///
    /// # Errors
    /// - [`MapError::Misaligned`] if `pa` is not 4 KiB aligned.
    /// - [`MapError::LargePageInTheWay`] if a 4 MiB mapping covers `va`.
    /// - [`MapError::OutOfMemory`] if no frame is left for a page table.
    pub fn map_one<A: FrameAlloc>(
        &self,
        alloc: &mut A,
        va: VirtualAddress,
        pa: PhysicalAddress,
        leaf_flags: PageEntryBits,
    ) -> Result<(), MapError> {
        if pa.offset::<Size4K>().as_u32() != 0 {
            return Err(MapError::Misaligned(pa));
        }

        let pd = self.pd_mut();
        let pt_page = match pd.get(va).kind() {
            Some(PdEntryKind::NextPageTable(page, _)) => page,
            Some(PdEntryKind::Leaf4MiB(..)) => return Err(MapError::LargePageInTheWay(va)),
            None => {
                let frame = alloc.alloc_4k().ok_or(MapError::OutOfMemory)?;
                self.pt_mut(frame).zero();
                pd.set(va, PdEntry::make_next(frame, PageEntryBits::table_link()));
                frame
            }
        };

        self.pt_mut(pt_page)
            .set(va, PtEntry::make_4k(pa.page(), leaf_flags));
        Ok(())
    }

    /// Map a 4 MiB page at `va → pa` directly in the page directory.
    ///
    /// # Errors
    /// - [`MapError::Misaligned`] if `pa` is not 4 MiB aligned.
    /// - [`MapError::PageTableInTheWay`] if a page table is already linked for `va`.
    pub fn map_large(
        &self,
        va: VirtualAddress,
        pa: PhysicalAddress,
        leaf_flags: PageEntryBits,
    ) -> Result<(), MapError> {
        if pa.offset::<Size4M>().as_u32() != 0 {
            return Err(MapError::Misaligned(pa));
        }

        let pd = self.pd_mut();
        if let Some(PdEntryKind::NextPageTable(..)) = pd.get(va).kind() {
            return Err(MapError::PageTableInTheWay(va));
        }
        pd.set(va, PdEntry::make_4m(pa.page(), leaf_flags));
        Ok(())
    }
}

impl<M: PhysMapper> EntryLookup for AddressSpace<'_, M> {
    /// Read-only walk. Without an allocator no table can be created, so a
    /// `create` request for a missing page table still yields `None`.
    fn lookup_entry(&self, va: VirtualAddress, create: bool) -> Option<PageEntryBits> {
        let entry = self.lookup(va);
        if entry.is_none() && create {
            warn!("no page table for {va}; creation is not supported on a read-only walk");
        }
        entry
    }
}
