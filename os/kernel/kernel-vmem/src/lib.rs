//! # Virtual Memory Support
//!
//! i386 two-level paging helpers for the kernel and its diagnostic monitor.
//!
//! ## What you get
//! - An [`address space`](address_space) describing a page-directory root.
//! - The [`EntryLookup`] seam: given a virtual address, return the entry that
//!   governs it.
//! - x86 page-entry bits ([`PageEntryBits`]) with practical explanations.
//! - 4 KiB-aligned [`PageDirectory`] / [`PageTable`] wrappers.
//! - A tiny allocator/mapper interface ([`FrameAlloc`], [`PhysMapper`]).
//!
//! ## i386 Virtual Address → Physical Address Walk
//!
//! Each 32-bit virtual address is divided into three fields:
//!
//! ```text
//! | 31‒22 | 21‒12 | 11‒0   |
//! |   PD  |   PT  | Offset |
//! ```
//!
//! ```text
//!  PD  →  PT  →  Physical Page
//!   │      │
//!   │      └───► PTE (Page Table Entry)     → maps 4 KiB page
//!   └──────────► PDE (Page Directory Entry) → PS=1 → 4 MiB page
//! ```
//!
//! Both levels hold 1024 entries of 4 bytes each. A PDE with `PS=1` is a leaf
//! and terminates the walk early; the governing entry for every address in
//! that 4 MiB region is the PDE itself.

#![cfg_attr(not(test), no_std)]
#![allow(unsafe_code, clippy::inline_always)]

pub mod address_space;
mod page_entry_bits;
mod page_table;

pub use crate::address_space::{AddressSpace, MapError};
pub use crate::page_entry_bits::PageEntryBits;
pub use crate::page_table::pd::{PageDirectory, PdEntry, PdEntryKind};
pub use crate::page_table::pt::{PageTable, PtEntry};
pub use kernel_memory_addresses as addresses;

/// Re-export constants as info module.
pub use kernel_info::memory as info;

use kernel_memory_addresses::{PhysicalAddress, PhysicalPage, Size4K, VirtualAddress};

/// The page-table lookup primitive.
///
/// Returns the entry controlling the page that contains `va`: the PTE for
/// 4 KiB mappings, or the PDE itself for a 4 MiB (`PS=1`) mapping. Returns
/// `None` if an intermediate table is missing and `create` is `false`.
///
/// The returned value is a copy; implementations never hand out the live slot.
pub trait EntryLookup {
    fn lookup_entry(&self, va: VirtualAddress, create: bool) -> Option<PageEntryBits>;
}

impl<T: EntryLookup + ?Sized> EntryLookup for &T {
    #[inline]
    fn lookup_entry(&self, va: VirtualAddress, create: bool) -> Option<PageEntryBits> {
        (**self).lookup_entry(va, create)
    }
}

/// Minimal frame allocator used to obtain **physical** 4 KiB frames
/// for page tables.
///
/// Returns `None` on out-of-memory.
pub trait FrameAlloc {
    /// Allocate one 4 KiB *physical* frame for page tables. Must return page-aligned frames.
    fn alloc_4k(&mut self) -> Option<PhysicalPage<Size4K>>;
}

/// Converts physical addresses to *temporarily* usable pointers in the current
/// virtual address space.
///
/// In this kernel all physical memory is mapped at [`KERNBASE`](info::KERNBASE),
/// see [`KernbaseMapper`]; tests back "physical memory" with a vector of frames.
pub trait PhysMapper {
    /// Convert a *physical* address to a usable mutable pointer in the current address space.
    ///
    /// # Safety
    /// - `pa` must be mapped (and writable for mutation) in the current page tables.
    /// - Lifetime `'a` is purely borrow-checked; the mapping must remain valid for `'a`.
    /// - Type `T` must match the bytes at `pa` (no aliasing UB).
    unsafe fn phys_to_mut<'a, T>(&self, pa: PhysicalAddress) -> &'a mut T;

    /// Convert a *physical* address to a shared reference for reading.
    ///
    /// # Safety
    /// Same as [`phys_to_mut`](Self::phys_to_mut), minus the writability requirement.
    unsafe fn phys_to_ref<'a, T>(&self, pa: PhysicalAddress) -> &'a T;
}

/// [`PhysMapper`] for the kernel's `KERNBASE + pa` direct map.
///
/// # Safety
/// The direct map must cover the referenced physical range. Only valid while
/// running on the kernel's own page tables.
pub struct KernbaseMapper;

impl PhysMapper for KernbaseMapper {
    unsafe fn phys_to_mut<'a, T>(&self, pa: PhysicalAddress) -> &'a mut T {
        let va = info::KERNBASE.wrapping_add(pa.as_u32()) as usize as *mut T;
        // SAFETY: Caller must ensure the physical address is valid and mapped via KERNBASE.
        unsafe { &mut *va }
    }

    unsafe fn phys_to_ref<'a, T>(&self, pa: PhysicalAddress) -> &'a T {
        let va = info::KERNBASE.wrapping_add(pa.as_u32()) as usize as *const T;
        // SAFETY: Caller must ensure the physical address is valid and mapped via KERNBASE.
        unsafe { &*va }
    }
}
