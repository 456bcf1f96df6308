//! # 32-bit Virtual and Physical Memory Address Types
//!
//! Strongly typed wrappers for raw memory addresses and page bases used by the
//! i386 two-level paging code and the kernel monitor.
//!
//! ## Overview
//!
//! The types prevent mixing virtual and physical addresses at compile time
//! while remaining zero-cost wrappers around `u32` values.
//!
//! | Concept | Generic | Description |
//! |----------|----------|-------------|
//! | [`MemoryAddress`] | – | A raw 32-bit address, either physical or virtual. |
//! | [`MemoryPage<S>`] | [`S: PageSize`](PageSize) | A page-aligned base address of a page of size `S`. |
//! | [`MemoryAddressOffset<S>`] | [`S: PageSize`](PageSize) | An offset within a page of size `S`. |
//!
//! These are then wrapped to distinguish between virtual and physical spaces:
//!
//! | Wrapper | Meaning |
//! |----------|----------|
//! | [`VirtualAddress`] / [`VirtualPage<S>`] | Refer to virtual (page-table translated) memory. |
//! | [`PhysicalAddress`] / [`PhysicalPage<S>`] | Refer to physical memory or MMIO regions. |
//!
//! ## Page Sizes
//!
//! - [`Size4K`]: 4 KiB pages mapped by a page-table entry
//! - [`Size4M`]: 4 MiB pages mapped directly by a page-directory entry (PSE)
//!
//! ## Wrapping at the top of the address space
//!
//! Rounding *down* never overflows. Rounding *up* can: any address in the last
//! page (`0xFFFF_F001..=0xFFFF_FFFF`) would round to `2^32`. Use
//! [`MemoryAddress::checked_align_up`] to detect that case, or
//! [`MemoryAddress::align_up_saturating`] to clamp to the last page base.
//!
//! ## Typical Usage
//!
//! ```rust
//! # use kernel_memory_addresses::*;
//! let va = VirtualAddress::new(0xF010_1234);
//! let (page, off) = va.split::<Size4K>();
//! assert_eq!(page.base().as_u32(), 0xF010_1000);
//! assert_eq!(page.join(off), va);
//!
//! let pages = PageRange::<Size4K>::inclusive(
//!     VirtualAddress::new(0x1000).page(),
//!     VirtualAddress::new(0x3000).page(),
//! );
//! assert_eq!(pages.len(), 3);
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code, clippy::inline_always)]

mod memory_address;
mod memory_address_offset;
mod memory_page;
mod page_range;
mod page_size;
mod physical_address;
mod physical_page;
mod virtual_address;
mod virtual_page;

pub use crate::memory_address::MemoryAddress;
pub use crate::memory_address_offset::MemoryAddressOffset;
pub use crate::memory_page::MemoryPage;
pub use crate::page_range::PageRange;
pub use crate::page_size::{PageSize, Size4K, Size4M};
pub use crate::physical_address::PhysicalAddress;
pub use crate::physical_page::PhysicalPage;
pub use crate::virtual_address::VirtualAddress;
pub use crate::virtual_page::VirtualPage;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_and_join_roundtrip() {
        let va = VirtualAddress::new(0xF012_3456);
        let (vp, off) = va.split::<Size4K>();
        assert_eq!(vp.base().as_u32(), 0xF012_3000);
        assert_eq!(off.as_u32(), 0x456);
        assert_eq!(vp.join(off), va);

        let (big, off) = va.split::<Size4M>();
        assert_eq!(big.base().as_u32(), 0xF000_0000);
        assert_eq!(off.as_u32(), 0x12_3456);
    }

    #[test]
    fn align_up_detects_wrap() {
        let top = MemoryAddress::new(0xFFFF_F001);
        assert_eq!(top.checked_align_up::<Size4K>(), None);
        assert_eq!(top.align_up_saturating::<Size4K>().as_u32(), 0xFFFF_F000);

        let aligned = MemoryAddress::new(0xFFFF_F000);
        assert_eq!(
            aligned.checked_align_up::<Size4K>(),
            Some(MemoryAddress::new(0xFFFF_F000))
        );
        assert_eq!(
            MemoryAddress::new(0x1001).checked_align_up::<Size4K>(),
            Some(MemoryAddress::new(0x2000))
        );
    }

    #[test]
    fn display_is_eight_hex_digits() {
        assert_eq!(format!("{}", VirtualAddress::new(0x1000)), "0x00001000");
        assert_eq!(
            format!("{:?}", PhysicalAddress::new(0xABC)),
            "PA(0x00000ABC)"
        );
    }
}
