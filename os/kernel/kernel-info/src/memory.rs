//! # Memory Layout

/// Bytes mapped by a page.
pub const PAGE_SIZE: u32 = 4096;

/// log2 of [`PAGE_SIZE`].
pub const PAGE_SHIFT: u32 = 12;

/// Bytes mapped by a page-directory entry (one full page table, or one large page).
pub const PT_SIZE: u32 = 1024 * PAGE_SIZE;

/// All physical memory is mapped at this address; the kernel is linked here.
pub const KERNBASE: u32 = 0xF000_0000;

/// Top of the kernel stack.
pub const KSTACKTOP: u32 = KERNBASE;

/// Size of the kernel stack.
pub const KSTKSIZE: u32 = 8 * PAGE_SIZE;

/// Guard gap below the kernel stack.
pub const KSTKGAP: u32 = 8 * PAGE_SIZE;

const _: () = {
    assert!(PAGE_SIZE == 1 << PAGE_SHIFT);
    assert!(KERNBASE.is_multiple_of(PT_SIZE));
    assert!(KSTACKTOP >= KSTKSIZE + KSTKGAP);
};
