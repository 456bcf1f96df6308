//! # i386 Paging Structures
//!
//! - [`pd`]: the page directory (root) and its entries.
//! - [`pt`]: page tables (leaf level for 4 KiB mappings).
//!
//! Both tables are 4 KiB-aligned arrays of 1024 four-byte entries.

pub mod pd;
pub mod pt;

/// Entries per table at either level.
pub const ENTRIES_PER_TABLE: usize = 1024;
