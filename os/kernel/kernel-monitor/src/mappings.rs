//! # `showmappings`
//!
//! Reports, page by page, whether a virtual address range is mapped and with
//! which attribute bits.
//!
//! ```text
//! K> sm f0000fff
//! VA [0xf0000000] mapped at PA [0x00000000], permission: --------(W)(P)
//! K> sm ef000000 ef001000
//! VA [0xef000000] mapped at PA [0x0011a000], permission: -------(U)-(P)
//! VA [0xef001000] mapped at PA [0x0011b000], permission: -------(U)-(P)
//! ```
//!
//! ## Address handling
//!
//! - Addresses are base-16, with an optional `0x`/`0X` prefix. Anything else
//!   after the digits is rejected.
//! - The start is rounded **down** and the end **up** to a page boundary, then
//!   every page between them is reported, both ends included.
//! - An end inside the last page of the address space would round up past
//!   `2^32`; it is clamped to that page (`0xfffff000`) instead of wrapping.
//! - Pages are walked by page number, so a range ending at the last page
//!   terminates.
//!
//! The walk only reads: every lookup passes `create = false`.

use crate::error::{Bound, Flow, MonitorError};
use core::fmt;
use kernel_memory_addresses::{MemoryAddress, PageRange, Size4K, VirtualAddress, VirtualPage};
use kernel_vmem::{EntryLookup, PageEntryBits};
use log::debug;

/// Parse a base-16 `u32`, accepting an optional `0x`/`0X` prefix.
///
/// Returns `None` for an empty digit string, any non-hex character, or a
/// value that does not fit in 32 bits.
#[must_use]
pub fn parse_hex(s: &str) -> Option<u32> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    // from_str_radix would also take a leading sign.
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

/// The attribute bits of one entry, rendered as ten fixed-position markers.
///
/// Order: `(AVL)(G)(PS)(D)(A)(PCD)(PWT)(U)(W)(P)`; a clear bit prints `-`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Permissions(pub PageEntryBits);

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let e = self.0;
        let markers = [
            (e.available(), "(AVL)"),
            (e.global_translation(), "(G)"),
            (e.large_page(), "(PS)"),
            (e.dirty(), "(D)"),
            (e.accessed(), "(A)"),
            (e.cache_disabled(), "(PCD)"),
            (e.write_through(), "(PWT)"),
            (e.user_access(), "(U)"),
            (e.writable(), "(W)"),
            (e.present(), "(P)"),
        ];
        for (set, token) in markers {
            f.write_str(if set { token } else { "-" })?;
        }
        Ok(())
    }
}

/// `showmappings start [end]`.
///
/// # Errors
/// - [`MonitorError::Usage`] unless exactly one or two arguments are given.
/// - [`MonitorError::InvalidAddress`] if an argument is not a hex number.
/// - [`MonitorError::StartAfterEnd`] if the rounded start lies above the
///   rounded end.
///
/// None of these touch the page tables.
pub fn show_mappings<'l, W, L>(
    out: &mut W,
    lookup: &L,
    args: &[&'l str],
) -> Result<Flow, MonitorError<'l>>
where
    W: fmt::Write + ?Sized,
    L: EntryLookup + ?Sized,
{
    let (start_arg, end_arg) = match *args {
        [start] => (start, None),
        [start, end] => (start, Some(end)),
        _ => return Err(MonitorError::Usage),
    };

    let start = parse_hex(start_arg).ok_or(MonitorError::InvalidAddress(Bound::Start))?;
    let first = VirtualAddress::new(start).page::<Size4K>();

    let last = match end_arg {
        None => first,
        Some(end_arg) => {
            let end = parse_hex(end_arg).ok_or(MonitorError::InvalidAddress(Bound::End))?;
            let rounded = MemoryAddress::new(end).align_up_saturating::<Size4K>();
            debug!("{end:x} round up to {rounded:x}");
            VirtualAddress::new(rounded.as_u32()).page::<Size4K>()
        }
    };

    if first > last {
        return Err(MonitorError::StartAfterEnd {
            start: first.base(),
            end: last.base(),
        });
    }

    debug!("start_addr:{:x}, end_addr:{:x}", first.base(), last.base());
    for page in PageRange::inclusive(first, last) {
        report_page(out, lookup, page)?;
    }
    Ok(Flow::Continue)
}

/// One report line for the page at `page`.
fn report_page<W, L>(out: &mut W, lookup: &L, page: VirtualPage<Size4K>) -> fmt::Result
where
    W: fmt::Write + ?Sized,
    L: EntryLookup + ?Sized,
{
    let va = page.base();
    let entry = lookup.lookup_entry(va, false);
    debug!("lookup {va:x}: {entry:?}");
    match entry {
        Some(entry) if entry.present() => writeln!(
            out,
            "VA [0x{:08x}] mapped at PA [0x{:08x}], permission: {}",
            va,
            entry.frame_address(),
            Permissions(entry)
        ),
        _ => writeln!(out, "VA [0x{va:08x}] not mapped."),
    }
}
