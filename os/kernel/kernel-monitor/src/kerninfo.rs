//! `kerninfo`: where the kernel image sits in memory.

use crate::error::{Flow, MonitorError};
use core::fmt;
use kernel_info::KernelLayout;

/// Print the link symbols with their physical aliases and the image footprint.
///
/// # Errors
/// Propagates console write failures.
pub fn kerninfo<W: fmt::Write + ?Sized>(
    out: &mut W,
    layout: &KernelLayout,
) -> Result<Flow, MonitorError<'static>> {
    writeln!(out, "Special kernel symbols:")?;
    writeln!(out, "  _start                  {:08x} (phys)", layout.start)?;
    for (name, va) in [
        ("entry", layout.entry),
        ("etext", layout.etext),
        ("edata", layout.edata),
        ("end", layout.end),
    ] {
        writeln!(
            out,
            "  {name:<6} {va:08x} (virt)  {:08x} (phys)",
            KernelLayout::physical(va)
        )?;
    }
    writeln!(
        out,
        "Kernel executable memory footprint: {}KB",
        layout.footprint_kib()
    )?;
    Ok(Flow::Continue)
}
