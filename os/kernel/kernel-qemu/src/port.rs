//! Raw x86 port I/O.

/// Write one byte to an I/O port.
///
/// # Safety
/// Requires CPL0 (or IOPL). Writing to a device port may have side effects.
#[allow(clippy::inline_always)]
#[inline(always)]
pub unsafe fn outb(port: u16, val: u8) {
    unsafe {
        core::arch::asm!(
            "out dx, al",
            in("dx") port,
            in("al") val,
            options(nomem, nostack, preserves_flags)
        );
    }
}

/// Read one byte from an I/O port.
///
/// # Safety
/// Requires CPL0 (or IOPL). Reading a device port may have side effects.
#[allow(clippy::inline_always)]
#[inline(always)]
pub unsafe fn inb(port: u16) -> u8 {
    let val: u8;
    unsafe {
        core::arch::asm!(
            "in al, dx",
            in("dx") port,
            out("al") val,
            options(nomem, nostack, preserves_flags)
        );
    }
    val
}
