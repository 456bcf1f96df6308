//! # QEMU Development Console
//!
//! Debug output and operator input for a kernel running under QEMU.
//!
//! ## Output
//!
//! Two independent channels:
//!
//! * The QEMU debug port `0x402` (`-debugcon stdio`), written by
//!   [`QemuLogger`], the `log::Log` sink. Output only.
//! * The first 16550 UART ([`serial::SerialPort`], `COM1` at `0x3F8`,
//!   `-serial stdio`). Bidirectional; the kernel monitor talks to the operator
//!   through it.
//!
//! ```text
//! log::debug!(..) ─► QemuLogger ─► QemuSink ─► port 0x402
//!
//! monitor output  ─► SerialPort ─────────────► COM1 ─► host terminal
//! ```
//!
//! ## Input
//!
//! [`LineEditor`] turns a stream of bytes from any [`ByteSource`] into one
//! line at a time, with echo and backspace handling. It has no hardware
//! dependency and is exercised on the host.
//!
//! ## Features
//!
//! * `enabled` (default): compile the debug-port writes in. Without it
//!   the logger is a no-op.
//!
//! ## Host Configuration
//!
//! ```bash
//! qemu-system-i386 -kernel kernel -debugcon file:debug.log -serial stdio
//! ```

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code)]

mod line_editor;
mod logger;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod port;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
pub mod serial;

pub use line_editor::{ByteSource, LineEditor};
pub use logger::{QemuLogger, write_record};

#[cfg(all(feature = "enabled", any(target_arch = "x86", target_arch = "x86_64")))]
mod qemu_fmt {
    use core::fmt::{self, Write};

    /// The port number for QEMU's debug port.
    const QEMU_DEBUG_PORT: u16 = 0x402;

    /// [`Write`] sink for the debug port.
    struct QemuSink;

    impl Write for QemuSink {
        #[inline]
        fn write_str(&mut self, s: &str) -> fmt::Result {
            for b in s.bytes() {
                // SAFETY: The debug port has no side effects beyond emitting the byte.
                unsafe { crate::port::outb(QEMU_DEBUG_PORT, b) }
            }
            Ok(())
        }
    }

    #[inline]
    pub fn qemu_write(args: fmt::Arguments) {
        // Best-effort debug output.
        let _ = fmt::write(&mut QemuSink, args);
    }
}

#[cfg(not(all(feature = "enabled", any(target_arch = "x86", target_arch = "x86_64"))))]
mod qemu_fmt {
    use core::fmt;

    #[inline]
    pub fn qemu_write(_: fmt::Arguments) {}
}

/// Write `format!`-style arguments to the QEMU debug port without allocating.
macro_rules! qemu_trace {
    ($($arg:tt)*) => {{
        $crate::qemu_fmt::qemu_write(core::format_args!($($arg)*));
    }};
}
pub(crate) use qemu_trace;
