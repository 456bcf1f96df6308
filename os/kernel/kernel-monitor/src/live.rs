//! Entering the monitor on a running i386 kernel.
//!
//! Page tables come from CR3 through the `KERNBASE` direct map, the stack is
//! read at the current `ebp`, and the operator talks to COM1. Diagnostics go
//! to the QEMU debug port unless the kernel installed its own logger first.

use crate::backtrace::{StackBounds, StackMemory, WORD_SIZE};
use crate::config::MonitorConfig;
use crate::console::Console;
use crate::dispatch::Monitor;
use crate::logging::install_logger;
use crate::symbols::SymbolResolver;
use core::fmt::{self, Write};
use kernel_info::KernelLayout;
use kernel_qemu::{LineEditor, QemuLogger};
use kernel_qemu::serial::{COM1, SerialPort};
use kernel_registers::{FramePointer, LoadRegister};
use kernel_vmem::{AddressSpace, KernbaseMapper};
use log::{LevelFilter, info, warn};

static LOGGER: QemuLogger = QemuLogger::new(LevelFilter::Debug);

/// The stack of the CPU executing the monitor.
pub struct LiveStack {
    bounds: Option<StackBounds>,
}

impl LiveStack {
    /// Reads outside `bounds` (if given) are refused.
    #[must_use]
    pub const fn new(bounds: Option<StackBounds>) -> Self {
        Self { bounds }
    }
}

impl StackMemory for LiveStack {
    #[allow(clippy::cast_possible_truncation)]
    fn frame_pointer(&self) -> u32 {
        // usize is 32 bits wide on i386.
        FramePointer::load().as_usize() as u32
    }

    fn read_word(&self, addr: u32) -> Option<u32> {
        if addr % WORD_SIZE != 0 {
            return None;
        }
        if self.bounds.is_some_and(|b| !b.contains_word(addr)) {
            return None;
        }
        // SAFETY: Aligned, and inside the configured stack window if one is
        // set. Without a window the chain is trusted.
        Some(unsafe { core::ptr::read_volatile(addr as usize as *const u32) })
    }
}

/// COM1 with a line editor on top.
struct SerialConsole {
    port: SerialPort,
    editor: LineEditor,
}

impl fmt::Write for SerialConsole {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.port.write_str(s)
    }
}

impl Console for SerialConsole {
    fn read_line<'b>(&mut self, buf: &'b mut [u8]) -> Option<&'b str> {
        let mut echo = self.port;
        self.editor.read_line(&mut self.port, &mut echo, buf)
    }
}

/// Run the monitor on the current address space until the operator leaves.
///
/// # Safety
/// - Must run at CPL0 with paging enabled and CR3 pointing at a page
///   directory whose tables are reachable through the `KERNBASE` direct map.
/// - The kernel must be built with frame pointers.
/// - Nothing else may modify the page tables while the monitor runs.
pub unsafe fn enter<R: SymbolResolver>(config: MonitorConfig, layout: KernelLayout, symbols: R) {
    if install_logger(|| LOGGER.init()) {
        info!("diagnostics go to the QEMU debug port");
    }

    let port = SerialPort::new(COM1);
    // SAFETY: COM1 is the standard PC UART; the caller guarantees CPL0.
    if !unsafe { port.init() } {
        warn!("no UART answering at COM1");
    }

    let mapper = KernbaseMapper;
    // SAFETY: Forwarded from the caller.
    let aspace = unsafe { AddressSpace::from_current(&mapper) };
    info!("entering monitor, page directory at {}", aspace.root_page());

    let monitor = Monitor::new(
        &aspace,
        LiveStack::new(config.unwind.bounds),
        symbols,
        layout,
        config,
    );
    let mut console = SerialConsole {
        port,
        editor: LineEditor::new(),
    };
    monitor.run(&mut console);
}
