//! # 16550 UART (polled)
//!
//! Minimal driver for the PC serial port, used as the operator console.
//! Interrupts stay disabled; reads and writes poll the line status register.

use crate::ByteSource;
use crate::port::{inb, outb};
use core::fmt;

/// I/O base of the first serial port.
pub const COM1: u16 = 0x3F8;

const RBR: u16 = 0; // receive buffer (DLAB=0, read)
const THR: u16 = 0; // transmit holding (DLAB=0, write)
const DLL: u16 = 0; // divisor latch low (DLAB=1)
const DLM: u16 = 1; // divisor latch high (DLAB=1)
const IER: u16 = 1; // interrupt enable
const FCR: u16 = 2; // FIFO control
const LCR: u16 = 3; // line control
const MCR: u16 = 4; // modem control
const LSR: u16 = 5; // line status

const LCR_DLAB: u8 = 0x80;
const LCR_WLEN8: u8 = 0x03;
const LSR_DATA: u8 = 0x01;
const LSR_TXRDY: u8 = 0x20;

/// 115200 / 9600 baud.
const DIVISOR_9600: u16 = 12;

/// A polled 16550-compatible serial port.
#[derive(Debug, Copy, Clone)]
pub struct SerialPort {
    base: u16,
}

impl SerialPort {
    /// Handle for the UART at `base`. Does not touch the hardware.
    #[must_use]
    pub const fn new(base: u16) -> Self {
        Self { base }
    }

    /// Program 9600 8N1 with FIFOs off and interrupts disabled.
    ///
    /// Returns `false` if no UART answers at `base` (LSR reads `0xFF`).
    ///
    /// # Safety
    /// Must run at CPL0; `base` must be a 16550-compatible UART.
    pub unsafe fn init(&self) -> bool {
        unsafe {
            outb(self.base + FCR, 0);
            outb(self.base + LCR, LCR_DLAB);
            outb(self.base + DLL, (DIVISOR_9600 & 0xFF) as u8);
            outb(self.base + DLM, (DIVISOR_9600 >> 8) as u8);
            outb(self.base + LCR, LCR_WLEN8);
            outb(self.base + MCR, 0);
            outb(self.base + IER, 0);
            inb(self.base + LSR) != 0xFF
        }
    }

    /// Return a received byte if one is waiting.
    #[must_use]
    pub fn try_read_byte(&self) -> Option<u8> {
        // SAFETY: Reading LSR/RBR of an initialized UART.
        unsafe {
            if inb(self.base + LSR) & LSR_DATA == 0 {
                return None;
            }
            Some(inb(self.base + RBR))
        }
    }

    /// Send one byte, waiting for the transmitter.
    pub fn write_byte(&self, b: u8) {
        // SAFETY: Polling LSR and writing THR of an initialized UART.
        unsafe {
            while inb(self.base + LSR) & LSR_TXRDY == 0 {
                core::hint::spin_loop();
            }
            outb(self.base + THR, b);
        }
    }
}

impl ByteSource for SerialPort {
    /// Blocks until a byte arrives. The line never closes.
    fn read_byte(&mut self) -> Option<u8> {
        loop {
            if let Some(b) = self.try_read_byte() {
                return Some(b);
            }
            core::hint::spin_loop();
        }
    }
}

impl fmt::Write for SerialPort {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for b in s.bytes() {
            if b == b'\n' {
                self.write_byte(b'\r');
            }
            self.write_byte(b);
        }
        Ok(())
    }
}
