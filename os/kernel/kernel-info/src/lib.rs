//! # Kernel Memory Layout and Link Symbols
//!
//! Fixed configuration shared by the paging code and the kernel monitor.
//!
//! ## Memory Layout ([`memory`])
//!
//! The kernel is linked at [`KERNBASE`](memory::KERNBASE) and all of physical
//! memory is reachable at `KERNBASE + pa`:
//!
//! ```text
//! Virtual Address Space Layout (32-bit):
//!
//! 0x0000_0000 ┌─────────────────────────────────┐
//!             │         User Space              │
//! KSTACKTOP - ├─────────────────────────────────┤ 0xEFFF_8000
//!   KSTKSIZE  │      Kernel Stack (bootstack)   │
//! KERNBASE    ├─────────────────────────────────┤ 0xF000_0000
//!             │  Remapped Physical Memory       │
//!             │  (kernel text & data at 1 MiB)  │
//! 0xFFFF_FFFF └─────────────────────────────────┘
//! ```
//!
//! ## Link Symbols ([`KernelLayout`])
//!
//! The monitor's `kerninfo` command reports where the kernel image was placed.
//! The kernel constructs a [`KernelLayout`] from its linker-script symbols and
//! hands it to the monitor; this crate only defines the shape and the derived
//! values (physical aliases, footprint).

#![cfg_attr(not(any(test, doctest)), no_std)]

pub mod memory;

use kernel_memory_addresses::{PhysicalAddress, VirtualAddress};

/// Addresses of the kernel image as emitted by the linker script.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct KernelLayout {
    /// `_start`, the physical entry point handed to the boot loader.
    pub start: PhysicalAddress,
    /// `entry`, the first virtual address of the kernel text.
    pub entry: VirtualAddress,
    /// `etext`, end of the text section.
    pub etext: VirtualAddress,
    /// `edata`, end of the initialized data section.
    pub edata: VirtualAddress,
    /// `end`, end of the kernel image including BSS.
    pub end: VirtualAddress,
}

impl KernelLayout {
    /// Physical alias of a kernel virtual address (`va - KERNBASE`).
    ///
    /// Wraps for addresses below `KERNBASE`; those are not part of the image.
    #[inline]
    #[must_use]
    pub const fn physical(va: VirtualAddress) -> PhysicalAddress {
        PhysicalAddress::new(va.as_u32().wrapping_sub(memory::KERNBASE))
    }

    /// Memory footprint of the image in KiB, rounded up.
    #[must_use]
    pub const fn footprint_kib(&self) -> u32 {
        let bytes = self.end.as_u32().saturating_sub(self.entry.as_u32());
        bytes.div_ceil(1024)
    }
}
