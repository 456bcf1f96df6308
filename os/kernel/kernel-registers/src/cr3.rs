#[cfg(all(feature = "asm", target_arch = "x86"))]
use crate::LoadRegisterUnsafe;
use bitfield_struct::bitfield;
use kernel_memory_addresses::PhysicalAddress;

/// CR3: Page-Directory Base Register (32-bit paging, PCID disabled).
///
/// Holds the physical base address of the page directory and cache-control
/// flags for page-directory accesses.
#[bitfield(u32)]
pub struct Cr3 {
    /// Bits 0–2: Reserved.
    #[bits(3)]
    pub reserved0: u8,

    /// Bit 3: PWT: Page-level Write-Through for the page directory.
    pub pwt: bool,

    /// Bit 4: PCD: Page-level Cache Disable for the page directory.
    pub pcd: bool,

    /// Bits 5–11: Reserved.
    #[bits(7)]
    pub reserved1: u8,

    /// Bits 12–31: Page directory physical base >> 12.
    #[bits(20)]
    page_directory_4k: u32,
}

impl Cr3 {
    /// Create a `Cr3` value from a page-directory physical base address.
    ///
    /// `page_directory` must be 4 KiB-aligned.
    #[must_use]
    pub fn from_page_directory(page_directory: PhysicalAddress) -> Self {
        debug_assert_eq!(
            page_directory.as_u32() & 0xFFF,
            0,
            "page directory base must be 4K-aligned"
        );
        Self::new().with_page_directory_4k(page_directory.as_u32() >> 12)
    }

    /// Return the full physical address of the page directory.
    #[must_use]
    pub const fn page_directory(&self) -> PhysicalAddress {
        PhysicalAddress::new(self.page_directory_4k() << 12)
    }
}

#[cfg(all(feature = "asm", target_arch = "x86"))]
impl LoadRegisterUnsafe for Cr3 {
    unsafe fn load_unsafe() -> Self {
        let mut cr3: u32;
        unsafe {
            core::arch::asm!("mov {}, cr3", out(reg) cr3, options(nomem, nostack, preserves_flags));
        }
        Self::from_bits(cr3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_directory_base_ignores_flags() {
        let cr3 = Cr3::from_bits(0x0011_7018);
        assert!(cr3.pwt());
        assert!(cr3.pcd());
        assert_eq!(cr3.page_directory(), PhysicalAddress::new(0x0011_7000));

        let built = Cr3::from_page_directory(PhysicalAddress::new(0x0011_7000));
        assert_eq!(built.into_bits(), 0x0011_7000);
    }
}
