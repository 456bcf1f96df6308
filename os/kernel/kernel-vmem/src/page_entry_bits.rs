use bitfield_struct::bitfield;
use kernel_memory_addresses::PhysicalAddress;

/// A single 32-bit i386 page-directory or page-table entry in its raw bitfield form.
///
/// This structure models the **common superset** of the PDE and PTE layouts.
/// The monitor reads these bits and never writes them; the paging code writes
/// them only through [`AddressSpace::map_one`](crate::AddressSpace::map_one).
///
/// ### Bit layout
///
/// | Bits  | Name / Mnemonic | Meaning |
/// |-------|-----------------|---------|
/// | 0     | `P`             | Valid entry if set |
/// | 1     | `W`             | Writable if set |
/// | 2     | `U`             | User-mode accessible if set |
/// | 3     | `PWT`           | Write-through caching |
/// | 4     | `PCD`           | Disable caching |
/// | 5     | `A`             | Accessed |
/// | 6     | `D`             | Dirty (leaf only) |
/// | 7     | `PS`            | 4 MiB page (PDE only) |
/// | 8     | `G`             | Global (leaf only) |
/// | 9–11  | `AVL`           | Available for OS use |
/// | 12–31 | `addr`          | Physical frame bits [31:12] |
///
/// ### Example
/// ```rust
/// # use kernel_vmem::PageEntryBits;
/// # use kernel_vmem::addresses::PhysicalAddress;
/// let e = PageEntryBits::from_bits(0x0011_7003);
/// assert!(e.present());
/// assert!(e.writable());
/// assert_eq!(e.frame_address(), PhysicalAddress::new(0x0011_7000));
/// ```
#[bitfield(u32)]
#[derive(PartialEq, Eq)]
pub struct PageEntryBits {
    /// Present (P, bit 0).
    ///
    /// Set if the entry points to a valid next-level table or a valid leaf
    /// mapping. Clear implies a not-present entry; all other bits are then
    /// free for software use.
    pub present: bool,

    /// Writable (W, bit 1).
    ///
    /// Set to allow writes; clear for read-only. Subject to supervisor/user
    /// checks via `user_access` and CR0.WP behavior in supervisor mode.
    pub writable: bool,

    /// User/Supervisor (U, bit 2).
    ///
    /// Set to allow user-mode access; clear restricts to supervisor only.
    pub user_access: bool,

    /// Page Write-Through (PWT, bit 3).
    pub write_through: bool,

    /// Page Cache Disable (PCD, bit 4).
    pub cache_disabled: bool,

    /// Accessed (A, bit 5).
    ///
    /// Set by the CPU on first access through this entry.
    pub accessed: bool,

    /// Dirty (D, bit 6), **leaf only**.
    ///
    /// Set by the CPU on first write to a leaf mapping.
    pub dirty: bool,

    /// Page Size (PS, bit 7).
    ///
    /// In a PDE: when **set**, the entry maps a 4 MiB page directly (requires
    /// CR4.PSE). In a PTE the position is PAT; this unified view reports it
    /// as-is.
    pub large_page: bool,

    /// Global (G, bit 8), **leaf only**.
    ///
    /// When set, the TLB entry survives CR3 reloads (requires CR4.PGE).
    pub global_translation: bool,

    /// OS-available (bits 9..=11).
    ///
    /// Reserved for operating system use; hardware doesn’t interpret these.
    #[bits(3)]
    pub os_available: u8,

    /// Physical frame bits [31:12].
    #[bits(20)]
    frame_bits_31_12: u32,
}

impl PageEntryBits {
    /// Mask of the attribute bits (everything below the frame address).
    pub const FLAGS_MASK: u32 = 0xFFF;

    /// Physical frame address with all attribute bits masked off (`PTE_ADDR`).
    #[inline]
    #[must_use]
    pub const fn frame_address(&self) -> PhysicalAddress {
        PhysicalAddress::new(self.frame_bits_31_12() << 12)
    }

    /// Store a 4 KiB-aligned frame address; the low 12 bits of `phys` are dropped.
    #[inline]
    pub const fn set_frame_address(&mut self, phys: PhysicalAddress) {
        self.set_frame_bits_31_12(phys.as_u32() >> 12);
    }

    /// Builder form of [`set_frame_address`](Self::set_frame_address).
    #[inline]
    #[must_use]
    pub const fn with_frame_address(mut self, phys: PhysicalAddress) -> Self {
        self.set_frame_address(phys);
        self
    }

    /// `true` if any of the OS-available bits is set.
    #[inline]
    #[must_use]
    pub const fn available(&self) -> bool {
        self.os_available() != 0
    }

    /// Kernel read/write leaf flags (`P | W`).
    #[inline]
    #[must_use]
    pub const fn kernel_rw() -> Self {
        Self::new().with_present(true).with_writable(true)
    }

    /// User read-only leaf flags (`P | U`).
    #[inline]
    #[must_use]
    pub const fn user_ro() -> Self {
        Self::new().with_present(true).with_user_access(true)
    }

    /// Flags for intermediate (directory → table) links: `P | W | U`.
    ///
    /// Permissions are the intersection over the walk, so links stay permissive
    /// and the leaf decides.
    #[inline]
    #[must_use]
    pub const fn table_link() -> Self {
        Self::new()
            .with_present(true)
            .with_writable(true)
            .with_user_access(true)
    }
}
