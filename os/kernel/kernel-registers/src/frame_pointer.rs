#[cfg(all(feature = "asm", any(target_arch = "x86", target_arch = "x86_64")))]
use crate::LoadRegister;

/// The frame-pointer register (`ebp` / `rbp`).
///
/// With frame pointers enabled (`-Cforce-frame-pointers=yes`) it points at the
/// slot holding the caller's saved frame pointer, immediately followed by the
/// return address.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct FramePointer(usize);

impl FramePointer {
    #[inline]
    #[must_use]
    pub const fn new(value: usize) -> Self {
        Self(value)
    }

    #[inline]
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0
    }
}

#[cfg(all(feature = "asm", target_arch = "x86"))]
impl LoadRegister for FramePointer {
    #[inline(always)]
    fn load() -> Self {
        let ebp: usize;
        unsafe {
            core::arch::asm!("mov {}, ebp", out(reg) ebp, options(nomem, nostack, preserves_flags));
        }
        Self(ebp)
    }
}

#[cfg(all(feature = "asm", target_arch = "x86_64"))]
impl LoadRegister for FramePointer {
    #[inline(always)]
    fn load() -> Self {
        let rbp: usize;
        unsafe {
            core::arch::asm!("mov {}, rbp", out(reg) rbp, options(nomem, nostack, preserves_flags));
        }
        Self(rbp)
    }
}
