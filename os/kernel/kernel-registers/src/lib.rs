//! # Typed x86 Registers
//!
//! Only the registers the kernel monitor needs to look at the live machine:
//! [`Cr3`] (page-directory base) and the [`FramePointer`].
//!
//! Register loads are behind the `asm` feature and are compiled only for the
//! architectures they exist on; the bit layouts are usable everywhere, which
//! keeps them testable on the host.

#![cfg_attr(not(any(test, doctest)), no_std)]
#![allow(unsafe_code, clippy::inline_always)]

mod cr3;
mod frame_pointer;

pub use crate::cr3::Cr3;
pub use crate::frame_pointer::FramePointer;

pub trait LoadRegisterUnsafe {
    /// # Safety
    /// The caller must uphold the implementation-specific safety requirements.
    /// For example, the register access might be privileged and require kernel mode (Ring 0).
    unsafe fn load_unsafe() -> Self;
}

pub trait LoadRegister {
    /// # Safety
    /// It is generally safe to load this register even from user mode.
    fn load() -> Self;
}

impl<T> LoadRegisterUnsafe for T
where
    T: LoadRegister,
{
    #[inline]
    unsafe fn load_unsafe() -> Self {
        <Self as LoadRegister>::load()
    }
}
