//! # Stack Backtrace
//!
//! Walks the chain of saved frame pointers of the i386 cdecl ABI:
//!
//! ```text
//!            ┌──────────────┐ higher addresses
//!  fp + 24   │ arg 4        │
//!    ...     │ ...          │
//!  fp + 8    │ arg 0        │
//!  fp + 4    │ return addr  │
//!  fp ─────► │ saved fp ────┼──► caller's frame (0 ends the chain)
//!            └──────────────┘
//! ```
//!
//! Memory is read through [`StackMemory`], so the walk never dereferences a
//! raw pointer itself. [`FrameChain`] checks each frame pointer before reading
//! through it and stops after [`UnwindConfig::max_frames`] frames; a cyclic or
//! corrupted chain therefore ends the walk with a notice instead of faulting
//! or looping.

use crate::config::DEFAULT_MAX_FRAMES;
use crate::error::{Flow, MonitorError};
use crate::symbols::SymbolResolver;
use core::fmt;
use log::{trace, warn};

/// Bytes per stack slot.
pub const WORD_SIZE: u32 = 4;

/// Argument slots shown per frame.
pub const ARG_SLOTS: usize = 5;

/// Word-granular read access to the stack being unwound.
pub trait StackMemory {
    /// Frame pointer of the frame the walk starts in.
    fn frame_pointer(&self) -> u32;

    /// The word at `addr`, or `None` if it cannot be read.
    fn read_word(&self, addr: u32) -> Option<u32>;
}

impl<T: StackMemory + ?Sized> StackMemory for &T {
    #[inline]
    fn frame_pointer(&self) -> u32 {
        (**self).frame_pointer()
    }

    #[inline]
    fn read_word(&self, addr: u32) -> Option<u32> {
        (**self).read_word(addr)
    }
}

/// The address window `[low, high)` a frame pointer must fall into.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct StackBounds {
    pub low: u32,
    pub high: u32,
}

impl StackBounds {
    #[must_use]
    pub const fn new(low: u32, high: u32) -> Self {
        Self { low, high }
    }

    /// `true` if the word at `addr` lies entirely inside the window.
    #[must_use]
    pub const fn contains_word(&self, addr: u32) -> bool {
        match addr.checked_add(WORD_SIZE) {
            Some(end) => self.low <= addr && end <= self.high,
            None => false,
        }
    }

    /// `true` if both the saved-fp and return-address slots of a frame at
    /// `fp` lie inside the window.
    #[must_use]
    pub const fn contains_frame(&self, fp: u32) -> bool {
        match fp.checked_add(WORD_SIZE) {
            Some(ret) => self.contains_word(fp) && self.contains_word(ret),
            None => false,
        }
    }
}

/// Limits for one walk.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct UnwindConfig {
    /// Frames reported before the walk is cut short.
    pub max_frames: usize,
    /// If set, frame pointers outside this window end the walk.
    pub bounds: Option<StackBounds>,
}

impl UnwindConfig {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_frames: DEFAULT_MAX_FRAMES,
            bounds: None,
        }
    }

    #[must_use]
    pub const fn with_max_frames(mut self, max_frames: usize) -> Self {
        self.max_frames = max_frames;
        self
    }

    #[must_use]
    pub const fn with_bounds(mut self, bounds: StackBounds) -> Self {
        self.bounds = Some(bounds);
        self
    }
}

impl Default for UnwindConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// One reconstructed frame.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FrameRecord {
    pub frame_pointer: u32,
    pub return_address: u32,
    /// `None` for slots that could not be read.
    pub args: [Option<u32>; ARG_SLOTS],
}

/// How a [`FrameChain`] ended.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ChainEnd {
    /// A zero frame pointer: the outermost frame was reached.
    Terminated,
    /// The frame pointer failed validation or could not be read.
    Corrupt { frame_pointer: u32 },
    /// `max_frames` frames were yielded and the chain continues.
    Truncated { frames: usize },
}

/// Iterator over the frames of a stack, innermost first.
pub struct FrameChain<'s, S: StackMemory + ?Sized> {
    stack: &'s S,
    config: UnwindConfig,
    next: u32,
    /// Frame pointer of the last yielded frame; the chain must move upward.
    prev: Option<u32>,
    yielded: usize,
    end: Option<ChainEnd>,
}

impl<'s, S: StackMemory + ?Sized> FrameChain<'s, S> {
    /// Start at the stack's current frame pointer.
    pub fn new(stack: &'s S, config: UnwindConfig) -> Self {
        let fp = stack.frame_pointer();
        Self::starting_at(stack, config, fp)
    }

    /// Start at an explicit frame pointer.
    pub const fn starting_at(stack: &'s S, config: UnwindConfig, fp: u32) -> Self {
        Self {
            stack,
            config,
            next: fp,
            prev: None,
            yielded: 0,
            end: None,
        }
    }

    /// Why the walk stopped; `None` while frames remain.
    #[must_use]
    pub const fn end(&self) -> Option<ChainEnd> {
        self.end
    }

    fn plausible(&self, fp: u32) -> bool {
        if fp % WORD_SIZE != 0 {
            return false;
        }
        if self.prev.is_some_and(|prev| fp <= prev) {
            return false;
        }
        self.config.bounds.is_none_or(|b| b.contains_frame(fp))
    }

    fn stop(&mut self, end: ChainEnd) -> Option<FrameRecord> {
        self.end = Some(end);
        None
    }

    fn read_frame(&self, fp: u32) -> Option<(FrameRecord, u32)> {
        let saved_fp = self.stack.read_word(fp)?;
        let return_address = self.stack.read_word(fp.checked_add(WORD_SIZE)?)?;

        let mut args = [None; ARG_SLOTS];
        let mut slot = fp.checked_add(2 * WORD_SIZE);
        for arg in &mut args {
            *arg = slot.and_then(|addr| self.stack.read_word(addr));
            slot = slot.and_then(|addr| addr.checked_add(WORD_SIZE));
        }

        let record = FrameRecord {
            frame_pointer: fp,
            return_address,
            args,
        };
        Some((record, saved_fp))
    }
}

impl<S: StackMemory + ?Sized> Iterator for FrameChain<'_, S> {
    type Item = FrameRecord;

    fn next(&mut self) -> Option<FrameRecord> {
        if self.end.is_some() {
            return None;
        }

        let fp = self.next;
        if fp == 0 {
            return self.stop(ChainEnd::Terminated);
        }
        if self.yielded >= self.config.max_frames {
            return self.stop(ChainEnd::Truncated {
                frames: self.yielded,
            });
        }
        if !self.plausible(fp) {
            warn!("corrupt frame pointer {fp:08x}, stopping backtrace");
            return self.stop(ChainEnd::Corrupt { frame_pointer: fp });
        }
        let Some((record, saved_fp)) = self.read_frame(fp) else {
            warn!("unreadable frame at {fp:08x}, stopping backtrace");
            return self.stop(ChainEnd::Corrupt { frame_pointer: fp });
        };

        trace!("frame {}: fp={fp:08x} ret={:08x}", self.yielded, record.return_address);
        self.prev = Some(fp);
        self.next = saved_fp;
        self.yielded += 1;
        Some(record)
    }
}

impl<S: StackMemory + ?Sized> core::iter::FusedIterator for FrameChain<'_, S> {}

/// An argument slot: eight hex digits, or `????????` if unreadable.
struct ArgWord(Option<u32>);

impl fmt::Display for ArgWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(w) => write!(f, "{w:08x}"),
            None => f.write_str("????????"),
        }
    }
}

/// `backtrace`: print every frame from the current one outward.
///
/// ```text
/// Stack backtrace:
///   ebp f010ff18  eip f01000a5  args 00000000 00000000 00000000 f010004a f0111308
/// kern/init.c:24: test_backtrace+101
/// ```
///
/// # Errors
/// Propagates console write failures. A broken chain is not an error.
pub fn backtrace<W, S, R>(
    out: &mut W,
    stack: &S,
    symbols: &R,
    config: UnwindConfig,
) -> Result<Flow, MonitorError<'static>>
where
    W: fmt::Write + ?Sized,
    S: StackMemory + ?Sized,
    R: SymbolResolver + ?Sized,
{
    writeln!(out, "Stack backtrace:")?;

    let mut chain = FrameChain::new(stack, config);
    for frame in chain.by_ref() {
        let [a0, a1, a2, a3, a4] = frame.args.map(ArgWord);
        writeln!(
            out,
            "  ebp {:08x}  eip {:08x}  args {a0} {a1} {a2} {a3} {a4}",
            frame.frame_pointer, frame.return_address
        )?;

        match symbols.resolve(frame.return_address) {
            Some(info) => writeln!(
                out,
                "{}:{}: {}+{}",
                info.file,
                info.line,
                info.name(),
                info.offset(frame.return_address)
            )?,
            None => writeln!(out, "<unknown>:0: <unknown>+0")?,
        }
    }

    match chain.end() {
        Some(ChainEnd::Corrupt { frame_pointer }) => {
            writeln!(out, "  corrupt frame pointer {frame_pointer:08x}")?;
        }
        Some(ChainEnd::Truncated { frames }) => {
            writeln!(out, "  ... (stopped after {frames} frames)")?;
        }
        Some(ChainEnd::Terminated) | None => {}
    }
    Ok(Flow::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_require_both_header_slots() {
        let b = StackBounds::new(0x1000, 0x2000);
        assert!(b.contains_frame(0x1000));
        assert!(b.contains_frame(0x1ff8));
        assert!(!b.contains_frame(0x1ffc));
        assert!(!b.contains_frame(0x0ffc));
        assert!(!StackBounds::new(0xffff_f000, u32::MAX).contains_frame(0xffff_fffc));
    }

    #[test]
    fn arg_word_rendering() {
        assert_eq!(ArgWord(Some(0x4a)).to_string(), "0000004a");
        assert_eq!(ArgWord(None).to_string(), "????????");
    }
}
