//! Monitor configuration.
//!
//! Compile-time limits live here as constants; the few knobs a caller may
//! want to change at runtime are grouped in [`MonitorConfig`].

use crate::backtrace::UnwindConfig;

/// Argument slots per line. One slot stays unused, so a line may carry at
/// most `MAX_ARGS - 1` tokens (the command name included).
pub const MAX_ARGS: usize = 16;

/// Bytes in the console line buffer, one of them reserved.
pub const LINE_BUFFER_SIZE: usize = 1024;

/// Prompt printed before every line.
pub const PROMPT: &str = "K> ";

/// Printed once when the monitor is entered.
pub const BANNER: &str = "Welcome to the kernel monitor!\nType 'help' for a list of commands.\n";

/// Default cap on the number of frames the unwinder reports.
pub const DEFAULT_MAX_FRAMES: usize = 64;

/// Runtime settings for one monitor session.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    pub prompt: &'static str,
    pub unwind: UnwindConfig,
}

impl MonitorConfig {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            prompt: PROMPT,
            unwind: UnwindConfig::new(),
        }
    }

    #[must_use]
    pub const fn with_unwind(mut self, unwind: UnwindConfig) -> Self {
        self.unwind = unwind;
        self
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self::new()
    }
}
