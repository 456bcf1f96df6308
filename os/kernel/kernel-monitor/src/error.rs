use crate::config::MAX_ARGS;
use core::fmt;
use kernel_memory_addresses::VirtualAddress;

/// Status magnitude for a failure that is not the operator's input.
pub const E_UNSPECIFIED: i32 = 1;

/// `-E_INVAL`, the status the monitor's numeric contract reports for bad input.
pub const E_INVAL: i32 = 3;

/// What the console loop should do after a command.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Flow {
    /// Prompt for the next line.
    Continue,
    /// Leave the monitor.
    Exit,
}

/// Which end of an address range an error refers to.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Bound {
    Start,
    End,
}

/// A command that could not run. Printed as one line; never ends the loop.
///
/// `'l` is the lifetime of the input line, which some variants quote.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MonitorError<'l> {
    /// The message is the same for either bound.
    #[error("invalid start address.")]
    InvalidAddress(Bound),
    #[error("start address higher than end address")]
    StartAfterEnd {
        start: VirtualAddress,
        end: VirtualAddress,
    },
    #[error("require one or two arguments,\ni.e., start [and end] address.")]
    Usage,
    #[error("Too many arguments (max {})", MAX_ARGS)]
    TooManyArguments,
    #[error("Unknown command '{0}'")]
    UnknownCommand(&'l str),
    #[error("console write failed")]
    Console(#[from] fmt::Error),
}

impl MonitorError<'_> {
    /// Numeric status: `-E_INVAL` for a command rejecting its input,
    /// `-E_UNSPECIFIED` when the console failed, `0` for a line the
    /// dispatcher discarded.
    #[must_use]
    pub const fn code(&self) -> i32 {
        match self {
            Self::TooManyArguments | Self::UnknownCommand(_) => 0,
            Self::InvalidAddress(_) | Self::StartAfterEnd { .. } | Self::Usage => -E_INVAL,
            Self::Console(_) => -E_UNSPECIFIED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_failure_is_not_reported_as_bad_input() {
        let err = MonitorError::from(fmt::Error);
        assert_eq!(err, MonitorError::Console(fmt::Error));
        assert_eq!(err.code(), -E_UNSPECIFIED);
        assert_ne!(err.code(), MonitorError::Usage.code());
    }

    #[test]
    fn either_bound_prints_the_same_line() {
        let start = MonitorError::InvalidAddress(Bound::Start);
        let end = MonitorError::InvalidAddress(Bound::End);
        assert_ne!(start, end);
        assert_eq!(start.to_string(), end.to_string());
        assert_eq!(start.code(), end.code());
    }
}
