//! The operator console and the read/dispatch loop.

use crate::config::{BANNER, LINE_BUFFER_SIZE};
use crate::error::{Flow, MonitorError};
use core::fmt;
use log::{debug, warn};

/// A line-oriented, bidirectional terminal.
pub trait Console: fmt::Write {
    /// Read one line into `buf`, without its terminator.
    ///
    /// Returns `None` once input is closed.
    fn read_line<'b>(&mut self, buf: &'b mut [u8]) -> Option<&'b str>;
}

/// Print the banner, then prompt, read and dispatch until `dispatch` returns
/// [`Flow::Exit`] or the console closes.
///
/// Errors from `dispatch` are printed as one line and the loop continues.
pub fn run<C, F>(console: &mut C, prompt: &str, mut dispatch: F)
where
    C: Console + ?Sized,
    F: for<'l> FnMut(&'l str, &mut C) -> Result<Flow, MonitorError<'l>>,
{
    if console.write_str(BANNER).is_err() {
        warn!("console write failed");
    }

    let mut buf = [0u8; LINE_BUFFER_SIZE];
    loop {
        if console.write_str(prompt).is_err() {
            warn!("console write failed");
        }
        let Some(line) = console.read_line(&mut buf) else {
            debug!("console input closed, leaving monitor");
            return;
        };

        match dispatch(line, console) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Exit) => {
                debug!("leaving monitor on request");
                return;
            }
            Err(MonitorError::Console(_)) => warn!("console write failed"),
            Err(err) => {
                if err.code() == 0 {
                    warn!("discarding line: {err}");
                } else {
                    debug!("command failed with status {}", err.code());
                }
                if writeln!(console, "{err}").is_err() {
                    warn!("console write failed");
                }
            }
        }
    }
}
