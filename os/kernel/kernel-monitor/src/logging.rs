//! Installing the `log` sink the monitor's diagnostics go to.

use log::{SetLoggerError, debug, warn};

/// Run `init` to install a global logger.
///
/// Returns `true` if `init` installed it. If another logger was set first it
/// stays in place, the failure is reported through it, and `false` is
/// returned.
#[must_use]
pub fn install_logger<F>(init: F) -> bool
where
    F: FnOnce() -> Result<(), SetLoggerError>,
{
    match init() {
        Ok(()) => {
            debug!("logger installed, max level {}", log::max_level());
            true
        }
        Err(err) => {
            warn!("keeping the existing logger: {err}");
            false
        }
    }
}
