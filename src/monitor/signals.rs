use signal_hook::consts::{SIGINT, SIGTERM};

use super::StopFlag;
use crate::error::Result;

/// Routes SIGINT and SIGTERM to `stop` instead of killing the process, so the
/// monitoring loop can finish its current tick and exit cleanly.
pub fn setup_signal_handlers(stop: &StopFlag) -> Result<()> {
    for sig in [SIGINT, SIGTERM] {
        signal_hook::flag::register(sig, stop.inner())?;
    }
    log::debug!("Signal handlers installed");
    Ok(())
}
