//! Process-wide logger slot
//!
//! Set once at startup, read for the rest of the process lifetime. The
//! stored logger is never dropped, so call [`Logger::flush`] before exit
//! and prefer synchronous dispatch for a global logger.

use crate::core::{Logger, LoggerError, Result};
use std::sync::OnceLock;

static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Install the process-wide logger. Fails if one is already installed.
pub fn init_global(logger: Logger) -> Result<&'static Logger> {
    let mut installed = false;
    let slot = GLOBAL_LOGGER.get_or_init(|| {
        installed = true;
        logger
    });

    if installed {
        Ok(slot)
    } else {
        Err(LoggerError::config(
            "global logger",
            "a global logger is already installed",
        ))
    }
}

/// The process-wide logger, if installed
pub fn global() -> Option<&'static Logger> {
    GLOBAL_LOGGER.get()
}
