//! Log dispatcher setup.
//!
//! Mirrors the desktop app's targets: stdout plus a rolling file in the
//! platform log directory, Debug level in debug builds and Info in release.

use crate::studio_constants::APP_DIR_NAME;
use log::LevelFilter;
use std::path::{Path, PathBuf};

/// Log file name inside the log directory
const LOG_FILE: &str = "teleprompter.log";

/// `<data_local_dir>/teleprompter/logs`, when the platform has one
pub fn default_log_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join(APP_DIR_NAME).join("logs"))
}

fn level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Install the global logger
///
/// Logs go to stdout and, when `log_dir` is given, to `teleprompter.log`
/// inside it. Fails if the directory cannot be created or a logger is
/// already installed.
pub fn init_logging(log_dir: Option<&Path>) -> Result<(), fern::InitError> {
    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{}][{}][{}] {}",
                chrono::Local::now().format("%Y-%m-%d][%H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level())
        .chain(std::io::stdout());

    if let Some(dir) = log_dir {
        std::fs::create_dir_all(dir)?;
        dispatch = dispatch.chain(fern::log_file(dir.join(LOG_FILE))?);
    }

    dispatch.apply()?;
    Ok(())
}

#[cfg(test)]
#[path = "logging_test.rs"]
mod tests;
