//! Shared utilities for the teleprompter crate.
//!
//! This module provides common functionality used across the codebase:
//! - `settings`: JSON persistence of the prompter configuration and studio options
//! - `logging`: log dispatcher setup for the binary
//! - `runtime`: Tokio runtime helper for sync entry points

mod logging;
mod runtime;
mod settings;

pub use logging::{default_log_dir, init_logging};
pub use runtime::run_async;
pub use settings::{Settings, SettingsError, SettingsStore, SETTINGS_FILE};
