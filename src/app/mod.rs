//! Application layer: setup and the headless dry-run session.

mod session;
mod setup;

pub use session::{dry_run, recording_duration, DryRunReport};
pub use setup::{build_studio, persist_settings, setup, AppContext};
