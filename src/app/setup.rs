//! Application setup and initialization.
//!
//! Loads settings, installs logging and the signal handler, and wires the
//! studio to the synthetic capture host.

use std::path::PathBuf;
use std::sync::Arc;

use crate::capture::synthetic::{SyntheticCameraProvider, SyntheticEncoder};
use crate::capture::{CapturePipeline, DirectoryExporter};
use crate::events::LogEventEmitter;
use crate::shutdown;
use crate::studio::Studio;
use crate::util::{default_log_dir, init_logging, Settings, SettingsStore};

/// Everything the session needs after setup
#[derive(Debug)]
pub struct AppContext {
    pub settings: Settings,
    /// None when the platform has no config directory
    pub store: Option<SettingsStore>,
    /// Where recordings are saved
    pub downloads: PathBuf,
}

/// Main application setup function.
///
/// Logging comes first so every later step is recorded.
pub fn setup() -> Result<AppContext, Box<dyn std::error::Error>> {
    let log_dir = default_log_dir();
    init_logging(log_dir.as_deref())?;
    crate::info!("Setting up teleprompter...");

    // Ctrl+C stops an active recording instead of killing the process
    shutdown::install_signal_handler();

    let store = match SettingsStore::default_location() {
        Ok(store) => Some(store),
        Err(e) => {
            crate::warn!("Settings will not be persisted: {}", e);
            None
        }
    };
    let settings = store
        .as_ref()
        .map(SettingsStore::load_or_default)
        .unwrap_or_default();
    crate::debug!(
        "Loaded settings: speed {}, font size {}, file name '{}'",
        settings.prompter.speed,
        settings.prompter.font_size,
        settings.prompter.file_name
    );

    let downloads = DirectoryExporter::downloads().dir().to_path_buf();
    crate::info!("Recordings will be saved to {}", downloads.display());

    Ok(AppContext {
        settings,
        store,
        downloads,
    })
}

/// Build a studio backed by the synthetic camera and encoder
pub fn build_studio(context: &AppContext) -> Studio<LogEventEmitter> {
    let pipeline = CapturePipeline::new(
        Arc::new(SyntheticCameraProvider),
        Arc::new(SyntheticEncoder::default()),
        Arc::new(DirectoryExporter::new(context.downloads.clone())),
    );
    Studio::new(
        context.settings.prompter.clone(),
        context.settings.studio.clone(),
        pipeline,
        LogEventEmitter::new(),
    )
}

/// Persist settings so a first run leaves an editable file behind
pub fn persist_settings(context: &AppContext) {
    if let Some(store) = &context.store {
        if let Err(e) = store.save(&context.settings) {
            crate::warn!("Failed to save settings: {}", e);
        }
    }
}
