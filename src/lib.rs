// Teleprompter studio core: countdown-gated recording, scroll engine and
// capture pipeline, driven by a single tokio task

// Enable coverage attribute on nightly for explicit exclusions
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod app;
pub mod capture;
pub mod config;
pub mod events;
pub mod recording;
pub mod scroll;
pub mod shutdown;
pub mod studio;
pub mod studio_constants;
pub mod util;

// Re-export log macros for use throughout the crate
pub use log::{debug, error, info, trace, warn};

/// Application entry point - runs one headless recording session.
/// Note: This function cannot be unit tested as it installs a global logger
/// and signal handler.
#[cfg_attr(coverage_nightly, coverage(off))]
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let context = app::setup()?;
    util::run_async(run_session(context))?
}

#[cfg_attr(coverage_nightly, coverage(off))]
async fn run_session(context: app::AppContext) -> Result<(), Box<dyn std::error::Error>> {
    let (handle, task) = studio::spawn(app::build_studio(&context));
    shutdown::register_studio(handle.clone());

    let outcome = app::dry_run(&handle, &context.settings, studio_constants::MAX_DRY_RUN).await;

    shutdown::unregister_studio();
    handle.shutdown().await?;
    task.await?;
    app::persist_settings(&context);

    if shutdown::is_shutting_down() {
        info!("Session interrupted by Ctrl+C");
    }
    match outcome? {
        Some(report) => info!(
            "Saved {} ({} bytes) to {}",
            report.artifact.mime_type,
            report.artifact.size_bytes,
            report.saved_to.display()
        ),
        None => warn!("Session ended without a recording"),
    }
    Ok(())
}
