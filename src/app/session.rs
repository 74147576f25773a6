// Headless dry-run session: acquire, count down, record, stop, save

use std::path::PathBuf;
use std::time::Duration;

use crate::capture::ArtifactInfo;
use crate::recording::SessionStatus;
use crate::scroll::ScrollLayout;
use crate::studio::{StudioError, StudioHandle};
use crate::studio_constants::{frame_interval, ACQUIRE_RETRY_DELAY, MAX_ACQUIRE_ATTEMPTS};
use crate::util::Settings;

/// Outcome of a session that produced a file
#[derive(Debug, Clone, PartialEq)]
pub struct DryRunReport {
    pub artifact: ArtifactInfo,
    pub saved_to: PathBuf,
}

/// How long to record so the whole script scrolls past
///
/// Zero speed never clears the frame, so the cap applies.
pub fn recording_duration(settings: &Settings, cap: Duration) -> Duration {
    let layout = ScrollLayout::new(&settings.prompter, settings.studio.viewport_height);
    match layout.frames_to_clear(settings.prompter.speed) {
        Some(frames) => {
            let secs = frames as f64 * frame_interval(settings.studio.refresh_hz).as_secs_f64();
            if secs < cap.as_secs_f64() {
                Duration::from_secs_f64(secs)
            } else {
                cap
            }
        }
        None => cap,
    }
}

/// Acquire the camera, retrying a few times
async fn acquire_with_retry(handle: &StudioHandle) -> Result<(), StudioError> {
    let mut attempt = 1;
    loop {
        match handle.acquire().await {
            Ok(()) => return Ok(()),
            Err(e) if attempt < MAX_ACQUIRE_ATTEMPTS => {
                crate::warn!("Acquisition attempt {} failed: {}", attempt, e);
                attempt += 1;
                tokio::time::sleep(ACQUIRE_RETRY_DELAY).await;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Run one record-then-save cycle
///
/// Returns None when nothing was captured (no source, or an empty take).
/// Ctrl+C during recording stops early but still saves the take.
pub async fn dry_run(
    handle: &StudioHandle,
    settings: &Settings,
    cap: Duration,
) -> Result<Option<DryRunReport>, StudioError> {
    if let Err(e) = acquire_with_retry(handle).await {
        crate::error!("Recording without a camera: {}", e);
    }

    handle.start_recording().await?;
    handle.wait_while_status(SessionStatus::Starting).await?;

    // A stop request during the countdown lands the studio back in Idle
    if handle.status() == SessionStatus::Recording {
        let duration = recording_duration(settings, cap);
        crate::info!("Recording for {:.1}s", duration.as_secs_f64());
        tokio::select! {
            _ = tokio::time::sleep(duration) => {}
            left = handle.wait_while_status(SessionStatus::Recording) => {
                left?;
                crate::info!("Recording stopped early");
            }
        }
    }
    if handle.status() == SessionStatus::Recording {
        if let Err(e) = handle.stop_recording().await {
            crate::debug!("Stop skipped: {}", e);
        }
    }

    handle.wait_for_status(SessionStatus::Idle).await?;

    let snapshot = handle.snapshot().await?;
    if snapshot.pending_artifact.is_none() {
        if let Some(error) = snapshot.capture_error {
            crate::warn!("Nothing to save: {}", error);
        }
        return Ok(None);
    }

    let (artifact, saved_to) = handle.download().await?;
    Ok(Some(DryRunReport { artifact, saved_to }))
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
