//! Centralized constants for the teleprompter studio.
//!
//! Timing, layout and capture numbers shared by the session controller,
//! scroll engine and capture pipeline live here instead of being scattered
//! through the code.

use std::time::Duration;

// =============================================================================
// COUNTDOWN
// =============================================================================

/// Value the countdown starts from when a recording is requested.
pub const COUNTDOWN_START: u8 = 3;

/// Interval between countdown decrements.
pub const COUNTDOWN_TICK: Duration = Duration::from_secs(1);

// =============================================================================
// SCROLLING
// =============================================================================

/// Offset advanced per frame for each unit of configured speed.
///
/// With the default speed of 2 the text moves one pixel per refresh.
pub const SCROLL_STEP_PER_SPEED: f64 = 0.5;

/// Display refresh rate assumed by the frame clock (Hz).
pub const DEFAULT_REFRESH_HZ: f64 = 60.0;

/// Highest refresh rate accepted from settings (Hz).
pub const MAX_REFRESH_HZ: f64 = 1000.0;

/// Shortest period any clock in the studio will tick at.
pub const MIN_TICK_PERIOD: Duration = Duration::from_millis(1);

/// Duration of the visual transition that returns the text to its start.
pub const RESET_TRANSITION: Duration = Duration::from_millis(500);

// =============================================================================
// OVERLAY LAYOUT
// =============================================================================

/// Share of the viewport height left blank above the first line.
pub const LEAD_IN_FRACTION: f64 = 0.6;

/// Line height as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f64 = 1.4;

/// Vertical gap between script lines (pixels).
pub const PARAGRAPH_GAP_PX: f64 = 24.0;

/// Vertical padding above and below the text block (pixels).
pub const TEXT_PADDING_PX: f64 = 48.0;

/// Background dim applied behind the text unless opacity is exactly 1.
pub const DIMMED_BACKGROUND_ALPHA: f64 = 0.4;

// =============================================================================
// CAPTURE
// =============================================================================

/// Requested camera width (pixels).
pub const TARGET_VIDEO_WIDTH: u32 = 1920;

/// Requested camera height (pixels).
pub const TARGET_VIDEO_HEIGHT: u32 = 1080;

/// File name used for downloads when the configured name is blank.
pub const FALLBACK_FILE_NAME: &str = "teleprompter";

/// Directory name used under the platform config/data directories.
pub const APP_DIR_NAME: &str = "teleprompter";

// =============================================================================
// HEADLESS SESSION
// =============================================================================

/// Longest a headless dry-run recording is allowed to run.
pub const MAX_DRY_RUN: Duration = Duration::from_secs(60);

/// Acquisition attempts before a headless session gives up.
pub const MAX_ACQUIRE_ATTEMPTS: u32 = 3;

/// Pause between acquisition attempts.
pub const ACQUIRE_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Compute the per-frame offset step for a given speed.
#[inline]
pub fn scroll_step(speed: f64) -> f64 {
    speed * SCROLL_STEP_PER_SPEED
}

/// Frame interval for a refresh rate, falling back to the default for
/// non-positive or non-finite rates. Never shorter than `MIN_TICK_PERIOD`.
pub fn frame_interval(refresh_hz: f64) -> Duration {
    let hz = if refresh_hz.is_finite() && refresh_hz > 0.0 {
        refresh_hz
    } else {
        DEFAULT_REFRESH_HZ
    };
    Duration::from_secs_f64(1.0 / hz).max(MIN_TICK_PERIOD)
}

#[cfg(test)]
#[path = "studio_constants_test.rs"]
mod tests;
