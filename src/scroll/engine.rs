// Scroll engine: advances the script offset once per display refresh

use super::ease::CubicBezier;
use crate::config::PrompterConfig;
use crate::studio_constants::{scroll_step, DEFAULT_REFRESH_HZ, RESET_TRANSITION};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::Instant;

/// How the per-frame step relates to wall-clock time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum ScrollTiming {
    /// Fixed step per refresh; faster displays scroll faster
    PerFrame,
    /// Step scaled by elapsed time so speed matches `reference_hz` on any display
    #[serde(rename_all = "camelCase")]
    ElapsedTime { reference_hz: f64 },
}

impl Default for ScrollTiming {
    fn default() -> Self {
        ScrollTiming::PerFrame
    }
}

/// Visual transition back to the top after the offset resets
#[derive(Debug, Clone, Copy)]
struct ResetTransition {
    from: f64,
    started: Instant,
    duration: Duration,
}

impl ResetTransition {
    fn offset_at(&self, now: Instant) -> Option<f64> {
        let elapsed = now.saturating_duration_since(self.started);
        if elapsed >= self.duration {
            return None;
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        Some(self.from * (1.0 - CubicBezier::RESET.apply(t)))
    }
}

/// Scroll offset accumulator driven by the session status
///
/// The logical offset resets to zero instantly; `display_offset` eases the
/// on-screen position back over a short transition.
#[derive(Debug)]
pub struct ScrollEngine {
    offset: f64,
    scrolling: bool,
    timing: ScrollTiming,
    last_frame: Option<Instant>,
    reset: Option<ResetTransition>,
}

impl ScrollEngine {
    pub fn new(timing: ScrollTiming) -> Self {
        Self {
            offset: 0.0,
            scrolling: false,
            timing,
            last_frame: None,
            reset: None,
        }
    }

    /// Current logical offset in pixels
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn is_scrolling(&self) -> bool {
        self.scrolling
    }

    /// Whether another frame update is scheduled
    pub fn has_pending_frame(&self) -> bool {
        self.scrolling
    }

    pub fn timing(&self) -> ScrollTiming {
        self.timing
    }

    /// Start or stop the per-frame loop
    ///
    /// Stopping cancels further updates immediately and returns the offset to
    /// zero behind an eased visual transition.
    pub fn set_scrolling(&mut self, scrolling: bool, now: Instant) {
        if scrolling == self.scrolling {
            return;
        }
        self.scrolling = scrolling;
        if scrolling {
            self.reset = None;
            self.last_frame = Some(now);
            crate::debug!("Scroll loop started at offset {:.1}", self.offset);
        } else {
            self.last_frame = None;
            crate::debug!("Scroll loop cancelled at offset {:.1}", self.offset);
            self.reset_to_start(now);
        }
    }

    /// Advance one display refresh; returns the new offset
    ///
    /// Ignored while not scrolling.
    pub fn on_frame(&mut self, config: &PrompterConfig, now: Instant) -> f64 {
        if !self.scrolling {
            return self.offset;
        }
        let step = scroll_step(config.speed);
        let advance = match self.timing {
            ScrollTiming::PerFrame => step,
            ScrollTiming::ElapsedTime { reference_hz } => {
                let hz = if reference_hz.is_finite() && reference_hz > 0.0 {
                    reference_hz
                } else {
                    DEFAULT_REFRESH_HZ
                };
                let elapsed = self
                    .last_frame
                    .map(|last| now.saturating_duration_since(last).as_secs_f64())
                    .unwrap_or(1.0 / hz);
                step * elapsed * hz
            }
        };
        self.last_frame = Some(now);
        self.offset += advance.max(0.0);
        self.offset
    }

    /// Script text changed; only resets when not scrolling
    pub fn on_script_changed(&mut self, now: Instant) {
        if !self.scrolling {
            self.reset_to_start(now);
        }
    }

    /// On-screen offset, including any reset transition in progress
    pub fn display_offset(&self, now: Instant) -> f64 {
        self.reset
            .and_then(|reset| reset.offset_at(now))
            .unwrap_or(self.offset)
    }

    fn reset_to_start(&mut self, now: Instant) {
        let from = self.display_offset(now);
        self.offset = 0.0;
        self.reset = if from > 0.0 {
            Some(ResetTransition {
                from,
                started: now,
                duration: RESET_TRANSITION,
            })
        } else {
            None
        };
    }
}

impl Default for ScrollEngine {
    fn default() -> Self {
        Self::new(ScrollTiming::default())
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
