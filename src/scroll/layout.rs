//! Overlay geometry for the scrolling script.
//!
//! The text block sits between a lead-in region (so the first line starts
//! below the visible frame) and a trailing region one viewport tall (so the
//! last line can leave through the top). Nothing here clamps the offset:
//! scrolling past the end simply shows blank space.

use crate::config::PrompterConfig;
use crate::studio_constants::{
    scroll_step, DIMMED_BACKGROUND_ALPHA, LEAD_IN_FRACTION, LINE_HEIGHT_FACTOR, PARAGRAPH_GAP_PX,
    TEXT_PADDING_PX,
};
use serde::Serialize;

/// Vertical layout of the script overlay for one viewport
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollLayout {
    viewport_height: f64,
    line_height: f64,
    line_count: usize,
}

impl ScrollLayout {
    pub fn new(config: &PrompterConfig, viewport_height: f64) -> Self {
        Self {
            viewport_height: viewport_height.max(0.0),
            line_height: f64::from(config.font_size) * LINE_HEIGHT_FACTOR,
            line_count: config.lines().count(),
        }
    }

    /// Blank space above the first line
    pub fn lead_in(&self) -> f64 {
        self.viewport_height * LEAD_IN_FRACTION
    }

    /// Blank space below the last line
    pub fn trailing(&self) -> f64 {
        self.viewport_height
    }

    /// Height of the text block including its padding.
    ///
    /// Wrapping is not modelled; each script line counts as one line box.
    pub fn text_height(&self) -> f64 {
        let gaps = self.line_count.saturating_sub(1) as f64 * PARAGRAPH_GAP_PX;
        self.line_count as f64 * self.line_height + gaps + 2.0 * TEXT_PADDING_PX
    }

    /// Full scrollable height: lead-in, text, trailing region
    pub fn total_height(&self) -> f64 {
        self.lead_in() + self.text_height() + self.trailing()
    }

    /// Offset at which the last line has left the top of the frame
    pub fn clear_distance(&self) -> f64 {
        self.lead_in() + self.text_height()
    }

    /// Vertical transform applied to the content for an offset
    pub fn translate_y(&self, offset: f64) -> f64 {
        -offset
    }

    /// Frames needed at `speed` for the script to clear the frame, or `None`
    /// when the text never moves
    pub fn frames_to_clear(&self, speed: f64) -> Option<u64> {
        let step = scroll_step(speed);
        if !step.is_finite() || step <= 0.0 {
            return None;
        }
        Some((self.clear_distance() / step).ceil() as u64)
    }
}

/// Presentation parameters derived from the configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayStyle {
    /// Alpha of the black layer behind the text
    pub background_alpha: f64,
    /// Flip text and preview horizontally
    pub mirror: bool,
    pub font_size: u32,
    pub line_height: f64,
}

impl OverlayStyle {
    pub fn from_config(config: &PrompterConfig) -> Self {
        // Only a fully opaque setting removes the dim layer entirely
        let background_alpha = if config.opacity == 1.0 {
            0.0
        } else {
            DIMMED_BACKGROUND_ALPHA
        };
        Self {
            background_alpha,
            mirror: config.mirror,
            font_size: config.font_size,
            line_height: f64::from(config.font_size) * LINE_HEIGHT_FACTOR,
        }
    }
}

#[cfg(test)]
#[path = "layout_test.rs"]
mod tests;
