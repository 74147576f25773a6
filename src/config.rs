// Prompter configuration shared by the scroll engine and capture pipeline

use serde::{Deserialize, Serialize};

/// Script shown on first launch
pub const DEFAULT_SCRIPT: &str = "Welcome to ProPrompter AI. This is a professional studio environment designed for content creators. Paste your script on the left, adjust the scroll speed and font size, then hit record to start your session. \n\nSmooth scrolling ensures you never lose your place while looking directly into the lens. Good luck with your recording!";

/// User-editable prompter settings
///
/// Owned by the studio and handed out by reference; every read sees the
/// latest edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrompterConfig {
    /// Script text, one paragraph per line
    pub script: String,
    /// Scroll speed multiplier (pixels per frame is `speed * 0.5`)
    pub speed: f64,
    /// Font size of the overlay text in points
    pub font_size: u32,
    /// Mirror the camera preview and text horizontally
    pub mirror: bool,
    /// Background opacity in [0, 1]; 1 disables dimming
    pub opacity: f64,
    /// Download file name without extension
    pub file_name: String,
}

impl Default for PrompterConfig {
    fn default() -> Self {
        Self {
            script: DEFAULT_SCRIPT.to_string(),
            speed: 2.0,
            font_size: 48,
            mirror: false,
            opacity: 0.8,
            file_name: "my-video".to_string(),
        }
    }
}

/// Validation failures for prompter settings
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Scroll speed must be a finite, non-negative number (got {0})")]
    InvalidSpeed(f64),
    #[error("Font size must be greater than zero")]
    InvalidFontSize,
    #[error("Opacity must be between 0 and 1 (got {0})")]
    InvalidOpacity(f64),
    #[error("Refresh rate must be between 0 and {max} Hz (got {got})")]
    InvalidRefreshRate { got: f64, max: f64 },
    #[error("Viewport height must be a positive number (got {0})")]
    InvalidViewportHeight(f64),
}

impl PrompterConfig {
    /// Check that numeric fields are in range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.speed.is_finite() || self.speed < 0.0 {
            return Err(ConfigError::InvalidSpeed(self.speed));
        }
        if self.font_size == 0 {
            return Err(ConfigError::InvalidFontSize);
        }
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(ConfigError::InvalidOpacity(self.opacity));
        }
        Ok(())
    }

    /// Script split into display lines
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.script.split('\n')
    }
}

/// A field-level edit to the configuration
///
/// Edits are applied one field at a time so a consumer never observes a
/// half-applied update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum ConfigEdit {
    Script(String),
    Speed(f64),
    FontSize(u32),
    Mirror(bool),
    Opacity(f64),
    FileName(String),
}

impl ConfigEdit {
    /// Whether this edit is locked while a recording is in flight
    pub fn locked_while_recording(&self) -> bool {
        matches!(self, ConfigEdit::Script(_) | ConfigEdit::FileName(_))
    }

    /// Apply the edit, keeping the previous value if the result is invalid
    pub fn apply(self, config: &mut PrompterConfig) -> Result<(), ConfigError> {
        let mut next = config.clone();
        match self {
            ConfigEdit::Script(script) => next.script = script,
            ConfigEdit::Speed(speed) => next.speed = speed,
            ConfigEdit::FontSize(size) => next.font_size = size,
            ConfigEdit::Mirror(mirror) => next.mirror = mirror,
            ConfigEdit::Opacity(opacity) => next.opacity = opacity,
            ConfigEdit::FileName(name) => next.file_name = name,
        }
        next.validate()?;
        *config = next;
        Ok(())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
