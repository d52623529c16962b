//! GUI configuration
//!
//! Settings are read from a TOML document. Every field is optional and falls
//! back to the defaults below:
//!
//! ```toml
//! target_fps = 60            # <= 0 runs unthrottled
//! double_click_ms = 300
//! double_click_distance = 2  # cells, per axis
//! show_fps = false
//! max_elapsed_ms = 1000      # clamp for elapsed time after a stall
//! ```

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::gui::constants::{
    DEFAULT_DOUBLE_CLICK_DISTANCE, DEFAULT_DOUBLE_CLICK_MS, DEFAULT_MAX_ELAPSED_MS,
    DEFAULT_TARGET_FPS,
};

/// Errors that can occur while loading a [`GuiConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error reading config: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error in config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field value failed semantic validation
    #[error("invalid config value: {0}")]
    Validation(String),
}

/// Runtime settings for the GUI core
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GuiConfig {
    /// Target frame rate. Zero or negative disables throttling.
    pub target_fps: i32,
    /// Maximum delay between two presses that still counts as a double click
    pub double_click_ms: u64,
    /// Maximum per-axis distance between two presses of a double click
    pub double_click_distance: u16,
    /// Draw the FPS counter in the top-left corner
    pub show_fps: bool,
    /// Upper bound on elapsed time handed to timers
    pub max_elapsed_ms: u64,
}

impl Default for GuiConfig {
    fn default() -> Self {
        GuiConfig {
            target_fps: DEFAULT_TARGET_FPS,
            double_click_ms: DEFAULT_DOUBLE_CLICK_MS,
            double_click_distance: DEFAULT_DOUBLE_CLICK_DISTANCE,
            show_fps: false,
            max_elapsed_ms: DEFAULT_MAX_ELAPSED_MS,
        }
    }
}

impl GuiConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: GuiConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("loaded GUI config from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_elapsed_ms == 0 {
            return Err(ConfigError::Validation(
                "max_elapsed_ms must be greater than zero".to_string(),
            ));
        }
        if self.double_click_ms > 5_000 {
            return Err(ConfigError::Validation(format!(
                "double_click_ms of {} is longer than 5 seconds",
                self.double_click_ms
            )));
        }
        Ok(())
    }

    /// Whether frame throttling is enabled
    pub fn throttled(&self) -> bool {
        self.target_fps > 0
    }
}
