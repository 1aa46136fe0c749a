#![forbid(unsafe_code)]

//! Tunables for the onboarding tour.
//!
//! Captures every constant the tour uses as a single [`TutorialConfig`] that
//! can be loaded from TOML or JSON, or adjusted from the environment.
//!
//! # Loading
//!
//! ```toml
//! # dotcal-tour.toml
//! arrow_height = 24.0
//! nav_offset = 80.0
//! settle_delay_ms = 100
//! ```
//!
//! ```rust,ignore
//! let config = TutorialConfig::from_toml_file("dotcal-tour.toml")?;
//! let config = TutorialConfig::from_json_str(json)?;
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Type | Default | Description |
//! |----------|------|---------|-------------|
//! | `DOTCAL_TOUR_SETTLE_MS` | u64 | 100 | Scroll-settle debounce (clamped 16-1000) |
//! | `DOTCAL_TOUR_NAV_OFFSET` | f64 | 80 | Height of the fixed top navigation bar |
//! | `DOTCAL_REDUCED_MOTION` | bool | false | Skip step move animations |

use std::path::Path;

use serde::{Deserialize, Serialize};
use web_time::Duration;

use crate::positioner::PositionerConfig;

/// Default arrow height in pixels.
pub const DEFAULT_ARROW_HEIGHT: f64 = 24.0;

/// Default arrow base half-width in pixels.
pub const DEFAULT_ARROW_WIDTH: f64 = 24.0;

/// Default height of the fixed navigation bar.
pub const DEFAULT_NAV_OFFSET: f64 = 80.0;

/// Default scroll-settle debounce.
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 100;

/// Minimum allowed scroll-settle debounce.
pub const MIN_SETTLE_DELAY_MS: u64 = 16;

/// Maximum allowed scroll-settle debounce.
pub const MAX_SETTLE_DELAY_MS: u64 = 1000;

/// Errors raised while loading a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid tour configuration: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Tour configuration.
///
/// Every field defaults to the value the product ships with, so
/// `TutorialConfig::default()` is the production behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TutorialConfig {
    /// Height of the pointer arrow.
    pub arrow_height: f64,
    /// Half-width of the arrow base.
    pub arrow_width: f64,
    /// Height of the fixed top navigation bar, subtracted from target `y`.
    pub nav_offset: f64,
    /// Quiet period after the last scroll event before the tour advances.
    pub settle_delay_ms: u64,
    /// Duration of the popover move between steps.
    pub move_duration_ms: u64,
    /// Duration of the overlay fade-in.
    pub enter_duration_ms: u64,
    /// Duration of the overlay exit before the tour resets.
    pub exit_duration_ms: u64,
    /// Skip the move animation and use the shortest fades.
    pub reduced_motion: bool,
}

impl Default for TutorialConfig {
    fn default() -> Self {
        Self {
            arrow_height: DEFAULT_ARROW_HEIGHT,
            arrow_width: DEFAULT_ARROW_WIDTH,
            nav_offset: DEFAULT_NAV_OFFSET,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            move_duration_ms: 150,
            enter_duration_ms: 200,
            exit_duration_ms: 300,
            reduced_motion: false,
        }
    }
}

impl TutorialConfig {
    /// Load from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.checked()
    }

    /// Load from a TOML file on disk.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.checked()
    }

    /// Load from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Apply environment overrides on top of `self`.
    ///
    /// Reads `DOTCAL_TOUR_SETTLE_MS`, `DOTCAL_TOUR_NAV_OFFSET` and
    /// `DOTCAL_REDUCED_MOTION`. Unparseable values are ignored; the settle
    /// delay is clamped to its valid range.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(val) = std::env::var("DOTCAL_TOUR_SETTLE_MS")
            && let Ok(ms) = val.parse::<u64>()
        {
            self.settle_delay_ms = ms.clamp(MIN_SETTLE_DELAY_MS, MAX_SETTLE_DELAY_MS);
        }

        if let Ok(val) = std::env::var("DOTCAL_TOUR_NAV_OFFSET")
            && let Ok(px) = val.parse::<f64>()
            && px.is_finite()
            && px >= 0.0
        {
            self.nav_offset = px;
        }

        if let Ok(val) = std::env::var("DOTCAL_REDUCED_MOTION") {
            self.reduced_motion = val == "1" || val.eq_ignore_ascii_case("true");
        }

        self
    }

    /// Defaults plus environment overrides.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Validate all parameters.
    ///
    /// Returns a list of problems; an empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !(self.arrow_height.is_finite() && self.arrow_height > 0.0) {
            errors.push(format!("arrow_height must be > 0, got {}", self.arrow_height));
        }
        if !(self.arrow_width.is_finite() && self.arrow_width > 0.0) {
            errors.push(format!("arrow_width must be > 0, got {}", self.arrow_width));
        }
        if !(self.nav_offset.is_finite() && self.nav_offset >= 0.0) {
            errors.push(format!("nav_offset must be >= 0, got {}", self.nav_offset));
        }
        if !(MIN_SETTLE_DELAY_MS..=MAX_SETTLE_DELAY_MS).contains(&self.settle_delay_ms) {
            errors.push(format!(
                "settle_delay_ms must be in {MIN_SETTLE_DELAY_MS}..={MAX_SETTLE_DELAY_MS}, got {}",
                self.settle_delay_ms
            ));
        }

        errors
    }

    fn checked(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Geometry settings for the positioner.
    pub fn positioner(&self) -> PositionerConfig {
        PositionerConfig {
            arrow_height: self.arrow_height,
            arrow_width: self.arrow_width,
            nav_offset: self.nav_offset,
        }
    }

    /// Scroll-settle debounce as a duration.
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Step move duration; zero under reduced motion.
    pub fn move_duration(&self) -> Duration {
        if self.reduced_motion {
            Duration::ZERO
        } else {
            Duration::from_millis(self.move_duration_ms)
        }
    }

    /// Overlay entrance duration.
    pub fn enter_duration(&self) -> Duration {
        Duration::from_millis(self.enter_duration_ms)
    }

    /// Overlay exit duration.
    pub fn exit_duration(&self) -> Duration {
        Duration::from_millis(self.exit_duration_ms)
    }
}
