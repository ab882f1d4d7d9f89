//! Application configuration.
//!
//! Values are read once at startup and never written back by a running
//! session. Every section defaults independently, so a config file only
//! needs the keys it changes.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{FacepointError, FacepointResult};

/// Global application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Nose-to-screen mapping and smoothing.
    pub cursor: CursorConfig,

    /// Gesture thresholds and timers.
    pub gesture: GestureConfig,

    /// How tracker landmarks are interpreted.
    pub landmarks: LandmarkConfig,

    /// Action dispatch settings.
    pub dispatch: DispatchConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Cursor mapping and smoothing parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    /// One-pole smoothing factor in (0, 1). Larger is smoother and laggier.
    pub smooth_factor: f64,

    /// Horizontal sensitivity. Reserved: not applied by the linear mapping.
    pub sensitivity_x: f64,

    /// Vertical sensitivity. Reserved: not applied by the linear mapping.
    pub sensitivity_y: f64,

    /// Normalized nose band that spans the full screen on each axis.
    pub input_band: InputBand,

    /// Screen size override. Detected at startup when absent.
    pub screen: Option<ScreenOverride>,
}

/// Normalized input range mapped onto the screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputBand {
    pub min: f64,
    pub max: f64,
}

/// Explicit screen resolution in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenOverride {
    pub width: u32,
    pub height: u32,
}

/// Gesture thresholds and timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Eye aspect ratio below which an eye counts as closed.
    pub eye_closed_threshold: f64,

    /// Mouth aspect ratio above which the mouth counts as open.
    pub mouth_open_threshold: f64,

    /// Minimum spacing between two clicks (seconds).
    pub click_debounce_secs: f64,

    /// How long both eyes must stay closed to shut down (seconds).
    pub shutdown_hold_secs: f64,

    /// Scroll amount emitted per open-mouth frame. Negative scrolls down.
    /// The uinput backend turns this into wheel notches at 40 units per
    /// notch (at least one), so the default is one notch per frame.
    pub scroll_delta: i32,
}

/// Landmark interpretation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LandmarkConfig {
    /// Treat the feed as if the camera image were flipped horizontally:
    /// x coordinates are reflected and the two eyes swap mesh indices.
    pub mirror_input: bool,
}

/// Action dispatch settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// End the session when the cursor lands on the top-left pixel.
    pub failsafe: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "facepoint_session=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Whether to print the module target with each line.
    pub targets: bool,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            smooth_factor: 0.5,
            sensitivity_x: 1.8,
            sensitivity_y: 1.5,
            input_band: InputBand::default(),
            screen: None,
        }
    }
}

impl Default for InputBand {
    fn default() -> Self {
        Self { min: 0.3, max: 0.7 }
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            eye_closed_threshold: 0.20,
            mouth_open_threshold: 0.6,
            click_debounce_secs: 0.4,
            shutdown_hold_secs: 4.0,
            scroll_delta: -40,
        }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self { failsafe: true }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            targets: true,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        let config_path = config_file_path();
        if config_path.exists() {
            match Self::load_from(&config_path) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!("Failed to load config at {:?}: {}", config_path, e);
                }
            }
        }
        Self::default()
    }

    /// Load config from an explicit path. Errors are returned, not masked.
    pub fn load_from(path: &Path) -> FacepointResult<Self> {
        if !path.exists() {
            return Err(FacepointError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the gesture pipeline cannot work with.
    pub fn validate(&self) -> FacepointResult<()> {
        let cursor = &self.cursor;
        if !(cursor.smooth_factor > 0.0 && cursor.smooth_factor < 1.0) {
            return Err(FacepointError::config(format!(
                "cursor.smooth_factor must be in (0, 1), got {}",
                cursor.smooth_factor
            )));
        }
        let band = cursor.input_band;
        if !(band.min.is_finite() && band.max.is_finite() && band.min < band.max) {
            return Err(FacepointError::config(format!(
                "cursor.input_band must satisfy min < max, got [{}, {}]",
                band.min, band.max
            )));
        }
        if let Some(screen) = cursor.screen {
            if screen.width == 0 || screen.height == 0 {
                return Err(FacepointError::config("cursor.screen must be non-zero"));
            }
        }

        let gesture = &self.gesture;
        for (name, value) in [
            ("gesture.eye_closed_threshold", gesture.eye_closed_threshold),
            ("gesture.mouth_open_threshold", gesture.mouth_open_threshold),
            ("gesture.click_debounce_secs", gesture.click_debounce_secs),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(FacepointError::config(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if !(gesture.shutdown_hold_secs.is_finite() && gesture.shutdown_hold_secs > 0.0) {
            return Err(FacepointError::config(format!(
                "gesture.shutdown_hold_secs must be positive, got {}",
                gesture.shutdown_hold_secs
            )));
        }
        if gesture.scroll_delta == 0 {
            return Err(FacepointError::config("gesture.scroll_delta must be non-zero"));
        }

        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("facepoint").join("config.json")
}
