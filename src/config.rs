//! Configuration for Kinetic Pointer.
//!
//! All tunables live here: smoothing, active region, gesture thresholds,
//! debounce, fail-safe geometry, and capture settings. Invalid values are
//! rejected at startup rather than silently clamped.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the pointer controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// EMA smoothing factor (>= 1). Higher = smoother but laggier cursor.
    /// This is the single most important tunable in the system.
    pub smoothing_factor: f64,

    /// Sub-rectangle of the camera view mapped to the full screen
    pub active_region: ActiveRegion,

    /// Thumb-to-fingertip distance below which a pinch registers
    /// (normalized coordinates)
    pub click_threshold: f64,

    /// Fingertip-to-palm distance below which a finger counts as curled
    /// (normalized coordinates)
    pub curl_threshold: f64,

    /// Consecutive frames a gesture must persist before an action fires
    pub debounce_frames: u32,

    /// Minimum per-frame confidence for a hand frame to be usable
    pub confidence_floor: f64,

    /// Scroll units emitted per 100 px of vertical hand travel
    pub scroll_sensitivity: f64,

    /// Side length of the reserved top-left exit corner, in pixels
    pub failsafe_size_px: f64,

    /// Consecutive frames the cursor must stay in the exit corner
    pub failsafe_frames: u32,

    /// Mirror the x axis (front-facing camera). Off by default so that
    /// mapping preserves the capture orientation.
    pub mirror_x: bool,

    /// Capture device settings, passed through to the perception sidecar
    pub capture: CaptureConfig,

    /// Screen size override for sinks that cannot report a display size
    pub screen: Option<ScreenSize>,

    /// Path for storing session logs
    pub data_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("kinetic-pointer");

        Self {
            smoothing_factor: 6.0,
            active_region: ActiveRegion::default(),
            click_threshold: 0.05,
            curl_threshold: 0.25,
            debounce_frames: 3,
            confidence_floor: 0.7,
            scroll_sensitivity: 10.0,
            failsafe_size_px: 100.0,
            failsafe_frames: 10,
            mirror_x: false,
            capture: CaptureConfig::default(),
            screen: None,
            data_path: data_dir,
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .map_err(|e| ConfigError::IoError(e.to_string()))?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        std::fs::write(&config_path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the configuration file.
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("kinetic-pointer")
            .join("config.json")
    }

    /// Ensure all required directories exist.
    pub fn ensure_directories(&self) -> Result<(), ConfigError> {
        std::fs::create_dir_all(&self.data_path)
            .map_err(|e| ConfigError::IoError(e.to_string()))?;
        Ok(())
    }

    /// Validate the configuration.
    ///
    /// A degenerate active region or a non-positive threshold would make
    /// the pipeline behave unpredictably, so these are fatal at startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.smoothing_factor < 1.0 {
            return Err(ConfigError::Invalid(format!(
                "smoothing_factor must be >= 1 (got {})",
                self.smoothing_factor
            )));
        }
        self.active_region.validate()?;
        if self.click_threshold <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "click_threshold must be positive (got {})",
                self.click_threshold
            )));
        }
        if self.curl_threshold <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "curl_threshold must be positive (got {})",
                self.curl_threshold
            )));
        }
        if self.debounce_frames < 1 {
            return Err(ConfigError::Invalid(
                "debounce_frames must be >= 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.confidence_floor) {
            return Err(ConfigError::Invalid(format!(
                "confidence_floor must be in [0, 1] (got {})",
                self.confidence_floor
            )));
        }
        if self.failsafe_size_px <= 0.0 || self.failsafe_frames < 1 {
            return Err(ConfigError::Invalid(
                "fail-safe region must have positive size and frame count".to_string(),
            ));
        }
        if let Some(screen) = &self.screen {
            if screen.width < 1 || screen.height < 1 {
                return Err(ConfigError::Invalid(format!(
                    "screen override must be at least 1x1 (got {}x{})",
                    screen.width, screen.height
                )));
            }
        }
        Ok(())
    }
}

/// The sub-rectangle of the normalized camera view that maps to the
/// full output space. Restricting the usable field lowers the physical
/// hand excursion needed to reach screen edges.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ActiveRegion {
    pub x_start: f64,
    pub x_end: f64,
    pub y_start: f64,
    pub y_end: f64,
}

impl Default for ActiveRegion {
    fn default() -> Self {
        // Center 60% of the camera view
        Self {
            x_start: 0.2,
            x_end: 0.8,
            y_start: 0.2,
            y_end: 0.8,
        }
    }
}

impl ActiveRegion {
    /// Check that both axes form a proper sub-interval of [0, 1].
    pub fn validate(&self) -> Result<(), ConfigError> {
        let axis_ok = |start: f64, end: f64| (0.0..1.0).contains(&start) && start < end && end <= 1.0;
        if !axis_ok(self.x_start, self.x_end) || !axis_ok(self.y_start, self.y_end) {
            return Err(ConfigError::Invalid(format!(
                "active_region must satisfy 0 <= start < end <= 1 (got x: {}..{}, y: {}..{})",
                self.x_start, self.x_end, self.y_start, self.y_end
            )));
        }
        Ok(())
    }

    pub fn width(&self) -> f64 {
        self.x_end - self.x_start
    }

    pub fn height(&self) -> f64 {
        self.y_end - self.y_start
    }
}

/// Capture device settings (consumed by the perception sidecar).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CaptureConfig {
    pub camera_index: u32,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            camera_index: 0,
            width: 640,
            height: 480,
            fps: 30,
        }
    }
}

/// Screen dimensions in pixels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: u32,
    pub height: u32,
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    IoError(String),
    ParseError(String),
    SerializeError(String),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {e}"),
            ConfigError::ParseError(e) => write!(f, "Parse error: {e}"),
            ConfigError::SerializeError(e) => write!(f, "Serialize error: {e}"),
            ConfigError::Invalid(e) => write!(f, "Invalid configuration: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.smoothing_factor, 6.0);
        assert_eq!(config.debounce_frames, 3);
    }

    #[test]
    fn test_inverted_region_rejected() {
        let mut config = Config::default();
        config.active_region.x_start = 0.8;
        config.active_region.x_end = 0.2;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_degenerate_region_rejected() {
        let mut config = Config::default();
        config.active_region.y_start = 0.5;
        config.active_region.y_end = 0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_positive_thresholds_rejected() {
        let mut config = Config::default();
        config.click_threshold = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.curl_threshold = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_smoothing_below_one_rejected() {
        let mut config = Config::default();
        config.smoothing_factor = 0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_screen_override_rejected() {
        // A degenerate screen would make the mapper's pixel clamp
        // invert, so it must die at validation, not at the first frame.
        let mut config = Config::default();
        config.screen = Some(ScreenSize {
            width: 0,
            height: 0,
        });
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.screen = Some(ScreenSize {
            width: 1920,
            height: 0,
        });
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.screen = Some(ScreenSize {
            width: 1920,
            height: 1080,
        });
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_debounce_rejected() {
        let mut config = Config::default();
        config.debounce_frames = 0;
        assert!(config.validate().is_err());
    }
}
