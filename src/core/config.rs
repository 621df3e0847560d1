//! Playback configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

/// Slowest accepted playback speed multiplier
pub const MIN_SPEED: f32 = 0.01;
/// Fastest accepted playback speed multiplier
pub const MAX_SPEED: f32 = 2.0;

/// User-facing playback controls
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Whether ticks advance the pose at all
    pub animate: bool,
    /// Whether to blend between the current and next keyframe
    pub interpolate: bool,
    /// Multiplier applied to host time before frame selection
    pub speed: f32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            animate: true,
            interpolate: true,
            speed: 1.0,
        }
    }
}

impl PlaybackConfig {
    /// Set the speed multiplier, clamped to `[MIN_SPEED, MAX_SPEED]`.
    /// A NaN speed is ignored and the current one kept.
    pub fn set_speed(&mut self, speed: f32) {
        if speed.is_nan() {
            log::warn!("Ignoring NaN playback speed, keeping {}", self.speed);
            return;
        }
        self.speed = speed.clamp(MIN_SPEED, MAX_SPEED);
    }

    /// Check the config and pull an out-of-range speed back into range.
    ///
    /// Fails with [`Error::InvalidSpeed`] when the speed is NaN.
    pub fn validated(mut self) -> Result<Self> {
        if self.speed.is_nan() {
            return Err(Error::InvalidSpeed(self.speed));
        }
        self.speed = self.speed.clamp(MIN_SPEED, MAX_SPEED);
        Ok(self)
    }

    /// Parse a JSON config document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validated()
    }

    /// Load a JSON config file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::debug!("Loaded playback config from {}: {:?}", path.display(), config);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = PlaybackConfig::default();
        assert!(config.animate);
        assert!(config.interpolate);
        assert_eq!(config.speed, 1.0);
    }

    #[test]
    fn test_set_speed_clamps() {
        let mut config = PlaybackConfig::default();
        config.set_speed(5.0);
        assert_eq!(config.speed, MAX_SPEED);
        config.set_speed(0.0);
        assert_eq!(config.speed, MIN_SPEED);
        config.set_speed(0.5);
        assert_eq!(config.speed, 0.5);
    }

    #[test]
    fn test_set_speed_ignores_nan() {
        let mut config = PlaybackConfig::default();
        config.set_speed(0.5);
        config.set_speed(f32::NAN);
        assert_eq!(config.speed, 0.5);
    }

    #[test]
    fn test_validated_rejects_nan_speed() {
        let config = PlaybackConfig {
            speed: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(config.validated(), Err(Error::InvalidSpeed(_))));

        let config = PlaybackConfig {
            speed: -3.0,
            ..Default::default()
        };
        assert_eq!(config.validated().unwrap().speed, MIN_SPEED);
    }

    #[test]
    fn test_from_json_partial() {
        let config = PlaybackConfig::from_json_str(r#"{ "interpolate": false }"#).unwrap();
        assert!(config.animate);
        assert!(!config.interpolate);
        assert_eq!(config.speed, 1.0);
    }

    #[test]
    fn test_from_json_sanitizes_speed() {
        let config = PlaybackConfig::from_json_str(r#"{ "speed": 10.0 }"#).unwrap();
        assert_eq!(config.speed, MAX_SPEED);
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(PlaybackConfig::from_json_str("{ not json").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("playback.json");
        std::fs::write(&path, r#"{ "animate": false, "speed": 0.25 }"#).unwrap();

        let config = PlaybackConfig::load(&path).expect("load failed");
        assert!(!config.animate);
        assert_eq!(config.speed, 0.25);
    }
}
