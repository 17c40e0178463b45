//! World configuration, loaded from RON.
//!
//! ```ron
//! (
//!     render_distance: 2,
//!     move_speed: 6.0,
//!     stream_mode: Shared,
//!     features: (small_grass: true),
//!     day_length_ticks: 3600,
//!     start_hour: 8.0,
//!     seed: Some(12345),
//! )
//! ```
//!
//! Every field is optional and falls back to its default.

use std::path::Path;

use meadow_core::constants::{
    DEFAULT_DAY_LENGTH_TICKS, DEFAULT_MOVE_SPEED, DEFAULT_RENDER_DISTANCE, DEFAULT_START_HOUR,
    MAX_RENDER_DISTANCE,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse world config RON: {0}")]
    ParseError(String),
    #[error("Invalid world config: {0}")]
    Invalid(String),
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Which PRNG stream chunk generation draws from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreamMode {
    /// One stream for the whole session. Chunk content depends on the order
    /// chunks were generated in, exactly as the world format was defined.
    #[default]
    Shared,
    /// A fresh stream per chunk seeded from `seed + cx * 10000 + cy`.
    /// Chunk content depends only on seed and coordinate.
    PerChunk,
}

/// Optional generation passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorFeatures {
    /// Scatter grass blades in the decor pass. When off, the decor pass
    /// places rocks only.
    pub small_grass: bool,
}

impl Default for GeneratorFeatures {
    fn default() -> Self {
        Self { small_grass: true }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Chebyshev radius (in chunks) kept loaded around the viewer.
    pub render_distance: u32,
    /// Viewer step per tick in world units.
    pub move_speed: f64,
    pub stream_mode: StreamMode,
    pub features: GeneratorFeatures,
    /// Ticks per full day/night cycle.
    pub day_length_ticks: u32,
    /// Hour of day (0–24) the clock starts at.
    pub start_hour: f32,
    /// Fixed starting seed. `None` draws one from OS entropy.
    pub seed: Option<u32>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            render_distance: DEFAULT_RENDER_DISTANCE,
            move_speed: DEFAULT_MOVE_SPEED,
            stream_mode: StreamMode::default(),
            features: GeneratorFeatures::default(),
            day_length_ticks: DEFAULT_DAY_LENGTH_TICKS,
            start_hour: DEFAULT_START_HOUR,
            seed: None,
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.render_distance > MAX_RENDER_DISTANCE {
            return Err(ConfigError::Invalid(format!(
                "render_distance {} exceeds maximum {}",
                self.render_distance, MAX_RENDER_DISTANCE
            )));
        }
        if !self.move_speed.is_finite() || self.move_speed <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "move_speed must be positive and finite, got {}",
                self.move_speed
            )));
        }
        if self.day_length_ticks == 0 {
            return Err(ConfigError::Invalid(
                "day_length_ticks must be at least 1".to_string(),
            ));
        }
        if !(0.0..24.0).contains(&self.start_hour) {
            return Err(ConfigError::Invalid(format!(
                "start_hour must be in [0, 24), got {}",
                self.start_hour
            )));
        }
        Ok(())
    }
}

/// Parse and validate a world config from a RON string.
pub fn load_config_from_str(ron_str: &str) -> Result<WorldConfig, ConfigError> {
    let options = ron::Options::default();
    let config: WorldConfig = options
        .from_str(ron_str)
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

/// Read, parse and validate a world config file.
pub fn load_config_file(path: &Path) -> Result<WorldConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let config = load_config_from_str(&contents)?;
    log::info!("Loaded world config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = load_config_from_str("()").unwrap();
        assert_eq!(config, WorldConfig::default());
        assert_eq!(config.render_distance, 2);
        assert_eq!(config.move_speed, 6.0);
        assert!(config.features.small_grass);
        assert_eq!(config.stream_mode, StreamMode::Shared);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_full_config_parses() {
        let src = r#"(
            render_distance: 3,
            move_speed: 4.5,
            stream_mode: PerChunk,
            features: (small_grass: false),
            day_length_ticks: 600,
            start_hour: 20.0,
            seed: Some(12345),
        )"#;
        let config = load_config_from_str(src).unwrap();
        assert_eq!(config.render_distance, 3);
        assert_eq!(config.move_speed, 4.5);
        assert_eq!(config.stream_mode, StreamMode::PerChunk);
        assert!(!config.features.small_grass);
        assert_eq!(config.day_length_ticks, 600);
        assert_eq!(config.start_hour, 20.0);
        assert_eq!(config.seed, Some(12345));
    }

    #[test]
    fn test_partial_features_block() {
        let config = load_config_from_str("(features: ())").unwrap();
        assert!(config.features.small_grass);
    }

    #[test]
    fn test_malformed_ron_rejected() {
        let err = load_config_from_str("(render_distance: )").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        for src in [
            "(render_distance: 17)",
            "(move_speed: 0.0)",
            "(move_speed: -2.0)",
            "(day_length_ticks: 0)",
            "(start_hour: 24.0)",
            "(start_hour: -1.0)",
        ] {
            let err = load_config_from_str(src).unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid(_)),
                "{src} should fail validation, got {err:?}"
            );
        }
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config_file(Path::new("/nonexistent/meadow/world.ron")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
