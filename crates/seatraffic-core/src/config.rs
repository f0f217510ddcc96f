//! Tunable simulation parameters.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{
    ACTIVE_DEFAULT, ACTIVE_MAX, HDG_HOLD_TIME, LINGER_TIME, MAX_TILE_RANGE, RENDERING_SCALE,
    SHIP_SPACING, TILE_RANGE,
};
use crate::error::ConfigError;

/// Configuration for a traffic simulation. Every field has a default, so a
/// config file only needs the values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Tiles either side of the observer's tile that carry traffic.
    pub tile_range: i32,
    /// Seconds between heading/altitude refreshes.
    pub heading_hold_secs: f64,
    /// Seconds a ship waits at the dock before turning round.
    pub linger_secs: f64,
    /// Minimum separation at spawn, in multiples of the ship's semilen.
    pub ship_spacing: f64,
    /// Host object density setting; see `capacity_for_density`.
    pub object_density: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tile_range: TILE_RANGE,
            heading_hold_secs: HDG_HOLD_TIME,
            linger_secs: LINGER_TIME,
            ship_spacing: SHIP_SPACING,
            object_density: (ACTIVE_DEFAULT / RENDERING_SCALE) as u32,
        }
    }
}

impl SimConfig {
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0..=MAX_TILE_RANGE).contains(&self.tile_range) {
            return Err(ConfigError::Invalid(format!(
                "tile_range must be between 0 and {MAX_TILE_RANGE}, got {}",
                self.tile_range
            )));
        }
        if self.heading_hold_secs.is_nan() || self.heading_hold_secs <= 0.0 {
            return Err(ConfigError::Invalid(
                "heading_hold_secs must be positive".to_string(),
            ));
        }
        if self.linger_secs < 0.0 || self.ship_spacing < 0.0 {
            return Err(ConfigError::Invalid(
                "linger_secs and ship_spacing must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    /// Active vessel capacity implied by `object_density`.
    pub fn capacity(&self) -> usize {
        capacity_for_density(self.object_density)
    }
}

/// Translate the host's object density setting into a vessel count.
pub fn capacity_for_density(density: u32) -> usize {
    (density as usize * RENDERING_SCALE).min(ACTIVE_MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacity() {
        assert_eq!(SimConfig::default().capacity(), ACTIVE_DEFAULT);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = SimConfig::from_json_str(r#"{ "seed": 7, "linger_secs": 60.0 }"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.linger_secs, 60.0);
        assert_eq!(config.tile_range, TILE_RANGE);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(SimConfig::from_json_str(r#"{ "tile_range": -1 }"#).is_err());
        assert!(SimConfig::from_json_str(r#"{ "heading_hold_secs": 0.0 }"#).is_err());
        assert!(SimConfig::from_json_str("not json").is_err());
    }

    #[test]
    fn test_tile_range_is_bounded() {
        let widest = SimConfig {
            tile_range: MAX_TILE_RANGE,
            ..SimConfig::default()
        };
        assert!(widest.validate().is_ok());
        for tile_range in [MAX_TILE_RANGE + 1, i32::MAX] {
            let config = SimConfig {
                tile_range,
                ..SimConfig::default()
            };
            assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        }
    }

    #[test]
    fn test_density_is_capped() {
        assert_eq!(capacity_for_density(0), 0);
        assert_eq!(capacity_for_density(3), 3 * RENDERING_SCALE);
        assert_eq!(capacity_for_density(6), ACTIVE_MAX);
    }
}
