//! Simulation configuration
//!
//! A [`SimulationConfig`] is built once before a session (defaults, optional
//! JSON document, then `--key=value` flags) and never mutated afterwards.
//! [`SimulationConfig::validate`] is the only gate into a session.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::{AmountRange, Bounds, MotionMode};

/// Parameters of one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Board width in cells
    pub width: u32,
    /// Board height in cells
    pub height: u32,
    /// Collectible population
    pub count: usize,
    /// Session length (ms)
    pub duration_ms: u64,
    /// Delay between ticks (ms)
    pub tick_ms: u64,
    /// Collection radius around the player
    pub player_radius: f64,
    /// Cells moved per tick while a direction is held; unset means the
    /// motion mode's default
    pub player_speed: Option<f64>,
    /// Motion policy for every collectible
    pub motion: MotionMode,
    /// Lower bound of spawned amounts (inclusive)
    pub amount_min: f64,
    /// Upper bound of spawned amounts (exclusive)
    pub amount_max: f64,
    /// RNG seed; a fresh one is drawn when absent
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            count: DEFAULT_COUNT,
            duration_ms: DEFAULT_DURATION_MS,
            tick_ms: DEFAULT_TICK_MS,
            player_radius: DEFAULT_PLAYER_RADIUS,
            player_speed: None,
            motion: MotionMode::Reflective,
            amount_min: DEFAULT_AMOUNT_MIN,
            amount_max: DEFAULT_AMOUNT_MAX,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Parse a JSON document; missing keys keep their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))
    }

    /// Check every invariant a session relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 {
            return Err(ConfigError::NotPositive { field: "width" });
        }
        if self.height == 0 {
            return Err(ConfigError::NotPositive { field: "height" });
        }
        if self.duration_ms == 0 {
            return Err(ConfigError::NotPositive { field: "duration" });
        }
        if self.tick_ms == 0 {
            return Err(ConfigError::NotPositive { field: "tick" });
        }
        if !(self.player_radius.is_finite() && self.player_radius > 0.0) {
            return Err(ConfigError::OutOfRange {
                field: "radius",
                value: self.player_radius,
            });
        }
        let speed = self.player_speed();
        if !(speed.is_finite() && speed >= 0.0) {
            return Err(ConfigError::OutOfRange {
                field: "speed",
                value: speed,
            });
        }
        for (field, value) in [("min-amount", self.amount_min), ("max-amount", self.amount_max)] {
            if !value.is_finite() {
                return Err(ConfigError::OutOfRange { field, value });
            }
        }
        if self.amount_min > self.amount_max {
            return Err(ConfigError::EmptyAmountRange {
                min: self.amount_min,
                max: self.amount_max,
            });
        }
        Ok(())
    }

    /// Apply one `--key=value` flag (without the leading dashes).
    ///
    /// Returns `Ok(false)` for keys this struct does not own so callers can
    /// handle their own flags.
    pub fn apply_flag(&mut self, key: &str, value: &str) -> Result<bool, ConfigError> {
        match key {
            "width" => self.width = parse_flag(key, value)?,
            "height" => self.height = parse_flag(key, value)?,
            "count" => self.count = parse_flag(key, value)?,
            "duration" => self.duration_ms = parse_flag(key, value)?,
            "tick" => self.tick_ms = parse_flag(key, value)?,
            "radius" => self.player_radius = parse_flag(key, value)?,
            "speed" => self.player_speed = Some(parse_flag(key, value)?),
            "mode" => self.motion = value.parse()?,
            "min-amount" => self.amount_min = parse_flag(key, value)?,
            "max-amount" => self.amount_max = parse_flag(key, value)?,
            "seed" => self.seed = Some(parse_flag(key, value)?),
            _ => return Ok(false),
        }
        Ok(true)
    }

    /// Effective player speed
    pub fn player_speed(&self) -> f64 {
        self.player_speed.unwrap_or_else(|| self.motion.default_player_speed())
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.width as f64, self.height as f64)
    }

    pub fn amount_range(&self) -> AmountRange {
        AmountRange::new(self.amount_min, self.amount_max)
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}

fn parse_flag<T: FromStr>(flag: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidFlag {
        flag: flag.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.width, 100);
        assert_eq!(config.height, 40);
        assert_eq!(config.motion, MotionMode::Reflective);
    }

    #[test]
    fn test_zero_fields_rejected() {
        let config = SimulationConfig {
            duration_ms: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotPositive { field: "duration" })
        );

        let config = SimulationConfig {
            tick_ms: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotPositive { field: "tick" })
        );

        let config = SimulationConfig {
            width: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_reals_rejected() {
        let config = SimulationConfig {
            player_radius: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { field: "radius", .. })
        ));

        let config = SimulationConfig {
            amount_min: 5.0,
            amount_max: 1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyAmountRange { .. })
        ));
    }

    #[test]
    fn test_apply_flags() {
        let mut config = SimulationConfig::default();
        assert!(config.apply_flag("width", "20").unwrap());
        assert!(config.apply_flag("mode", "Gravity").unwrap());
        assert!(config.apply_flag("seed", "42").unwrap());
        assert!(!config.apply_flag("headless", "").unwrap());
        assert_eq!(config.width, 20);
        assert_eq!(config.motion, MotionMode::GravityRespawn);
        assert_eq!(config.seed, Some(42));

        // Negative counts cannot be represented
        assert!(matches!(
            config.apply_flag("count", "-3"),
            Err(ConfigError::InvalidFlag { .. })
        ));
        assert!(matches!(
            config.apply_flag("mode", "sideways"),
            Err(ConfigError::UnknownMode(_))
        ));
    }

    #[test]
    fn test_player_speed_follows_mode_unless_set() {
        let mut config = SimulationConfig::default();
        assert_eq!(config.player_speed(), 1.5);
        config.apply_flag("mode", "gravity").unwrap();
        assert_eq!(config.player_speed(), 0.8);
        config.apply_flag("speed", "2").unwrap();
        assert_eq!(config.player_speed(), 2.0);

        config.player_speed = Some(-1.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfRange { field: "speed", .. })
        ));
    }

    #[test]
    fn test_json_document() {
        let config =
            SimulationConfig::from_json_str(r#"{"width": 12, "motion": "gravity_respawn"}"#)
                .unwrap();
        assert_eq!(config.width, 12);
        assert_eq!(config.height, 40);
        assert_eq!(config.motion, MotionMode::GravityRespawn);

        assert!(SimulationConfig::from_json_str("{not json").is_err());
    }
}
