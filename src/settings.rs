//! Game tuning
//!
//! Every gameplay constant in one serde struct. Missing keys in a JSON file
//! fall back to the defaults in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::body::Bounds;
use crate::sim::entity::ShipHandling;
use crate::sim::sprite::SpriteSheet;

/// Why a settings file couldn't be used
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Gameplay tuning, injected into the world at construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,
    /// Frame clock rate; one tick per 1/tick_rate seconds
    pub tick_rate: u32,

    // === Ship ===
    pub ship_turn_rate: f32,
    pub ship_thrust: f32,
    pub invincible_ticks: u32,
    pub starting_lives: u8,

    // === Weapons ===
    pub muzzle_speed: f32,
    pub shot_lifetime_ticks: u32,

    // === Asteroids ===
    pub split_angle: f32,
    pub asteroid_min_speed: f32,
    pub asteroid_max_speed: f32,
    pub asteroid_score: u64,

    // === Progression ===
    pub level_pause_ticks: u32,

    /// Sprite sizes and hitboxes from the asset loader
    pub sprites: SpriteSheet,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            tick_rate: TICKS_PER_SECOND,

            ship_turn_rate: SHIP_TURN_RATE,
            ship_thrust: SHIP_THRUST,
            invincible_ticks: INVINCIBLE_TICKS,
            starting_lives: STARTING_LIVES,

            muzzle_speed: MUZZLE_SPEED,
            shot_lifetime_ticks: SHOT_LIFETIME_TICKS,

            split_angle: SPLIT_ANGLE,
            asteroid_min_speed: ASTEROID_MIN_SPEED,
            asteroid_max_speed: ASTEROID_MAX_SPEED,
            asteroid_score: ASTEROID_SCORE,

            level_pause_ticks: LEVEL_PAUSE_TICKS,

            sprites: SpriteSheet::default(),
        }
    }
}

impl Settings {
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.field_width, self.field_height)
    }

    pub fn handling(&self) -> ShipHandling {
        ShipHandling {
            turn_rate: self.ship_turn_rate,
            thrust: self.ship_thrust,
        }
    }

    /// Seconds per tick
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.tick_rate.max(1) as f32
    }

    /// Parse and validate settings from JSON
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json_str(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Reject values the simulation can't run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> SettingsError {
            SettingsError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        if !(self.field_width.is_finite() && self.field_width > 0.0) {
            return Err(invalid("field_width", format!("must be positive, got {}", self.field_width)));
        }
        if !(self.field_height.is_finite() && self.field_height > 0.0) {
            return Err(invalid("field_height", format!("must be positive, got {}", self.field_height)));
        }
        if self.tick_rate == 0 {
            return Err(invalid("tick_rate", "must be at least 1"));
        }
        if self.starting_lives == 0 {
            return Err(invalid("starting_lives", "must be at least 1"));
        }
        if !(self.asteroid_min_speed.is_finite() && self.asteroid_max_speed.is_finite()) {
            return Err(invalid(
                "asteroid_max_speed",
                format!(
                    "speed range [{}, {}) must be finite",
                    self.asteroid_min_speed, self.asteroid_max_speed
                ),
            ));
        }
        if !(self.asteroid_min_speed >= 0.0 && self.asteroid_min_speed < self.asteroid_max_speed) {
            return Err(invalid(
                "asteroid_min_speed",
                format!(
                    "speed range [{}, {}) is empty",
                    self.asteroid_min_speed, self.asteroid_max_speed
                ),
            ));
        }
        for (name, visual) in self.sprites.iter() {
            if ![visual.width, visual.height, visual.radius].iter().all(|d| d.is_finite()) {
                return Err(invalid("sprites", format!("{name} has a non-finite dimension")));
            }
            if !(visual.width >= 0.0 && visual.height >= 0.0 && visual.radius >= 0.0) {
                return Err(invalid("sprites", format!("{name} has a negative dimension")));
            }
        }
        if self.sprites.ship.radius == 0.0 {
            return Err(invalid("sprites", "ship must have a collision radius"));
        }
        if [
            self.sprites.asteroid_large,
            self.sprites.asteroid_medium,
            self.sprites.asteroid_small,
        ]
        .iter()
        .any(|v| v.radius == 0.0)
        {
            return Err(invalid("sprites", "asteroids must have a collision radius"));
        }
        if self.sprites.shot.radius == 0.0 {
            log::warn!("Shot radius is 0: projectiles will never hit anything");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let s = Settings::default();
        assert!(s.validate().is_ok());
        assert_eq!(s.bounds(), Bounds::new(1024.0, 768.0));
        assert_eq!(s.invincible_ticks, 180);
        assert_eq!(s.level_pause_ticks, 180);
        assert_eq!(s.shot_lifetime_ticks, 60);
        assert!((s.tick_dt() - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let s = Settings::from_json_str(r#"{ "starting_lives": 5, "sprites": { "shot": { "width": 2, "height": 2, "radius": 1 } } }"#)
            .unwrap();
        assert_eq!(s.starting_lives, 5);
        assert_eq!(s.muzzle_speed, MUZZLE_SPEED);
        assert_eq!(s.sprites.shot.radius, 1.0);
        assert_eq!(s.sprites.ship, SpriteSheet::default().ship);
    }

    #[test]
    fn test_malformed_json() {
        let err = Settings::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_rejects_empty_speed_range() {
        let err = Settings::from_json_str(r#"{ "asteroid_min_speed": 4, "asteroid_max_speed": 4 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "asteroid_min_speed", .. }));
    }

    #[test]
    fn test_rejects_zero_lives_and_bad_field() {
        let mut s = Settings::default();
        s.starting_lives = 0;
        assert!(s.validate().is_err());

        let mut s = Settings::default();
        s.field_height = 0.0;
        assert!(matches!(
            s.validate(),
            Err(SettingsError::Invalid { field: "field_height", .. })
        ));
    }

    #[test]
    fn test_rejects_overflowing_values() {
        // 1e39 doesn't fit in an f32 and parses as infinity
        let err = Settings::from_json_str(r#"{ "asteroid_max_speed": 1e39 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "asteroid_max_speed", .. }));

        let err = Settings::from_json_str(r#"{ "field_width": 1e39 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "field_width", .. }));

        let err = Settings::from_json_str(r#"{ "sprites": { "ship": { "width": 1e39, "height": 75, "radius": 45 } } }"#)
            .unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "sprites", .. }));
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("asteroids_sim_settings_{}.json", std::process::id()));
        let mut s = Settings::default();
        s.asteroid_score = 250;
        s.save(&path).unwrap();
        let loaded = Settings::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, s);
    }

    #[test]
    fn test_missing_file() {
        let err = Settings::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
