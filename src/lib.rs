//! Asteroids Sim - deterministic tick engine for a classic Asteroids game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, entities, collisions, progression)
//! - `session`: Fixed-timestep driver, input latching and render snapshots
//! - `settings`: Data-driven game tuning
//! - `highscores`: In-memory leaderboard

pub mod highscores;
pub mod session;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use session::{InputLatch, Session};
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation ticks per second
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play-field dimensions
    pub const FIELD_WIDTH: f32 = 1024.0;
    pub const FIELD_HEIGHT: f32 = 768.0;

    /// Ship rotation rate (degrees per tick)
    pub const SHIP_TURN_RATE: f32 = 3.5;
    /// Ship thrust (velocity gained per tick while thrusting)
    pub const SHIP_THRUST: f32 = 0.1;
    /// Ship spawn orientation, pointing up the screen (y grows downward)
    pub const SHIP_SPAWN_ANGLE: f32 = -90.0;
    /// Invincibility grace window after (re)spawn, 3 seconds
    pub const INVINCIBLE_TICKS: u32 = 3 * TICKS_PER_SECOND;

    /// Speed added on top of the ship's speed when firing
    pub const MUZZLE_SPEED: f32 = 10.0;
    /// Shot lifetime, 1 second
    pub const SHOT_LIFETIME_TICKS: u32 = TICKS_PER_SECOND;

    /// Largest asteroid stage
    pub const MAX_STAGE: u8 = 3;
    /// Children leave at parent direction +/- this angle (degrees)
    pub const SPLIT_ANGLE: f32 = 65.0;
    /// Spawn speed range for a fresh level
    pub const ASTEROID_MIN_SPEED: f32 = 2.0;
    pub const ASTEROID_MAX_SPEED: f32 = 4.0;

    /// Score per asteroid destroyed, regardless of stage
    pub const ASTEROID_SCORE: u64 = 100;
    pub const STARTING_LIVES: u8 = 3;
    /// Freeze between levels, 3 seconds
    pub const LEVEL_PAUSE_TICKS: u32 = 3 * TICKS_PER_SECOND;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if a >= 360.0 { 0.0 } else { a }
}

/// Unit vector for a heading given in degrees
#[inline]
pub fn heading(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

/// Direction of a vector in degrees, atan2(y, x)
#[inline]
pub fn direction_degrees(v: Vec2) -> f32 {
    v.y.atan2(v.x).to_degrees()
}
