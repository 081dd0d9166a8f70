//! World state and progression types
//!
//! Everything a tick reads or writes lives in [`GameState`]. The renderer only
//! ever sees [`WorldSnapshot`](super::snapshot::WorldSnapshot) copies of it.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::Bounds;
use super::entity::{Asteroid, EntityId, Projectile, Ship};
use super::lifecycle::spawn_level;
use crate::settings::Settings;

/// Progression state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Everything frozen until the next level starts
    LevelClearPause,
    /// No lives left; asteroids keep drifting, fire restarts
    GameOver,
}

/// Things that happened during a tick, for audio/effects collaborators
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    ShotFired { id: EntityId },
    AsteroidDestroyed { id: EntityId, stage: u8, pos: Vec2 },
    AsteroidSplit { parent: EntityId, children: [EntityId; 2] },
    ShipHit { asteroid: EntityId, lives_left: u8 },
    LevelCleared { next_level: u32 },
    LevelStarted { level: u32 },
    GameOver { score: u64, level: u32 },
    SessionReset,
}

/// Complete world state for one game session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub settings: Settings,
    /// Current level (1-based)
    pub level: u32,
    pub score: u64,
    pub lives: u8,
    pub phase: GamePhase,
    /// Ticks left in the level-clear freeze
    pub pause_ticks: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub ship: Ship,
    /// Live asteroids, in spawn order
    pub asteroids: Vec<Asteroid>,
    /// Live projectiles, in firing order
    pub projectiles: Vec<Projectile>,
    /// Hitbox overlay toggle for the renderer
    pub debug: bool,
    /// Set by the quit command; a halted world ignores further ticks
    pub halted: bool,
    /// Events produced by the most recent tick
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: EntityId,
}

impl GameState {
    /// Create a new game with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_settings(seed, Settings::default())
    }

    /// Create a new game at level 1 with the given tuning
    pub fn with_settings(seed: u64, settings: Settings) -> Self {
        let ship = Ship::new(0, &settings.sprites.ship, settings.handling());
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            level: 1,
            score: 0,
            lives: settings.starting_lives,
            phase: GamePhase::Playing,
            pause_ticks: 0,
            time_ticks: 0,
            ship,
            asteroids: Vec::new(),
            projectiles: Vec::new(),
            debug: false,
            halted: false,
            events: Vec::new(),
            next_id: 1,
            settings,
        };
        state.ship.id = state.next_entity_id();
        state.start_session();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn bounds(&self) -> Bounds {
        self.settings.bounds()
    }

    /// Put the ship back at its spawn point with a fresh shield
    pub fn reset_ship(&mut self) {
        let spawn = self.bounds().center();
        self.ship
            .reset(spawn, crate::consts::SHIP_SPAWN_ANGLE, self.settings.invincible_ticks);
    }

    /// Full restart: level 1, no score, full lives, fresh asteroids.
    /// The RNG keeps running so back-to-back sessions differ.
    pub fn reset_session(&mut self) {
        self.asteroids.clear();
        self.projectiles.clear();
        self.level = 1;
        self.score = 0;
        self.lives = self.settings.starting_lives;
        self.phase = GamePhase::Playing;
        self.pause_ticks = 0;
        self.start_session();
        self.events.push(GameEvent::SessionReset);
        log::info!("Session reset (seed {})", self.seed);
    }

    fn start_session(&mut self) {
        self.reset_ship();
        spawn_level(self);
    }

    /// Ship is simulated and drawn only while lives remain
    pub fn ship_active(&self) -> bool {
        self.lives > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Entity;

    #[test]
    fn test_new_game() {
        let state = GameState::new(42);
        assert_eq!(state.level, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.asteroids.len(), 1);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.ship.pos(), Vec2::new(512.0, 384.0));
        assert_eq!(state.ship.invincible_ticks, 180);
    }

    #[test]
    fn test_ids_are_unique() {
        let state = GameState::new(7);
        let mut ids: Vec<EntityId> = state.asteroids.iter().map(|a| a.id).collect();
        ids.push(state.ship.id);
        let n = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), n);
    }

    #[test]
    fn test_same_seed_same_world() {
        let a = GameState::new(1234);
        let b = GameState::new(1234);
        let pa: Vec<Vec2> = a.asteroids.iter().map(|r| r.body.pos).collect();
        let pb: Vec<Vec2> = b.asteroids.iter().map(|r| r.body.pos).collect();
        assert_eq!(pa, pb);
    }
}
