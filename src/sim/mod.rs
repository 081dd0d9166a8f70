//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One uniform tick per step, velocities expressed per tick
//! - Seeded RNG only
//! - Stable iteration order (spawn order, children appended after settlement)
//! - No rendering, audio or input-device dependencies

pub mod body;
pub mod collision;
pub mod entity;
pub mod lifecycle;
pub mod snapshot;
pub mod sprite;
pub mod state;
pub mod tick;

pub use body::{Bounds, KinematicBody};
pub use collision::{ProjectileHit, circles_intersect, detect_projectile_hits, detect_ship_hit};
pub use entity::{Asteroid, Entity, EntityId, EntityKind, Projectile, Ship, ShipHandling};
pub use lifecycle::{level_population, settle_hits, spawn_level, split};
pub use snapshot::{EntitySnapshot, WorldSnapshot};
pub use sprite::{SpriteSheet, Visual};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{TickInput, tick};
