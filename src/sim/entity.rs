//! Ship, asteroid and projectile entities
//!
//! Each variant composes a [`KinematicBody`] and adds its own lifecycle.
//! The [`Entity`] trait is the capability set the collision engine and the
//! snapshot builder work against.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Bounds, KinematicBody};
use super::sprite::Visual;
use crate::{heading, normalize_degrees};

/// Stable entity identifier, allocated by the world
pub type EntityId = u32;

/// Type tag for renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Ship,
    Asteroid { stage: u8 },
    Projectile,
}

/// Shared capabilities of every simulated entity
pub trait Entity {
    fn id(&self) -> EntityId;
    fn kind(&self) -> EntityKind;
    fn body(&self) -> &KinematicBody;

    /// Whether the entity asks to be dropped from its live set this tick
    fn is_removable(&self) -> bool {
        false
    }

    fn pos(&self) -> Vec2 {
        self.body().pos
    }

    fn radius(&self) -> f32 {
        self.body().radius
    }

    fn speed(&self) -> f32 {
        self.body().speed()
    }

    /// Direction of travel in degrees
    fn direction(&self) -> f32 {
        self.body().direction()
    }
}

/// Per-tick control response of the ship
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShipHandling {
    /// Degrees per tick while a turn key is held
    pub turn_rate: f32,
    /// Velocity gained per tick while thrusting
    pub thrust: f32,
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ship {
    pub id: EntityId,
    pub body: KinematicBody,
    /// Ticks left during which asteroids can't hurt the ship
    pub invincible_ticks: u32,
    pub handling: ShipHandling,
}

impl Ship {
    pub fn new(id: EntityId, visual: &Visual, handling: ShipHandling) -> Self {
        Self {
            id,
            body: KinematicBody::new(Vec2::ZERO, Vec2::ZERO, visual),
            invincible_ticks: 0,
            handling,
        }
    }

    /// Back to the spawn point: centered, still, pointing up, shielded
    pub fn reset(&mut self, spawn: Vec2, angle: f32, invincible_ticks: u32) {
        self.body.pos = spawn;
        self.body.vel = Vec2::ZERO;
        self.body.angle = angle;
        self.invincible_ticks = invincible_ticks;
    }

    /// Apply turn (-1, 0, 1) and thrust, integrate, then tick down the shield
    pub fn steer(&mut self, turn: i8, thrust: bool, bounds: &Bounds) {
        self.body.angle = normalize_degrees(self.body.angle + f32::from(turn) * self.handling.turn_rate);
        if thrust {
            self.body.vel += heading(self.body.angle) * self.handling.thrust;
        }
        self.body.integrate(bounds);

        if self.invincible_ticks > 0 {
            self.invincible_ticks -= 1;
        }
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_ticks > 0
    }

    /// Blink signal for the renderer while shielded
    pub fn blink_visible(&self) -> bool {
        self.invincible_ticks % 16 < 8
    }
}

impl Entity for Ship {
    fn id(&self) -> EntityId {
        self.id
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Ship
    }

    fn body(&self) -> &KinematicBody {
        &self.body
    }
}

/// A drifting rock. Stage 3 is the largest; stage 1 breaks into nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: EntityId,
    pub body: KinematicBody,
    pub stage: u8,
}

impl Asteroid {
    pub fn new(id: EntityId, stage: u8, pos: Vec2, direction: f32, speed: f32, visual: &Visual) -> Self {
        let mut body = KinematicBody::launched(pos, direction, speed, visual);
        body.angle = direction;
        Self { id, body, stage }
    }

    pub fn can_split(&self) -> bool {
        self.stage > 1
    }
}

impl Entity for Asteroid {
    fn id(&self) -> EntityId {
        self.id
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Asteroid { stage: self.stage }
    }

    fn body(&self) -> &KinematicBody {
        &self.body
    }
}

/// A shot fired from the ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: EntityId,
    pub body: KinematicBody,
    pub ttl_ticks: u32,
    pub dead: bool,
}

impl Projectile {
    /// Shot leaving the ship's nose at ship speed + muzzle speed
    pub fn from_ship(id: EntityId, ship: &Ship, muzzle_speed: f32, ttl_ticks: u32, visual: &Visual) -> Self {
        let angle = ship.body.angle;
        let mut body = KinematicBody::launched(ship.body.pos, angle, ship.speed() + muzzle_speed, visual);
        body.angle = angle;
        Self {
            id,
            body,
            ttl_ticks,
            dead: ttl_ticks == 0,
        }
    }

    /// Move and age by one tick
    pub fn update(&mut self, bounds: &Bounds) {
        self.body.integrate(bounds);
        self.ttl_ticks = self.ttl_ticks.saturating_sub(1);
        if self.ttl_ticks == 0 {
            self.dead = true;
        }
    }

    /// Mark as spent after striking something
    pub fn kill(&mut self) {
        self.dead = true;
    }
}

impl Entity for Projectile {
    fn id(&self) -> EntityId {
        self.id
    }

    fn kind(&self) -> EntityKind {
        EntityKind::Projectile
    }

    fn body(&self) -> &KinematicBody {
        &self.body
    }

    fn is_removable(&self) -> bool {
        self.dead
    }
}
