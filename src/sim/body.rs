//! Kinematic body shared by every entity
//!
//! Velocity is already a per-tick delta, so integration is a plain add followed
//! by the toroidal wrap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::sprite::Visual;
use crate::{direction_degrees, heading};

/// Rectangular play field with its origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Position, velocity and orientation plus the sprite metadata needed for
/// wrapping and collision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KinematicBody {
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    /// Orientation in degrees (0 = +x, 90 = +y / down the screen)
    pub angle: f32,
    /// Half the sprite size on each axis
    pub half_extents: Vec2,
    /// Collision radius; 0 means the body never collides
    pub radius: f32,
}

impl KinematicBody {
    pub fn new(pos: Vec2, vel: Vec2, visual: &Visual) -> Self {
        Self {
            pos,
            vel,
            angle: 0.0,
            half_extents: visual.half_extents(),
            radius: visual.radius,
        }
    }

    /// Body moving along `direction` (degrees) at `speed` units per tick
    pub fn launched(pos: Vec2, direction: f32, speed: f32, visual: &Visual) -> Self {
        Self::new(pos, heading(direction) * speed, visual)
    }

    /// Advance one tick and wrap around the field edges
    pub fn integrate(&mut self, bounds: &Bounds) {
        self.pos += self.vel;
        self.wrap(bounds);
    }

    /// Toroidal wrap. The sprite must fully leave the field before it jumps,
    /// and it reappears just beyond the opposite edge.
    pub fn wrap(&mut self, bounds: &Bounds) {
        let pad = self.half_extents;

        if self.pos.x + pad.x < 0.0 {
            self.pos.x = bounds.width + pad.x;
        } else if self.pos.x - pad.x > bounds.width {
            self.pos.x = -pad.x;
        }

        if self.pos.y + pad.y < 0.0 {
            self.pos.y = bounds.height + pad.y;
        } else if self.pos.y - pad.y > bounds.height {
            self.pos.y = -pad.y;
        }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Direction of travel in degrees
    pub fn direction(&self) -> f32 {
        direction_degrees(self.vel)
    }

    pub fn collides(&self) -> bool {
        self.radius > 0.0
    }
}
