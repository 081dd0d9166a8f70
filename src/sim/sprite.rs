//! Visual descriptors supplied by the asset collaborator
//!
//! The simulation never touches images. It only needs each sprite's size (for
//! wrap padding) and its collision radius, handed over once at construction.

use serde::{Deserialize, Serialize};

/// Size and collision radius of an entity's sprite
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Visual {
    pub width: f32,
    pub height: f32,
    pub radius: f32,
}

impl Visual {
    pub const fn new(width: f32, height: f32, radius: f32) -> Self {
        Self {
            width,
            height,
            radius,
        }
    }

    /// Radius derived from the smaller sprite dimension
    pub fn from_size(width: f32, height: f32, radius_factor: f32) -> Self {
        Self::new(width, height, width.min(height) * radius_factor)
    }

    /// Half the sprite size, used as wrap padding
    pub fn half_extents(&self) -> glam::Vec2 {
        glam::Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Radius factor for ship and shot sprites
pub const SPRITE_RADIUS_FACTOR: f32 = 0.6;
/// Asteroid hitboxes are a little more generous
pub const ASTEROID_RADIUS_FACTOR: f32 = 0.75;

/// Every sprite the simulation knows about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteSheet {
    pub ship: Visual,
    pub shot: Visual,
    pub asteroid_large: Visual,
    pub asteroid_medium: Visual,
    pub asteroid_small: Visual,
}

impl Default for SpriteSheet {
    fn default() -> Self {
        Self {
            ship: Visual::from_size(99.0, 75.0, SPRITE_RADIUS_FACTOR),
            shot: Visual::from_size(13.0, 37.0, SPRITE_RADIUS_FACTOR),
            asteroid_large: Visual::from_size(101.0, 84.0, ASTEROID_RADIUS_FACTOR),
            asteroid_medium: Visual::from_size(43.0, 43.0, ASTEROID_RADIUS_FACTOR),
            asteroid_small: Visual::from_size(28.0, 28.0, ASTEROID_RADIUS_FACTOR),
        }
    }
}

impl SpriteSheet {
    /// Sprite for an asteroid stage (3 = large). Out-of-range stages clamp.
    pub fn asteroid(&self, stage: u8) -> Visual {
        match stage {
            0 | 1 => self.asteroid_small,
            2 => self.asteroid_medium,
            _ => self.asteroid_large,
        }
    }

    /// Iterate every descriptor with a name (for validation messages)
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Visual)> {
        [
            ("ship", &self.ship),
            ("shot", &self.shot),
            ("asteroid_large", &self.asteroid_large),
            ("asteroid_medium", &self.asteroid_medium),
            ("asteroid_small", &self.asteroid_small),
        ]
        .into_iter()
    }
}
