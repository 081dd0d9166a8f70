//! Circle-circle collision detection
//!
//! Detection is a read-only pass that returns events. Nothing is removed here;
//! the settlement pass in `lifecycle` applies the events afterwards, by id.

use glam::Vec2;

use super::entity::{Asteroid, Entity, EntityId, Projectile, Ship};

/// Strict overlap test: touching circles do not collide
#[inline]
pub fn circles_intersect(pos_a: Vec2, radius_a: f32, pos_b: Vec2, radius_b: f32) -> bool {
    pos_a.distance(pos_b) < radius_a + radius_b
}

/// Overlap test between two entities. Zero-radius bodies never collide.
pub fn intersects(a: &impl Entity, b: &impl Entity) -> bool {
    a.body().collides()
        && b.body().collides()
        && circles_intersect(a.pos(), a.radius(), b.pos(), b.radius())
}

/// A projectile striking an asteroid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectileHit {
    pub projectile: EntityId,
    pub asteroid: EntityId,
}

/// Scan projectiles in order, and for each the asteroids in order. The first
/// asteroid a projectile overlaps consumes it. An asteroid already claimed by
/// an earlier projectile this tick is no longer a target.
pub fn detect_projectile_hits(projectiles: &[Projectile], asteroids: &[Asteroid]) -> Vec<ProjectileHit> {
    let mut hits: Vec<ProjectileHit> = Vec::new();

    for shot in projectiles.iter().filter(|p| !p.dead) {
        let target = asteroids
            .iter()
            .filter(|a| !hits.iter().any(|h| h.asteroid == a.id))
            .find(|a| intersects(shot, *a));

        if let Some(asteroid) = target {
            hits.push(ProjectileHit {
                projectile: shot.id,
                asteroid: asteroid.id,
            });
        }
    }

    hits
}

/// First asteroid overlapping the ship, if any. Invincibility is the
/// caller's concern.
pub fn detect_ship_hit(ship: &Ship, asteroids: &[Asteroid]) -> Option<EntityId> {
    asteroids.iter().find(|a| intersects(ship, *a)).map(|a| a.id)
}
