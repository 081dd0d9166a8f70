//! Asteroid spawning, splitting and hit settlement

use glam::Vec2;
use rand::Rng;

use super::collision::ProjectileHit;
use super::entity::{Asteroid, Entity, EntityId};
use super::sprite::SpriteSheet;
use super::state::{GameEvent, GameState};
use crate::consts::MAX_STAGE;

/// Asteroid count and stage for a level. Counts grow every other level while
/// the stage alternates between large and medium.
pub fn level_population(level: u32) -> (usize, u8) {
    let level = level.max(1);
    let count = ((level - 1) / 2 + 1) as usize;
    let stage = MAX_STAGE - (level % 2) as u8;
    (count, stage)
}

/// Spawn the current level's asteroids at random positions, headings and speeds
pub fn spawn_level(state: &mut GameState) {
    let (count, stage) = level_population(state.level);
    let bounds = state.bounds();
    let visual = state.settings.sprites.asteroid(stage);
    let (min_speed, max_speed) = (state.settings.asteroid_min_speed, state.settings.asteroid_max_speed);

    for _ in 0..count {
        let direction = state.rng.random_range(0.0..360.0);
        let speed = state.rng.random_range(min_speed..max_speed);
        let pos = Vec2::new(
            state.rng.random_range(0.0..bounds.width),
            state.rng.random_range(0.0..bounds.height),
        );
        let id = state.next_entity_id();
        state.asteroids.push(Asteroid::new(id, stage, pos, direction, speed, &visual));
    }

    log::info!("Level {}: spawned {} stage-{} asteroids", state.level, count, stage);
}

/// Break an asteroid into two of the next smaller stage. Both children start
/// at the parent's position with its speed, veering `split_angle` degrees to
/// either side of its heading. Stage 1 asteroids leave nothing behind.
pub fn split(parent: &Asteroid, ids: [EntityId; 2], split_angle: f32, sprites: &SpriteSheet) -> Option<[Asteroid; 2]> {
    if !parent.can_split() {
        return None;
    }

    let stage = parent.stage - 1;
    let visual = sprites.asteroid(stage);
    let direction = parent.direction();
    let speed = parent.speed();

    Some([
        Asteroid::new(ids[0], stage, parent.pos(), direction - split_angle, speed, &visual),
        Asteroid::new(ids[1], stage, parent.pos(), direction + split_angle, speed, &visual),
    ])
}

/// Apply projectile hits: score, split, then remove struck asteroids and spent
/// shots. Children join the live set only after every hit is settled.
/// Returns the number of asteroids destroyed.
pub fn settle_hits(state: &mut GameState, hits: &[ProjectileHit]) -> usize {
    if hits.is_empty() {
        return 0;
    }

    let mut children: Vec<Asteroid> = Vec::with_capacity(hits.len() * 2);
    let mut destroyed = 0;

    for hit in hits {
        let Some(parent) = state.asteroids.iter().find(|a| a.id == hit.asteroid).cloned() else {
            continue;
        };

        destroyed += 1;
        state.score += state.settings.asteroid_score;
        state.events.push(GameEvent::AsteroidDestroyed {
            id: parent.id,
            stage: parent.stage,
            pos: parent.pos(),
        });
        log::debug!(
            "Shot {} destroyed asteroid {} (stage {}), score {}",
            hit.projectile,
            parent.id,
            parent.stage,
            state.score
        );

        if parent.can_split() {
            let ids = [state.next_entity_id(), state.next_entity_id()];
            if let Some(pair) = split(&parent, ids, state.settings.split_angle, &state.settings.sprites) {
                state.events.push(GameEvent::AsteroidSplit {
                    parent: parent.id,
                    children: ids,
                });
                children.extend(pair);
            }
        }

        if let Some(shot) = state.projectiles.iter_mut().find(|p| p.id == hit.projectile) {
            shot.kill();
        }
    }

    state.asteroids.retain(|a| !hits.iter().any(|h| h.asteroid == a.id));
    state.projectiles.retain(|p| !p.is_removable());
    state.asteroids.extend(children);

    destroyed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::KinematicBody;
    use crate::sim::entity::Projectile;
    use crate::sim::sprite::Visual;
    use proptest::prelude::*;

    fn rock(id: EntityId, stage: u8, direction: f32, speed: f32) -> Asteroid {
        Asteroid::new(id, stage, Vec2::new(200.0, 150.0), direction, speed, &SpriteSheet::default().asteroid(stage))
    }

    fn angle_diff(a: f32, b: f32) -> f32 {
        (a - b + 540.0).rem_euclid(360.0) - 180.0
    }

    #[test]
    fn test_level_population() {
        assert_eq!(level_population(1), (1, 2));
        assert_eq!(level_population(2), (1, 3));
        assert_eq!(level_population(3), (2, 2));
        assert_eq!(level_population(4), (2, 3));
        assert_eq!(level_population(7), (4, 2));
        assert_eq!(level_population(0), (1, 2));
    }

    #[test]
    fn test_split_large_into_two_medium() {
        let parent = rock(1, 3, 30.0, 3.0);
        let [a, b] = split(&parent, [2, 3], 65.0, &SpriteSheet::default()).unwrap();
        assert_eq!((a.stage, b.stage), (2, 2));
        assert_eq!((a.id, b.id), (2, 3));
        assert_eq!(a.pos(), parent.pos());
        assert!((angle_diff(a.direction(), -35.0)).abs() < 1e-3);
        assert!((angle_diff(b.direction(), 95.0)).abs() < 1e-3);
        assert!((a.speed() - 3.0).abs() < 1e-4);
        assert_eq!(a.radius(), SpriteSheet::default().asteroid_medium.radius);
    }

    #[test]
    fn test_split_small_yields_nothing() {
        assert!(split(&rock(1, 1, 0.0, 2.0), [2, 3], 65.0, &SpriteSheet::default()).is_none());
    }

    #[test]
    fn test_settle_scores_splits_and_defers_children() {
        let mut state = GameState::new(3);
        state.asteroids.clear();
        state.asteroids.push(rock(100, 3, 0.0, 2.0));
        state.asteroids.push(rock(101, 1, 0.0, 2.0));
        let shot_visual = Visual::new(4.0, 4.0, 2.0);
        for id in [200, 201, 202] {
            state.projectiles.push(Projectile {
                id,
                body: KinematicBody::new(Vec2::ZERO, Vec2::ZERO, &shot_visual),
                ttl_ticks: 30,
                dead: false,
            });
        }

        let hits = [
            ProjectileHit { projectile: 200, asteroid: 100 },
            ProjectileHit { projectile: 202, asteroid: 101 },
        ];
        assert_eq!(settle_hits(&mut state, &hits), 2);

        assert_eq!(state.score, 200);
        let stages: Vec<u8> = state.asteroids.iter().map(|a| a.stage).collect();
        assert_eq!(stages, vec![2, 2]);
        let shots: Vec<EntityId> = state.projectiles.iter().map(|p| p.id).collect();
        assert_eq!(shots, vec![201]);
        assert_eq!(
            state.events.iter().filter(|e| matches!(e, GameEvent::AsteroidDestroyed { .. })).count(),
            2
        );
    }

    #[test]
    fn test_settle_nothing() {
        let mut state = GameState::new(3);
        let before = state.asteroids.len();
        assert_eq!(settle_hits(&mut state, &[]), 0);
        assert_eq!(state.asteroids.len(), before);
        assert_eq!(state.score, 0);
    }

    proptest! {
        #[test]
        fn prop_split_conserves_speed(direction in -180.0f32..180.0, speed in 0.5f32..8.0, stage in 2u8..=3) {
            let parent = rock(1, stage, direction, speed);
            let pre_dir = parent.direction();
            let [a, b] = split(&parent, [2, 3], 65.0, &SpriteSheet::default()).unwrap();
            for child in [&a, &b] {
                prop_assert_eq!(child.stage, stage - 1);
                prop_assert!((child.speed() - parent.speed()).abs() < 1e-3);
            }
            prop_assert!((angle_diff(a.direction(), pre_dir) + 65.0).abs() < 1e-2);
            prop_assert!((angle_diff(b.direction(), pre_dir) - 65.0).abs() < 1e-2);
        }
    }
}
