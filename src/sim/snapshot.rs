//! Read-only world views handed to the renderer between ticks

use glam::Vec2;
use serde::Serialize;

use super::entity::{Entity, EntityId, EntityKind};
use super::state::{GamePhase, GameState};

/// What a renderer needs to draw one entity (and its debug hitbox)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntitySnapshot {
    pub id: EntityId,
    pub kind: EntityKind,
    pub pos: Vec2,
    /// Orientation in degrees
    pub angle: f32,
    pub radius: f32,
    /// False while the ship blinks out or after the last life is lost
    pub visible: bool,
}

impl EntitySnapshot {
    fn of(entity: &impl Entity, visible: bool) -> Self {
        let body = entity.body();
        Self {
            id: entity.id(),
            kind: entity.kind(),
            pos: body.pos,
            angle: body.angle,
            radius: body.radius,
            visible,
        }
    }
}

/// A fully settled tick, frozen for drawing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub level: u32,
    pub score: u64,
    pub high_score: u64,
    pub lives: u8,
    pub pause_ticks: u32,
    pub debug: bool,
    /// Asteroids, then projectiles, then the ship (draw order)
    pub entities: Vec<EntitySnapshot>,
}

impl WorldSnapshot {
    pub fn capture(state: &GameState, high_score: u64) -> Self {
        let mut entities = Vec::with_capacity(state.asteroids.len() + state.projectiles.len() + 1);
        entities.extend(state.asteroids.iter().map(|a| EntitySnapshot::of(a, true)));
        entities.extend(state.projectiles.iter().map(|p| EntitySnapshot::of(p, true)));
        entities.push(EntitySnapshot::of(
            &state.ship,
            state.ship_active() && state.ship.blink_visible(),
        ));

        Self {
            tick: state.time_ticks,
            phase: state.phase,
            level: state.level,
            score: state.score,
            high_score: high_score.max(state.score),
            lives: state.lives,
            pause_ticks: state.pause_ticks,
            debug: state.debug,
            entities,
        }
    }

    pub fn ship(&self) -> Option<&EntitySnapshot> {
        self.entities.iter().find(|e| e.kind == EntityKind::Ship)
    }

    pub fn count(&self, matches: impl Fn(&EntityKind) -> bool) -> usize {
        self.entities.iter().filter(|e| matches(&e.kind)).count()
    }
}
