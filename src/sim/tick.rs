//! Fixed timestep simulation tick
//!
//! Core game loop that advances the world by one frame. The step order is
//! observable (who dies, what splits, when the ship respawns) and must not be
//! rearranged:
//!
//! 1. quit / debug commands
//! 2. level-clear freeze
//! 3. fire (or restart after game over)
//! 4. ship controls and motion
//! 5. asteroid and projectile motion, projectile aging
//! 6. prune expired projectiles
//! 7. projectile hits and asteroid settlement
//! 8. ship collision
//! 9. level-clear check

use super::collision::{detect_projectile_hits, detect_ship_hit};
use super::entity::Projectile;
use super::lifecycle::{settle_hits, spawn_level};
use super::state::{GameEvent, GamePhase, GameState};

/// Player intent for a single tick.
///
/// `fire`, `debug` and `quit` are one-shot; `left`, `right` and `thrust`
/// reflect what is currently held.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub thrust: bool,
    pub fire: bool,
    pub debug: bool,
    pub quit: bool,
}

impl TickInput {
    /// Command names understood by [`TickInput::set`]
    pub const COMMANDS: [&'static str; 6] = ["left", "right", "thrust", "fire", "debug", "quit"];

    /// Build from a command map such as `{"fire": 1, "left": 0}`. Unknown
    /// names are ignored.
    pub fn from_commands<'a>(commands: impl IntoIterator<Item = (&'a str, u8)>) -> Self {
        let mut input = Self::default();
        for (name, value) in commands {
            input.set(name, value != 0);
        }
        input
    }

    /// Set a command by name; returns false if the name is unknown
    pub fn set(&mut self, name: &str, on: bool) -> bool {
        let slot = match name {
            "left" => &mut self.left,
            "right" => &mut self.right,
            "thrust" => &mut self.thrust,
            "fire" => &mut self.fire,
            "debug" => &mut self.debug,
            "quit" => &mut self.quit,
            _ => return false,
        };
        *slot = on;
        true
    }

    /// -1 turning left, 1 turning right, 0 for neither or both
    pub fn turn(&self) -> i8 {
        i8::from(self.right) - i8::from(self.left)
    }

    /// Drop the one-shot commands after they've been consumed
    pub fn clear_edges(&mut self) {
        self.fire = false;
        self.debug = false;
        self.quit = false;
    }
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();
    if state.halted {
        return;
    }

    if input.quit {
        state.halted = true;
        log::info!("Quit requested at tick {}", state.time_ticks);
        return;
    }
    if input.debug {
        state.debug = !state.debug;
        log::debug!("Debug overlay {}", if state.debug { "on" } else { "off" });
    }

    state.time_ticks += 1;

    // Full freeze between levels: only the countdown moves
    if state.phase == GamePhase::LevelClearPause {
        state.pause_ticks = state.pause_ticks.saturating_sub(1);
        if state.pause_ticks == 0 {
            state.phase = GamePhase::Playing;
            state.events.push(GameEvent::LevelStarted { level: state.level });
            log::info!("Level {} started", state.level);
        }
        return;
    }

    if input.fire {
        if state.ship_active() {
            fire(state);
        } else {
            state.reset_session();
            return;
        }
    }

    let bounds = state.bounds();

    if state.ship_active() {
        state.ship.steer(input.turn(), input.thrust, &bounds);
    }

    for asteroid in &mut state.asteroids {
        asteroid.body.integrate(&bounds);
    }
    for shot in &mut state.projectiles {
        shot.update(&bounds);
    }

    state.projectiles.retain(|p| !p.dead);

    let hits = detect_projectile_hits(&state.projectiles, &state.asteroids);
    settle_hits(state, &hits);

    resolve_ship_collision(state);
    check_level_clear(state);
}

/// Launch a shot from the ship's nose
fn fire(state: &mut GameState) {
    let id = state.next_entity_id();
    let settings = &state.settings;
    let shot = Projectile::from_ship(
        id,
        &state.ship,
        settings.muzzle_speed,
        settings.shot_lifetime_ticks,
        &settings.sprites.shot,
    );
    state.projectiles.push(shot);
    state.events.push(GameEvent::ShotFired { id });
}

/// An unshielded ship touching an asteroid costs a life. The asteroid is
/// left alone.
fn resolve_ship_collision(state: &mut GameState) {
    if !state.ship_active() || state.ship.is_invincible() {
        return;
    }
    let Some(asteroid) = detect_ship_hit(&state.ship, &state.asteroids) else {
        return;
    };

    state.lives -= 1;
    state.events.push(GameEvent::ShipHit {
        asteroid,
        lives_left: state.lives,
    });
    log::debug!("Ship hit by asteroid {}, {} lives left", asteroid, state.lives);

    if state.lives > 0 {
        state.reset_ship();
    } else {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver {
            score: state.score,
            level: state.level,
        });
        log::info!("Game over: score {} on level {}", state.score, state.level);
    }
}

/// Last asteroid gone: reset the ship, set up the next level and freeze
fn check_level_clear(state: &mut GameState) {
    if state.phase != GamePhase::Playing || !state.asteroids.is_empty() {
        return;
    }

    state.reset_ship();
    state.level += 1;
    state.projectiles.clear();
    spawn_level(state);
    state.pause_ticks = state.settings.level_pause_ticks;
    state.phase = GamePhase::LevelClearPause;
    state.events.push(GameEvent::LevelCleared {
        next_level: state.level,
    });
    log::info!("Level cleared, level {} in {} ticks", state.level, state.pause_ticks);
}
