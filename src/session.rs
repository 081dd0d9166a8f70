//! Fixed-timestep driver around the simulation
//!
//! The session sits between the outside world and [`tick`]: it latches input
//! from the input collaborator, runs whole ticks off a frame clock, records
//! finished games on the leaderboard, and publishes a snapshot only once a
//! tick has fully settled.

use crate::consts::MAX_SUBSTEPS;
use crate::highscores::HighScores;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, WorldSnapshot, tick};

/// Press/release tracker turning key events into per-tick intent
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    current: TickInput,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// A command went down. Returns false for unknown command names.
    pub fn press(&mut self, command: &str) -> bool {
        self.current.set(command, true)
    }

    /// A command came back up. Edge commands stay latched until consumed.
    pub fn release(&mut self, command: &str) -> bool {
        match command {
            "fire" | "debug" | "quit" => true,
            _ => self.current.set(command, false),
        }
    }

    /// Intent for the next tick; one-shot commands are consumed
    pub fn take(&mut self) -> TickInput {
        let input = self.current;
        self.current.clear_edges();
        input
    }
}

/// One player's game session
#[derive(Debug)]
pub struct Session {
    state: GameState,
    input: InputLatch,
    high_scores: HighScores,
    /// Last fully settled tick; the only thing renderers see
    published: WorldSnapshot,
    accumulator: f32,
    dt: f32,
}

impl Session {
    pub fn new(seed: u64, settings: Settings) -> Self {
        let dt = settings.tick_dt();
        let state = GameState::with_settings(seed, settings);
        let published = WorldSnapshot::capture(&state, 0);
        log::info!("Session started with seed {}", seed);
        Self {
            state,
            input: InputLatch::new(),
            high_scores: HighScores::new(),
            published,
            accumulator: 0.0,
            dt,
        }
    }

    pub fn input(&mut self) -> &mut InputLatch {
        &mut self.input
    }

    /// Run as many whole ticks as the elapsed frame time allows
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        // A bad frame clock reading counts as no time passing
        let frame_dt = if frame_dt.is_finite() { frame_dt } else { 0.0 };
        self.accumulator += frame_dt.clamp(0.0, 0.25);

        let mut substeps = 0;
        while self.accumulator >= self.dt && substeps < MAX_SUBSTEPS && self.is_running() {
            self.step();
            self.accumulator -= self.dt;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            // Drop the backlog rather than spiral
            self.accumulator = self.accumulator.min(self.dt);
        }
        substeps
    }

    /// Run exactly one tick with the latched input
    pub fn step(&mut self) {
        if !self.is_running() {
            return;
        }
        let input = self.input.take();
        tick(&mut self.state, &input);

        for event in &self.state.events {
            if let GameEvent::GameOver { score, level } = *event {
                self.high_scores.add_score(score, level, self.state.time_ticks);
            }
        }

        self.published = WorldSnapshot::capture(&self.state, self.high_scores.best());
    }

    /// Read-only view of the last settled tick
    pub fn snapshot(&self) -> &WorldSnapshot {
        &self.published
    }

    /// Events from the last tick
    pub fn events(&self) -> &[GameEvent] {
        &self.state.events
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// False once quit has been processed
    pub fn is_running(&self) -> bool {
        !self.state.halted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;

    #[test]
    fn test_latch_edges_and_levels() {
        let mut latch = InputLatch::new();
        assert!(latch.press("thrust"));
        assert!(latch.press("fire"));
        assert!(!latch.press("hyperspace"));
        // Releasing fire before the tick still fires once
        assert!(latch.release("fire"));

        let first = latch.take();
        assert!(first.thrust && first.fire);

        let second = latch.take();
        assert!(second.thrust);
        assert!(!second.fire);

        latch.release("thrust");
        assert!(!latch.take().thrust);
    }

    #[test]
    fn test_advance_runs_whole_ticks() {
        let mut session = Session::new(3, Settings::default());
        assert_eq!(session.advance(1.0 / 60.0 + 1e-4), 1);
        assert_eq!(session.advance(0.5 / 60.0), 0);
        assert_eq!(session.snapshot().tick, 1);
        // Big stalls are capped at MAX_SUBSTEPS
        assert_eq!(session.advance(1.0), MAX_SUBSTEPS);
    }

    #[test]
    fn test_non_finite_frame_time_is_ignored() {
        let mut session = Session::new(3, Settings::default());
        assert_eq!(session.advance(f32::NAN), 0);
        assert_eq!(session.advance(f32::INFINITY), 0);
        assert_eq!(session.advance(1.0 / 60.0 + 1e-4), 1);
        assert_eq!(session.snapshot().tick, 1);
    }

    #[test]
    fn test_snapshot_published_after_tick() {
        let mut session = Session::new(8, Settings::default());
        session.state.asteroids[0].body.pos = glam::Vec2::new(60.0, 60.0);
        let before = session.snapshot().clone();
        session.input().press("fire");
        session.step();
        let after = session.snapshot();
        assert_eq!(before.tick, 0);
        assert_eq!(after.tick, 1);
        assert_eq!(after.count(|k| *k == crate::sim::EntityKind::Projectile), 1);
    }

    #[test]
    fn test_quit_stops_session() {
        let mut session = Session::new(8, Settings::default());
        session.input().press("quit");
        session.step();
        assert!(!session.is_running());
        assert_eq!(session.advance(1.0), 0);
    }

    #[test]
    fn test_game_over_records_high_score() {
        let mut session = Session::new(8, Settings::default());
        {
            let state = &mut session.state;
            state.lives = 1;
            state.score = 1200;
            state.ship.invincible_ticks = 0;
            let rock = state.asteroids[0].body.pos;
            state.ship.body.pos = rock;
            state.asteroids[0].body.vel = glam::Vec2::ZERO;
        }
        session.step();
        assert_eq!(session.state().phase, GamePhase::GameOver);
        assert_eq!(session.high_scores().best(), 1200);
        assert_eq!(session.snapshot().high_score, 1200);
    }
}
