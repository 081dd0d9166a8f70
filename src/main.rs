//! Asteroids Sim entry point
//!
//! Headless driver: runs a session under a simple autopilot and logs what
//! happens. Usage: `asteroids-sim [settings.json] [seed]`

use std::time::{SystemTime, UNIX_EPOCH};

use asteroids_sim::sim::{Entity, GamePhase, GameState};
use asteroids_sim::{Session, Settings, direction_degrees};

/// Two minutes of play at 60 Hz
const DEMO_TICKS: u32 = 60 * 120;
/// Ticks between autopilot shots
const FIRE_INTERVAL: u32 = 12;
/// Wait this long on the game-over screen before restarting
const RESTART_DELAY: u32 = 120;

fn main() {
    env_logger::init();
    log::info!("Asteroids Sim (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => Settings::default(),
    };
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or_else(time_seed);

    let mut session = Session::new(seed, settings);
    let mut game_over_ticks = 0;
    let mut last_level = session.snapshot().level;

    for t in 0..DEMO_TICKS {
        autopilot(&mut session, t, &mut game_over_ticks);
        session.step();
        if !session.is_running() {
            break;
        }

        let snap = session.snapshot();
        if let Some(previous) = level_changed(&mut last_level, snap.level) {
            log::info!(
                "Level {} -> {}: score {}, lives {}, best {}",
                previous, snap.level, snap.score, snap.lives, snap.high_score
            );
        }
    }

    session.input().press("quit");
    session.step();

    let snap = session.snapshot();
    println!(
        "seed {}  ticks {}  level {}  score {}  lives {}  best {}",
        seed, snap.tick, snap.level, snap.score, snap.lives, snap.high_score
    );
    for (i, entry) in session.high_scores().entries.iter().enumerate() {
        println!("  #{:<2} {:>7}  level {}", i + 1, entry.score, entry.level);
    }
}

/// Track the HUD level; returns the previous level when it moved
fn level_changed(last_level: &mut u32, level: u32) -> Option<u32> {
    if level == *last_level {
        return None;
    }
    Some(std::mem::replace(last_level, level))
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Turn toward the nearest asteroid and shoot when roughly lined up
fn autopilot(session: &mut Session, t: u32, game_over_ticks: &mut u32) {
    let state: &GameState = session.state();

    if state.phase == GamePhase::GameOver {
        *game_over_ticks += 1;
        if *game_over_ticks >= RESTART_DELAY {
            *game_over_ticks = 0;
            session.input().press("fire");
        }
        return;
    }

    let ship = &state.ship;
    let target = state.asteroids.iter().min_by(|a, b| {
        a.pos()
            .distance_squared(ship.pos())
            .total_cmp(&b.pos().distance_squared(ship.pos()))
    });

    let Some(target) = target else {
        let input = session.input();
        input.release("left");
        input.release("right");
        input.release("thrust");
        return;
    };

    let wanted = direction_degrees(target.pos() - ship.pos());
    let error = (wanted - ship.body.angle + 540.0).rem_euclid(360.0) - 180.0;
    let far = target.pos().distance(ship.pos()) > 300.0;
    let slow = ship.speed() < 2.0;

    let input = session.input();
    if error.abs() < 4.0 {
        input.release("left");
        input.release("right");
    } else if error < 0.0 {
        input.press("left");
        input.release("right");
    } else {
        input.press("right");
        input.release("left");
    }

    if far && slow && error.abs() < 20.0 {
        input.press("thrust");
    } else {
        input.release("thrust");
    }

    if error.abs() < 10.0 && t % FIRE_INTERVAL == 0 {
        input.press("fire");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_change_detected_once() {
        let mut session = Session::new(4, Settings::default());
        let mut last_level = session.snapshot().level;
        session.step();
        assert_eq!(level_changed(&mut last_level, session.snapshot().level), None);

        assert_eq!(level_changed(&mut last_level, 2), Some(1));
        assert_eq!(level_changed(&mut last_level, 2), None);
        // Restart after game over drops back to level 1
        assert_eq!(level_changed(&mut last_level, 1), Some(2));
        assert_eq!(last_level, 1);
    }
}
