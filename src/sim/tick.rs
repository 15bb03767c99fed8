//! Frame loop
//!
//! Runs one frame of the simulation. Subsystems always run in the same order:
//! timing, input, spawn, hazards, projectiles, collisions, progression,
//! terminal conditions.

use super::collision::resolve_hits;
use super::hazards::advance_hazards;
use super::input::{TimedInput, apply_inputs};
use super::projectile::advance_projectiles;
use super::spawner::spawn_hazard;
use super::state::{GameEvent, GameOverCause, GamePhase, GameState};

/// Advance the game state by one frame at timestamp `now` (seconds)
pub fn frame(state: &mut GameState, now: f64, inputs: &[TimedInput]) {
    state.events.clear();
    state.stats.frames += 1;
    state.now = state.now.max(now);
    let now = state.now;

    let ticks = state.timing.advance(now, state.phase, state.score.speed);

    apply_inputs(state, inputs, ticks.held_input);

    // Paused and GameOver freeze everything but input
    if state.phase != GamePhase::Playing {
        return;
    }

    if ticks.spawn {
        spawn_hazard(state);
    }
    advance_hazards(state, ticks.hazard_motion);
    advance_projectiles(state, ticks.projectile_motion);
    resolve_hits(state);

    if let Some(level) = state.score.refresh(&state.config.scoring) {
        state.events.push(GameEvent::LevelUp { level });
        log::info!("Level {level} (speed x{:.2})", state.score.speed);
    }

    evaluate_terminal(state);
}

/// End the game if a neutral hazard reached a pad or a miss counter hit the limit
fn evaluate_terminal(state: &mut GameState) {
    let neutral = state.events.iter().find_map(|e| match *e {
        GameEvent::NeutralReachedPad { slot, pad } => {
            Some(GameOverCause::NeutralCaptured { slot, pad })
        }
        _ => None,
    });
    if let Some(cause) = neutral {
        state.end_game(cause);
        return;
    }

    if let Some(class) = state.score.miss_limit_reached(state.config.scoring.miss_limit) {
        state.end_game(GameOverCause::MissLimit { class });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SimConfig;
    use crate::sim::input::InputEvent;
    use crate::sim::spawner::spawn_hazard_at;
    use crate::sim::state::{HazardClass, PadSide};

    const DT: f64 = 0.005;

    fn state(seed: u64) -> GameState {
        GameState::new(SimConfig::default(), seed, 0.0).unwrap()
    }

    #[test]
    fn test_frame_spawns_on_cadence() {
        let mut state = state(12345);
        for i in 1..=400 {
            frame(&mut state, i as f64 * DT, &[]);
        }
        // 2 s elapsed at a 1.6 s cadence
        assert_eq!(state.stats.spawned, 1);
        assert_eq!(state.stats.frames, 400);
    }

    #[test]
    fn test_frame_pause() {
        let mut state = state(12345);
        let slot = spawn_hazard_at(&mut state, 6.0, 3.0, HazardClass::Neutral).unwrap();

        frame(&mut state, DT, &[TimedInput::new(DT, InputEvent::TogglePause)]);
        assert_eq!(state.phase, GamePhase::Paused);
        let frozen = state.hazards[slot].y;

        for i in 2..100 {
            frame(&mut state, i as f64 * DT, &[]);
        }
        assert_eq!(state.hazards[slot].y, frozen);

        let t = 100.0 * DT;
        frame(&mut state, t, &[TimedInput::new(t, InputEvent::TogglePause)]);
        assert_eq!(state.phase, GamePhase::Playing);
        frame(&mut state, t + 2.0 * DT, &[]);
        assert!((state.hazards[slot].y - (frozen - 0.02)).abs() < 1e-5);
    }

    #[test]
    fn test_neutral_on_pad_ends_game() {
        let mut state = state(1);
        let x = state.pad_x(PadSide::Left);
        spawn_hazard_at(&mut state, x, -3.0, HazardClass::Neutral).unwrap();
        frame(&mut state, DT, &[]);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(matches!(
            state.game_over_cause,
            Some(GameOverCause::NeutralCaptured { pad: PadSide::Left, .. })
        ));

        // Frozen from here on
        let frames = state.stats.frames;
        frame(&mut state, 2.0 * DT, &[TimedInput::new(2.0 * DT, InputEvent::Fire)]);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.stats.frames, frames + 1);
    }

    #[test]
    fn test_level_up_event() {
        let mut state = state(1);
        state.score.apply(100);
        frame(&mut state, DT, &[]);
        assert!(state.events.contains(&GameEvent::LevelUp { level: 1 }));
        assert!((state.score.speed - 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_clock_never_runs_backwards() {
        let mut state = state(1);
        frame(&mut state, 1.0, &[]);
        frame(&mut state, 0.5, &[]);
        assert_eq!(state.now, 1.0);
    }

    #[test]
    fn test_determinism() {
        let mut state1 = state(99999);
        let mut state2 = state(99999);
        let inputs = [TimedInput::new(0.3, InputEvent::Fire)];

        for i in 1..=2000 {
            let t = i as f64 * DT;
            let frame_inputs: &[TimedInput] = if i == 60 { &inputs } else { &[] };
            frame(&mut state1, t, frame_inputs);
            frame(&mut state2, t, frame_inputs);
        }

        assert_eq!(state1.hazards.len(), state2.hazards.len());
        for (a, b) in state1.hazards.iter().zip(&state2.hazards) {
            assert_eq!(a.x, b.x);
            assert_eq!(a.y, b.y);
            assert_eq!(a.class, b.class);
        }
        assert_eq!(state1.score.score, state2.score.score);
    }
}
