//! Demo controller
//!
//! Plays the game by producing the same input events a player would: it
//! shoots the lowest neutral hazard, slides each pad under the penalty
//! hazards it collects and steers pads away from neutral hazards.

use glam::Vec2;

use super::input::{InputEvent, TimedInput};
use super::state::{GamePhase, GameState, Hazard, HazardClass, PadSide};

/// Neutral hazards below this height are considered threatening
const THREAT_HEIGHT: f32 = 0.0;
/// How far a pad steps aside from a threatening neutral hazard
const DODGE_DISTANCE: f32 = 1.0;

/// Inputs the demo player sends for the frame at `now`
pub fn autopilot_inputs(state: &GameState, now: f64) -> Vec<TimedInput> {
    let mut inputs = Vec::new();
    if state.phase != GamePhase::Playing {
        return inputs;
    }

    if state.timing.fire.ready(now) {
        if let Some(target) = shot_target(state) {
            inputs.push(TimedInput::new(now, InputEvent::FireAt { target }));
        }
    }

    for pad in PadSide::BOTH {
        if let Some(x) = pad_target(state, pad) {
            let current = state.pad_x(pad);
            if (current - x).abs() > 0.01 {
                inputs.push(TimedInput::new(now, InputEvent::DragPad { pad, x }));
            }
        }
    }
    inputs
}

/// Where to aim to meet the lowest neutral hazard, leading its fall
fn shot_target(state: &GameState) -> Option<Vec2> {
    let cfg = &state.config;
    let muzzle = state.cannon.muzzle(&cfg.cannon);
    let fall = cfg.field.fall_rate * state.score.speed;

    let hazard = state
        .live_hazards()
        .filter(|h| h.class == HazardClass::Neutral && h.y > cfg.field.capture_high)
        .min_by(|a, b| a.y.total_cmp(&b.y))?;

    // Both move once per motion tick: lead by the hazard's fall over the
    // laser's flight time
    let flight_ticks = (hazard.pos() - muzzle).length() / cfg.projectile.step;
    let target = Vec2::new(hazard.x, hazard.y - fall * flight_ticks);

    let d = target - muzzle;
    let angle = d.y.atan2(d.x).to_degrees();
    (angle.abs() <= cfg.cannon.aim_limit_deg).then_some(target)
}

/// Where a pad should go, if anywhere
fn pad_target(state: &GameState, pad: PadSide) -> Option<f32> {
    let cfg = &state.config;
    let limits = pad.limits(&cfg.pads);
    let reachable = |h: &&Hazard| h.x >= limits.min_x() && h.x <= limits.max_x();
    let current = state.pad_x(pad);

    let threat = state
        .live_hazards()
        .filter(|h| h.class == HazardClass::Neutral && h.y < THREAT_HEIGHT)
        .filter(|h| (h.x - current).abs() < cfg.field.capture_tolerance * 2.0)
        .min_by(|a, b| a.y.total_cmp(&b.y));
    if let Some(threat) = threat {
        let away = if current >= threat.x { 1.0 } else { -1.0 };
        let dodge = (threat.x + away * DODGE_DISTANCE).clamp(limits.min_x(), limits.max_x());
        // Pinned against a limit: dodge the other way
        if (dodge - threat.x).abs() < cfg.field.capture_tolerance {
            return Some(threat.x - away * DODGE_DISTANCE);
        }
        return Some(dodge);
    }

    state
        .live_hazards()
        .filter(|h| h.class == pad.collects() && h.y > cfg.field.capture_low)
        .filter(reachable)
        .min_by(|a, b| a.y.total_cmp(&b.y))
        .map(|h| h.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SimConfig;
    use crate::sim::spawner::spawn_hazard_at;
    use crate::sim::tick::frame;

    fn state() -> GameState {
        let mut config = SimConfig::default();
        config.mirrors.clear();
        GameState::new(config, 8, 0.0).unwrap()
    }

    #[test]
    fn test_aims_at_neutral() {
        let mut state = state();
        spawn_hazard_at(&mut state, 0.0, 2.0, HazardClass::Neutral).unwrap();
        let inputs = autopilot_inputs(&state, 0.0);
        let target = inputs.iter().find_map(|i| match i.event {
            InputEvent::FireAt { target } => Some(target),
            _ => None,
        });
        let target = target.unwrap();
        assert_eq!(target.x, 0.0);
        assert!(target.y < 2.0);
    }

    #[test]
    fn test_slides_pad_under_penalty() {
        let mut state = state();
        spawn_hazard_at(&mut state, -5.0, 1.0, HazardClass::PenaltyA).unwrap();
        let inputs = autopilot_inputs(&state, 0.0);
        assert!(inputs.contains(&TimedInput::new(
            0.0,
            InputEvent::DragPad {
                pad: PadSide::Left,
                x: -5.0
            }
        )));
        // Penalty-A is not the right pad's business
        assert!(!inputs.iter().any(|i| matches!(
            i.event,
            InputEvent::DragPad {
                pad: PadSide::Right,
                ..
            }
        )));
    }

    #[test]
    fn test_dodges_neutral() {
        let mut state = state();
        let x = state.pad_x(PadSide::Right);
        spawn_hazard_at(&mut state, x, -2.0, HazardClass::Neutral).unwrap();
        let inputs = autopilot_inputs(&state, 0.0);
        let dodge = inputs.iter().find_map(|i| match i.event {
            InputEvent::DragPad {
                pad: PadSide::Right,
                x,
            } => Some(x),
            _ => None,
        });
        assert!((dodge.unwrap() - x).abs() >= 0.35);
    }

    #[test]
    fn test_idle_outside_playing() {
        let mut state = state();
        spawn_hazard_at(&mut state, 0.0, 2.0, HazardClass::Neutral).unwrap();
        state.toggle_pause();
        assert!(autopilot_inputs(&state, 0.0).is_empty());
    }

    #[test]
    fn test_autopilot_session_runs() {
        let mut state = GameState::new(SimConfig::default(), 21, 0.0).unwrap();
        for i in 1..=3000 {
            let now = i as f64 / 60.0;
            let inputs = autopilot_inputs(&state, now);
            frame(&mut state, now, &inputs);
        }
        assert!(state.stats.shots > 0);
    }
}
