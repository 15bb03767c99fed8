//! Hazard spawner
//!
//! Activates the next hazard slot on each spawn tick. Slots are handed out
//! in order and never reused within a session.

use rand::Rng;

use super::state::{GameEvent, GameState, Hazard, HazardClass};

/// Spawn one hazard on a random lane. Returns its slot, or `None` if the
/// hazard arena is exhausted.
pub fn spawn_hazard(state: &mut GameState) -> Option<usize> {
    let (lane_min, lane_max) = (state.config.field.lane_min, state.config.field.lane_max);
    let lane = state.rng().random_range(lane_min..=lane_max);
    let class = HazardClass::roll(lane, state.rng());
    let y = state.config.field.spawn_height;
    spawn_hazard_at(state, lane as f32, y, class)
}

/// Spawn a specific hazard. Used by the spawner and for scripted setups.
pub fn spawn_hazard_at(
    state: &mut GameState,
    x: f32,
    y: f32,
    class: HazardClass,
) -> Option<usize> {
    let slot = state.hazards.len();
    if slot >= state.config.capacity.hazards {
        log::warn!(
            "Hazard capacity ({}) exhausted, spawn dropped",
            state.config.capacity.hazards
        );
        return None;
    }

    state.hazards.push(Hazard::new(slot, x, y, class));
    state.stats.spawned += 1;
    state.events.push(GameEvent::Spawned { slot, class });
    log::debug!("Spawned {class:?} hazard #{slot} at x={x}");
    Some(slot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SimConfig;

    #[test]
    fn test_spawn_assigns_lane_and_height() {
        let mut state = GameState::new(SimConfig::default(), 1, 0.0).unwrap();
        for i in 0..50 {
            let slot = spawn_hazard(&mut state).unwrap();
            assert_eq!(slot, i);
            let h = &state.hazards[slot];
            assert_eq!(h.y, 3.5);
            assert!(h.x >= -4.0 && h.x <= 7.0);
            assert_eq!(h.x.fract(), 0.0);
            if h.x <= 0.0 {
                assert_ne!(h.class, HazardClass::PenaltyB);
            }
        }
        assert_eq!(state.stats.spawned, 50);
    }

    #[test]
    fn test_spawn_is_seeded() {
        let mut a = GameState::new(SimConfig::default(), 99, 0.0).unwrap();
        let mut b = GameState::new(SimConfig::default(), 99, 0.0).unwrap();
        for _ in 0..20 {
            spawn_hazard(&mut a);
            spawn_hazard(&mut b);
        }
        for (ha, hb) in a.hazards.iter().zip(&b.hazards) {
            assert_eq!(ha.x, hb.x);
            assert_eq!(ha.class, hb.class);
        }
    }

    #[test]
    fn test_exhausted_capacity_is_noop() {
        let mut config = SimConfig::default();
        config.capacity.hazards = 2;
        config.capacity.max_session_secs = 0.5;
        let mut state = GameState::new(config, 1, 0.0).unwrap();
        assert!(spawn_hazard(&mut state).is_some());
        assert!(spawn_hazard(&mut state).is_some());
        assert!(spawn_hazard(&mut state).is_none());
        assert_eq!(state.hazards.len(), 2);
    }
}
