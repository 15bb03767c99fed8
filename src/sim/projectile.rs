//! Projectile system
//!
//! Lasers travel in straight legs from an origin. Each motion tick extends
//! the leg by a fixed step; crossing a mirror starts a new leg from the
//! crossing point on the mirror with the reflected heading.

use super::mirror::first_crossing;
use super::state::{GameEvent, GameState, Projectile};

/// Fire from the cannon's current muzzle and aim. Returns the new slot, or
/// `None` if the projectile arena is exhausted.
///
/// The minimum fire interval is enforced by the caller through the timing gate.
pub fn fire(state: &mut GameState) -> Option<usize> {
    let slot = state.projectiles.len();
    if slot >= state.config.capacity.projectiles {
        log::warn!(
            "Projectile capacity ({}) exhausted, shot dropped",
            state.config.capacity.projectiles
        );
        return None;
    }

    let origin = state.cannon.muzzle(&state.config.cannon);
    let angle = state.cannon.angle;
    state.projectiles.push(Projectile::new(slot, origin, angle));
    state.stats.shots += 1;
    state.events.push(GameEvent::Fired { slot });
    log::debug!("Fired #{slot} from {origin} at {angle} deg");
    Some(slot)
}

/// Advance active projectiles by one motion tick and resolve reflections
pub fn advance_projectiles(state: &mut GameState, moved: bool) {
    if !moved {
        return;
    }

    let GameState {
        config,
        projectiles,
        mirrors,
        stats,
        events,
        ..
    } = state;
    let step = config.projectile.step;

    for p in projectiles.iter_mut().filter(|p| p.active) {
        let start = p.position();
        p.distance += step;
        let end = p.position();

        if let Some((mirror_idx, crossing)) = first_crossing(mirrors, start, end, p.mirror) {
            let incoming = p.angle;
            p.angle = mirrors[mirror_idx].reflect_angle(incoming);
            p.origin = crossing;
            p.distance = 0.0;
            p.mirror = Some(mirror_idx);
            p.reflections += 1;
            stats.reflections += 1;
            events.push(GameEvent::Reflected {
                projectile: p.slot,
                mirror: mirror_idx,
                angle: p.angle,
            });
            log::debug!(
                "Projectile #{} reflected off mirror {mirror_idx}: {incoming} -> {} deg",
                p.slot,
                p.angle
            );
        }

        if !config.field.contains(p.position()) {
            p.active = false;
            events.push(GameEvent::ProjectileLeft { slot: p.slot });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle_diff_degrees;
    use crate::settings::{MirrorConfig, SimConfig};
    use glam::Vec2;
    use proptest::prelude::*;

    fn state_with_mirrors(mirrors: Vec<MirrorConfig>) -> GameState {
        let mut config = SimConfig::default();
        config.mirrors = mirrors;
        GameState::new(config, 3, 0.0).unwrap()
    }

    #[test]
    fn test_fire_from_muzzle() {
        let mut state = state_with_mirrors(vec![]);
        state.cannon.elevation = 1.0;
        state.cannon.angle = 20.0;
        let slot = fire(&mut state).unwrap();
        let p = &state.projectiles[slot];
        assert!((p.origin - Vec2::new(-7.6, 1.55)).length() < 1e-6);
        assert_eq!(p.angle, 20.0);
        assert_eq!(p.distance, 0.0);
        assert!(p.active);
    }

    #[test]
    fn test_straight_line_motion() {
        let mut state = state_with_mirrors(vec![]);
        state.cannon.angle = 30.0;
        fire(&mut state);
        for _ in 0..10 {
            advance_projectiles(&mut state, true);
        }
        advance_projectiles(&mut state, false);
        let p = &state.projectiles[0];
        assert!((p.distance - 2.0).abs() < 1e-4);
        let dir = Vec2::new(30f32.to_radians().cos(), 30f32.to_radians().sin());
        let expected = Vec2::new(-7.6, 0.55) + 2.0 * dir;
        assert!((p.position() - expected).length() < 1e-4);
    }

    #[test]
    fn test_reflection_resets_leg() {
        // Steep mirror through (-6.9, 0.55), across the muzzle line
        let mut state = state_with_mirrors(vec![MirrorConfig {
            center: Vec2::new(-6.9, 0.55),
            tilt_deg: 80.0,
            near_extent: 1.0,
            far_extent: 1.0,
        }]);
        fire(&mut state);

        let mut reflected_at = None;
        for tick in 0..10 {
            advance_projectiles(&mut state, true);
            if state.projectiles[0].reflections == 1 {
                reflected_at = Some(tick);
                break;
            }
        }
        assert!(reflected_at.is_some());
        let p = &state.projectiles[0];
        assert_eq!(p.distance, 0.0);
        assert!(angle_diff_degrees(p.angle, 2.0 * 80.0 - 0.0).abs() < 1e-3);
        assert!((p.origin.x - -6.9).abs() < 0.2);
    }

    #[test]
    fn test_classic_mirror_deflects_shot_downward() {
        // Aim at mirror 1 (pivot (-3, 2), 135 deg) from the muzzle
        let mut state = state_with_mirrors(SimConfig::default().mirrors);
        let target = Vec2::new(-3.2, 2.2);
        state.cannon.aim_at(target, &state.config.cannon);
        fire(&mut state);
        for _ in 0..200 {
            advance_projectiles(&mut state, true);
            if state.projectiles[0].reflections > 0 {
                break;
            }
        }
        let p = &state.projectiles[0];
        assert_eq!(p.reflections, 1);
        let hit_mirror_one = state
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::Reflected { mirror: 0, .. }));
        assert!(hit_mirror_one);
        let incoming = state.cannon.angle;
        assert!(angle_diff_degrees(p.angle, 270.0 - incoming).abs() < 1e-3);
    }

    #[test]
    fn test_reflection_does_not_bounce_in_place() {
        // Vertical mirror just ahead of the muzzle: the crossing lies early
        // in the first step, so the new leg starts on the mirror itself
        let mut state = state_with_mirrors(vec![MirrorConfig {
            center: Vec2::new(-7.55, 0.55),
            tilt_deg: 90.0,
            near_extent: 1.0,
            far_extent: 1.0,
        }]);
        fire(&mut state);
        for _ in 0..5 {
            advance_projectiles(&mut state, true);
        }
        let p = &state.projectiles[0];
        assert_eq!(p.reflections, 1);
        assert!(angle_diff_degrees(p.angle, 180.0).abs() < 1e-3);
        assert!(!p.active);
        assert!(p.position().x < -7.55);
        assert_eq!(state.stats.reflections, 1);
    }

    #[test]
    fn test_each_default_mirror_reflects_once() {
        let defaults = SimConfig::default();
        for (i, mirror) in defaults.mirrors.iter().enumerate() {
            let mut state = state_with_mirrors(defaults.mirrors.clone());
            state.cannon.aim_at(mirror.center, &state.config.cannon);
            let incoming = state.cannon.angle;
            let muzzle = state.cannon.muzzle(&state.config.cannon);
            fire(&mut state);

            let mut reflected = false;
            for _ in 0..200 {
                state.events.clear();
                advance_projectiles(&mut state, true);
                if state.projectiles[0].reflections > 0 {
                    reflected = true;
                    break;
                }
            }
            assert!(reflected, "mirror {i} never reached");
            assert!(
                state
                    .events
                    .iter()
                    .any(|e| matches!(e, GameEvent::Reflected { mirror, .. } if *mirror == i)),
                "mirror {i} was not the first one hit"
            );

            for _ in 0..5 {
                advance_projectiles(&mut state, true);
            }
            let p = &state.projectiles[0];
            let m = &state.mirrors[i];
            assert_eq!(p.reflections, 1, "mirror {i}");
            assert!(
                angle_diff_degrees(p.angle, 2.0 * mirror.tilt_deg - incoming).abs() < 1e-3,
                "mirror {i}: heading {}",
                p.angle
            );
            // Back on the side the shot came from
            assert_eq!(
                m.signed_distance(p.position()).signum(),
                m.signed_distance(muzzle).signum(),
                "mirror {i}"
            );
        }
    }

    #[test]
    fn test_leaves_field() {
        let mut state = state_with_mirrors(vec![]);
        fire(&mut state);
        for _ in 0..200 {
            advance_projectiles(&mut state, true);
        }
        let p = &state.projectiles[0];
        assert!(!p.active);
        let frozen = p.distance;
        advance_projectiles(&mut state, true);
        assert_eq!(state.projectiles[0].distance, frozen);
    }

    proptest! {
        #[test]
        fn prop_reflection_never_repeats_mirror(
            angle in -70.0f32..70.0,
            elevation in -2.5f32..2.9,
        ) {
            let mut state = state_with_mirrors(SimConfig::default().mirrors);
            state.cannon.elevation = elevation;
            state.cannon.angle = angle;
            fire(&mut state);

            let mut last = None;
            for _ in 0..400 {
                state.events.clear();
                advance_projectiles(&mut state, true);
                for e in &state.events {
                    if let GameEvent::Reflected { mirror, .. } = e {
                        prop_assert_ne!(Some(*mirror), last);
                        last = Some(*mirror);
                    }
                }
                if !state.projectiles[0].active {
                    break;
                }
            }
            prop_assert!(!state.projectiles[0].active);
        }
    }
}
