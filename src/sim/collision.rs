//! Collision resolver
//!
//! Cross-checks every live hazard against every active projectile. A hit
//! consumes the hazard, lets the laser punch through (distance bonus) and
//! scores the shot: shooting a neutral hazard is good, shooting a penalty
//! hazard costs points.

use glam::Vec2;

use super::state::{GameEvent, GameState, HazardClass, HazardOutcome};

/// Per-axis proximity test
#[inline]
pub fn within_tolerance(a: Vec2, b: Vec2, tolerance: f32) -> bool {
    let d = (a - b).abs();
    d.x < tolerance && d.y < tolerance
}

/// Resolve all hazard/projectile hits for this frame.
///
/// A neutral hazard that reached a pad this frame has already ended the
/// session and can no longer be shot.
pub fn resolve_hits(state: &mut GameState) {
    let GameState {
        config,
        hazards,
        projectiles,
        score,
        stats,
        events,
        ..
    } = state;
    let tolerance = config.projectile.hit_tolerance;
    let on_pad: Vec<usize> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::NeutralReachedPad { slot, .. } => Some(*slot),
            _ => None,
        })
        .collect();

    for hazard in hazards
        .iter_mut()
        .filter(|h| !h.consumed && !on_pad.contains(&h.slot))
    {
        let hazard_pos = hazard.pos();
        let Some(p) = projectiles
            .iter_mut()
            .filter(|p| p.active)
            .find(|p| within_tolerance(p.position(), hazard_pos, tolerance))
        else {
            continue;
        };

        if !hazard.consume(HazardOutcome::Shot { projectile: p.slot }) {
            continue;
        }
        p.distance += config.projectile.pass_through_bonus;

        let delta = match hazard.class {
            HazardClass::Neutral => config.scoring.shot_neutral,
            _ => config.scoring.shot_penalty,
        };
        score.apply(delta);
        stats.hits += 1;
        events.push(GameEvent::Shot {
            slot: hazard.slot,
            projectile: p.slot,
            class: hazard.class,
        });
        log::debug!(
            "Projectile #{} hit {:?} hazard #{} ({delta:+})",
            p.slot,
            hazard.class,
            hazard.slot
        );
    }
}
