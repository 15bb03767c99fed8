//! Read-only per-frame view for the renderer and the headless runner

use glam::Vec2;
use serde::Serialize;

use super::state::{
    GameEvent, GameOverCause, GamePhase, GameState, HazardClass, PadSide, SessionStats,
};

#[derive(Debug, Clone, Serialize)]
pub struct HazardView {
    pub slot: usize,
    pub x: f32,
    pub y: f32,
    pub class: HazardClass,
    pub visible: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectileView {
    pub slot: usize,
    pub x: f32,
    pub y: f32,
    pub angle: f32,
    pub active: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CannonView {
    pub offset: f32,
    pub angle: f32,
    pub muzzle: Vec2,
}

#[derive(Debug, Clone, Serialize)]
pub struct PadsView {
    pub left_x: f32,
    pub right_x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ViewRect {
    pub min: Vec2,
    pub max: Vec2,
    pub zoom: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub time: f64,
    pub phase: GamePhase,
    pub game_over_cause: Option<GameOverCause>,
    /// Display score (never negative)
    pub score: i64,
    pub level: u32,
    pub speed: f32,
    pub misses_a: u32,
    pub misses_b: u32,
    pub hazards: Vec<HazardView>,
    pub projectiles: Vec<ProjectileView>,
    pub cannon: CannonView,
    pub pads: PadsView,
    pub view: ViewRect,
    pub stats: SessionStats,
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Capture what a renderer needs to draw this frame.
    ///
    /// Consumed hazards and inactive projectiles stay in the lists with
    /// `visible`/`active` cleared, so slot ids line up with the state.
    pub fn snapshot(&self) -> Snapshot {
        let hazards = self
            .hazards
            .iter()
            .map(|h| HazardView {
                slot: h.slot,
                x: h.x,
                y: h.y,
                class: h.class,
                visible: !h.consumed,
            })
            .collect();
        let projectiles = self
            .projectiles
            .iter()
            .map(|p| {
                let pos = p.position();
                ProjectileView {
                    slot: p.slot,
                    x: pos.x,
                    y: pos.y,
                    angle: p.angle,
                    active: p.active,
                }
            })
            .collect();
        let (min, max) = self.camera.view_rect();

        Snapshot {
            time: self.now,
            phase: self.phase,
            game_over_cause: self.game_over_cause,
            score: self.score.display_score(),
            level: self.score.level,
            speed: self.score.speed,
            misses_a: self.score.misses_a,
            misses_b: self.score.misses_b,
            hazards,
            projectiles,
            cannon: CannonView {
                offset: self.cannon.elevation,
                angle: self.cannon.angle,
                muzzle: self.cannon.muzzle(&self.config.cannon),
            },
            pads: PadsView {
                left_x: self.pad_x(PadSide::Left),
                right_x: self.pad_x(PadSide::Right),
                y: self.config.pads.y,
            },
            view: ViewRect {
                min,
                max,
                zoom: self.camera.zoom,
            },
            stats: self.stats.clone(),
            events: self.events.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SimConfig;
    use crate::sim::projectile::fire;
    use crate::sim::spawner::spawn_hazard_at;
    use crate::sim::state::HazardOutcome;

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = GameState::new(SimConfig::default(), 4, 0.0).unwrap();
        spawn_hazard_at(&mut state, 1.0, 2.0, HazardClass::PenaltyB).unwrap();
        spawn_hazard_at(&mut state, 2.0, 2.0, HazardClass::Neutral).unwrap();
        state.hazards[1].consume(HazardOutcome::Missed);
        fire(&mut state).unwrap();
        state.score.apply(-3);

        let snap = state.snapshot();
        assert_eq!(snap.hazards.len(), 2);
        assert!(snap.hazards[0].visible);
        assert!(!snap.hazards[1].visible);
        assert_eq!(snap.projectiles.len(), 1);
        assert!((snap.projectiles[0].x - -7.6).abs() < 1e-6);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.phase, GamePhase::Playing);
        assert!((snap.pads.left_x - -3.15).abs() < 1e-6);
        assert_eq!(snap.view.min, Vec2::new(-8.0, -4.0));
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(SimConfig::default(), 4, 0.0).unwrap();
        let json = serde_json::to_value(state.snapshot()).unwrap();
        assert_eq!(json["phase"], "Playing");
        assert_eq!(json["level"], 0);
    }
}
