//! Input application
//!
//! The platform layer forwards raw events stamped with their time. This
//! module gates them by phase and by the debounce/fire cadences, then applies
//! them to the cannon, pads, camera and game phase.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::projectile::fire;
use super::state::{GamePhase, GameState, PadSide};
use crate::camera::PAN_STEP;

/// Direction of a discrete step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    Decrease,
    Increase,
}

impl Step {
    pub fn sign(self) -> i32 {
        match self {
            Step::Decrease => -1,
            Step::Increase => 1,
        }
    }

    pub fn signum(self) -> f32 {
        self.sign() as f32
    }
}

/// Input events understood by the simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Key press: move a pad one step (debounced)
    MovePad { pad: PadSide, step: Step },
    /// Key held/released: glide a pad every held-input tick
    HoldPad { pad: PadSide, step: Option<Step> },
    /// Mouse/touch drag: place a pad at world x
    DragPad { pad: PadSide, x: f32 },
    /// Rotate the cannon one step (debounced)
    Aim(Step),
    /// Raise/lower the cannon one step (debounced)
    Elevate(Step),
    /// Key held/released for cannon elevation
    HoldElevation(Option<Step>),
    /// Drag the cannon to a world y
    DragElevation { y: f32 },
    Fire,
    /// Aim at a world point, then fire
    FireAt { target: Vec2 },
    /// Manual speed adjustment (debounced)
    SpeedNudge(Step),
    TogglePause,
    Restart,
    /// Cosmetic
    Zoom(Step),
    /// Cosmetic, in pan steps
    Pan { dx: f32, dy: f32 },
}

impl InputEvent {
    /// Camera-only events never touch the simulation
    pub fn is_cosmetic(&self) -> bool {
        matches!(self, InputEvent::Zoom(_) | InputEvent::Pan { .. })
    }
}

/// An event with its timestamp (seconds, same clock as `frame`)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedInput {
    pub at: f64,
    pub event: InputEvent,
}

impl TimedInput {
    pub fn new(at: f64, event: InputEvent) -> Self {
        Self { at, event }
    }
}

/// Keys currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldInput {
    pub left_pad: Option<Step>,
    pub right_pad: Option<Step>,
    pub elevation: Option<Step>,
}

impl HeldInput {
    fn pad_mut(&mut self, pad: PadSide) -> &mut Option<Step> {
        match pad {
            PadSide::Left => &mut self.left_pad,
            PadSide::Right => &mut self.right_pad,
        }
    }
}

/// Apply this frame's events, then the held-key glide if its cadence fired
pub fn apply_inputs(state: &mut GameState, inputs: &[TimedInput], held_tick: bool) {
    for input in inputs {
        apply_event(state, input);
    }
    if held_tick && state.phase == GamePhase::Playing {
        apply_held(state);
    }
}

fn apply_event(state: &mut GameState, input: &TimedInput) {
    let TimedInput { at, event } = *input;

    if event.is_cosmetic() {
        match event {
            InputEvent::Zoom(step) => state.camera.zoom_by(step.sign()),
            InputEvent::Pan { dx, dy } => state.camera.pan_by(Vec2::new(dx, dy) * PAN_STEP),
            _ => {}
        }
        return;
    }

    match state.phase {
        GamePhase::GameOver => {
            if event == InputEvent::Restart {
                let now = at.max(state.now);
                state.restart(now);
            }
            return;
        }
        GamePhase::Paused => {
            if event == InputEvent::TogglePause {
                state.toggle_pause();
            }
            return;
        }
        GamePhase::Playing => {}
    }

    let pads_cfg = &state.config.pads;
    let cannon_cfg = &state.config.cannon;
    match event {
        InputEvent::MovePad { pad, step } => {
            if state.timing.debounce(at) {
                state.pads.nudge(pad, step.signum() * pads_cfg.key_step, pads_cfg);
            }
        }
        InputEvent::HoldPad { pad, step } => *state.held.pad_mut(pad) = step,
        InputEvent::DragPad { pad, x } => state.pads.set_x(pad, x, pads_cfg),
        InputEvent::Aim(step) => {
            if state.timing.debounce(at) {
                state
                    .cannon
                    .rotate(step.signum() * cannon_cfg.aim_step_deg, cannon_cfg);
            }
        }
        InputEvent::Elevate(step) => {
            if state.timing.debounce(at) {
                state
                    .cannon
                    .elevate(step.signum() * cannon_cfg.elevation_step, cannon_cfg);
            }
        }
        InputEvent::HoldElevation(step) => state.held.elevation = step,
        InputEvent::DragElevation { y } => {
            state
                .cannon
                .set_elevation(y - cannon_cfg.muzzle_y, cannon_cfg);
        }
        InputEvent::Fire => {
            if state.timing.allow_fire(at) {
                fire(state);
            }
        }
        InputEvent::FireAt { target } => {
            if state.timing.allow_fire(at) {
                state.cannon.aim_at(target, cannon_cfg);
                fire(state);
            }
        }
        InputEvent::SpeedNudge(step) => {
            if state.timing.debounce(at) {
                state.score.nudge_speed(step.sign(), &state.config.scoring);
            }
        }
        InputEvent::TogglePause => state.toggle_pause(),
        // Restart only leaves GameOver
        InputEvent::Restart => {}
        InputEvent::Zoom(_) | InputEvent::Pan { .. } => {}
    }
}

fn apply_held(state: &mut GameState) {
    let held = state.held;
    let pads_cfg = &state.config.pads;
    for pad in PadSide::BOTH {
        let step = match pad {
            PadSide::Left => held.left_pad,
            PadSide::Right => held.right_pad,
        };
        if let Some(step) = step {
            state.pads.nudge(pad, step.signum() * pads_cfg.held_step, pads_cfg);
        }
    }
    if let Some(step) = held.elevation {
        let cannon_cfg = &state.config.cannon;
        state
            .cannon
            .elevate(step.signum() * cannon_cfg.held_step, cannon_cfg);
    }
}
