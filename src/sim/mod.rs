//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform concerns:
//! - Time enters only through `frame(now)` and timestamped inputs
//! - Seeded RNG only
//! - Stable iteration order (by slot id)

pub mod autopilot;
pub mod collision;
pub mod hazards;
pub mod input;
pub mod mirror;
pub mod projectile;
pub mod snapshot;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod timing;

pub use autopilot::autopilot_inputs;
pub use collision::{resolve_hits, within_tolerance};
pub use input::{HeldInput, InputEvent, Step, TimedInput, apply_inputs};
pub use mirror::{Mirror, first_crossing};
pub use snapshot::Snapshot;
pub use state::{
    Cannon, GameEvent, GameOverCause, GamePhase, GameState, Hazard, HazardClass, HazardOutcome,
    PadSide, Pads, Projectile, ScoreState, SessionStats,
};
pub use tick::frame;
pub use timing::{Cadence, FrameTicks, TimingGate};
