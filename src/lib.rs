//! Laser Gallery - a mirror-reflection arcade shooting gallery
//!
//! Core modules:
//! - `sim`: Simulation (timing gate, hazards, projectiles, mirrors, scoring, game state)
//! - `settings`: Data-driven tuning constants
//! - `camera`: Cosmetic view state (zoom/pan), never affects gameplay
//! - `error`: Configuration errors surfaced at session start

pub mod camera;
pub mod error;
pub mod settings;
pub mod sim;

pub use camera::Camera;
pub use error::SimError;
pub use settings::SimConfig;

use glam::Vec2;

/// Game configuration constants (defaults for `SimConfig`)
pub mod consts {
    /// World extents: the visible field is [-8, 8] x [-4, 4]
    pub const WORLD_HALF_WIDTH: f32 = 8.0;
    pub const WORLD_HALF_HEIGHT: f32 = 4.0;

    /// Motion cadences (seconds)
    pub const HAZARD_MOTION_INTERVAL: f64 = 0.005;
    pub const PROJECTILE_MOTION_INTERVAL: f64 = 0.005;
    pub const HELD_INPUT_INTERVAL: f64 = 0.005;
    /// Base spawn interval, divided by the speed multiplier
    pub const SPAWN_INTERVAL: f64 = 1.6;
    /// Debounce for discrete key steps (pads, aim, elevation)
    pub const INPUT_DEBOUNCE: f64 = 0.05;
    /// Minimum time between two shots
    pub const FIRE_INTERVAL: f64 = 0.5;

    /// Hazards
    pub const SPAWN_HEIGHT: f32 = 3.5;
    pub const LANE_MIN: i32 = -4;
    pub const LANE_MAX: i32 = 7;
    pub const HAZARD_FALL_RATE: f32 = 0.02;
    pub const CAPTURE_BAND_LOW: f32 = -3.5;
    pub const CAPTURE_BAND_HIGH: f32 = -2.8;
    pub const CAPTURE_TOLERANCE: f32 = 0.35;
    pub const LOWER_BOUNDARY: f32 = -4.5;

    /// Pads sit at y = -3.3; offsets are relative to their home x
    pub const PAD_Y: f32 = -3.3;
    pub const LEFT_PAD_HOME: f32 = -3.15;
    pub const RIGHT_PAD_HOME: f32 = 2.85;
    pub const PAD_KEY_STEP: f32 = 0.2;
    pub const HELD_STEP: f32 = 0.05;

    /// Cannon muzzle before elevation is applied
    pub const MUZZLE_X: f32 = -7.6;
    pub const MUZZLE_Y: f32 = 0.55;
    pub const AIM_LIMIT_DEG: f32 = 70.0;
    pub const AIM_STEP_DEG: f32 = 10.0;
    pub const ELEVATION_STEP: f32 = 0.2;

    /// Projectiles
    pub const PROJECTILE_STEP: f32 = 0.2;
    pub const HIT_TOLERANCE: f32 = 0.2;
    pub const PASS_THROUGH_BONUS: f32 = 16.0;

    /// Scoring
    pub const CAPTURE_POINTS: i64 = 5;
    pub const SHOT_NEUTRAL_POINTS: i64 = 10;
    pub const SHOT_PENALTY_POINTS: i64 = -3;
    pub const MISS_PENALTY_POINTS: i64 = -3;
    pub const MISS_LIMIT: u32 = 5;
    pub const POINTS_PER_LEVEL: i64 = 100;
    pub const SPEED_PER_LEVEL: f32 = 1.2;
    pub const SPEED_MIN: f32 = 1.0;
    pub const SPEED_MAX: f32 = 3.0;
    pub const SPEED_NUDGE: f32 = 1.1;

    /// Slot capacities
    pub const HAZARD_CAPACITY: usize = 10_000;
    pub const PROJECTILE_CAPACITY: usize = 10_000;
    pub const MAX_SESSION_SECS: f64 = 1800.0;
}

/// Normalize an angle in degrees to [-180, 180)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    (angle + 180.0).rem_euclid(360.0) - 180.0
}

/// Signed smallest difference `a - b` in degrees, in [-180, 180)
#[inline]
pub fn angle_diff_degrees(a: f32, b: f32) -> f32 {
    normalize_degrees(a - b)
}

/// Unit direction for an angle in degrees
#[inline]
pub fn direction_degrees(angle: f32) -> Vec2 {
    let rad = angle.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}
