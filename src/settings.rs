//! Simulation tuning
//!
//! Every numeric constant the simulation uses lives here so a session can be
//! configured from a JSON file. Defaults reproduce the classic layout.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Deserializer, Serialize};

use crate::consts::*;
use crate::error::{SimError, SimResult, SlotKind};

/// Cadence intervals (seconds)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub hazard_motion: f64,
    pub projectile_motion: f64,
    /// Glide cadence for held keys
    pub held_input: f64,
    /// Base spawn interval; the effective one is `spawn / speed`
    pub spawn: f64,
    pub input_debounce: f64,
    pub fire: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            hazard_motion: HAZARD_MOTION_INTERVAL,
            projectile_motion: PROJECTILE_MOTION_INTERVAL,
            held_input: HELD_INPUT_INTERVAL,
            spawn: SPAWN_INTERVAL,
            input_debounce: INPUT_DEBOUNCE,
            fire: FIRE_INTERVAL,
        }
    }
}

/// Play field geometry and hazard motion
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub half_width: f32,
    pub half_height: f32,
    pub spawn_height: f32,
    pub lane_min: i32,
    pub lane_max: i32,
    /// Fall per motion tick at speed 1
    pub fall_rate: f32,
    /// Capture band (exclusive on both ends)
    pub capture_low: f32,
    pub capture_high: f32,
    /// Horizontal distance to a pad that counts as "over the pad"
    pub capture_tolerance: f32,
    pub lower_boundary: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            half_width: WORLD_HALF_WIDTH,
            half_height: WORLD_HALF_HEIGHT,
            spawn_height: SPAWN_HEIGHT,
            lane_min: LANE_MIN,
            lane_max: LANE_MAX,
            fall_rate: HAZARD_FALL_RATE,
            capture_low: CAPTURE_BAND_LOW,
            capture_high: CAPTURE_BAND_HIGH,
            capture_tolerance: CAPTURE_TOLERANCE,
            lower_boundary: LOWER_BOUNDARY,
        }
    }
}

impl FieldConfig {
    /// Whether a point lies inside the visible field
    pub fn contains(&self, p: Vec2) -> bool {
        p.x.abs() <= self.half_width && p.y.abs() <= self.half_height
    }
}

/// One capture pad
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PadLimits {
    pub home_x: f32,
    pub min_offset: f32,
    pub max_offset: f32,
}

impl PadLimits {
    pub fn left() -> Self {
        Self {
            home_x: LEFT_PAD_HOME,
            min_offset: -3.0,
            max_offset: 2.9,
        }
    }

    pub fn right() -> Self {
        Self {
            home_x: RIGHT_PAD_HOME,
            min_offset: -2.0,
            max_offset: 4.2,
        }
    }

    pub fn min_x(&self) -> f32 {
        self.home_x + self.min_offset
    }

    pub fn max_x(&self) -> f32 {
        self.home_x + self.max_offset
    }
}

/// Pad limits as written in a config file; missing fields keep the side's
/// defaults
#[derive(Deserialize)]
struct PadLimitsPatch {
    home_x: Option<f32>,
    min_offset: Option<f32>,
    max_offset: Option<f32>,
}

impl PadLimitsPatch {
    fn over(self, base: PadLimits) -> PadLimits {
        PadLimits {
            home_x: self.home_x.unwrap_or(base.home_x),
            min_offset: self.min_offset.unwrap_or(base.min_offset),
            max_offset: self.max_offset.unwrap_or(base.max_offset),
        }
    }
}

fn left_limits<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PadLimits, D::Error> {
    Ok(PadLimitsPatch::deserialize(deserializer)?.over(PadLimits::left()))
}

fn right_limits<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PadLimits, D::Error> {
    Ok(PadLimitsPatch::deserialize(deserializer)?.over(PadLimits::right()))
}

/// Both capture pads
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PadConfig {
    pub y: f32,
    #[serde(deserialize_with = "left_limits")]
    pub left: PadLimits,
    #[serde(deserialize_with = "right_limits")]
    pub right: PadLimits,
    pub key_step: f32,
    pub held_step: f32,
}

impl Default for PadConfig {
    fn default() -> Self {
        Self {
            y: PAD_Y,
            left: PadLimits::left(),
            right: PadLimits::right(),
            key_step: PAD_KEY_STEP,
            held_step: HELD_STEP,
        }
    }
}

/// The cannon on the left wall
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CannonConfig {
    pub muzzle_x: f32,
    pub muzzle_y: f32,
    pub min_elevation: f32,
    pub max_elevation: f32,
    pub elevation_step: f32,
    pub held_step: f32,
    /// Aim is clamped to [-aim_limit, aim_limit] degrees
    pub aim_limit_deg: f32,
    pub aim_step_deg: f32,
}

impl Default for CannonConfig {
    fn default() -> Self {
        Self {
            muzzle_x: MUZZLE_X,
            muzzle_y: MUZZLE_Y,
            min_elevation: -2.5,
            max_elevation: 2.9,
            elevation_step: ELEVATION_STEP,
            held_step: HELD_STEP,
            aim_limit_deg: AIM_LIMIT_DEG,
            aim_step_deg: AIM_STEP_DEG,
        }
    }
}

/// Laser projectiles
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileConfig {
    /// Distance travelled per motion tick
    pub step: f32,
    /// Per-axis hit tolerance against hazards
    pub hit_tolerance: f32,
    /// Extra distance granted after a hit
    pub pass_through_bonus: f32,
}

impl Default for ProjectileConfig {
    fn default() -> Self {
        Self {
            step: PROJECTILE_STEP,
            hit_tolerance: HIT_TOLERANCE,
            pass_through_bonus: PASS_THROUGH_BONUS,
        }
    }
}

/// Score deltas and progression
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub capture: i64,
    pub shot_neutral: i64,
    pub shot_penalty: i64,
    pub miss_penalty: i64,
    pub miss_limit: u32,
    pub points_per_level: i64,
    /// Speed multiplier is `speed_per_level ^ level`
    pub speed_per_level: f32,
    pub speed_min: f32,
    pub speed_max: f32,
    /// Factor applied by a manual speed nudge
    pub speed_nudge: f32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            capture: CAPTURE_POINTS,
            shot_neutral: SHOT_NEUTRAL_POINTS,
            shot_penalty: SHOT_PENALTY_POINTS,
            miss_penalty: MISS_PENALTY_POINTS,
            miss_limit: MISS_LIMIT,
            points_per_level: POINTS_PER_LEVEL,
            speed_per_level: SPEED_PER_LEVEL,
            speed_min: SPEED_MIN,
            speed_max: SPEED_MAX,
            speed_nudge: SPEED_NUDGE,
        }
    }
}

/// A mirror described by its pivot and tilt.
///
/// The reflecting segment runs from `center - near_extent * d` to
/// `center + far_extent * d` where `d` is the unit vector at `tilt_deg`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MirrorConfig {
    pub center: Vec2,
    pub tilt_deg: f32,
    pub near_extent: f32,
    pub far_extent: f32,
}

impl MirrorConfig {
    pub fn new(x: f32, y: f32, tilt_deg: f32) -> Self {
        Self {
            center: Vec2::new(x, y),
            tilt_deg,
            near_extent: 0.2,
            far_extent: 0.9,
        }
    }
}

/// Slot arenas
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CapacityConfig {
    pub hazards: usize,
    pub projectiles: usize,
    /// Longest session the arenas must support without dropping spawns
    pub max_session_secs: f64,
}

impl Default for CapacityConfig {
    fn default() -> Self {
        Self {
            hazards: HAZARD_CAPACITY,
            projectiles: PROJECTILE_CAPACITY,
            max_session_secs: MAX_SESSION_SECS,
        }
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub timing: TimingConfig,
    pub field: FieldConfig,
    pub pads: PadConfig,
    pub cannon: CannonConfig,
    pub projectile: ProjectileConfig,
    pub scoring: ScoringConfig,
    pub mirrors: Vec<MirrorConfig>,
    pub capacity: CapacityConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            timing: TimingConfig::default(),
            field: FieldConfig::default(),
            pads: PadConfig::default(),
            cannon: CannonConfig::default(),
            projectile: ProjectileConfig::default(),
            scoring: ScoringConfig::default(),
            mirrors: vec![
                MirrorConfig::new(-3.0, 2.0, 135.0),
                MirrorConfig::new(-1.1, -1.4, 45.0),
                MirrorConfig::new(5.0, -1.2, 45.0),
                MirrorConfig::new(5.5, 2.5, 135.0),
            ],
            capacity: CapacityConfig::default(),
        }
    }
}

impl SimConfig {
    /// Load a config from a JSON file (missing fields take defaults)
    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a config from a JSON string
    pub fn from_json(json: &str) -> SimResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Shortest possible spawn interval (at maximum speed)
    pub fn min_spawn_interval(&self) -> f64 {
        self.timing.spawn / self.scoring.speed_max as f64
    }

    /// Check ranges and that slot capacity covers a full session
    pub fn validate(&self) -> SimResult<()> {
        let t = &self.timing;
        for (name, value) in [
            ("timing.hazard_motion", t.hazard_motion),
            ("timing.projectile_motion", t.projectile_motion),
            ("timing.held_input", t.held_input),
            ("timing.spawn", t.spawn),
            ("timing.fire", t.fire),
            ("capacity.max_session_secs", self.capacity.max_session_secs),
            ("scoring.speed_min", self.scoring.speed_min as f64),
            ("projectile.step", self.projectile.step as f64),
        ] {
            positive(name, value)?;
        }
        non_negative("timing.input_debounce", t.input_debounce)?;
        non_negative("field.fall_rate", self.field.fall_rate as f64)?;
        if self.scoring.points_per_level <= 0 {
            return Err(SimError::InvalidValue {
                name: "scoring.points_per_level",
                value: self.scoring.points_per_level as f64,
            });
        }

        let f = &self.field;
        range("field.lanes", f.lane_min as f64, f.lane_max as f64)?;
        range("field.capture_band", f.capture_low as f64, f.capture_high as f64)?;
        range("field.lower_boundary", f.lower_boundary as f64, f.capture_low as f64)?;
        let p = &self.pads;
        range("pads.left", p.left.min_offset as f64, p.left.max_offset as f64)?;
        range("pads.right", p.right.min_offset as f64, p.right.max_offset as f64)?;
        let c = &self.cannon;
        range("cannon.elevation", c.min_elevation as f64, c.max_elevation as f64)?;
        non_negative("cannon.aim_limit_deg", c.aim_limit_deg as f64)?;
        let s = &self.scoring;
        range("scoring.speed", s.speed_min as f64, s.speed_max as f64)?;

        for m in &self.mirrors {
            positive("mirrors.extent", (m.near_extent + m.far_extent) as f64)?;
        }

        let secs = self.capacity.max_session_secs;
        let hazards_needed = (secs / self.min_spawn_interval()).ceil() as usize;
        if self.capacity.hazards < hazards_needed {
            return Err(SimError::CapacityTooSmall {
                kind: SlotKind::Hazard,
                capacity: self.capacity.hazards,
                required: hazards_needed,
                secs,
            });
        }
        let shots_needed = (secs / t.fire).ceil() as usize;
        if self.capacity.projectiles < shots_needed {
            return Err(SimError::CapacityTooSmall {
                kind: SlotKind::Projectile,
                capacity: self.capacity.projectiles,
                required: shots_needed,
                secs,
            });
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> SimResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidValue { name, value })
    }
}

fn non_negative(name: &'static str, value: f64) -> SimResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidValue { name, value })
    }
}

fn range(name: &'static str, min: f64, max: f64) -> SimResult<()> {
    if min <= max {
        Ok(())
    } else {
        Err(SimError::InvalidRange { name, min, max })
    }
}
