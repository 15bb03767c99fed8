//! Game state and core simulation types
//!
//! A single `GameState` owns everything that changes during a session. The
//! frame loop in `tick` is the only thing that mutates it.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::input::HeldInput;
use super::mirror::Mirror;
use super::timing::TimingGate;
use crate::camera::Camera;
use crate::direction_degrees;
use crate::error::SimResult;
use crate::settings::{CannonConfig, PadConfig, PadLimits, ScoringConfig, SimConfig};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Motion frozen; only pause/camera input is accepted
    Paused,
    /// Terminal until Restart
    GameOver,
}

/// Why the session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    /// A neutral hazard reached a pad
    NeutralCaptured { slot: usize, pad: PadSide },
    /// Too many penalty hazards of one class fell past the pads
    MissLimit { class: HazardClass },
}

/// Hazard classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardClass {
    /// Must be shot; ends the game if it reaches a pad
    Neutral,
    /// Collected by the left pad
    PenaltyA,
    /// Collected by the right pad
    PenaltyB,
}

impl HazardClass {
    pub fn is_penalty(self) -> bool {
        self != HazardClass::Neutral
    }

    /// Class policy for a lane: lanes left of center never carry Penalty-B
    pub fn roll(lane: i32, rng: &mut impl Rng) -> Self {
        if lane <= 0 {
            match rng.random_range(0..2) {
                0 => HazardClass::Neutral,
                _ => HazardClass::PenaltyA,
            }
        } else {
            match rng.random_range(0..3) {
                0 => HazardClass::Neutral,
                1 => HazardClass::PenaltyA,
                _ => HazardClass::PenaltyB,
            }
        }
    }
}

/// How a hazard left play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardOutcome {
    Captured(PadSide),
    Missed,
    Shot { projectile: usize },
}

/// A falling hazard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub slot: usize,
    /// Lane position
    pub x: f32,
    /// Height, decreasing as it falls
    pub y: f32,
    pub class: HazardClass,
    pub consumed: bool,
    pub outcome: Option<HazardOutcome>,
}

impl Hazard {
    pub fn new(slot: usize, x: f32, y: f32, class: HazardClass) -> Self {
        Self {
            slot,
            x,
            y,
            class,
            consumed: false,
            outcome: None,
        }
    }

    pub fn pos(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Mark consumed. Returns false (and changes nothing) if already consumed.
    pub fn consume(&mut self, outcome: HazardOutcome) -> bool {
        if self.consumed {
            return false;
        }
        self.consumed = true;
        self.outcome = Some(outcome);
        true
    }
}

/// A laser shot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub slot: usize,
    /// Launch point, or the last reflection point
    pub origin: Vec2,
    /// Heading in degrees
    pub angle: f32,
    /// Distance travelled from `origin`
    pub distance: f32,
    pub active: bool,
    pub reflections: u32,
    /// Mirror the current leg started on, if any
    pub mirror: Option<usize>,
}

impl Projectile {
    pub fn new(slot: usize, origin: Vec2, angle: f32) -> Self {
        Self {
            slot,
            origin,
            angle,
            distance: 0.0,
            active: true,
            reflections: 0,
            mirror: None,
        }
    }

    /// Position at an arbitrary travelled distance along the current leg
    pub fn position_at(&self, distance: f32) -> Vec2 {
        self.origin + direction_degrees(self.angle) * distance
    }

    pub fn position(&self) -> Vec2 {
        self.position_at(self.distance)
    }
}

/// Which capture pad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PadSide {
    Left,
    Right,
}

impl PadSide {
    pub const BOTH: [PadSide; 2] = [PadSide::Left, PadSide::Right];

    /// The penalty class this pad collects
    pub fn collects(self) -> HazardClass {
        match self {
            PadSide::Left => HazardClass::PenaltyA,
            PadSide::Right => HazardClass::PenaltyB,
        }
    }

    pub fn limits(self, config: &PadConfig) -> &PadLimits {
        match self {
            PadSide::Left => &config.left,
            PadSide::Right => &config.right,
        }
    }
}

/// The two capture pads, stored as offsets from their home x
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pads {
    pub left_offset: f32,
    pub right_offset: f32,
}

impl Pads {
    fn offset_mut(&mut self, side: PadSide) -> &mut f32 {
        match side {
            PadSide::Left => &mut self.left_offset,
            PadSide::Right => &mut self.right_offset,
        }
    }

    pub fn offset(&self, side: PadSide) -> f32 {
        match side {
            PadSide::Left => self.left_offset,
            PadSide::Right => self.right_offset,
        }
    }

    /// World x of a pad
    pub fn x(&self, side: PadSide, config: &PadConfig) -> f32 {
        side.limits(config).home_x + self.offset(side)
    }

    /// Move a pad by `delta`, clamped to its range
    pub fn nudge(&mut self, side: PadSide, delta: f32, config: &PadConfig) {
        let limits = side.limits(config);
        let offset = self.offset_mut(side);
        *offset = (*offset + delta).clamp(limits.min_offset, limits.max_offset);
    }

    /// Place a pad at world x, clamped to its range
    pub fn set_x(&mut self, side: PadSide, x: f32, config: &PadConfig) {
        let limits = side.limits(config);
        let offset = x - limits.home_x;
        *self.offset_mut(side) = offset.clamp(limits.min_offset, limits.max_offset);
    }
}

/// The rotatable, elevating cannon
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cannon {
    /// Vertical offset of the muzzle
    pub elevation: f32,
    /// Aim in degrees (0 = pointing right)
    pub angle: f32,
}

impl Cannon {
    /// Where new projectiles start
    pub fn muzzle(&self, config: &CannonConfig) -> Vec2 {
        Vec2::new(config.muzzle_x, config.muzzle_y + self.elevation)
    }

    pub fn elevate(&mut self, delta: f32, config: &CannonConfig) {
        self.set_elevation(self.elevation + delta, config);
    }

    pub fn set_elevation(&mut self, elevation: f32, config: &CannonConfig) {
        self.elevation = elevation.clamp(config.min_elevation, config.max_elevation);
    }

    pub fn rotate(&mut self, delta_deg: f32, config: &CannonConfig) {
        self.set_angle(self.angle + delta_deg, config);
    }

    pub fn set_angle(&mut self, angle: f32, config: &CannonConfig) {
        self.angle = angle.clamp(-config.aim_limit_deg, config.aim_limit_deg);
    }

    /// Aim at a world point (clamped to the aim range)
    pub fn aim_at(&mut self, target: Vec2, config: &CannonConfig) {
        let d = target - self.muzzle(config);
        self.set_angle(d.y.atan2(d.x).to_degrees(), config);
    }
}

/// Score, miss counters and derived progression
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreState {
    /// Raw score; may dip below zero between frames
    pub score: i64,
    pub misses_a: u32,
    pub misses_b: u32,
    pub level: u32,
    /// Fall-rate and spawn-rate multiplier
    pub speed: f32,
    /// Manually nudged multiplier, used while level is 0
    pub manual_speed: f32,
}

impl Default for ScoreState {
    fn default() -> Self {
        Self {
            score: 0,
            misses_a: 0,
            misses_b: 0,
            level: 0,
            speed: 1.0,
            manual_speed: 1.0,
        }
    }
}

impl ScoreState {
    pub fn apply(&mut self, delta: i64) {
        self.score += delta;
    }

    /// Score as shown to the player
    pub fn display_score(&self) -> i64 {
        self.score.max(0)
    }

    pub fn record_miss(&mut self, class: HazardClass) {
        match class {
            HazardClass::PenaltyA => self.misses_a += 1,
            HazardClass::PenaltyB => self.misses_b += 1,
            HazardClass::Neutral => {}
        }
    }

    /// The class whose miss counter reached the limit, if any
    pub fn miss_limit_reached(&self, limit: u32) -> Option<HazardClass> {
        if self.misses_a >= limit {
            Some(HazardClass::PenaltyA)
        } else if self.misses_b >= limit {
            Some(HazardClass::PenaltyB)
        } else {
            None
        }
    }

    pub fn nudge_speed(&mut self, steps: i32, config: &ScoringConfig) {
        self.manual_speed = (self.manual_speed * config.speed_nudge.powi(steps))
            .clamp(config.speed_min, config.speed_max);
    }

    /// Recompute level and speed. Returns the new level if it changed.
    pub fn refresh(&mut self, config: &ScoringConfig) -> Option<u32> {
        let level = (self.display_score() / config.points_per_level) as u32;
        let raw = if level >= 1 {
            config.speed_per_level.powi(level.min(i32::MAX as u32) as i32)
        } else {
            self.manual_speed
        };
        self.speed = raw.clamp(config.speed_min, config.speed_max);

        if level != self.level {
            self.level = level;
            Some(level)
        } else {
            None
        }
    }
}

/// Running counters for the session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionStats {
    pub frames: u64,
    pub spawned: u64,
    pub shots: u64,
    pub reflections: u64,
    pub hits: u64,
    pub captures: u64,
    pub misses: u64,
}

/// Things that happened during the last frame (for effects and tests)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned { slot: usize, class: HazardClass },
    Fired { slot: usize },
    Reflected { projectile: usize, mirror: usize, angle: f32 },
    Captured { slot: usize, pad: PadSide },
    NeutralReachedPad { slot: usize, pad: PadSide },
    Missed { slot: usize, class: HazardClass },
    Shot { slot: usize, projectile: usize, class: HazardClass },
    ProjectileLeft { slot: usize },
    LevelUp { level: u32 },
    Paused,
    Resumed,
    Restarted,
    GameOver { cause: GameOverCause },
}

/// RNG state wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: SimConfig,
    pub rng_state: RngState,
    rng: Pcg32,
    pub phase: GamePhase,
    pub game_over_cause: Option<GameOverCause>,
    pub timing: TimingGate,
    /// Hazard slots in spawn order; index == slot
    pub hazards: Vec<Hazard>,
    /// Projectile slots in fire order; index == slot
    pub projectiles: Vec<Projectile>,
    pub mirrors: Vec<Mirror>,
    pub cannon: Cannon,
    pub pads: Pads,
    pub held: HeldInput,
    pub score: ScoreState,
    pub camera: Camera,
    pub stats: SessionStats,
    /// Events raised during the current frame
    pub events: Vec<GameEvent>,
    /// Timestamp of the current frame
    pub now: f64,
}

impl GameState {
    /// Start a session. Fails if the config cannot support a full session.
    pub fn new(config: SimConfig, seed: u64, now: f64) -> SimResult<Self> {
        config.validate()?;
        log::info!(
            "New session (seed {seed}, {} hazard slots, {} projectile slots, {} mirrors)",
            config.capacity.hazards,
            config.capacity.projectiles,
            config.mirrors.len()
        );
        Ok(Self::fresh(config, seed, now))
    }

    fn fresh(config: SimConfig, seed: u64, now: f64) -> Self {
        let rng_state = RngState::new(seed);
        let rng = rng_state.to_rng();
        let mirrors = config.mirrors.iter().map(Mirror::from_config).collect();
        let timing = TimingGate::new(&config.timing, now);
        let camera = Camera::new(config.field.half_width, config.field.half_height);
        let mut state = Self {
            rng_state,
            rng,
            phase: GamePhase::Playing,
            game_over_cause: None,
            timing,
            hazards: Vec::new(),
            projectiles: Vec::new(),
            mirrors,
            cannon: Cannon::default(),
            pads: Pads::default(),
            held: HeldInput::default(),
            score: ScoreState::default(),
            camera,
            stats: SessionStats::default(),
            events: Vec::new(),
            now,
            config,
        };
        state.score.refresh(&state.config.scoring);
        state
    }

    pub fn seed(&self) -> u64 {
        self.rng_state.seed
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Reinitialize every mutable entity to session-start values
    pub fn restart(&mut self, now: f64) {
        let config = self.config.clone();
        let seed = self.seed();
        let events = std::mem::take(&mut self.events);
        *self = Self::fresh(config, seed, now);
        self.events = events;
        self.events.push(GameEvent::Restarted);
        log::info!("Session restarted");
    }

    /// Playing <-> Paused; ignored in GameOver
    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Playing => {
                self.phase = GamePhase::Paused;
                self.held = HeldInput::default();
                self.events.push(GameEvent::Paused);
                log::debug!("Paused");
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Playing;
                self.events.push(GameEvent::Resumed);
                log::debug!("Resumed");
            }
            GamePhase::GameOver => {}
        }
    }

    /// Enter GameOver (first cause wins)
    pub fn end_game(&mut self, cause: GameOverCause) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        self.game_over_cause = Some(cause);
        self.held = HeldInput::default();
        self.events.push(GameEvent::GameOver { cause });
        log::info!(
            "Game over: {:?} (score {}, level {})",
            cause,
            self.score.display_score(),
            self.score.level
        );
    }

    /// Hazards that are still in play
    pub fn live_hazards(&self) -> impl Iterator<Item = &Hazard> {
        self.hazards.iter().filter(|h| !h.consumed)
    }

    /// Projectiles that are still moving
    pub fn active_projectiles(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter().filter(|p| p.active)
    }

    pub fn pad_x(&self, side: PadSide) -> f32 {
        self.pads.x(side, &self.config.pads)
    }
}
