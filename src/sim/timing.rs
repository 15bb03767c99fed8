//! Timing gate
//!
//! Turns wall-clock time into per-subsystem ticks. Each cadence fires at most
//! once per frame, and only when its interval has elapsed since it last fired.

use serde::Serialize;

use super::state::GamePhase;
use crate::settings::TimingConfig;

/// A single fixed-interval gate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Cadence {
    pub interval: f64,
    /// Timestamp of the last firing (seconds)
    pub last: f64,
}

impl Cadence {
    /// First firing happens one interval after `now`
    pub fn new(interval: f64, now: f64) -> Self {
        Self { interval, last: now }
    }

    /// Can fire immediately
    pub fn primed(interval: f64) -> Self {
        Self {
            interval,
            last: f64::NEG_INFINITY,
        }
    }

    pub fn ready(&self, now: f64) -> bool {
        now - self.last >= self.interval
    }

    /// Fire if the interval elapsed, resetting the timestamp
    pub fn try_fire(&mut self, now: f64) -> bool {
        if self.ready(now) {
            self.last = now;
            true
        } else {
            false
        }
    }

    /// Move the timestamp forward without firing (used while frozen)
    pub fn touch(&mut self, now: f64) {
        self.last = self.last.max(now);
    }
}

/// Which cadences fired this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameTicks {
    pub hazard_motion: bool,
    pub projectile_motion: bool,
    pub spawn: bool,
    pub held_input: bool,
}

/// All named cadences of a session
#[derive(Debug, Clone, Serialize)]
pub struct TimingGate {
    pub hazard_motion: Cadence,
    pub projectile_motion: Cadence,
    pub held_input: Cadence,
    pub spawn: Cadence,
    /// Discrete key steps (pads, aim, elevation, speed nudge)
    pub input_debounce: Cadence,
    pub fire: Cadence,
    base_spawn: f64,
}

impl TimingGate {
    pub fn new(config: &TimingConfig, now: f64) -> Self {
        Self {
            hazard_motion: Cadence::new(config.hazard_motion, now),
            projectile_motion: Cadence::new(config.projectile_motion, now),
            held_input: Cadence::new(config.held_input, now),
            spawn: Cadence::new(config.spawn, now),
            input_debounce: Cadence::primed(config.input_debounce),
            fire: Cadence::primed(config.fire),
            base_spawn: config.spawn,
        }
    }

    /// Evaluate the motion-bearing cadences for this frame.
    ///
    /// Outside `Playing` they are frozen: timestamps follow the clock so
    /// nothing bursts on resume, but no tick is reported.
    pub fn advance(&mut self, now: f64, phase: GamePhase, speed: f32) -> FrameTicks {
        self.spawn.interval = self.base_spawn / speed.max(f32::EPSILON) as f64;

        if phase != GamePhase::Playing {
            self.hazard_motion.touch(now);
            self.projectile_motion.touch(now);
            self.held_input.touch(now);
            self.spawn.touch(now);
            return FrameTicks::default();
        }

        FrameTicks {
            hazard_motion: self.hazard_motion.try_fire(now),
            projectile_motion: self.projectile_motion.try_fire(now),
            spawn: self.spawn.try_fire(now),
            held_input: self.held_input.try_fire(now),
        }
    }

    /// Debounce gate for a discrete input event stamped `at`
    pub fn debounce(&mut self, at: f64) -> bool {
        self.input_debounce.try_fire(at)
    }

    /// Minimum fire interval gate for a shot requested at `at`
    pub fn allow_fire(&mut self, at: f64) -> bool {
        self.fire.try_fire(at)
    }
}
