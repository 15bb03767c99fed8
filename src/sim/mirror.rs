//! Mirror geometry
//!
//! A mirror is a fixed line segment. A projectile reflects when its position
//! at the start and end of a motion tick lie on opposite sides of the
//! mirror's line, and the segment's two endpoints lie on opposite sides of
//! the projectile's path (so the crossing is inside the segment).
//!
//! Reflecting a heading `theta` about a line at angle `phi` gives
//! `2 * phi - theta`. This is the general law for any tilt; the classic
//! 45/135 degree mirrors are just two instances of it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::MirrorConfig;
use crate::{direction_degrees, normalize_degrees};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mirror {
    pub a: Vec2,
    pub b: Vec2,
    /// Tilt of the reflecting line in degrees
    pub tilt: f32,
}

impl Mirror {
    pub fn from_config(config: &MirrorConfig) -> Self {
        let d = direction_degrees(config.tilt_deg);
        Self {
            a: config.center - d * config.near_extent,
            b: config.center + d * config.far_extent,
            tilt: config.tilt_deg,
        }
    }

    /// Signed distance from the mirror's infinite line
    pub fn signed_distance(&self, p: Vec2) -> f32 {
        let d = (self.b - self.a).normalize_or_zero();
        d.perp_dot(p - self.a)
    }

    /// Where a path from `start` to `end` crosses this mirror, if it does.
    ///
    /// The returned point lies on the mirror's line, interpolated from the
    /// signed distances of the two samples.
    pub fn crossing(&self, start: Vec2, end: Vec2) -> Option<Vec2> {
        let s0 = self.signed_distance(start);
        let s1 = self.signed_distance(end);
        if s0 * s1 >= 0.0 {
            return None;
        }

        let path = end - start;
        let ea = path.perp_dot(self.a - start);
        let eb = path.perp_dot(self.b - start);
        if ea * eb >= 0.0 {
            return None;
        }

        Some(start + path * (s0 / (s0 - s1)))
    }

    /// Heading after reflecting off this mirror, in [-180, 180)
    pub fn reflect_angle(&self, incoming: f32) -> f32 {
        normalize_degrees(2.0 * self.tilt - incoming)
    }
}

/// First mirror crossed by the path `start -> end` (closest to `start`).
///
/// `skip` is the mirror the current leg started on. A straight leg leaving a
/// mirror cannot cross that mirror again.
pub fn first_crossing(
    mirrors: &[Mirror],
    start: Vec2,
    end: Vec2,
    skip: Option<usize>,
) -> Option<(usize, Vec2)> {
    mirrors
        .iter()
        .enumerate()
        .filter(|&(i, _)| Some(i) != skip)
        .filter_map(|(i, m)| {
            let s = m.signed_distance(start).abs();
            m.crossing(start, end).map(|p| (i, p, s))
        })
        .min_by(|a, b| a.2.partial_cmp(&b.2).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, p, _)| (i, p))
}
