//! Cosmetic camera (zoom and pan)
//!
//! The renderer reads the view rectangle from here. Nothing in the
//! simulation depends on it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 2.0;
pub const ZOOM_FACTOR: f32 = 1.1;
pub const PAN_STEP: f32 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub zoom: f32,
    pub center: Vec2,
    /// World half extents the view must stay inside
    half_extent: Vec2,
}

impl Camera {
    pub fn new(half_width: f32, half_height: f32) -> Self {
        Self {
            zoom: MIN_ZOOM,
            center: Vec2::ZERO,
            half_extent: Vec2::new(half_width, half_height),
        }
    }

    /// Zoom in (`steps > 0`) or out (`steps < 0`)
    pub fn zoom_by(&mut self, steps: i32) {
        self.zoom *= ZOOM_FACTOR.powi(steps);
        self.zoom = self.zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        self.clamp_center();
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        self.center += delta;
        self.clamp_center();
    }

    /// Visible half extents at the current zoom
    pub fn view_half_extent(&self) -> Vec2 {
        self.half_extent / self.zoom
    }

    /// (min, max) corners of the visible rectangle
    pub fn view_rect(&self) -> (Vec2, Vec2) {
        let half = self.view_half_extent();
        (self.center - half, self.center + half)
    }

    fn clamp_center(&mut self) {
        let limit = self.half_extent - self.view_half_extent();
        self.center = self.center.clamp(-limit, limit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_clamped() {
        let mut cam = Camera::new(8.0, 4.0);
        cam.zoom_by(-3);
        assert_eq!(cam.zoom, MIN_ZOOM);
        cam.zoom_by(20);
        assert_eq!(cam.zoom, MAX_ZOOM);
    }

    #[test]
    fn test_pan_stays_inside_world() {
        let mut cam = Camera::new(8.0, 4.0);
        // Fully zoomed out: no room to pan
        cam.pan_by(Vec2::new(5.0, 5.0));
        assert_eq!(cam.center, Vec2::ZERO);

        cam.zoom_by(20);
        cam.pan_by(Vec2::new(50.0, -50.0));
        let (min, max) = cam.view_rect();
        assert!((max.x - 8.0).abs() < 1e-4);
        assert!((min.y + 4.0).abs() < 1e-4);
    }

    #[test]
    fn test_zoom_out_recenters() {
        let mut cam = Camera::new(8.0, 4.0);
        cam.zoom_by(20);
        cam.pan_by(Vec2::new(4.0, 0.0));
        cam.zoom_by(-20);
        assert_eq!(cam.center, Vec2::ZERO);
    }
}
