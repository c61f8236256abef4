//! Circle and corner-arc queries for the tube's rounded bottom
//!
//! The tube boundary is two straight walls joined by quarter-circle fillets.
//! Collision against the fillets is done by sampling the arc at 1-degree
//! steps and testing point distance, matching the collider construction.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::ARC_SAMPLE_STEP_DEG;

/// A circle in world space
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// True if the two circles interpenetrate (touching at exactly the sum
    /// of radii counts as no overlap)
    #[inline]
    pub fn overlaps(&self, other: &Circle) -> bool {
        self.center.distance(other.center) < self.radius + other.radius
    }
}

/// A quarter-circle fillet of the tube boundary
///
/// Angles are in degrees with 0 pointing along +X, growing counterclockwise.
/// The left corner spans 180..=270, the right corner 270..=360.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CornerArc {
    pub center: Vec2,
    pub radius: f32,
    pub start_deg: u32,
    pub end_deg: u32,
}

impl CornerArc {
    pub fn new(center: Vec2, radius: f32, start_deg: u32, end_deg: u32) -> Self {
        Self {
            center,
            radius,
            start_deg,
            end_deg,
        }
    }

    /// Point on the arc at the given angle (degrees)
    #[inline]
    pub fn point_at_deg(&self, angle_deg: f32) -> Vec2 {
        let rad = angle_deg.to_radians();
        self.center + Vec2::new(self.radius * rad.cos(), self.radius * rad.sin())
    }

    /// Sampled points along the arc at `step_deg` intervals, both endpoints
    /// included
    pub fn sample_points(&self, step_deg: u32) -> Vec<Vec2> {
        let step = step_deg.max(1);
        (self.start_deg..=self.end_deg)
            .step_by(step as usize)
            .map(|deg| self.point_at_deg(deg as f32))
            .collect()
    }

    /// True if any sampled arc point lies strictly inside the given circle
    pub fn hits_circle(&self, circle: &Circle) -> bool {
        let step = ARC_SAMPLE_STEP_DEG.max(1);
        for deg in (self.start_deg..=self.end_deg).step_by(step as usize) {
            if self.point_at_deg(deg as f32).distance(circle.center) < circle.radius {
                return true;
            }
        }
        false
    }

    /// Distance from a point to the nearest sampled arc point
    pub fn sampled_distance(&self, point: Vec2) -> f32 {
        let step = ARC_SAMPLE_STEP_DEG.max(1);
        let mut min_dist = f32::INFINITY;
        for deg in (self.start_deg..=self.end_deg).step_by(step as usize) {
            min_dist = min_dist.min(self.point_at_deg(deg as f32).distance(point));
        }
        min_dist
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_overlap() {
        let a = Circle::new(Vec2::new(0.0, 0.0), 1.0);
        let b = Circle::new(Vec2::new(1.5, 0.0), 1.0);
        assert!(a.overlaps(&b));

        // Exactly touching is not an overlap
        let c = Circle::new(Vec2::new(2.0, 0.0), 1.0);
        assert!(!a.overlaps(&c));

        let d = Circle::new(Vec2::new(5.0, 0.0), 1.0);
        assert!(!a.overlaps(&d));
    }

    #[test]
    fn test_left_corner_sample_endpoints() {
        // Left fillet: 180 deg points at -X, 270 deg points at -Y
        let arc = CornerArc::new(Vec2::ZERO, 2.0, 180, 270);
        let points = arc.sample_points(1);
        assert_eq!(points.len(), 91);
        assert!((points[0] - Vec2::new(-2.0, 0.0)).length() < 1e-4);
        assert!((points[90] - Vec2::new(0.0, -2.0)).length() < 1e-4);
    }

    #[test]
    fn test_arc_hits_circle() {
        let arc = CornerArc::new(Vec2::ZERO, 2.0, 180, 270);

        // Circle centered below the arc's lowest point, close enough to reach it
        let near = Circle::new(Vec2::new(0.0, -2.5), 0.7);
        assert!(arc.hits_circle(&near));

        // Same center, radius too small to reach the arc
        let far = Circle::new(Vec2::new(0.0, -2.5), 0.4);
        assert!(!far.overlaps(&Circle::new(Vec2::new(0.0, -2.0), 0.0)));
        assert!(!arc.hits_circle(&far));
    }

    #[test]
    fn test_sampled_distance() {
        let arc = CornerArc::new(Vec2::ZERO, 2.0, 270, 360);
        // Point straight below the arc's start (270 deg -> (0, -2))
        let dist = arc.sampled_distance(Vec2::new(0.0, -3.0));
        assert!((dist - 1.0).abs() < 1e-4);
    }
}
