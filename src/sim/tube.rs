//! Tube boundary model
//!
//! The play area is a vertical tube: two straight side walls joined at the
//! bottom by two quarter-circle fillets, with a flat floor between them.
//! The boundary is fitted to the current viewport and rebuilt wholesale
//! whenever the aspect ratio changes; within a frame it is immutable.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::CornerArc;
use crate::consts::*;

/// Viewport description the tube is fitted into
///
/// World height is `2 * ortho_half_height`; world width follows the pixel
/// aspect ratio.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Viewport {
    pub width_px: u32,
    pub height_px: u32,
    pub ortho_half_height: f32,
}

impl Viewport {
    pub fn new(width_px: u32, height_px: u32) -> Self {
        Self {
            width_px,
            height_px,
            ortho_half_height: ORTHO_HALF_HEIGHT,
        }
    }

    #[inline]
    pub fn world_height(&self) -> f32 {
        self.ortho_half_height * 2.0
    }

    #[inline]
    pub fn world_width(&self) -> f32 {
        self.world_height() * self.width_px as f32 / self.height_px as f32
    }
}

/// Fixed shape parameters of the tube
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TubeShape {
    pub wall_thickness: f32,
    pub corner_radius: f32,
    pub horizontal_padding: f32,
    pub top_padding: f32,
    pub bottom_padding: f32,
}

impl Default for TubeShape {
    fn default() -> Self {
        Self {
            wall_thickness: WALL_THICKNESS,
            corner_radius: CORNER_RADIUS,
            horizontal_padding: HORIZONTAL_PADDING,
            top_padding: TOP_PADDING,
            bottom_padding: BOTTOM_PADDING,
        }
    }
}

/// The tube's playable extent plus derived corner geometry
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TubeBoundary {
    /// Left edge of the playable interior (wall thickness inclusive)
    pub start_x: f32,
    /// Right edge of the playable interior
    pub end_x: f32,
    /// Top opening where balls enter
    pub start_y: f32,
    /// Floor line; a resting ball below this is game over
    pub end_y: f32,
    pub shape: TubeShape,
}

impl TubeBoundary {
    /// Build the boundary from explicit extents
    pub fn from_extents(start_x: f32, end_x: f32, start_y: f32, end_y: f32, shape: TubeShape) -> Self {
        assert!(start_x < end_x, "tube must have positive width");
        assert!(shape.corner_radius >= 0.0);
        Self {
            start_x,
            end_x,
            start_y,
            end_y,
            shape,
        }
    }

    /// Fit the boundary to a viewport (called on aspect-ratio change)
    pub fn from_viewport(shape: TubeShape, viewport: Viewport) -> Self {
        let half_w = viewport.world_width() / 2.0;
        let half_h = viewport.world_height() / 2.0;
        Self::from_extents(
            -half_w + shape.horizontal_padding,
            half_w - shape.horizontal_padding,
            half_h - shape.top_padding,
            -half_h + shape.bottom_padding,
            shape,
        )
    }

    /// The flat floor's Y coordinate (inside face of the bottom wall)
    #[inline]
    pub fn floor_level(&self) -> f32 {
        self.end_y + self.shape.wall_thickness
    }

    /// Center of the left corner fillet
    #[inline]
    pub fn corner_center_left(&self) -> Vec2 {
        Vec2::new(
            self.start_x + self.shape.wall_thickness + self.shape.corner_radius,
            self.end_y + self.shape.wall_thickness + self.shape.corner_radius,
        )
    }

    /// Center of the right corner fillet (same Y as the left)
    #[inline]
    pub fn corner_center_right(&self) -> Vec2 {
        Vec2::new(
            self.end_x - self.shape.wall_thickness - self.shape.corner_radius,
            self.end_y + self.shape.wall_thickness + self.shape.corner_radius,
        )
    }

    /// Left fillet as a sampled arc (180..=270 degrees)
    pub fn left_corner_arc(&self) -> CornerArc {
        CornerArc::new(self.corner_center_left(), self.shape.corner_radius, 180, 270)
    }

    /// Right fillet as a sampled arc (270..=360 degrees)
    pub fn right_corner_arc(&self) -> CornerArc {
        CornerArc::new(self.corner_center_right(), self.shape.corner_radius, 270, 360)
    }

    /// Usable horizontal spawn range for a ball of the given radius
    pub fn usable_x_range(&self, ball_radius: f32) -> (f32, f32) {
        (
            self.start_x + self.shape.wall_thickness + ball_radius,
            self.end_x - self.shape.wall_thickness - ball_radius,
        )
    }

    /// Initial spawn X: midpoint of the usable range
    pub fn spawn_midpoint(&self, ball_radius: f32) -> f32 {
        let (lo, hi) = self.usable_x_range(ball_radius);
        (lo + hi) / 2.0
    }

    /// Spawn Y for a ball of the given radius, just above the tube opening
    pub fn spawn_y(&self, ball_radius: f32) -> f32 {
        self.start_y + ball_radius + SPAWN_CLEARANCE
    }

    /// Polyline for the external edge collider: down the left wall, around
    /// both fillets, up the right wall
    pub fn collider_outline(&self) -> Vec<Vec2> {
        let t = self.shape.wall_thickness;
        let mut points = vec![
            Vec2::new(self.start_x, self.start_y),
            Vec2::new(self.start_x + t, self.start_y),
        ];
        points.extend(self.left_corner_arc().sample_points(ARC_SAMPLE_STEP_DEG));
        points.extend(self.right_corner_arc().sample_points(ARC_SAMPLE_STEP_DEG));
        points.push(Vec2::new(self.end_x - t, self.start_y));
        points.push(Vec2::new(self.end_x, self.start_y));
        points
    }
}
