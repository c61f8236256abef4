//! Resting-position solver
//!
//! Binary search over vertical drop distance: finds the highest Y at which
//! a ball of a given radius, held at a fixed X, does not overlap the tube
//! boundary or any resting ball. Drives the preview ghost; the physics
//! collaborator remains the ground truth for the dropped ball itself.

use glam::Vec2;

use super::geometry::Circle;
use super::tube::TubeBoundary;
use crate::consts::SOLVER_ITERATIONS;

/// True if a ball centered at `(x, y)` collides with the tube boundary
///
/// Inside the corner fillets' X span the test is sampled point distance to
/// the quarter arc; over the flat floor it is a simple bottom-crossing test.
fn hits_boundary(tube: &TubeBoundary, x: f32, y: f32, ball_radius: f32) -> bool {
    let left = tube.corner_center_left();
    let right = tube.corner_center_right();

    if x < left.x || right.x < x {
        let arc = if x < left.x {
            tube.left_corner_arc()
        } else {
            tube.right_corner_arc()
        };
        arc.hits_circle(&Circle::new(Vec2::new(x, y), ball_radius))
    } else {
        y - ball_radius < tube.floor_level()
    }
}

/// Find the resting Y for a ball held at `spawn_x`
///
/// `search_start_y` is the highest candidate (assumed collision-free),
/// `search_end_y` the lowest. Overlap must be monotonic in Y across the
/// bracket, which holds because balls fall straight down and the tube only
/// narrows toward the floor. The iteration count is fixed: constant per-frame
/// cost, and the bracket shrinks far below rendering precision. If the
/// bracket overlaps already at `search_start_y` the result degrades to
/// approximately `search_start_y`.
pub fn resting_y(
    tube: &TubeBoundary,
    ball_radius: f32,
    spawn_x: f32,
    mut search_start_y: f32,
    mut search_end_y: f32,
    obstacles: &[Circle],
) -> f32 {
    for _ in 0..SOLVER_ITERATIONS {
        let mid_y = (search_start_y + search_end_y) / 2.0;
        let candidate = Circle::new(Vec2::new(spawn_x, mid_y), ball_radius);

        let overlaps = hits_boundary(tube, spawn_x, mid_y, ball_radius)
            || obstacles.iter().any(|other| candidate.overlaps(other));

        if overlaps {
            search_end_y = mid_y;
        } else {
            search_start_y = mid_y;
        }
    }
    (search_start_y + search_end_y) / 2.0
}

/// Resting Y over the tube's full drop bracket: from the opening down to a
/// ball sitting on the flat floor
pub fn preview_rest_y(
    tube: &TubeBoundary,
    ball_radius: f32,
    spawn_x: f32,
    obstacles: &[Circle],
) -> f32 {
    resting_y(
        tube,
        ball_radius,
        spawn_x,
        tube.start_y,
        tube.floor_level() + ball_radius,
        obstacles,
    )
}
