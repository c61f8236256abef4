//! Tube Merge - a 2048-style bubble-drop game core
//!
//! Core modules:
//! - `sim`: Deterministic placement-and-merge engine (tube geometry, preview
//!   solver, spawn RNG, merge protocol, session state machine)
//! - `store`: Persistent key-value storage behind a small trait
//! - `scores`: Current/best score tracking over the store
//! - `settings`: Player preferences
//!
//! Rendering, input capture, and the rigid-body integrator are external
//! collaborators: the engine exposes positions, collider outlines, and
//! events, and consumes pointer gestures plus contact notifications.

pub mod scores;
pub mod settings;
pub mod sim;
pub mod store;

pub use scores::ScoreBoard;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Largest value the spawn generator can produce
    pub const MAX_SPAWN_VALUE: u32 = 2048;

    /// Fixed iteration count for the resting-position binary search
    pub const SOLVER_ITERATIONS: u32 = 60;
    /// Angular step (degrees) when sampling corner arcs for collision
    pub const ARC_SAMPLE_STEP_DEG: u32 = 1;

    /// Ball radius for class 0 (value 2)
    pub const BASE_BALL_RADIUS: f32 = 0.7;
    /// Radius growth per radius class
    pub const BALL_RADIUS_STEP: f32 = 0.2;

    /// Tube shape defaults (world units)
    pub const CORNER_RADIUS: f32 = 0.2;
    pub const WALL_THICKNESS: f32 = 0.2;
    pub const HORIZONTAL_PADDING: f32 = 0.1;
    pub const TOP_PADDING: f32 = 2.0;
    pub const BOTTOM_PADDING: f32 = 1.0;
    /// Half-height of the orthographic view the tube is fitted into
    pub const ORTHO_HALF_HEIGHT: f32 = 5.0;

    /// Extra clearance above the tube opening where balls spawn
    pub const SPAWN_CLEARANCE: f32 = 0.9;
    /// Horizontal drag is applied at twice the pointer delta
    pub const DRAG_SENSITIVITY: f32 = 2.0;

    /// Ball label sizing (world-space font units)
    pub const LABEL_MAX_FONT_SIZE: f32 = 0.4;
    pub const LABEL_MIN_FONT_SIZE: f32 = 0.1;
    /// Font shrink per extra digit
    pub const LABEL_FONT_SIZE_FACTOR: f32 = 0.06;
}

/// Radius class for a ball value: `log2(value) - 1`
///
/// Value 2 -> class 0, 4 -> 1, 8 -> 2, ... Selects physical radius and
/// palette color. Caller guarantees `value` is a power of two >= 2.
#[inline]
pub fn radius_class(value: u32) -> u32 {
    debug_assert!(value >= 2 && value.is_power_of_two());
    value.ilog2() - 1
}

/// Inverse of [`radius_class`]
#[inline]
pub fn value_for_class(class: u32) -> u32 {
    1 << (class + 1)
}
