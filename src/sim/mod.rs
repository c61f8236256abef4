//! Deterministic placement-and-merge engine
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by entity id)
//! - No rendering or platform dependencies
//!
//! The rigid-body simulation is an external collaborator: it is configured
//! through collider outlines and per-ball body records but never advanced
//! here.

pub mod geometry;
pub mod merge;
pub mod solver;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod tube;

pub use geometry::{Circle, CornerArc};
pub use merge::{merge, scan_and_merge};
pub use solver::{preview_rest_y, resting_y};
pub use spawn::{color_for_class, radius_for_class, radius_for_value, spawn_value, spawn_value_default, BALL_PALETTE};
pub use state::{Ball, BallBody, BallLabel, BallVisual, GameEvent, GamePhase, GameState};
pub use tick::{on_contact, tick, TickInput};
pub use tube::{TubeBoundary, TubeShape, Viewport};
