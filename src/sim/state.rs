//! Session state and ball entities
//!
//! A ball aggregates three capability records built together at creation
//! time: the physical body (owned by the external rigid-body collaborator
//! once simulation is enabled), the visual, and the numeric label. No
//! runtime capability lookup.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Circle;
use super::spawn::{color_for_class, radius_for_class};
use super::tube::{TubeBoundary, Viewport};
use crate::consts::*;
use crate::radius_class;
use crate::scores::ScoreBoard;
use crate::settings::Settings;
use crate::store::ScoreStore;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No falling or preview ball
    Idle,
    /// Press held: falling and preview balls exist, positions follow the pointer
    Aiming,
    /// Terminal: a resting ball crossed the tube floor
    GameOver,
}

/// Physical capability record
///
/// Position is written by the session while simulation is disabled and by
/// the external rigid-body collaborator once enabled.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BallBody {
    pub pos: Vec2,
    pub radius: f32,
    pub simulated: bool,
}

impl BallBody {
    pub fn enable_simulation(&mut self) {
        self.simulated = true;
    }

    pub fn disable_simulation(&mut self) {
        self.simulated = false;
    }

    #[inline]
    pub fn as_circle(&self) -> Circle {
        Circle::new(self.pos, self.radius)
    }
}

/// Visual capability record
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BallVisual {
    /// Palette color (0xRRGGBB)
    pub color: u32,
    pub opacity: f32,
}

/// Label capability record for the numeric value display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallLabel {
    pub text: String,
    pub font_size: f32,
    pub opacity: f32,
}

/// Font size shrinks with digit count, clamped to a fixed range
pub fn label_font_size(value: u32) -> f32 {
    let digits = value.to_string().len() as f32;
    (LABEL_MAX_FONT_SIZE - (digits - 1.0) * LABEL_FONT_SIZE_FACTOR)
        .clamp(LABEL_MIN_FONT_SIZE, LABEL_MAX_FONT_SIZE)
}

/// A resting or falling ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    /// Power of two, >= 2
    pub value: u32,
    pub body: BallBody,
    pub visual: BallVisual,
    pub label: BallLabel,
}

impl Ball {
    /// Create a frozen ball (simulation disabled) at the given position
    pub fn new(id: u32, value: u32, pos: Vec2) -> Self {
        let class = radius_class(value);
        Self {
            id,
            value,
            body: BallBody {
                pos,
                radius: radius_for_class(class),
                simulated: false,
            },
            visual: BallVisual {
                color: color_for_class(class),
                opacity: 1.0,
            },
            label: BallLabel {
                text: value.to_string(),
                font_size: label_font_size(value),
                opacity: 1.0,
            },
        }
    }

    /// Assign a new value, re-deriving radius, color, and label
    pub fn set_value(&mut self, value: u32) {
        let class = radius_class(value);
        self.value = value;
        self.body.radius = radius_for_class(class);
        self.visual.color = color_for_class(class);
        self.label.text = value.to_string();
        self.label.font_size = label_font_size(value);
    }

    /// Set opacity on both visual and label (used for the preview ghost)
    pub fn set_opacity(&mut self, alpha: f32) {
        self.visual.opacity = alpha;
        self.label.opacity = alpha;
    }
}

/// Synchronous notifications drained by the presentation collaborators
///
/// Destruction events are pushed in the same logical step as the removal,
/// before the next per-frame scan can observe a dangling id.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Spawned { id: u32, value: u32 },
    Dropped { id: u32, value: u32 },
    Merged { surviving_id: u32, destroyed_id: u32, new_value: u32 },
    BallDestroyed { id: u32 },
    GameOver { score: u32 },
}

/// The session aggregate: resting set, in-flight ball, preview ghost,
/// scores, and the drop-gesture cursor
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tube: TubeBoundary,
    pub phase: GamePhase,
    /// Resting balls, sorted by id for deterministic iteration
    pub balls: Vec<Ball>,
    /// At most one ball being aimed, simulation disabled
    pub falling: Option<Ball>,
    /// Ghost showing the predicted rest position; never merges
    pub preview: Option<Ball>,
    pub scores: ScoreBoard,
    pub settings: Settings,
    /// Per-tick event mailbox, drained by the caller
    pub events: Vec<GameEvent>,
    pub time_ticks: u64,
    pub(crate) spawn_x: f32,
    pub(crate) spawn_y: f32,
    pub(crate) prev_press: Option<Vec2>,
    pub(crate) current_press: Option<Vec2>,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    pub fn new(seed: u64, tube: TubeBoundary, settings: Settings, store: &dyn ScoreStore) -> Self {
        Self {
            seed,
            tube,
            phase: GamePhase::Idle,
            balls: Vec::new(),
            falling: None,
            preview: None,
            scores: ScoreBoard::load(store),
            settings,
            events: Vec::new(),
            time_ticks: 0,
            spawn_x: 0.0,
            spawn_y: 0.0,
            prev_press: None,
            current_press: None,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity id
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Rebuild the tube for a new viewport, keeping the shape parameters
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.tube = TubeBoundary::from_viewport(self.tube.shape, viewport);
    }

    pub fn ball_index(&self, id: u32) -> Option<usize> {
        self.balls.iter().position(|b| b.id == id)
    }

    /// Remove a resting ball, emitting the destruction notification in the
    /// same step
    pub fn remove_ball(&mut self, id: u32) -> Option<Ball> {
        let index = self.ball_index(id)?;
        let ball = self.balls.remove(index);
        self.events.push(GameEvent::BallDestroyed { id });
        Some(ball)
    }

    /// Resting balls as plain circles, for the solver
    pub fn resting_circles(&self) -> Vec<Circle> {
        self.balls.iter().map(|b| b.body.as_circle()).collect()
    }

    /// Largest resting value, or 0 on an empty tube
    pub fn max_resting_value(&self) -> u32 {
        self.balls.iter().map(|b| b.value).max().unwrap_or(0)
    }

    /// Lowest resting ball Y, if any ball rests
    pub fn min_resting_y(&self) -> Option<f32> {
        self.balls
            .iter()
            .map(|b| b.body.pos.y)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Current horizontal aim position
    pub fn spawn_x(&self) -> f32 {
        self.spawn_x
    }

    /// Vertical spawn position, fixed per gesture
    pub fn spawn_y(&self) -> f32 {
        self.spawn_y
    }

    /// Take this tick's events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tube::TubeShape;
    use crate::store::MemoryStore;

    fn test_state() -> GameState {
        let tube = TubeBoundary::from_extents(-5.0, 5.0, 3.0, -5.0, TubeShape::default());
        GameState::new(1, tube, Settings::default(), &MemoryStore::default())
    }

    #[test]
    fn test_ball_derives_class_tables() {
        let ball = Ball::new(1, 8, Vec2::ZERO);
        assert!((ball.body.radius - 1.1).abs() < 1e-6);
        assert_eq!(ball.label.text, "8");
        assert!(!ball.body.simulated);
    }

    #[test]
    fn test_set_value_rederives() {
        let mut ball = Ball::new(1, 4, Vec2::ZERO);
        let old_radius = ball.body.radius;
        ball.set_value(8);
        assert_eq!(ball.value, 8);
        assert!(ball.body.radius > old_radius);
        assert_eq!(ball.label.text, "8");
    }

    #[test]
    fn test_label_font_size_shrinks_with_digits() {
        assert!(label_font_size(2) > label_font_size(128));
        assert!(label_font_size(128) > label_font_size(2048));
        assert!(label_font_size(2048) >= LABEL_MIN_FONT_SIZE);
        assert!(label_font_size(2) <= LABEL_MAX_FONT_SIZE);
    }

    #[test]
    fn test_remove_ball_emits_destroyed() {
        let mut state = test_state();
        let id = state.next_entity_id();
        state.balls.push(Ball::new(id, 4, Vec2::ZERO));
        let removed = state.remove_ball(id);
        assert!(removed.is_some());
        assert!(state.balls.is_empty());
        assert_eq!(state.events, vec![GameEvent::BallDestroyed { id }]);
    }

    #[test]
    fn test_max_resting_value_empty_is_zero() {
        let state = test_state();
        assert_eq!(state.max_resting_value(), 0);
    }
}
