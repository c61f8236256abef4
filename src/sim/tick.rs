//! Session tick: press/hold/release gesture, merge scan, scoring, game over
//!
//! Single-threaded and frame-driven: every operation runs synchronously
//! inside one tick. The rigid-body collaborator moves simulated balls
//! between ticks; this module only observes their positions.

use glam::Vec2;

use super::merge::{merge, scan_and_merge};
use super::solver::preview_rest_y;
use super::spawn::spawn_value_default;
use super::state::{Ball, GameEvent, GamePhase, GameState};
use crate::consts::DRAG_SENSITIVITY;
use crate::store::ScoreStore;

/// Pointer gesture input for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Press started this tick
    pub press: bool,
    /// Current pointer position in world space, while held
    pub pointer: Option<Vec2>,
    /// Press released this tick
    pub release: bool,
}

/// Advance the session by one logical frame
pub fn tick(state: &mut GameState, input: &TickInput, store: &mut dyn ScoreStore) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    state.time_ticks += 1;

    // Score first so a game-over tick persists the final value
    let current = state.max_resting_value();
    state.scores.update(current, store);

    if is_game_over(state) {
        state.scores.finalize(store);
        state.events.push(GameEvent::GameOver {
            score: state.scores.current,
        });
        state.phase = GamePhase::GameOver;
        log::info!("game over at score {}", state.scores.current);
        return;
    }

    scan_and_merge(state);

    if input.press && state.phase == GamePhase::Idle {
        press(state);
    }

    if state.phase == GamePhase::Aiming {
        if let Some(pointer) = input.pointer {
            record_pointer(state, pointer);
        }
        update_aim(state);
        if input.release {
            release(state);
        }
    }
}

/// Route an engine-driven contact notification to the merge protocol
///
/// Equivalent to the manual per-frame scan; which source fires first is an
/// implementation detail of the physics collaborator.
pub fn on_contact(state: &mut GameState, id_a: u32, id_b: u32) -> bool {
    merge(state, id_a, id_b)
}

/// Game over the instant any resting ball sits strictly below the floor line
fn is_game_over(state: &GameState) -> bool {
    match state.min_resting_y() {
        Some(min_y) => min_y < state.tube.end_y,
        None => false,
    }
}

fn press(state: &mut GameState) {
    let value = spawn_value_default(&mut state.rng);
    let radius = super::spawn::radius_for_value(value);

    state.spawn_x = state.tube.spawn_midpoint(radius);
    state.spawn_y = state.tube.spawn_y(radius);
    state.prev_press = None;
    state.current_press = None;

    let id = state.next_entity_id();
    let falling = Ball::new(id, value, Vec2::new(state.spawn_x, state.spawn_y));

    let rest_y = preview_rest_y(&state.tube, radius, state.spawn_x, &state.resting_circles());
    let mut preview = Ball::new(state.next_entity_id(), value, Vec2::new(state.spawn_x, rest_y));
    preview.set_opacity(state.settings.preview_opacity);

    state.events.push(GameEvent::Spawned { id, value });
    log::debug!("spawned ball {id} value {value} at x {}", state.spawn_x);

    state.falling = Some(falling);
    state.preview = Some(preview);
    state.phase = GamePhase::Aiming;
}

fn record_pointer(state: &mut GameState, pointer: Vec2) {
    match state.current_press {
        None => {
            state.prev_press = Some(pointer);
            state.current_press = Some(pointer);
        }
        Some(current) => {
            state.prev_press = Some(current);
            state.current_press = Some(pointer);
        }
    }
}

/// Re-aim the falling ball and re-solve the preview ghost
fn update_aim(state: &mut GameState) {
    let Some(falling) = state.falling.as_ref() else {
        return;
    };
    let radius = falling.body.radius;

    if let (Some(prev), Some(current)) = (state.prev_press, state.current_press) {
        let (lo, hi) = state.tube.usable_x_range(radius);
        let delta_x = (current.x - prev.x) * DRAG_SENSITIVITY;
        state.spawn_x = (state.spawn_x + delta_x).clamp(lo, hi);
        // Consume the delta so a held-still pointer stops moving the aim
        state.prev_press = state.current_press;
    }
    state.spawn_y = state.tube.spawn_y(radius);

    if let Some(falling) = state.falling.as_mut() {
        falling.body.pos = Vec2::new(state.spawn_x, state.spawn_y);
    }

    let rest_y = preview_rest_y(&state.tube, radius, state.spawn_x, &state.resting_circles());
    if let Some(preview) = state.preview.as_mut() {
        preview.body.pos = Vec2::new(state.spawn_x, rest_y);
    }
}

/// Hand the falling ball to the physics collaborator and discard the ghost
fn release(state: &mut GameState) {
    state.preview = None;

    if let Some(mut ball) = state.falling.take() {
        ball.body.enable_simulation();
        state.events.push(GameEvent::Dropped {
            id: ball.id,
            value: ball.value,
        });
        log::debug!("dropped ball {} value {}", ball.id, ball.value);
        state.balls.push(ball);
    }

    state.prev_press = None;
    state.current_press = None;
    state.phase = GamePhase::Idle;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tube::{TubeBoundary, TubeShape};
    use crate::store::{MemoryStore, ScoreStore};
    use crate::Settings;

    fn test_tube() -> TubeBoundary {
        TubeBoundary::from_extents(-5.0, 5.0, 3.0, -5.0, TubeShape::default())
    }

    fn new_session(store: &MemoryStore) -> GameState {
        GameState::new(9, test_tube(), Settings::default(), store)
    }

    #[test]
    fn test_press_creates_falling_and_preview() {
        let mut store = MemoryStore::default();
        let mut state = new_session(&store);

        tick(&mut state, &TickInput { press: true, ..Default::default() }, &mut store);

        assert_eq!(state.phase, GamePhase::Aiming);
        let falling = state.falling.as_ref().unwrap();
        let preview = state.preview.as_ref().unwrap();
        assert_eq!(falling.value, preview.value);
        assert!(!falling.body.simulated);
        assert!((preview.visual.opacity - 0.4).abs() < 1e-6);
        // Ghost rests below the falling ball, inside the tube
        assert!(preview.body.pos.y < falling.body.pos.y);
        assert!(preview.body.pos.y >= state.tube.floor_level());
    }

    #[test]
    fn test_hold_drags_aim_clamped() {
        let mut store = MemoryStore::default();
        let mut state = new_session(&store);

        tick(&mut state, &TickInput { press: true, ..Default::default() }, &mut store);
        let start_x = state.spawn_x();

        // Drag right, far past the wall
        tick(
            &mut state,
            &TickInput { pointer: Some(Vec2::new(0.0, 0.0)), ..Default::default() },
            &mut store,
        );
        tick(
            &mut state,
            &TickInput { pointer: Some(Vec2::new(50.0, 0.0)), ..Default::default() },
            &mut store,
        );

        let radius = state.falling.as_ref().unwrap().body.radius;
        let (_, hi) = state.tube.usable_x_range(radius);
        assert!(state.spawn_x() > start_x);
        assert!((state.spawn_x() - hi).abs() < 1e-5);

        // Falling ball and ghost follow the aim
        assert_eq!(state.falling.as_ref().unwrap().body.pos.x, state.spawn_x());
        assert_eq!(state.preview.as_ref().unwrap().body.pos.x, state.spawn_x());
    }

    #[test]
    fn test_still_pointer_stops_drift() {
        let mut store = MemoryStore::default();
        let mut state = new_session(&store);
        tick(&mut state, &TickInput { press: true, ..Default::default() }, &mut store);

        let pointer = Some(Vec2::new(0.0, 0.0));
        tick(&mut state, &TickInput { pointer, ..Default::default() }, &mut store);
        tick(&mut state, &TickInput { pointer: Some(Vec2::new(0.5, 0.0)), ..Default::default() }, &mut store);
        let after_move = state.spawn_x();

        // Same pointer again: no further movement
        tick(&mut state, &TickInput { pointer: Some(Vec2::new(0.5, 0.0)), ..Default::default() }, &mut store);
        assert_eq!(state.spawn_x(), after_move);
    }

    #[test]
    fn test_release_transfers_ownership() {
        let mut store = MemoryStore::default();
        let mut state = new_session(&store);

        tick(&mut state, &TickInput { press: true, ..Default::default() }, &mut store);
        tick(&mut state, &TickInput { release: true, ..Default::default() }, &mut store);

        assert_eq!(state.phase, GamePhase::Idle);
        assert!(state.falling.is_none());
        assert!(state.preview.is_none());
        assert_eq!(state.balls.len(), 1);
        assert!(state.balls[0].body.simulated);
    }

    #[test]
    fn test_game_over_boundary_is_strict() {
        let mut store = MemoryStore::default();
        let mut state = new_session(&store);

        let id = state.next_entity_id();
        let mut ball = Ball::new(id, 4, Vec2::new(0.0, state.tube.end_y));
        ball.body.enable_simulation();
        state.balls.push(ball);

        // Exactly at end_y: still alive
        tick(&mut state, &TickInput::default(), &mut store);
        assert_eq!(state.phase, GamePhase::Idle);

        // Any amount below: terminal
        state.balls[0].body.pos.y = state.tube.end_y - 1e-4;
        tick(&mut state, &TickInput::default(), &mut store);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.contains(&GameEvent::GameOver { score: 4 }));
        assert_eq!(store.load_int("CurrentScore", 0), 4);
    }

    #[test]
    fn test_tick_is_inert_after_game_over() {
        let mut store = MemoryStore::default();
        let mut state = new_session(&store);
        state.phase = GamePhase::GameOver;
        let ticks_before = state.time_ticks;
        tick(&mut state, &TickInput { press: true, ..Default::default() }, &mut store);
        assert_eq!(state.time_ticks, ticks_before);
        assert!(state.falling.is_none());
    }

    #[test]
    fn test_score_tracks_max_and_persists_best() {
        let mut store = MemoryStore::default();
        let mut state = new_session(&store);

        let id = state.next_entity_id();
        let mut ball = Ball::new(id, 16, Vec2::new(0.0, -4.0));
        ball.body.enable_simulation();
        state.balls.push(ball);

        tick(&mut state, &TickInput::default(), &mut store);
        assert_eq!(state.scores.current, 16);
        assert_eq!(store.load_int("BestScore", 0), 16);

        // Best is monotonic even when current drops
        state.balls.clear();
        tick(&mut state, &TickInput::default(), &mut store);
        assert_eq!(state.scores.current, 0);
        assert_eq!(state.scores.best, 16);
        assert_eq!(store.load_int("BestScore", 0), 16);
    }

    #[test]
    fn test_end_to_end_merge_scenario() {
        // Two touching value-4 balls on the floor merge into one value 8
        // at the surviving ball's position
        let mut store = MemoryStore::default();
        let mut state = new_session(&store);

        for x in [-0.5f32, 0.5] {
            let id = state.next_entity_id();
            let mut ball = Ball::new(id, 4, Vec2::new(x, -4.3));
            ball.body.radius = 0.7;
            ball.body.enable_simulation();
            state.balls.push(ball);
        }

        tick(&mut state, &TickInput::default(), &mut store);

        assert_eq!(state.balls.len(), 1);
        let survivor = &state.balls[0];
        assert_eq!(survivor.value, 8);
        // Equal Y: lower id survives at its original position
        assert_eq!(survivor.id, 1);
        assert_eq!(survivor.body.pos, Vec2::new(-0.5, -4.3));

        // Next tick the score follows the merged value
        tick(&mut state, &TickInput::default(), &mut store);
        assert_eq!(state.scores.current, 8);
    }

    #[test]
    fn test_on_contact_routes_to_merge() {
        let mut store = MemoryStore::default();
        let mut state = new_session(&store);
        for x in [-0.5f32, 0.5] {
            let id = state.next_entity_id();
            let mut ball = Ball::new(id, 4, Vec2::new(x, -4.3));
            ball.body.enable_simulation();
            state.balls.push(ball);
        }
        assert!(on_contact(&mut state, 1, 2));
        assert_eq!(state.balls.len(), 1);
        assert_eq!(state.balls[0].value, 8);
    }
}
