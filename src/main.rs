//! Headless demo driver
//!
//! Runs a scripted session: press, a short aiming drag, release, repeat.
//! There is no rigid-body engine in this binary, so each dropped ball is
//! settled at the solver's predicted rest position before the next drop.

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use glam::Vec2;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use tube_merge::Settings;
    use tube_merge::sim::{
        GameEvent, GamePhase, GameState, TickInput, TubeBoundary, TubeShape, Viewport,
        preview_rest_y, tick,
    };
    use tube_merge::store::JsonFileStore;

    /// Stand-in for the physics collaborator: drop the newest ball straight
    /// down to where the solver says it rests
    fn settle_last_ball(state: &mut GameState) {
        let Some(ball) = state.balls.last() else {
            return;
        };
        let (id, radius, x) = (ball.id, ball.body.radius, ball.body.pos.x);
        let obstacles: Vec<_> = state
            .balls
            .iter()
            .filter(|b| b.id != id)
            .map(|b| b.body.as_circle())
            .collect();
        let rest_y = preview_rest_y(&state.tube, radius, x, &obstacles);
        if let Some(ball) = state.balls.last_mut() {
            ball.body.pos.y = rest_y;
        }
    }

    pub fn run() {
        env_logger::init();

        let seed = std::env::args()
            .nth(1)
            .and_then(|arg| arg.parse().ok())
            .unwrap_or(42u64);
        log::info!("starting demo session, seed {seed}");

        let mut store = JsonFileStore::open("tube-merge-scores.json");
        let tube = TubeBoundary::from_viewport(TubeShape::default(), Viewport::new(900, 1600));
        let mut state = GameState::new(seed, tube, Settings::default(), &store);
        let mut drift_rng = Pcg32::seed_from_u64(seed ^ 0x5eed);

        for drop_index in 0..40 {
            if state.phase == GamePhase::GameOver {
                break;
            }

            tick(&mut state, &TickInput { press: true, ..Default::default() }, &mut store);

            let mut pointer = Vec2::ZERO;
            for _ in 0..8 {
                pointer.x += drift_rng.random_range(-0.6..0.6f32);
                tick(
                    &mut state,
                    &TickInput { pointer: Some(pointer), ..Default::default() },
                    &mut store,
                );
            }

            tick(&mut state, &TickInput { release: true, ..Default::default() }, &mut store);
            settle_last_ball(&mut state);

            // Quiet ticks so chained merges resolve one per frame
            for _ in 0..6 {
                tick(&mut state, &TickInput::default(), &mut store);
            }

            for event in state.drain_events() {
                match event {
                    GameEvent::Merged { new_value, .. } => {
                        println!("drop {drop_index}: merge -> {new_value}");
                    }
                    GameEvent::GameOver { score } => {
                        println!("game over at score {score}");
                    }
                    _ => {}
                }
            }
        }

        println!(
            "session done: score {}, best {}, {} balls resting",
            state.scores.current,
            state.scores.best,
            state.balls.len()
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {}
