//! Merge protocol
//!
//! Two touching resting balls of equal value collapse into one ball of
//! double value. The upper ball (greater Y) is destroyed; the lower ball
//! doubles in place, preserving its position and simulation state. Ties on
//! Y are broken by id: the greater id is destroyed, so the outcome is
//! independent of argument order.

use super::state::{GameEvent, GameState};

/// Resolve a contact between two resting balls
///
/// No-op (returns false) unless both ids are resting, simulated, and carry
/// equal values. Contacts between unequal balls are legitimate and ignored.
pub fn merge(state: &mut GameState, id_a: u32, id_b: u32) -> bool {
    if id_a == id_b {
        return false;
    }
    let (Some(index_a), Some(index_b)) = (state.ball_index(id_a), state.ball_index(id_b)) else {
        return false;
    };

    let a = &state.balls[index_a];
    let b = &state.balls[index_b];
    if !a.body.simulated || !b.body.simulated || a.value != b.value {
        return false;
    }

    // The upper ball dies; on equal Y the greater id dies
    let a_is_upper = match a.body.pos.y.total_cmp(&b.body.pos.y) {
        std::cmp::Ordering::Greater => true,
        std::cmp::Ordering::Less => false,
        std::cmp::Ordering::Equal => a.id > b.id,
    };
    let (destroyed_id, surviving_id, survivor_index) = if a_is_upper {
        (id_a, id_b, index_b)
    } else {
        (id_b, id_a, index_a)
    };

    let new_value = a.value * 2;
    state.balls[survivor_index].set_value(new_value);
    state.remove_ball(destroyed_id);

    state.events.push(GameEvent::Merged {
        surviving_id,
        destroyed_id,
        new_value,
    });
    log::info!("merged {destroyed_id} into {surviving_id}, value {new_value}");
    true
}

/// Per-frame manual collision scan
///
/// Iterates unordered pairs of resting balls and performs at most one merge,
/// stopping immediately so the collection is never invalidated mid-scan.
/// Returns the merged pair's ids if a merge happened.
pub fn scan_and_merge(state: &mut GameState) -> Option<(u32, u32)> {
    for i in 0..state.balls.len() {
        for j in (i + 1)..state.balls.len() {
            let a = &state.balls[i];
            let b = &state.balls[j];
            if a.value == b.value && a.body.as_circle().overlaps(&b.body.as_circle()) {
                let (id_a, id_b) = (a.id, b.id);
                if merge(state, id_a, id_b) {
                    return Some((id_a, id_b));
                }
            }
        }
    }
    None
}
