//! Current/best score tracking
//!
//! The score of a run is the largest resting ball value. Best score is
//! cached here and written through the store the moment it increases, so it
//! is monotonic within a session and across sessions.

use crate::store::ScoreStore;

/// Store key for the just-ended run's score
pub const CURRENT_SCORE_KEY: &str = "CurrentScore";
/// Store key for the all-time best score
pub const BEST_SCORE_KEY: &str = "BestScore";

#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreBoard {
    pub current: u32,
    pub best: u32,
}

impl ScoreBoard {
    /// Initialize from the persisted best score
    pub fn load(store: &dyn ScoreStore) -> Self {
        Self {
            current: 0,
            best: store.load_int(BEST_SCORE_KEY, 0).max(0) as u32,
        }
    }

    /// Set the current score, persisting a new best immediately
    pub fn update(&mut self, current: u32, store: &mut dyn ScoreStore) {
        self.current = current;
        if current > self.best {
            self.best = current;
            store.store_int(BEST_SCORE_KEY, current as i64);
            log::info!("new best score {current}");
        }
    }

    /// Persist the run's final score on game over
    pub fn finalize(&self, store: &mut dyn ScoreStore) {
        store.store_int(CURRENT_SCORE_KEY, self.current as i64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_best_written_through_on_increase() {
        let mut store = MemoryStore::default();
        let mut board = ScoreBoard::load(&store);

        board.update(8, &mut store);
        assert_eq!(board.best, 8);
        assert_eq!(store.load_int(BEST_SCORE_KEY, 0), 8);

        board.update(4, &mut store);
        assert_eq!(board.current, 4);
        assert_eq!(board.best, 8);
        assert_eq!(store.load_int(BEST_SCORE_KEY, 0), 8);
    }

    #[test]
    fn test_best_survives_reload() {
        let mut store = MemoryStore::default();
        {
            let mut board = ScoreBoard::load(&store);
            board.update(256, &mut store);
        }
        let board = ScoreBoard::load(&store);
        assert_eq!(board.best, 256);
        assert_eq!(board.current, 0);
    }

    #[test]
    fn test_finalize_persists_current() {
        let mut store = MemoryStore::default();
        let mut board = ScoreBoard::load(&store);
        board.update(32, &mut store);
        board.finalize(&mut store);
        assert_eq!(store.load_int(CURRENT_SCORE_KEY, 0), 32);
    }
}
