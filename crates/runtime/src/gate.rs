//! Store-backed puzzle gate.
use std::sync::Arc;

use game_core::{LevelId, Puzzle, gate};

use crate::repository::{PuzzleStore, Result};

/// Answers whether a level's exit is open by reading its puzzles.
///
/// Read-only: the gate never mutates puzzle or player state.
#[derive(Clone)]
pub struct PuzzleGate {
    puzzles: Arc<dyn PuzzleStore>,
}

impl PuzzleGate {
    pub fn new(puzzles: Arc<dyn PuzzleStore>) -> Self {
        Self { puzzles }
    }

    pub async fn is_satisfied(&self, level_id: LevelId) -> Result<bool> {
        let puzzles = self.puzzles.get_all_by_level_id(level_id).await?;
        Ok(gate::is_satisfied(&puzzles))
    }

    /// The puzzle the terminal should present for this level.
    pub async fn active_puzzle(&self, level_id: LevelId) -> Result<Option<Puzzle>> {
        let mut puzzles = self.puzzles.get_all_by_level_id(level_id).await?;
        if gate::active_puzzle(&puzzles).is_none() {
            return Ok(None);
        }
        Ok(Some(puzzles.swap_remove(0)))
    }
}
