//! In-memory PuzzleStore implementation.

use std::sync::RwLock;

use async_trait::async_trait;
use game_core::{LevelId, Puzzle, PuzzleId};

use crate::repository::{PuzzleStore, RepositoryError, Result};

/// Puzzles kept in insertion order, which is the order
/// [`PuzzleStore::get_all_by_level_id`] reports.
pub struct InMemoryPuzzleStore {
    puzzles: RwLock<Vec<Puzzle>>,
}

impl InMemoryPuzzleStore {
    pub fn new() -> Self {
        Self {
            puzzles: RwLock::new(Vec::new()),
        }
    }

    pub fn with_puzzles(puzzles: impl IntoIterator<Item = Puzzle>) -> Self {
        Self {
            puzzles: RwLock::new(puzzles.into_iter().collect()),
        }
    }

    pub fn insert(&self, puzzle: Puzzle) -> Result<()> {
        let mut puzzles = self
            .puzzles
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        match puzzles.iter_mut().find(|p| p.id == puzzle.id) {
            Some(slot) => *slot = puzzle,
            None => puzzles.push(puzzle),
        }
        Ok(())
    }
}

impl Default for InMemoryPuzzleStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PuzzleStore for InMemoryPuzzleStore {
    async fn get_all_by_level_id(&self, level_id: LevelId) -> Result<Vec<Puzzle>> {
        let puzzles = self
            .puzzles
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(puzzles
            .iter()
            .filter(|p| p.level_id == level_id)
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, id: PuzzleId) -> Result<Option<Puzzle>> {
        let puzzles = self
            .puzzles
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(puzzles.iter().find(|p| p.id == id).cloned())
    }

    async fn update(&self, id: PuzzleId, puzzle: &Puzzle) -> Result<bool> {
        let mut puzzles = self
            .puzzles
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        match puzzles.iter_mut().find(|p| p.id == id) {
            Some(slot) => {
                *slot = puzzle.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
