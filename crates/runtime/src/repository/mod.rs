//! Repository layer for session data
//!
//! Stores hold data that outlives a session:
//! - Player profiles (position, score, level pointer)
//! - Level definitions with their NPCs
//! - Puzzles and their completion flags
//!
//! Implementations are injected into the runtime; the in-memory ones back
//! tests and the headless host.

mod error;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use memory::{InMemoryLevelStore, InMemoryPlayerStore, InMemoryPuzzleStore};
pub use traits::{LevelStore, PlayerStore, PuzzleStore};

use std::sync::Arc;

/// Bundle of the stores a session needs, shared between workers.
#[derive(Clone)]
pub struct Stores {
    pub players: Arc<dyn PlayerStore>,
    pub levels: Arc<dyn LevelStore>,
    pub puzzles: Arc<dyn PuzzleStore>,
}

impl Stores {
    pub fn new(
        players: Arc<dyn PlayerStore>,
        levels: Arc<dyn LevelStore>,
        puzzles: Arc<dyn PuzzleStore>,
    ) -> Self {
        Self {
            players,
            levels,
            puzzles,
        }
    }
}
