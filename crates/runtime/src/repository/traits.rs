//! Store contracts for the data the runtime reads and writes.
//!
//! The document store behind these traits is an external collaborator; the
//! runtime only relies on the narrow operations below. Missing records are
//! `Ok(None)`, never an error.

use async_trait::async_trait;
use game_core::{Level, LevelId, Player, PlayerId, Puzzle, PuzzleId};

use super::error::Result;

/// Player profiles.
#[async_trait]
pub trait PlayerStore: Send + Sync {
    async fn get_by_id(&self, id: PlayerId) -> Result<Option<Player>>;

    /// Overwrites the stored profile (last write wins, no version check).
    ///
    /// Returns `false` if no profile with this id exists.
    async fn update(&self, id: PlayerId, player: &Player) -> Result<bool>;
}

/// Level definitions, addressed by their 1-based order number.
#[async_trait]
pub trait LevelStore: Send + Sync {
    /// Returns the level with its NPC objects already resolved.
    async fn get_by_order_number(&self, order_number: u32) -> Result<Option<Level>>;

    async fn total_count(&self) -> Result<u32>;
}

/// Puzzle definitions and their completion state.
#[async_trait]
pub trait PuzzleStore: Send + Sync {
    /// Puzzles attached to a level, in store order.
    async fn get_all_by_level_id(&self, level_id: LevelId) -> Result<Vec<Puzzle>>;

    async fn get_by_id(&self, id: PuzzleId) -> Result<Option<Puzzle>>;

    /// Overwrites the stored puzzle. Returns `false` if it does not exist.
    async fn update(&self, id: PuzzleId, puzzle: &Puzzle) -> Result<bool>;
}
