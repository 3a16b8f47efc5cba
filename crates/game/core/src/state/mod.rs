//! Authoritative gameplay data model.
//!
//! This module owns the data structures that describe the player, the level
//! geometry, NPCs and puzzles. The runtime loads them from stores, mutates the
//! player exclusively through the per-tick pipeline, and treats everything
//! else as read-only.
pub mod types;

pub use types::{
    ExitZone, Level, LevelId, Npc, NpcId, Platform, Player, PlayerId, Puzzle, PuzzleId, Vector2,
};
