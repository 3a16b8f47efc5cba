pub mod common;
pub mod player;
pub mod puzzle;
pub mod world;

// Re-export common types
pub use common::{LevelId, NpcId, PlayerId, PuzzleId, Vector2};

// Re-export the controllable character
pub use player::Player;

// Re-export puzzle definitions
pub use puzzle::Puzzle;

// Re-export level geometry and inhabitants
pub use world::{ExitZone, Level, Npc, Platform};
