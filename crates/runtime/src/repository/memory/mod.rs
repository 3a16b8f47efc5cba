//! In-memory store implementations for testing and development.

mod level;
mod player;
mod puzzle;

pub use level::InMemoryLevelStore;
pub use player::InMemoryPlayerStore;
pub use puzzle::InMemoryPuzzleStore;
