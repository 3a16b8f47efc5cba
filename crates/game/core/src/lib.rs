//! Deterministic platformer rules shared by the runtime and offline tools.
//!
//! `game-core` defines the canonical data model (players, levels, platforms,
//! NPCs, puzzles) and the pure per-tick pipeline: input, gravity, integration,
//! collision, interaction and exit-zone detection. Everything here is
//! synchronous and free of I/O; the `runtime` crate owns scheduling,
//! persistence and the code sandbox.
pub mod collision;
pub mod config;
pub mod engine;
pub mod gate;
pub mod input;
pub mod interaction;
pub mod physics;
pub mod score;
pub mod state;
pub mod validation;

pub use collision::{Aabb, Contact};
pub use config::{GameConfig, Hitbox};
pub use engine::{FixedTimeStep, StepReport, TimeStep, step};
pub use input::InputState;
pub use state::{
    ExitZone, Level, LevelId, Npc, NpcId, Platform, Player, PlayerId, Puzzle, PuzzleId, Vector2,
};
pub use validation::{ValidationResult, normalize_output, outputs_match};
