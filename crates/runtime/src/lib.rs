//! Runtime orchestration for the puzzle-gated platformer.
//!
//! This crate wires the deterministic rules from `game-core` to stores, a
//! fixed-cadence progression worker and the code execution sandbox. Hosts
//! embed [`Runtime`] to run a session, feed key state and commands through
//! [`RuntimeHandle`], and observe it via the snapshot watch and topic events.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`sandbox`], [`puzzle`] and [`gate`] decide whether a level's exit opens
//! - [`repository`] defines store contracts and in-memory implementations
//! - [`workers`] keeps background tasks internal to the crate
pub mod api;
pub mod config;
pub mod events;
pub mod gate;
pub mod puzzle;
pub mod repository;
pub mod runtime;
pub mod sandbox;

mod workers;

pub use api::{
    InputFlags, LevelSummary, ProgressionState, Result, RuntimeError, RuntimeHandle,
    SessionSnapshot, Subview,
};
pub use config::{RuntimeConfig, SandboxConfig, ToolCommand};
pub use events::{
    Event, EventBus, InteractionEvent, LevelEvent, PuzzleEvent, SaveReason, SessionEvent,
    StatusEvent, Topic,
};
pub use gate::PuzzleGate;
pub use puzzle::PuzzleValidator;
pub use repository::{
    InMemoryLevelStore, InMemoryPlayerStore, InMemoryPuzzleStore, LevelStore, PlayerStore,
    PuzzleStore, RepositoryError, Stores,
};
pub use runtime::{Runtime, RuntimeBuilder};
pub use sandbox::{CodeExecutionSandbox, CompilationResult, SandboxError, Stage};
