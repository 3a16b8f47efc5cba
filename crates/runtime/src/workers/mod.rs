//! Worker tasks that back the runtime orchestration.
//!
//! The progression worker owns the live session. Sandbox runs are spawned
//! per submission from the handle and report back through its commands.

mod progression;

pub use progression::{Command, ProgressionWorker, SessionSeed};
