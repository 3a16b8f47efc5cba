//! Topic-based event bus for runtime events.
//!
//! Discrete happenings (state changes, level loads, puzzle solves) are
//! published to topics; consumers subscribe only to the topics they need.
//! Continuous state is served by the snapshot watch on the handle instead.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{InteractionEvent, LevelEvent, PuzzleEvent, SaveReason, SessionEvent, StatusEvent};
