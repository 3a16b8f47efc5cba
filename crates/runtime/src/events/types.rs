//! Event types for different topics.

use game_core::{LevelId, NpcId, PlayerId, PuzzleId};
use serde::Serialize;

use crate::api::ProgressionState;

/// Session lifecycle events
#[derive(Debug, Clone, Serialize)]
pub enum SessionEvent {
    StateChanged {
        from: ProgressionState,
        to: ProgressionState,
    },

    /// Player profile written to the store.
    Saved { player_id: PlayerId, reason: SaveReason },

    /// Persistence failed; the next save point retries implicitly.
    SaveFailed {
        player_id: PlayerId,
        reason: SaveReason,
        error: String,
    },

    /// Final level completed.
    Finished { total_score: u64 },
}

/// Why the player profile was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum SaveReason {
    Pause,
    LevelComplete,
    PuzzleSolved,
    Checkpoint,
    Manual,
    Shutdown,
}

/// Level transitions
#[derive(Debug, Clone, Serialize)]
pub enum LevelEvent {
    Loaded {
        level_id: LevelId,
        order_number: u32,
        name: String,
    },

    Completed {
        level_id: LevelId,
        order_number: u32,
        points_awarded: u64,
        total_score: u64,
    },
}

/// Status line text; published only when it changes.
#[derive(Debug, Clone, Serialize)]
pub struct StatusEvent {
    pub message: String,
}

/// Proximity hints and subview traffic
#[derive(Debug, Clone, Serialize)]
pub enum InteractionEvent {
    /// `None` clears the hint.
    HintChanged { hint: Option<String> },

    DialogueLine {
        npc_id: NpcId,
        speaker: String,
        line: String,
        index: usize,
        total: usize,
    },

    DialogueEnded { npc_id: NpcId },

    TerminalOpened { puzzle_id: Option<PuzzleId> },

    TerminalClosed,
}

/// Puzzle outcomes
#[derive(Debug, Clone, Serialize)]
pub enum PuzzleEvent {
    Solved {
        puzzle_id: PuzzleId,
        points_earned: u32,
        total_score: u64,
    },

    SubmissionRejected { puzzle_id: PuzzleId, message: String },

    GateChanged { level_id: LevelId, satisfied: bool },
}
