//! Session state exposed to hosts.
use std::fmt;

use game_core::{Level, LevelId, NpcId, Player, PuzzleId};
use serde::Serialize;

/// Which overlay currently suspends the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Subview {
    Dialogue { npc_id: NpcId },
    Terminal { puzzle_id: Option<PuzzleId> },
}

/// Progression state machine.
///
/// Only `Running` advances the simulation; every other state keeps the
/// cadence ticking without touching the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProgressionState {
    Running,
    Paused,
    SuspendedForSubview(Subview),
    CompletingLevel,
    /// The final level was completed; the session accepts no more gameplay.
    Finished,
}

impl ProgressionState {
    pub fn name(&self) -> &'static str {
        match self {
            ProgressionState::Running => "running",
            ProgressionState::Paused => "paused",
            ProgressionState::SuspendedForSubview(Subview::Dialogue { .. }) => "dialogue",
            ProgressionState::SuspendedForSubview(Subview::Terminal { .. }) => "terminal",
            ProgressionState::CompletingLevel => "completing_level",
            ProgressionState::Finished => "finished",
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(self, ProgressionState::Running)
    }

    pub fn subview(&self) -> Option<Subview> {
        match self {
            ProgressionState::SuspendedForSubview(subview) => Some(*subview),
            _ => None,
        }
    }
}

impl fmt::Display for ProgressionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Identity of the loaded level without its geometry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelSummary {
    pub id: LevelId,
    pub order_number: u32,
    pub name: String,
    pub difficulty: u32,
}

impl From<&Level> for LevelSummary {
    fn from(level: &Level) -> Self {
        Self {
            id: level.id,
            order_number: level.order_number,
            name: level.name.clone(),
            difficulty: level.difficulty,
        }
    }
}

/// Read-only view of the session, republished after every change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    pub state: ProgressionState,
    pub player: Player,
    pub level: LevelSummary,
    pub status_message: Option<String>,
    pub interaction_hint: Option<String>,
    pub gate_satisfied: bool,
    /// Cadence ticks since the session started, including suspended ones.
    pub tick: u64,
}
