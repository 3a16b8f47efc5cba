//! Per-tick dialogue countdown.
use game_core::{Npc, NpcId};

/// An open conversation with one NPC.
///
/// Dropping the session cancels its countdown.
#[derive(Debug, Clone)]
pub(super) struct DialogueSession {
    pub npc_id: NpcId,
    pub speaker: String,
    lines: Vec<String>,
    index: usize,
    ticks_per_line: u32,
    ticks_remaining: u32,
}

/// Result of advancing the conversation.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum DialogueStep {
    /// Still on the same line.
    Waiting,
    /// Moved to the line at this index.
    Line(usize),
    /// No lines left.
    Ended,
}

impl DialogueSession {
    /// `None` when the NPC has nothing to say.
    pub fn open(npc: &Npc, ticks_per_line: u32) -> Option<Self> {
        if npc.dialogue.is_empty() {
            return None;
        }
        let ticks_per_line = ticks_per_line.max(1);
        Some(Self {
            npc_id: npc.id,
            speaker: npc.name.clone(),
            lines: npc.dialogue.clone(),
            index: 0,
            ticks_per_line,
            ticks_remaining: ticks_per_line,
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total(&self) -> usize {
        self.lines.len()
    }

    pub fn current_line(&self) -> &str {
        self.lines.get(self.index).map_or("", String::as_str)
    }

    /// Counts one tick down; advances when the line's time is up.
    pub fn tick(&mut self) -> DialogueStep {
        self.ticks_remaining = self.ticks_remaining.saturating_sub(1);
        if self.ticks_remaining > 0 {
            return DialogueStep::Waiting;
        }
        self.advance()
    }

    /// Skips to the next line immediately.
    pub fn advance(&mut self) -> DialogueStep {
        self.index += 1;
        self.ticks_remaining = self.ticks_per_line;
        if self.index >= self.lines.len() {
            DialogueStep::Ended
        } else {
            DialogueStep::Line(self.index)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::Vector2;

    fn npc(lines: &[&str]) -> Npc {
        Npc::new(NpcId(1), "Oracle", Vector2::new(0.0, 0.0)).with_dialogue(lines.iter().copied())
    }

    #[test]
    fn silent_npc_opens_nothing() {
        assert!(DialogueSession::open(&npc(&[]), 3).is_none());
    }

    #[test]
    fn countdown_walks_every_line_then_ends() {
        let mut session = DialogueSession::open(&npc(&["a", "b"]), 2).unwrap();
        assert_eq!(session.current_line(), "a");
        assert_eq!(session.tick(), DialogueStep::Waiting);
        assert_eq!(session.tick(), DialogueStep::Line(1));
        assert_eq!(session.current_line(), "b");
        assert_eq!(session.tick(), DialogueStep::Waiting);
        assert_eq!(session.tick(), DialogueStep::Ended);
    }

    #[test]
    fn manual_advance_resets_countdown() {
        let mut session = DialogueSession::open(&npc(&["a", "b", "c"]), 2).unwrap();
        session.tick();
        assert_eq!(session.advance(), DialogueStep::Line(1));
        assert_eq!(session.tick(), DialogueStep::Waiting);
    }
}
