//! Raw key-state snapshot consumed by a single tick.

/// Boolean key flags sampled at the start of a tick.
///
/// The runtime copies these out of its shared atomic flags so a tick always
/// sees one consistent snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub space: bool,
}

impl InputState {
    /// Horizontal intent: -1 (left), 0 (none or both), 1 (right).
    pub fn horizontal(&self) -> i8 {
        match (self.left, self.right) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        }
    }

    pub fn jump_requested(&self) -> bool {
        self.up || self.space
    }
}
