use super::common::{LevelId, PuzzleId};

/// Programming exercise that gates a level's exit.
///
/// `is_completed` flips from `false` to `true` on the first correct
/// submission and is never reset by the runtime.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Puzzle {
    pub id: PuzzleId,
    pub level_id: LevelId,
    pub title: String,
    pub description: String,
    pub expected_output: String,
    pub starter_code: String,
    pub hints: Vec<String>,
    pub points: u32,
    pub is_completed: bool,
}

impl Puzzle {
    pub fn new(
        id: PuzzleId,
        level_id: LevelId,
        title: impl Into<String>,
        expected_output: impl Into<String>,
        points: u32,
    ) -> Self {
        Self {
            id,
            level_id,
            title: title.into(),
            description: String::new(),
            expected_output: expected_output.into(),
            starter_code: String::new(),
            hints: Vec::new(),
            points,
            is_completed: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_starter_code(mut self, starter_code: impl Into<String>) -> Self {
        self.starter_code = starter_code.into();
        self
    }

    pub fn with_hints<I, S>(mut self, hints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hints = hints.into_iter().map(Into::into).collect();
        self
    }

    /// Marks the puzzle solved.
    ///
    /// Returns `true` only on the first call; later calls leave the puzzle
    /// untouched so rewards are granted once.
    pub fn mark_completed(&mut self) -> bool {
        if self.is_completed {
            return false;
        }
        self.is_completed = true;
        true
    }
}
