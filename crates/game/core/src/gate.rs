//! Puzzle gate rule.
//!
//! A level's exit opens when the level has no puzzle, or when its active
//! puzzle has been solved. The active puzzle is the first one in store order;
//! further puzzles attached to the same level do not affect the gate.

use crate::state::Puzzle;

/// The puzzle currently gating the level, if any.
pub fn active_puzzle(puzzles: &[Puzzle]) -> Option<&Puzzle> {
    puzzles.first()
}

/// Read-and-decide: no mutation happens here.
pub fn is_satisfied(puzzles: &[Puzzle]) -> bool {
    active_puzzle(puzzles).is_none_or(|puzzle| puzzle.is_completed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{LevelId, PuzzleId};

    fn puzzle(completed: bool) -> Puzzle {
        let mut puzzle = Puzzle::new(PuzzleId(1), LevelId(1), "hello", "Aletheia", 150);
        puzzle.is_completed = completed;
        puzzle
    }

    #[test]
    fn level_without_puzzles_is_open() {
        assert!(is_satisfied(&[]));
    }

    #[test]
    fn single_puzzle_gates_until_completed() {
        assert!(!is_satisfied(&[puzzle(false)]));
        assert!(is_satisfied(&[puzzle(true)]));
    }

    #[test]
    fn only_the_active_puzzle_counts() {
        assert!(is_satisfied(&[puzzle(true), puzzle(false)]));
        assert!(!is_satisfied(&[puzzle(false), puzzle(true)]));
    }
}
