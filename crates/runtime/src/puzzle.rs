//! Puzzle submission handling.
//!
//! Runs a submission through the sandbox and records the first correct solve
//! in the puzzle store. Score is not touched here; the progression worker
//! owns the player and applies the reward when it hears about the solve.
use std::sync::Arc;

use game_core::{PuzzleId, ValidationResult};
use tokio::sync::Mutex;

use crate::repository::PuzzleStore;
use crate::sandbox::CodeExecutionSandbox;

pub struct PuzzleValidator {
    puzzles: Arc<dyn PuzzleStore>,
    sandbox: CodeExecutionSandbox,
    /// Serialises read-mark-write of completion flags.
    completion: Mutex<()>,
}

impl PuzzleValidator {
    pub fn new(puzzles: Arc<dyn PuzzleStore>, sandbox: CodeExecutionSandbox) -> Self {
        Self {
            puzzles,
            sandbox,
            completion: Mutex::new(()),
        }
    }

    pub fn sandbox(&self) -> &CodeExecutionSandbox {
        &self.sandbox
    }

    /// Validate `source` against the puzzle's expected output.
    ///
    /// `points_earned` is non-zero only for the submission that flips the
    /// puzzle to completed; later correct submissions earn nothing.
    pub async fn submit(&self, puzzle_id: PuzzleId, source: &str) -> ValidationResult {
        let puzzle = match self.puzzles.get_by_id(puzzle_id).await {
            Ok(Some(puzzle)) => puzzle,
            Ok(None) => {
                tracing::warn!(target: "runtime::puzzle", %puzzle_id, "puzzle not found");
                return ValidationResult::rejected(format!("Puzzle {puzzle_id} not found."));
            }
            Err(error) => {
                tracing::warn!(target: "runtime::puzzle", %puzzle_id, %error, "failed to load puzzle");
                return ValidationResult::rejected("Puzzle could not be loaded. Try again.");
            }
        };

        let result = self
            .sandbox
            .compile_and_run(source, &puzzle.expected_output)
            .await;

        if !result.success {
            let message = result
                .error_message()
                .unwrap_or_else(|| "Submission failed.".to_string());
            return ValidationResult::rejected(message);
        }

        self.record_completion(puzzle_id).await
    }

    async fn record_completion(&self, puzzle_id: PuzzleId) -> ValidationResult {
        let _guard = self.completion.lock().await;

        // Re-read under the lock so concurrent solves award once.
        let mut puzzle = match self.puzzles.get_by_id(puzzle_id).await {
            Ok(Some(puzzle)) => puzzle,
            Ok(None) => {
                tracing::warn!(target: "runtime::puzzle", %puzzle_id, "puzzle vanished before completion");
                return ValidationResult::rejected(format!("Puzzle {puzzle_id} not found."));
            }
            Err(error) => {
                tracing::warn!(target: "runtime::puzzle", %puzzle_id, %error, "failed to reload puzzle");
                return ValidationResult::accepted(
                    "Correct, but progress could not be saved. Submit again to retry.",
                    0,
                );
            }
        };

        if !puzzle.mark_completed() {
            return ValidationResult::accepted("Correct! This puzzle was already solved.", 0);
        }

        match self.puzzles.update(puzzle_id, &puzzle).await {
            Ok(true) => {
                tracing::info!(
                    target: "runtime::puzzle",
                    %puzzle_id,
                    points = puzzle.points,
                    "puzzle solved"
                );
                ValidationResult::accepted(
                    format!("Correct! +{} points", puzzle.points),
                    puzzle.points,
                )
            }
            Ok(false) => {
                tracing::warn!(target: "runtime::puzzle", %puzzle_id, "puzzle vanished before completion");
                ValidationResult::rejected(format!("Puzzle {puzzle_id} not found."))
            }
            Err(error) => {
                tracing::warn!(target: "runtime::puzzle", %puzzle_id, %error, "failed to persist puzzle completion");
                ValidationResult::accepted(
                    "Correct, but progress could not be saved. Submit again to retry.",
                    0,
                )
            }
        }
    }
}
