//! Score rewards for solving puzzles and finishing levels.
//!
//! Plain additive updates; totals are far from the `u64` limit in practice.

use crate::config::GameConfig;
use crate::state::{Level, Player};

/// Adds a puzzle's reward to the player's total. Returns the new total.
pub fn award_puzzle(player: &mut Player, points: u32) -> u64 {
    player.total_score += u64::from(points);
    player.total_score
}

/// Adds `level_completion_points × difficulty` to the total. Returns the
/// points granted.
pub fn award_level(player: &mut Player, level: &Level, config: &GameConfig) -> u64 {
    let points = config.level_completion_points * u64::from(level.difficulty);
    player.total_score += points;
    points
}
