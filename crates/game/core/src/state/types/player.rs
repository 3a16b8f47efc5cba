use super::common::{PlayerId, Vector2};
use crate::config::GameConfig;

/// The controllable character and its persistent progress.
///
/// Position and velocity are owned by the player and mutated only by the
/// per-tick pipeline. `current_level` is the 1-based order number of the level
/// the player is currently in.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    /// Anchor point (bottom-centre of the collision box).
    pub position: Vector2,
    pub velocity: Vector2,
    pub is_jumping: bool,
    pub is_facing_right: bool,
    pub health: i32,
    pub total_score: u64,
    pub current_level: u32,
}

impl Player {
    pub const DEFAULT_HEALTH: i32 = 100;

    /// Creates a fresh profile standing at the default spawn point of level 1.
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            position: GameConfig::SPAWN_POINT,
            velocity: Vector2::ZERO,
            is_jumping: false,
            is_facing_right: true,
            health: Self::DEFAULT_HEALTH,
            total_score: 0,
            current_level: 1,
        }
    }

    /// Places the player at `position`, standing still.
    pub fn respawn_at(&mut self, position: Vector2) {
        self.position = position;
        self.velocity = Vector2::ZERO;
        self.is_jumping = false;
    }
}
