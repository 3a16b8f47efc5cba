use crate::state::{ExitZone, Vector2};

/// Player collision box, expressed as offsets from the anchor point.
///
/// The box spans `half_width` to each side of the anchor and `height` above
/// it; the anchor sits on the bottom edge.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hitbox {
    pub half_width: f32,
    pub height: f32,
}

impl Default for Hitbox {
    fn default() -> Self {
        Self {
            half_width: GameConfig::HITBOX_HALF_WIDTH,
            height: GameConfig::HITBOX_HEIGHT,
        }
    }
}

/// Game configuration constants and tunable parameters.
///
/// Units are world units per tick (velocities) and world units per tick²
/// (gravity); there is no delta-time scaling.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Downward acceleration applied to `velocity.y` every tick.
    pub gravity: f32,
    /// Upper bound for `velocity.y` after gravity is applied.
    pub max_fall_speed: f32,
    /// Horizontal speed while a direction key is held.
    pub move_speed: f32,
    /// Vertical velocity applied when a jump starts (negative is up).
    pub jump_velocity: f32,
    /// Right edge of the world; the left edge is 0.
    pub world_width: f32,
    pub hitbox: Hitbox,
    /// NPCs strictly closer than this can be talked to.
    pub interaction_radius: f32,
    /// Region that ends the level once the puzzle gate is satisfied.
    pub exit_zone: ExitZone,
    /// Where the player reappears after a level transition.
    pub spawn_point: Vector2,
    /// Points per difficulty step awarded on level completion.
    pub level_completion_points: u64,
}

impl GameConfig {
    // ===== physics =====
    pub const GRAVITY: f32 = 0.8;
    pub const MAX_FALL_SPEED: f32 = 20.0;
    pub const MOVE_SPEED: f32 = 5.0;
    pub const JUMP_VELOCITY: f32 = -15.0;

    // ===== geometry =====
    pub const WORLD_WIDTH: f32 = 800.0;
    pub const HITBOX_HALF_WIDTH: f32 = 20.0;
    pub const HITBOX_HEIGHT: f32 = 60.0;
    pub const SPAWN_POINT: Vector2 = Vector2::new(100.0, 400.0);

    // ===== interaction & progression =====
    pub const INTERACTION_RADIUS: f32 = 50.0;
    pub const EXIT_ZONE_CENTER: Vector2 = Vector2::new(700.0, 420.0);
    pub const EXIT_ZONE_RADIUS: f32 = 80.0;
    pub const LEVEL_COMPLETION_POINTS: u64 = 100;

    pub fn new() -> Self {
        Self {
            gravity: Self::GRAVITY,
            max_fall_speed: Self::MAX_FALL_SPEED,
            move_speed: Self::MOVE_SPEED,
            jump_velocity: Self::JUMP_VELOCITY,
            world_width: Self::WORLD_WIDTH,
            hitbox: Hitbox::default(),
            interaction_radius: Self::INTERACTION_RADIUS,
            exit_zone: ExitZone::new(Self::EXIT_ZONE_CENTER, Self::EXIT_ZONE_RADIUS),
            spawn_point: Self::SPAWN_POINT,
            level_completion_points: Self::LEVEL_COMPLETION_POINTS,
        }
    }

    pub fn with_exit_zone(mut self, exit_zone: ExitZone) -> Self {
        self.exit_zone = exit_zone;
        self
    }

    pub fn with_world_width(mut self, world_width: f32) -> Self {
        self.world_width = world_width;
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
