//! Gravity and Euler integration for the player body.
//!
//! One step per tick, no substepping, no delta-time scaling. None of these
//! operations can fail; they only mutate the player they are given.

use crate::config::GameConfig;
use crate::input::InputState;
use crate::state::Player;

/// Adds gravity to `velocity.y` and clamps it to the maximum fall speed.
pub fn apply_gravity(player: &mut Player, config: &GameConfig) {
    player.velocity.y = (player.velocity.y + config.gravity).min(config.max_fall_speed);
}

/// Advances the position by the current velocity.
pub fn integrate(player: &mut Player) {
    player.position += player.velocity;
}

/// Keeps the anchor inside `[0, world_width]` on the X axis.
pub fn clamp_to_world(player: &mut Player, config: &GameConfig) {
    player.position.x = player.position.x.clamp(0.0, config.world_width);
}

/// Translates key flags into horizontal velocity, facing and jump impulse.
///
/// A jump only starts while the player is not already airborne.
pub fn apply_input(player: &mut Player, input: &InputState, config: &GameConfig) {
    match input.horizontal() {
        -1 => {
            player.velocity.x = -config.move_speed;
            player.is_facing_right = false;
        }
        1 => {
            player.velocity.x = config.move_speed;
            player.is_facing_right = true;
        }
        _ => player.velocity.x = 0.0,
    }

    if input.jump_requested() && !player.is_jumping {
        player.velocity.y = config.jump_velocity;
        player.is_jumping = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{PlayerId, Vector2};

    fn falling_player() -> Player {
        let mut player = Player::new(PlayerId(1), "tester");
        player.is_jumping = true;
        player
    }

    #[test]
    fn gravity_accumulates_until_terminal_velocity() {
        let config = GameConfig::default();

        for n in 0..60u32 {
            let mut player = falling_player();
            for _ in 0..n {
                apply_gravity(&mut player, &config);
            }
            let expected = (0.8 * n as f32).min(20.0);
            assert!(
                (player.velocity.y - expected).abs() < 1e-3,
                "after {n} steps expected {expected}, got {}",
                player.velocity.y
            );
        }
    }

    #[test]
    fn integrate_moves_by_velocity() {
        let mut player = falling_player();
        player.position = Vector2::new(10.0, 20.0);
        player.velocity = Vector2::new(3.0, -4.0);

        integrate(&mut player);

        assert_eq!(player.position, Vector2::new(13.0, 16.0));
    }

    #[test]
    fn clamps_to_world_bounds() {
        let config = GameConfig::default();
        let mut player = falling_player();

        player.position.x = -12.0;
        clamp_to_world(&mut player, &config);
        assert_eq!(player.position.x, 0.0);

        player.position.x = config.world_width + 50.0;
        clamp_to_world(&mut player, &config);
        assert_eq!(player.position.x, config.world_width);
    }

    #[test]
    fn input_sets_direction_and_jump() {
        let config = GameConfig::default();
        let mut player = Player::new(PlayerId(1), "tester");

        let input = InputState {
            left: true,
            up: true,
            ..Default::default()
        };
        apply_input(&mut player, &input, &config);

        assert_eq!(player.velocity.x, -config.move_speed);
        assert!(!player.is_facing_right);
        assert_eq!(player.velocity.y, config.jump_velocity);
        assert!(player.is_jumping);
    }

    #[test]
    fn no_double_jump_while_airborne() {
        let config = GameConfig::default();
        let mut player = falling_player();
        player.velocity.y = 3.0;

        let input = InputState {
            space: true,
            ..Default::default()
        };
        apply_input(&mut player, &input, &config);

        assert_eq!(player.velocity.y, 3.0);
    }

    #[test]
    fn opposing_keys_cancel_out() {
        let config = GameConfig::default();
        let mut player = Player::new(PlayerId(1), "tester");
        player.velocity.x = 5.0;

        let input = InputState {
            left: true,
            right: true,
            ..Default::default()
        };
        apply_input(&mut player, &input, &config);

        assert_eq!(player.velocity.x, 0.0);
        assert!(player.is_facing_right);
    }
}
