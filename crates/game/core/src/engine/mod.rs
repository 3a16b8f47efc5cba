//! Per-tick simulation pipeline.
//!
//! [`step`] is the only place the player's body is advanced. It runs the
//! stages in a fixed order (input, gravity, integration, world clamp,
//! collision, interaction, exit-zone check) and reports what the runtime
//! needs to drive its state machine. Scheduling lives in the runtime; the
//! cadence itself is described by [`TimeStep`].

mod time;

pub use time::{FixedTimeStep, TimeStep};

use crate::collision::{self, Contact};
use crate::config::GameConfig;
use crate::input::InputState;
use crate::interaction;
use crate::physics;
use crate::state::{Level, NpcId, Player};

/// Observations gathered while stepping the player once.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepReport {
    pub contact: Contact,
    /// Closest active NPC within the interaction radius after moving.
    pub nearby_npc: Option<NpcId>,
    /// Whether the anchor ended the step inside the exit zone.
    pub in_exit_zone: bool,
}

/// Advances `player` by one tick inside `level`.
pub fn step(
    player: &mut Player,
    level: &Level,
    input: &InputState,
    config: &GameConfig,
) -> StepReport {
    physics::apply_input(player, input, config);
    physics::apply_gravity(player, config);
    physics::integrate(player);
    physics::clamp_to_world(player, config);

    let contact = collision::resolve(player, level.floor.as_ref(), &level.platforms, &config.hitbox);

    StepReport {
        contact,
        nearby_npc: scan(player, level, config),
        in_exit_zone: interaction::in_exit_zone(player, &config.exit_zone),
    }
}

/// Nearby-NPC lookup without moving the player.
pub fn scan(player: &Player, level: &Level, config: &GameConfig) -> Option<NpcId> {
    interaction::nearest_active_npc(player, &level.npcs, config.interaction_radius).map(|npc| npc.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{LevelId, Npc, Platform, PlayerId, Vector2};

    fn flat_level() -> Level {
        Level::new(LevelId(1), 1, "flat")
            .with_floor(Platform::solid(0.0, 400.0, 800.0, 40.0))
            .with_npc(Npc::new(NpcId(7), "guide", Vector2::new(160.0, 400.0)))
    }

    #[test]
    fn standing_player_stays_grounded() {
        let config = GameConfig::default();
        let level = flat_level();
        let mut player = Player::new(PlayerId(1), "tester");

        for _ in 0..30 {
            let report = step(&mut player, &level, &InputState::default(), &config);
            assert_eq!(report.contact, Contact::Floor);
        }

        assert_eq!(player.position, Vector2::new(100.0, 400.0));
        assert!(!player.is_jumping);
    }

    #[test]
    fn walking_right_reaches_npc_radius() {
        let config = GameConfig::default();
        let level = flat_level();
        let mut player = Player::new(PlayerId(1), "tester");
        let input = InputState {
            right: true,
            ..Default::default()
        };

        let mut met = None;
        for _ in 0..10 {
            let report = step(&mut player, &level, &input, &config);
            if report.nearby_npc.is_some() {
                met = report.nearby_npc;
                break;
            }
        }

        assert_eq!(met, Some(NpcId(7)));
        assert!(player.is_facing_right);
    }

    #[test]
    fn jump_leaves_and_returns_to_floor() {
        let config = GameConfig::default();
        let level = flat_level();
        let mut player = Player::new(PlayerId(1), "tester");

        let jump = InputState {
            up: true,
            ..Default::default()
        };
        let report = step(&mut player, &level, &jump, &config);
        assert_eq!(report.contact, Contact::Airborne);
        assert!(player.position.y < 400.0);

        let mut landed = false;
        for _ in 0..120 {
            let report = step(&mut player, &level, &InputState::default(), &config);
            if report.contact == Contact::Floor {
                landed = true;
                break;
            }
        }

        assert!(landed);
        assert_eq!(player.position.y, 400.0);
    }

    #[test]
    fn reports_exit_zone() {
        let config = GameConfig::default();
        let level = Level::new(LevelId(1), 1, "exit").with_floor(Platform::solid(0.0, 415.0, 800.0, 40.0));
        let mut player = Player::new(PlayerId(1), "tester");
        player.position = Vector2::new(690.0, 415.0);

        let report = step(&mut player, &level, &InputState::default(), &config);

        assert!(report.in_exit_zone);
        assert_eq!(player.position, Vector2::new(690.0, 415.0));
    }
}
