//! Proximity queries between the player and interactable things.

use crate::state::{ExitZone, Npc, Player};

/// Finds the closest active NPC strictly within `radius` of the anchor.
///
/// Inactive NPCs are skipped. Ties go to the NPC listed first.
pub fn nearest_active_npc<'a>(player: &Player, npcs: &'a [Npc], radius: f32) -> Option<&'a Npc> {
    let mut best: Option<(&Npc, f32)> = None;

    for npc in npcs.iter().filter(|npc| npc.is_active) {
        let distance = player.position.distance(npc.position);
        if distance >= radius {
            continue;
        }
        match best {
            Some((_, best_distance)) if best_distance <= distance => {}
            _ => best = Some((npc, distance)),
        }
    }

    best.map(|(npc, _)| npc)
}

/// Checks a single NPC against the radius, regardless of any other NPC.
pub fn is_within_radius(player: &Player, npc: &Npc, radius: f32) -> bool {
    player.position.distance(npc.position) < radius
}

/// True while the anchor is inside the exit zone.
pub fn in_exit_zone(player: &Player, zone: &ExitZone) -> bool {
    zone.contains(player.position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{NpcId, PlayerId, Vector2};

    fn player_at_origin() -> Player {
        let mut player = Player::new(PlayerId(1), "tester");
        player.position = Vector2::ZERO;
        player
    }

    fn npc(id: u32, x: f32) -> Npc {
        Npc::new(NpcId(id), format!("npc-{id}"), Vector2::new(x, 0.0))
    }

    #[test]
    fn selects_only_npc_inside_radius() {
        let player = player_at_origin();
        let npcs = vec![npc(1, 120.0), npc(2, 40.0), npc(3, 200.0)];

        let nearest = nearest_active_npc(&player, &npcs, 50.0);

        assert_eq!(nearest.map(|n| n.id), Some(NpcId(2)));
    }

    #[test]
    fn none_when_everyone_is_far() {
        let player = player_at_origin();
        let npcs = vec![npc(1, 120.0), npc(2, 60.0), npc(3, 200.0)];

        assert!(nearest_active_npc(&player, &npcs, 50.0).is_none());
    }

    #[test]
    fn radius_is_exclusive() {
        let player = player_at_origin();
        let npcs = vec![npc(1, 50.0)];

        assert!(nearest_active_npc(&player, &npcs, 50.0).is_none());
        assert!(!is_within_radius(&player, &npcs[0], 50.0));
    }

    #[test]
    fn ties_go_to_first_listed() {
        let player = player_at_origin();
        let npcs = vec![npc(1, 30.0), npc(2, -30.0)];

        let nearest = nearest_active_npc(&player, &npcs, 50.0);

        assert_eq!(nearest.map(|n| n.id), Some(NpcId(1)));
    }

    #[test]
    fn inactive_npcs_are_skipped() {
        let player = player_at_origin();
        let npcs = vec![npc(1, 10.0).inactive(), npc(2, 45.0)];

        let nearest = nearest_active_npc(&player, &npcs, 50.0);

        assert_eq!(nearest.map(|n| n.id), Some(NpcId(2)));
        // The per-NPC predicate ignores activity and other NPCs.
        assert!(is_within_radius(&player, &npcs[0], 50.0));
    }

    #[test]
    fn exit_zone_membership() {
        let zone = ExitZone::new(Vector2::new(700.0, 420.0), 80.0);
        let mut player = player_at_origin();

        player.position = Vector2::new(690.0, 415.0);
        assert!(in_exit_zone(&player, &zone));

        player.position = Vector2::new(100.0, 400.0);
        assert!(!in_exit_zone(&player, &zone));
    }
}
