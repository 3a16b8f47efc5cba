//! Axis-aligned collision resolution against the floor and platforms.
//!
//! Only vertical landing is resolved. The floor is checked first; the generic
//! platform list is scanned in order and the **first** qualifying platform
//! wins, not the closest one. Overlapping platforms therefore resolve in list
//! order.

use crate::config::Hitbox;
use crate::state::{Platform, Player};

/// Axis-aligned bounding box in world coordinates (Y grows downwards).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Aabb {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn from_platform(platform: &Platform) -> Self {
        Self::new(
            platform.x,
            platform.y,
            platform.x + platform.width,
            platform.y + platform.height,
        )
    }

    /// Box derived from the player's anchor: `half_width` either side and
    /// `height` above.
    pub fn from_player(player: &Player, hitbox: &Hitbox) -> Self {
        let anchor = player.position;
        Self::new(
            anchor.x - hitbox.half_width,
            anchor.y - hitbox.height,
            anchor.x + hitbox.half_width,
            anchor.y,
        )
    }

    /// Strict overlap test; boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.right > other.left
            && self.left < other.right
            && self.bottom > other.top
            && self.top < other.bottom
    }

    /// True when this box sits exactly on top of `other` with horizontal
    /// overlap (bottom edge touching the other's top edge).
    pub fn rests_on(&self, other: &Aabb) -> bool {
        self.right > other.left && self.left < other.right && self.bottom == other.top
    }
}

/// Surface that grounded the player during resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Contact {
    Floor,
    /// Index into the level's platform list.
    Platform(usize),
    Airborne,
}

impl Contact {
    pub fn is_grounded(&self) -> bool {
        !matches!(self, Contact::Airborne)
    }
}

/// Resolves vertical collisions for one tick.
///
/// Snaps the anchor onto the landing surface, zeroes `velocity.y` and clears
/// `is_jumping`. If nothing grounds the player, `is_jumping` is set.
pub fn resolve(
    player: &mut Player,
    floor: Option<&Platform>,
    platforms: &[Platform],
    hitbox: &Hitbox,
) -> Contact {
    if let Some(floor) = floor
        && lands_on(player, floor, hitbox)
    {
        snap_onto(player, floor);
        return Contact::Floor;
    }

    // First match wins; the scan stops at the first qualifying platform.
    for (index, platform) in platforms.iter().enumerate() {
        if lands_on(player, platform, hitbox) {
            snap_onto(player, platform);
            return Contact::Platform(index);
        }
    }

    player.is_jumping = true;
    Contact::Airborne
}

fn lands_on(player: &Player, surface: &Platform, hitbox: &Hitbox) -> bool {
    if !surface.is_solid {
        return false;
    }

    let body = Aabb::from_player(player, hitbox);
    let target = Aabb::from_platform(surface);
    let touching = body.overlaps(&target) || body.rests_on(&target);
    let falling = player.velocity.y >= 0.0;
    let above_bottom = player.position.y <= surface.y + surface.height;

    touching && falling && above_bottom
}

fn snap_onto(player: &mut Player, surface: &Platform) {
    player.position.y = surface.y;
    player.velocity.y = 0.0;
    player.is_jumping = false;
}
