use super::common::{LevelId, NpcId, Vector2};

/// Axis-aligned rectangle the player can stand on.
///
/// `(x, y)` is the top-left corner. Non-solid platforms are decorative and
/// never take part in collision resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Platform {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub is_solid: bool,
}

impl Platform {
    pub fn solid(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            is_solid: true,
        }
    }

    pub fn decorative(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            is_solid: false,
            ..Self::solid(x, y, width, height)
        }
    }
}

/// Non-player character placed in a level.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Npc {
    pub id: NpcId,
    pub name: String,
    pub position: Vector2,
    pub is_active: bool,
    /// Lines shown in order when the player talks to this NPC.
    pub dialogue: Vec<String>,
}

impl Npc {
    pub fn new(id: NpcId, name: impl Into<String>, position: Vector2) -> Self {
        Self {
            id,
            name: name.into(),
            position,
            is_active: true,
            dialogue: Vec::new(),
        }
    }

    pub fn with_dialogue<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dialogue = lines.into_iter().map(Into::into).collect();
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

/// Point-radius region that completes a level once the gate is satisfied.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExitZone {
    pub center: Vector2,
    pub radius: f32,
}

impl ExitZone {
    pub const fn new(center: Vector2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Returns true if `point` lies strictly inside the zone.
    pub fn contains(&self, point: Vector2) -> bool {
        point.distance(self.center) < self.radius
    }
}

/// A single stage of the campaign.
///
/// Levels are ordered by `order_number` (1-based, gapless). `npcs` holds the
/// NPC objects already resolved from `npc_ids` by the level store.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Level {
    pub id: LevelId,
    pub order_number: u32,
    pub name: String,
    pub platforms: Vec<Platform>,
    pub floor: Option<Platform>,
    pub npc_ids: Vec<NpcId>,
    pub npcs: Vec<Npc>,
    pub difficulty: u32,
    /// Advisory only; nothing in the progression gate reads it.
    pub time_limit_secs: Option<u32>,
}

impl Level {
    pub fn new(id: LevelId, order_number: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            order_number,
            name: name.into(),
            platforms: Vec::new(),
            floor: None,
            npc_ids: Vec::new(),
            npcs: Vec::new(),
            difficulty: 1,
            time_limit_secs: None,
        }
    }

    pub fn with_floor(mut self, floor: Platform) -> Self {
        self.floor = Some(floor);
        self
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platforms.push(platform);
        self
    }

    pub fn with_npc(mut self, npc: Npc) -> Self {
        self.npc_ids.push(npc.id);
        self.npcs.push(npc);
        self
    }

    pub fn with_difficulty(mut self, difficulty: u32) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_time_limit(mut self, seconds: u32) -> Self {
        self.time_limit_secs = Some(seconds);
        self
    }

    pub fn npc(&self, id: NpcId) -> Option<&Npc> {
        self.npcs.iter().find(|npc| npc.id == id)
    }
}
