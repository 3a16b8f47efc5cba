//! Demo campaign seeded into the in-memory stores.
use game_core::{
    Level, LevelId, Npc, NpcId, Platform, Player, PlayerId, Puzzle, PuzzleId, Vector2,
};
use serde::Serialize;

pub const PLAYER_ID: PlayerId = PlayerId(1);

const FLOOR_Y: f32 = 460.0;

#[derive(Debug, Clone, Serialize)]
pub struct Campaign {
    pub player: Player,
    pub levels: Vec<Level>,
    pub puzzles: Vec<Puzzle>,
    /// Reference solutions keyed by puzzle id, used by the scripted run.
    #[serde(skip)]
    pub solutions: Vec<(PuzzleId, String)>,
}

impl Campaign {
    pub fn demo(player_name: &str) -> Self {
        let floor = Platform::solid(0.0, FLOOR_Y, 800.0, 40.0);

        let archive = Level::new(LevelId(1), 1, "The Archive")
            .with_floor(floor)
            .with_platform(Platform::solid(260.0, 380.0, 120.0, 16.0))
            .with_platform(Platform::decorative(420.0, 300.0, 80.0, 12.0))
            .with_npc(
                Npc::new(NpcId(1), "Librarian", Vector2::new(240.0, FLOOR_Y)).with_dialogue([
                    "The door ahead answers only to the right word.",
                    "The terminal will tell you which one.",
                ]),
            )
            .with_difficulty(1)
            .with_time_limit(300);

        let vault = Level::new(LevelId(2), 2, "The Vault")
            .with_floor(floor)
            .with_platform(Platform::solid(200.0, 400.0, 100.0, 16.0))
            .with_platform(Platform::solid(360.0, 340.0, 100.0, 16.0))
            .with_npc(
                Npc::new(NpcId(2), "Warden", Vector2::new(300.0, FLOOR_Y))
                    .with_dialogue(["Count carefully. The vault is unforgiving."]),
            )
            .with_npc(Npc::new(NpcId(3), "Statue", Vector2::new(520.0, FLOOR_Y)).inactive())
            .with_difficulty(3);

        let truth = Puzzle::new(PuzzleId(1), LevelId(1), "Truth", "Aletheia", 150)
            .with_description("Print the Greek word for truth.")
            .with_starter_code(
                "public class Main {\n    public static void main(String[] args) {\n        // your code here\n    }\n}\n",
            )
            .with_hints(["System.out.println prints a line."]);

        let countdown = Puzzle::new(PuzzleId(2), LevelId(2), "Countdown", "3\n2\n1", 300)
            .with_description("Print 3, 2 and 1 on separate lines.")
            .with_hints(["A for loop can count down."]);

        let solutions = vec![
            (
                PuzzleId(1),
                "public class Main {\n    public static void main(String[] args) {\n        System.out.println(\"Aletheia\");\n    }\n}\n"
                    .to_string(),
            ),
            (
                PuzzleId(2),
                "public class Countdown {\n    public static void main(String[] args) {\n        for (int i = 3; i > 0; i--) {\n            System.out.println(i);\n        }\n    }\n}\n"
                    .to_string(),
            ),
        ];

        let mut player = Player::new(PLAYER_ID, player_name);
        player.position = Vector2::new(100.0, FLOOR_Y);

        Self {
            player,
            levels: vec![archive, vault],
            puzzles: vec![truth, countdown],
            solutions,
        }
    }

    pub fn solution(&self, puzzle_id: PuzzleId) -> Option<&str> {
        self.solutions
            .iter()
            .find(|(id, _)| *id == puzzle_id)
            .map(|(_, source)| source.as_str())
    }
}
