//! Shared fixtures for runtime integration tests.
#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use game_core::{Level, LevelId, Platform, Player, PlayerId, Puzzle, PuzzleId, Vector2};
use runtime::{
    InMemoryLevelStore, InMemoryPlayerStore, InMemoryPuzzleStore, Runtime, RuntimeConfig,
    RuntimeHandle, SandboxConfig, SessionSnapshot, Stores, ToolCommand,
};

pub const PLAYER: PlayerId = PlayerId(1);
pub const FLOOR_Y: f32 = 415.0;

pub const MAIN_SOURCE: &str = r#"public class Main {
    public static void main(String[] args) {
        System.out.println("Aletheia");
    }
}"#;

pub struct Fixture {
    pub players: Arc<InMemoryPlayerStore>,
    pub levels: Arc<InMemoryLevelStore>,
    pub puzzles: Arc<InMemoryPuzzleStore>,
}

impl Fixture {
    pub fn new(player: Player, levels: Vec<Level>, puzzles: Vec<Puzzle>) -> Self {
        Self {
            players: Arc::new(InMemoryPlayerStore::with_players([player])),
            levels: Arc::new(InMemoryLevelStore::with_levels(levels)),
            puzzles: Arc::new(InMemoryPuzzleStore::with_puzzles(puzzles)),
        }
    }

    pub fn stores(&self) -> Stores {
        Stores::new(
            self.players.clone(),
            self.levels.clone(),
            self.puzzles.clone(),
        )
    }

    pub async fn start(&self, config: RuntimeConfig) -> Runtime {
        Runtime::builder()
            .config(config)
            .player(PLAYER)
            .shared_stores(self.stores())
            .build()
            .await
            .expect("runtime should build")
    }

    pub async fn stored_player(&self) -> Player {
        use runtime::PlayerStore;
        self.players
            .get_by_id(PLAYER)
            .await
            .expect("store readable")
            .expect("player exists")
    }

    pub async fn complete_puzzle(&self, id: PuzzleId) {
        use runtime::PuzzleStore;
        let mut puzzle = self
            .puzzles
            .get_by_id(id)
            .await
            .expect("store readable")
            .expect("puzzle exists");
        puzzle.mark_completed();
        assert!(self.puzzles.update(id, &puzzle).await.expect("store writable"));
    }
}

pub fn fast_config() -> RuntimeConfig {
    RuntimeConfig {
        tick_period: Duration::from_millis(2),
        checkpoint_interval_ticks: 0,
        dialogue_advance_ticks: 5,
        sandbox: scripted_sandbox("echo Aletheia"),
        ..RuntimeConfig::default()
    }
}

/// Sandbox whose compiler always succeeds and whose runtime runs `script`.
pub fn scripted_sandbox(script: &str) -> SandboxConfig {
    SandboxConfig {
        compiler: ToolCommand::new("sh", ["-c", "test -f \"$0\"", "{file}"]),
        runtime: ToolCommand::new("sh", ["-c", script]),
        timeout: Some(Duration::from_secs(5)),
        ..SandboxConfig::default()
    }
}

pub fn level(order: u32, difficulty: u32) -> Level {
    Level::new(LevelId(order), order, format!("Chamber {order}"))
        .with_floor(Platform::solid(0.0, FLOOR_Y, 800.0, 50.0))
        .with_difficulty(difficulty)
}

pub fn puzzle(id: u32, level: u32, points: u32) -> Puzzle {
    Puzzle::new(PuzzleId(id), LevelId(level), "Hello", "Aletheia", points)
}

pub fn player_at(x: f32, y: f32) -> Player {
    let mut player = Player::new(PLAYER, "Ada");
    player.position = Vector2::new(x, y);
    player
}

/// Waits until the published snapshot satisfies `predicate`.
pub async fn wait_for(
    handle: &RuntimeHandle,
    predicate: impl FnMut(&SessionSnapshot) -> bool,
) -> SessionSnapshot {
    let mut rx = handle.watch_snapshot();
    let snapshot = tokio::time::timeout(Duration::from_secs(10), rx.wait_for(predicate))
        .await
        .expect("condition not reached in time")
        .expect("worker stopped");
    snapshot.clone()
}

/// Lets the worker run for roughly `ticks` cadence periods.
pub async fn run_ticks(config: &RuntimeConfig, ticks: u32) {
    tokio::time::sleep(config.tick_period * ticks).await;
}
