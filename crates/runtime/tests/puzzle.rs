//! Puzzle validation and the store-backed gate.
#![cfg(unix)]

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{
    FLOOR_Y, Fixture, MAIN_SOURCE, fast_config, level, player_at, puzzle, scripted_sandbox,
    wait_for,
};
use game_core::{LevelId, PuzzleId};
use runtime::{
    CodeExecutionSandbox, InMemoryPuzzleStore, ProgressionState, PuzzleGate, PuzzleStore,
    PuzzleValidator, RuntimeConfig,
};

fn validator(store: &Arc<InMemoryPuzzleStore>, script: &str) -> PuzzleValidator {
    PuzzleValidator::new(
        store.clone(),
        CodeExecutionSandbox::new(scripted_sandbox(script)),
    )
}

#[tokio::test]
async fn first_correct_submission_earns_points_once() {
    let store = Arc::new(InMemoryPuzzleStore::with_puzzles([puzzle(1, 1, 150)]));
    let validator = validator(&store, "echo Aletheia");

    let first = validator.submit(PuzzleId(1), MAIN_SOURCE).await;
    assert!(first.is_valid);
    assert_eq!(first.points_earned, 150);
    assert!(store.get_by_id(PuzzleId(1)).await.unwrap().unwrap().is_completed);

    let second = validator.submit(PuzzleId(1), MAIN_SOURCE).await;
    assert!(second.is_valid);
    assert_eq!(second.points_earned, 0);
}

#[tokio::test]
async fn wrong_output_grants_nothing() {
    let store = Arc::new(InMemoryPuzzleStore::with_puzzles([puzzle(1, 1, 150)]));
    let validator = validator(&store, "echo Hello");

    let result = validator.submit(PuzzleId(1), MAIN_SOURCE).await;

    assert!(!result.is_valid);
    assert_eq!(result.points_earned, 0);
    assert!(result.message.contains("Hello"));
    assert!(!store.get_by_id(PuzzleId(1)).await.unwrap().unwrap().is_completed);
}

#[tokio::test]
async fn unknown_puzzle_is_rejected() {
    let store = Arc::new(InMemoryPuzzleStore::new());
    let validator = validator(&store, "echo Aletheia");

    let result = validator.submit(PuzzleId(42), MAIN_SOURCE).await;

    assert!(!result.is_valid);
    assert!(result.message.contains("not found"));
}

#[tokio::test]
async fn concurrent_solves_award_once() {
    let store = Arc::new(InMemoryPuzzleStore::with_puzzles([puzzle(1, 1, 150)]));
    let validator = Arc::new(validator(&store, "echo Aletheia"));

    let tasks: Vec<_> = (0..4)
        .map(|_| {
            let validator = Arc::clone(&validator);
            tokio::spawn(async move { validator.submit(PuzzleId(1), MAIN_SOURCE).await })
        })
        .collect();

    let mut total = 0;
    for task in tasks {
        let result = task.await.unwrap();
        assert!(result.is_valid);
        total += result.points_earned;
    }
    assert_eq!(total, 150);
}

#[tokio::test]
async fn gate_follows_active_puzzle() {
    let store = Arc::new(InMemoryPuzzleStore::with_puzzles([
        puzzle(1, 1, 150),
        puzzle(2, 1, 50),
    ]));
    let gate = PuzzleGate::new(store.clone());

    assert!(gate.is_satisfied(LevelId(9)).await.unwrap());
    assert!(!gate.is_satisfied(LevelId(1)).await.unwrap());
    assert_eq!(
        gate.active_puzzle(LevelId(1)).await.unwrap().map(|p| p.id),
        Some(PuzzleId(1))
    );

    let mut second = store.get_by_id(PuzzleId(2)).await.unwrap().unwrap();
    second.mark_completed();
    store.update(PuzzleId(2), &second).await.unwrap();
    assert!(!gate.is_satisfied(LevelId(1)).await.unwrap());

    let mut first = store.get_by_id(PuzzleId(1)).await.unwrap().unwrap();
    first.mark_completed();
    store.update(PuzzleId(1), &first).await.unwrap();
    assert!(gate.is_satisfied(LevelId(1)).await.unwrap());
}

#[tokio::test]
async fn abandoned_submission_still_rewards_player() {
    let fixture = Fixture::new(
        player_at(100.0, FLOOR_Y),
        vec![level(1, 1)],
        vec![puzzle(1, 1, 150)],
    );
    let config = RuntimeConfig {
        sandbox: scripted_sandbox("sleep 0.3; echo Aletheia"),
        ..fast_config()
    };
    let runtime = fixture.start(config).await;
    let handle = runtime.handle();

    let abandoned = tokio::time::timeout(
        Duration::from_millis(100),
        handle.submit_solution(PuzzleId(1), MAIN_SOURCE),
    )
    .await;
    assert!(abandoned.is_err(), "submission should still be running");

    let rewarded = wait_for(&handle, |s| s.player.total_score == 150).await;
    assert!(rewarded.gate_satisfied);

    runtime.shutdown().await.unwrap();
    assert_eq!(fixture.stored_player().await.total_score, 150);
}

#[tokio::test]
async fn submissions_after_the_session_ends_are_rejected() {
    // The only puzzle belongs to another level, so level 1 is open.
    let fixture = Fixture::new(
        player_at(690.0, FLOOR_Y),
        vec![level(1, 1)],
        vec![puzzle(1, 9, 150)],
    );
    let runtime = fixture.start(fast_config()).await;
    let handle = runtime.handle();

    let finished = wait_for(&handle, |s| s.state == ProgressionState::Finished).await;
    assert_eq!(finished.player.total_score, 100);

    let result = handle
        .submit_solution(PuzzleId(1), MAIN_SOURCE)
        .await
        .unwrap();
    assert!(!result.is_valid);
    assert_eq!(result.points_earned, 0);
    assert!(!fixture.puzzles.get_by_id(PuzzleId(1)).await.unwrap().unwrap().is_completed);

    let snapshot = handle.query_snapshot().await.unwrap();
    assert_eq!(snapshot.player.total_score, 100);

    runtime.shutdown().await.unwrap();
    assert_eq!(fixture.stored_player().await.total_score, 100);
}
