//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! driving the session, submitting puzzle solutions and streaming events from
//! specific topics.
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot, watch};

use game_core::{PuzzleId, ValidationResult};

use super::errors::{Result, RuntimeError};
use super::input::InputFlags;
use super::session::{ProgressionState, SessionSnapshot};
use crate::events::{Event, EventBus, PuzzleEvent, Topic};
use crate::puzzle::PuzzleValidator;
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
    input: Arc<InputFlags>,
    snapshots: watch::Receiver<SessionSnapshot>,
    validator: Arc<PuzzleValidator>,
}

impl RuntimeHandle {
    pub(crate) fn new(
        command_tx: mpsc::Sender<Command>,
        event_bus: EventBus,
        input: Arc<InputFlags>,
        snapshots: watch::Receiver<SessionSnapshot>,
        validator: Arc<PuzzleValidator>,
    ) -> Self {
        Self {
            command_tx,
            event_bus,
            input,
            snapshots,
            validator,
        }
    }

    pub fn set_key_left(&self, pressed: bool) {
        self.input.set_left(pressed);
    }

    pub fn set_key_right(&self, pressed: bool) {
        self.input.set_right(pressed);
    }

    pub fn set_key_up(&self, pressed: bool) {
        self.input.set_up(pressed);
    }

    /// Space jumps, or talks to the NPC named by the interaction hint.
    pub fn set_key_space(&self, pressed: bool) {
        self.input.set_space(pressed);
    }

    pub async fn pause(&self) -> Result<()> {
        self.request(|reply| Command::Pause { reply }).await
    }

    pub async fn resume(&self) -> Result<()> {
        self.request(|reply| Command::Resume { reply }).await
    }

    /// Suspend the simulation and present the level's active puzzle.
    pub async fn open_terminal(&self) -> Result<()> {
        self.request(|reply| Command::OpenTerminal { reply }).await
    }

    pub async fn toggle_terminal(&self) -> Result<()> {
        self.request(|reply| Command::ToggleTerminal { reply }).await
    }

    /// Close the open dialogue or terminal and resume the simulation.
    pub async fn close_subview(&self) -> Result<()> {
        self.request(|reply| Command::CloseSubview { reply }).await
    }

    pub async fn advance_dialogue(&self) -> Result<()> {
        self.request(|reply| Command::AdvanceDialogue { reply }).await
    }

    /// Persist the player immediately.
    pub async fn save(&self) -> Result<()> {
        self.request(|reply| Command::Save { reply }).await
    }

    /// Run `source` against a puzzle on a dedicated task.
    ///
    /// The session keeps ticking while the sandbox works. The task forwards a
    /// correct solution to the progression worker itself, so the reward is
    /// applied even if the caller stops waiting. Once the session has
    /// finished, submissions are rejected without running anything.
    pub async fn submit_solution(
        &self,
        puzzle_id: PuzzleId,
        source: impl Into<String>,
    ) -> Result<ValidationResult> {
        let validator = Arc::clone(&self.validator);
        let command_tx = self.command_tx.clone();
        let event_bus = self.event_bus.clone();
        let snapshots = self.snapshots.clone();
        let source = source.into();

        tokio::spawn(async move {
            if command_tx.is_closed() {
                return Err(RuntimeError::CommandChannelClosed);
            }
            let finished = snapshots.borrow().state == ProgressionState::Finished;
            if finished {
                return Ok(ValidationResult::rejected("The session has already ended."));
            }

            let result = validator.submit(puzzle_id, &source).await;

            if result.is_valid {
                let solved = Command::PuzzleSolved {
                    puzzle_id,
                    points: result.points_earned,
                };
                if command_tx.send(solved).await.is_err() {
                    tracing::warn!(
                        target: "runtime::puzzle",
                        %puzzle_id,
                        points = result.points_earned,
                        "session stopped before the puzzle reward was applied"
                    );
                    return Err(RuntimeError::CommandChannelClosed);
                }
            } else {
                event_bus.publish(Event::Puzzle(PuzzleEvent::SubmissionRejected {
                    puzzle_id,
                    message: result.message.clone(),
                }));
            }

            Ok(result)
        })
        .await
        .map_err(RuntimeError::WorkerJoin)?
    }

    /// Completion hook for puzzle state changed outside [`submit_solution`].
    ///
    /// Only resynchronises the gate; no score is granted here.
    ///
    /// [`submit_solution`]: Self::submit_solution
    pub async fn on_puzzle_completed(&self, puzzle_id: PuzzleId) -> Result<()> {
        self.request(|reply| Command::PuzzleCompleted { puzzle_id, reply })
            .await
    }

    /// Snapshot taken by the worker at the time the request is served.
    pub async fn query_snapshot(&self) -> Result<SessionSnapshot> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::QuerySnapshot { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Latest published snapshot without a round trip to the worker.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver notified whenever the worker republishes the snapshot.
    pub fn watch_snapshot(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.clone()
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Session` - State changes, saves, session end
    /// - `Topic::Level` - Level loads and completions
    /// - `Topic::Status` - Status line updates
    /// - `Topic::Interaction` - Hints, dialogue lines, terminal open/close
    /// - `Topic::Puzzle` - Solves, rejections, gate changes
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::Topic;
    ///
    /// let mut level_rx = handle.subscribe(Topic::Level);
    /// while let Ok(event) = level_rx.recv().await {
    ///     // Handle level events
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> std::collections::HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    pub(crate) async fn shutdown_worker(&self) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(Command::Shutdown { reply: reply_tx })
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    async fn request(
        &self,
        command: impl FnOnce(oneshot::Sender<Result<()>>) -> Command,
    ) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }
}
