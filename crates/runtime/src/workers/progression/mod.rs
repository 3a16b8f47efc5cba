//! Progression worker that owns the live session.
//!
//! Runs the fixed-cadence loop, applies the per-tick pipeline from
//! [`game_core::engine`] and drives the progression state machine. It is the
//! only writer of the player while the session is live; hosts talk to it
//! through [`Command`]s and read it through the snapshot watch and the event
//! bus.

mod dialogue;

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use game_core::{Level, NpcId, Player, PuzzleId, TimeStep, engine, score};

use crate::api::{
    InputFlags, LevelSummary, ProgressionState, Result, RuntimeError, SessionSnapshot, Subview,
};
use crate::config::RuntimeConfig;
use crate::events::{
    Event, EventBus, InteractionEvent, LevelEvent, PuzzleEvent, SaveReason, SessionEvent,
    StatusEvent,
};
use crate::gate::PuzzleGate;
use crate::repository::Stores;
use dialogue::{DialogueSession, DialogueStep};

/// Commands that can be sent to the progression worker
pub enum Command {
    Pause {
        reply: oneshot::Sender<Result<()>>,
    },
    Resume {
        reply: oneshot::Sender<Result<()>>,
    },
    OpenTerminal {
        reply: oneshot::Sender<Result<()>>,
    },
    ToggleTerminal {
        reply: oneshot::Sender<Result<()>>,
    },
    CloseSubview {
        reply: oneshot::Sender<Result<()>>,
    },
    AdvanceDialogue {
        reply: oneshot::Sender<Result<()>>,
    },
    /// A correct submission was recorded. `points` is zero for re-solves.
    PuzzleSolved { puzzle_id: PuzzleId, points: u32 },
    /// Puzzle state changed in the store; re-read the gate.
    PuzzleCompleted {
        puzzle_id: PuzzleId,
        reply: oneshot::Sender<Result<()>>,
    },
    Save {
        reply: oneshot::Sender<Result<()>>,
    },
    QuerySnapshot {
        reply: oneshot::Sender<SessionSnapshot>,
    },
    /// Persist and stop the loop.
    Shutdown { reply: oneshot::Sender<()> },
}

/// Session data loaded before the worker starts.
pub struct SessionSeed {
    pub player: Player,
    pub level: Level,
    pub gate_satisfied: bool,
}

/// Background task that runs the session.
pub struct ProgressionWorker {
    config: RuntimeConfig,
    time_step: Box<dyn TimeStep>,
    stores: Stores,
    gate: PuzzleGate,

    player: Player,
    level: Level,
    state: ProgressionState,
    /// Set while a level transition is in flight.
    completing: bool,
    /// Set after a failed transition; cleared once the player leaves the exit zone.
    exit_retry_blocked: bool,
    gate_satisfied: bool,
    status_message: Option<String>,
    interaction_hint: Option<String>,
    nearby_npc: Option<NpcId>,
    dialogue: Option<DialogueSession>,
    space_held: bool,
    tick: u64,
    ticks_since_checkpoint: u64,

    input: Arc<InputFlags>,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
    snapshot_tx: watch::Sender<SessionSnapshot>,
}

impl ProgressionWorker {
    /// Creates a new progression worker.
    pub fn new(
        config: RuntimeConfig,
        time_step: Box<dyn TimeStep>,
        stores: Stores,
        seed: SessionSeed,
        input: Arc<InputFlags>,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        let gate = PuzzleGate::new(Arc::clone(&stores.puzzles));
        let status_message = Some(level_banner(&seed.level));
        let initial = SessionSnapshot {
            state: ProgressionState::Running,
            player: seed.player.clone(),
            level: LevelSummary::from(&seed.level),
            status_message: status_message.clone(),
            interaction_hint: None,
            gate_satisfied: seed.gate_satisfied,
            tick: 0,
        };
        let (snapshot_tx, _) = watch::channel(initial);

        Self {
            config,
            time_step,
            stores,
            gate,
            player: seed.player,
            level: seed.level,
            state: ProgressionState::Running,
            completing: false,
            exit_retry_blocked: false,
            gate_satisfied: seed.gate_satisfied,
            status_message,
            interaction_hint: None,
            nearby_npc: None,
            dialogue: None,
            space_held: false,
            tick: 0,
            ticks_since_checkpoint: 0,
            input,
            command_rx,
            event_bus,
            snapshot_tx,
        }
    }

    pub fn subscribe_snapshots(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Main worker loop.
    ///
    /// Ticks on a fixed cadence and processes commands between ticks. Ends on
    /// [`Command::Shutdown`] or once every command sender is gone; the player
    /// is persisted either way.
    pub async fn run(mut self) {
        let mut ticker = time::interval(self.time_step.period());
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            target: "runtime::worker",
            player = %self.player.id,
            level = self.level.order_number,
            "progression worker started"
        );
        self.publish(Event::Level(LevelEvent::Loaded {
            level_id: self.level.id,
            order_number: self.level.order_number,
            name: self.level.name.clone(),
        }));

        let shutdown_reply = loop {
            tokio::select! {
                biased;
                cmd = self.command_rx.recv() => match cmd {
                    Some(Command::Shutdown { reply }) => break Some(reply),
                    Some(cmd) => self.handle_command(cmd).await,
                    None => break None,
                },
                _ = ticker.tick() => {
                    for _ in 0..self.time_step.steps_per_tick() {
                        self.on_tick().await;
                    }
                }
            }
        };

        let _ = self.persist(SaveReason::Shutdown).await;
        info!(
            target: "runtime::worker",
            player = %self.player.id,
            total_score = self.player.total_score,
            "progression worker stopped"
        );
        if let Some(reply) = shutdown_reply {
            let _ = reply.send(());
        }
    }

    async fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Pause { reply } => {
                let result = self.pause().await;
                let _ = reply.send(result);
            }
            Command::Resume { reply } => {
                let result = self.resume();
                let _ = reply.send(result);
            }
            Command::OpenTerminal { reply } => {
                let result = self.open_terminal().await;
                let _ = reply.send(result);
            }
            Command::ToggleTerminal { reply } => {
                let result = match self.state {
                    ProgressionState::SuspendedForSubview(Subview::Terminal { .. }) => {
                        self.close_subview()
                    }
                    _ => self.open_terminal().await,
                };
                let _ = reply.send(result);
            }
            Command::CloseSubview { reply } => {
                let result = self.close_subview();
                let _ = reply.send(result);
            }
            Command::AdvanceDialogue { reply } => {
                let result = self.advance_dialogue();
                let _ = reply.send(result);
            }
            Command::PuzzleSolved { puzzle_id, points } => {
                self.puzzle_solved(puzzle_id, points).await;
            }
            Command::PuzzleCompleted { puzzle_id, reply } => {
                debug!(target: "runtime::worker", %puzzle_id, "puzzle completion hook");
                let result = self.refresh_gate().await;
                let _ = reply.send(result);
            }
            Command::Save { reply } => {
                let result = self.persist(SaveReason::Manual).await;
                let _ = reply.send(result);
            }
            Command::QuerySnapshot { reply } => {
                let _ = reply.send(self.snapshot());
            }
            Command::Shutdown { reply } => {
                // Intercepted by `run`.
                let _ = reply.send(());
            }
        }
        self.publish_snapshot();
    }

    // ------------------------------------------------------------------
    // Tick pipeline
    // ------------------------------------------------------------------

    async fn on_tick(&mut self) {
        self.tick += 1;

        match self.state {
            ProgressionState::Running => self.simulate().await,
            ProgressionState::SuspendedForSubview(Subview::Dialogue { .. }) => {
                self.tick_dialogue();
            }
            // Cadence keeps running; nothing to simulate.
            _ => return,
        }

        self.publish_snapshot();
    }

    async fn simulate(&mut self) {
        let input = self.input.snapshot();
        let space_pressed = input.space && !self.space_held;
        self.space_held = input.space;

        if space_pressed && let Some(npc_id) = self.nearby_npc {
            self.open_dialogue(npc_id);
            return;
        }

        let report = engine::step(&mut self.player, &self.level, &input, &self.config.game);
        self.set_nearby_npc(report.nearby_npc);

        if report.in_exit_zone {
            self.check_exit().await;
        } else {
            self.exit_retry_blocked = false;
        }

        if self.state.is_running() {
            self.maybe_checkpoint().await;
        }
    }

    async fn check_exit(&mut self) {
        if self.completing || self.exit_retry_blocked {
            return;
        }

        match self.gate.is_satisfied(self.level.id).await {
            Ok(true) => {
                self.set_gate_satisfied(true);
                self.complete_level().await;
            }
            Ok(false) => {
                self.set_gate_satisfied(false);
                self.set_status("The exit is sealed. Solve the terminal puzzle to open it.");
            }
            Err(error) => {
                warn!(
                    target: "runtime::worker",
                    level = %self.level.id,
                    %error,
                    "failed to read puzzle gate"
                );
                self.set_status("The exit could not be checked. Step back and try again.");
                self.exit_retry_blocked = true;
            }
        }
    }

    async fn maybe_checkpoint(&mut self) {
        let interval = self.config.checkpoint_interval_ticks;
        if interval == 0 {
            return;
        }
        self.ticks_since_checkpoint += 1;
        if self.ticks_since_checkpoint >= interval {
            self.ticks_since_checkpoint = 0;
            let _ = self.persist(SaveReason::Checkpoint).await;
        }
    }

    // ------------------------------------------------------------------
    // Level completion
    // ------------------------------------------------------------------

    async fn complete_level(&mut self) {
        self.completing = true;
        self.transition(ProgressionState::CompletingLevel);

        let next_state = match self.advance_level().await {
            Ok(state) => state,
            Err(error) => {
                warn!(
                    target: "runtime::worker",
                    level = self.level.order_number,
                    %error,
                    "level transition failed"
                );
                self.set_status("Could not load the next level. Step back and try again.");
                self.exit_retry_blocked = true;
                ProgressionState::Running
            }
        };

        self.transition(next_state);
        self.completing = false;
    }

    /// Awards the level, then either loads the next one or ends the session.
    ///
    /// Everything fallible happens before the player is touched, so a failed
    /// transition awards nothing and can be retried.
    async fn advance_level(&mut self) -> Result<ProgressionState> {
        let total = self.stores.levels.total_count().await?;
        let completed = LevelSummary::from(&self.level);

        if self.player.current_level >= total {
            let points = score::award_level(&mut self.player, &self.level, &self.config.game);
            self.publish_level_completed(&completed, points);
            let _ = self.persist(SaveReason::LevelComplete).await;

            let total_score = self.player.total_score;
            self.set_status(format!("All levels complete! Final score: {total_score}"));
            self.publish(Event::Session(SessionEvent::Finished { total_score }));
            info!(target: "runtime::worker", total_score, "session finished");
            return Ok(ProgressionState::Finished);
        }

        let next_order = self.player.current_level + 1;
        let next = self
            .stores
            .levels
            .get_by_order_number(next_order)
            .await?
            .ok_or(RuntimeError::LevelNotFound {
                order_number: next_order,
            })?;
        let next_gate = self.gate.is_satisfied(next.id).await?;

        let points = score::award_level(&mut self.player, &self.level, &self.config.game);
        self.player.current_level = next_order;
        self.player.respawn_at(self.config.game.spawn_point);
        self.publish_level_completed(&completed, points);

        info!(
            target: "runtime::worker",
            from = completed.order_number,
            to = next_order,
            points,
            total_score = self.player.total_score,
            "level completed"
        );

        self.set_status(format!(
            "Level {} complete! +{points} points. {}",
            completed.order_number,
            level_banner(&next)
        ));
        self.load_level(next, next_gate);
        let _ = self.persist(SaveReason::LevelComplete).await;

        Ok(ProgressionState::Running)
    }

    fn load_level(&mut self, level: Level, gate_satisfied: bool) {
        self.level = level;
        self.gate_satisfied = gate_satisfied;
        self.dialogue = None;
        self.exit_retry_blocked = false;
        self.ticks_since_checkpoint = 0;
        self.nearby_npc = engine::scan(&self.player, &self.level, &self.config.game);
        self.refresh_hint();

        self.publish(Event::Level(LevelEvent::Loaded {
            level_id: self.level.id,
            order_number: self.level.order_number,
            name: self.level.name.clone(),
        }));
    }

    fn publish_level_completed(&self, completed: &LevelSummary, points: u64) {
        self.publish(Event::Level(LevelEvent::Completed {
            level_id: completed.id,
            order_number: completed.order_number,
            points_awarded: points,
            total_score: self.player.total_score,
        }));
    }

    // ------------------------------------------------------------------
    // Subviews and pause
    // ------------------------------------------------------------------

    async fn pause(&mut self) -> Result<()> {
        match self.state {
            ProgressionState::Running | ProgressionState::SuspendedForSubview(_) => {}
            _ => return Err(self.invalid("pause")),
        }

        self.leave_subview();
        let _ = self.persist(SaveReason::Pause).await;
        self.transition(ProgressionState::Paused);
        self.set_status("Paused");
        Ok(())
    }

    fn resume(&mut self) -> Result<()> {
        if self.state != ProgressionState::Paused {
            return Err(self.invalid("resume"));
        }
        self.transition(ProgressionState::Running);
        self.set_status(level_banner(&self.level));
        Ok(())
    }

    async fn open_terminal(&mut self) -> Result<()> {
        match self.state {
            ProgressionState::Running => {}
            ProgressionState::SuspendedForSubview(Subview::Terminal { .. }) => return Ok(()),
            _ => return Err(self.invalid("open terminal")),
        }

        let puzzle_id = match self.gate.active_puzzle(self.level.id).await {
            Ok(puzzle) => puzzle.map(|p| p.id),
            Err(error) => {
                warn!(target: "runtime::worker", %error, "failed to load active puzzle");
                None
            }
        };

        self.transition(ProgressionState::SuspendedForSubview(Subview::Terminal {
            puzzle_id,
        }));
        self.publish(Event::Interaction(InteractionEvent::TerminalOpened {
            puzzle_id,
        }));
        Ok(())
    }

    fn close_subview(&mut self) -> Result<()> {
        if self.state.subview().is_none() {
            return Err(self.invalid("close subview"));
        }
        self.leave_subview();
        self.transition(ProgressionState::Running);
        Ok(())
    }

    /// Drops any open subview and its timers without changing state.
    fn leave_subview(&mut self) {
        match self.state.subview() {
            Some(Subview::Dialogue { npc_id }) => {
                self.dialogue = None;
                self.publish(Event::Interaction(InteractionEvent::DialogueEnded { npc_id }));
            }
            Some(Subview::Terminal { .. }) => {
                self.publish(Event::Interaction(InteractionEvent::TerminalClosed));
            }
            None => {}
        }
    }

    fn open_dialogue(&mut self, npc_id: NpcId) {
        let Some(npc) = self.level.npc(npc_id) else {
            warn!(target: "runtime::worker", %npc_id, "nearby npc missing from level");
            return;
        };

        match DialogueSession::open(npc, self.config.dialogue_advance_ticks) {
            Some(session) => {
                debug!(target: "runtime::worker", %npc_id, lines = session.total(), "dialogue opened");
                self.dialogue = Some(session);
                self.transition(ProgressionState::SuspendedForSubview(Subview::Dialogue {
                    npc_id,
                }));
                self.publish_dialogue_line();
            }
            None => {
                let message = format!("{} has nothing to say.", npc.name);
                self.set_status(message);
            }
        }
    }

    fn advance_dialogue(&mut self) -> Result<()> {
        let Some(session) = self.dialogue.as_mut() else {
            return Err(self.invalid("advance dialogue"));
        };
        let step = session.advance();
        self.apply_dialogue_step(step);
        Ok(())
    }

    fn tick_dialogue(&mut self) {
        if let Some(session) = self.dialogue.as_mut() {
            let step = session.tick();
            self.apply_dialogue_step(step);
        }
    }

    fn apply_dialogue_step(&mut self, step: DialogueStep) {
        match step {
            DialogueStep::Waiting => {}
            DialogueStep::Line(_) => self.publish_dialogue_line(),
            DialogueStep::Ended => {
                self.leave_subview();
                self.transition(ProgressionState::Running);
            }
        }
    }

    fn publish_dialogue_line(&self) {
        if let Some(session) = &self.dialogue {
            self.publish(Event::Interaction(InteractionEvent::DialogueLine {
                npc_id: session.npc_id,
                speaker: session.speaker.clone(),
                line: session.current_line().to_string(),
                index: session.index(),
                total: session.total(),
            }));
        }
    }

    // ------------------------------------------------------------------
    // Puzzles
    // ------------------------------------------------------------------

    async fn puzzle_solved(&mut self, puzzle_id: PuzzleId, points: u32) {
        if self.state == ProgressionState::Finished {
            debug!(target: "runtime::worker", %puzzle_id, points, "session finished; reward ignored");
            return;
        }

        if points > 0 {
            let total_score = score::award_puzzle(&mut self.player, points);
            info!(target: "runtime::worker", %puzzle_id, points, total_score, "puzzle reward applied");
            self.publish(Event::Puzzle(PuzzleEvent::Solved {
                puzzle_id,
                points_earned: points,
                total_score,
            }));
            self.set_status(format!("Puzzle solved! +{points} points"));
            let _ = self.persist(SaveReason::PuzzleSolved).await;
        }

        if let Err(error) = self.refresh_gate().await {
            warn!(target: "runtime::worker", %puzzle_id, %error, "failed to refresh puzzle gate");
        }
    }

    /// Re-reads the gate for the current level and announces changes.
    async fn refresh_gate(&mut self) -> Result<()> {
        let satisfied = self.gate.is_satisfied(self.level.id).await?;
        if self.set_gate_satisfied(satisfied) && satisfied {
            self.set_status("The exit is open.");
        }
        Ok(())
    }

    /// Returns whether the cached gate value changed.
    fn set_gate_satisfied(&mut self, satisfied: bool) -> bool {
        if self.gate_satisfied == satisfied {
            return false;
        }
        self.gate_satisfied = satisfied;
        self.publish(Event::Puzzle(PuzzleEvent::GateChanged {
            level_id: self.level.id,
            satisfied,
        }));
        true
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Writes the player profile. Failures are logged and surfaced as a status
    /// message; the next save point retries implicitly.
    async fn persist(&mut self, reason: SaveReason) -> Result<()> {
        let player_id = self.player.id;
        let error = match self.stores.players.update(player_id, &self.player).await {
            Ok(true) => {
                debug!(target: "runtime::worker", %player_id, reason = reason.as_ref(), "player saved");
                self.publish(Event::Session(SessionEvent::Saved { player_id, reason }));
                return Ok(());
            }
            Ok(false) => RuntimeError::PlayerNotFound(player_id),
            Err(error) => RuntimeError::Repository(error),
        };

        warn!(
            target: "runtime::worker",
            %player_id,
            reason = reason.as_ref(),
            %error,
            "failed to save player"
        );
        self.publish(Event::Session(SessionEvent::SaveFailed {
            player_id,
            reason,
            error: error.to_string(),
        }));
        self.set_status("Progress could not be saved.");
        Err(error)
    }

    // ------------------------------------------------------------------
    // Publication
    // ------------------------------------------------------------------

    fn transition(&mut self, to: ProgressionState) {
        let from = self.state;
        if from == to {
            return;
        }
        self.state = to;
        info!(target: "runtime::worker", from = from.name(), to = to.name(), "state changed");
        self.publish(Event::Session(SessionEvent::StateChanged { from, to }));
    }

    fn set_nearby_npc(&mut self, npc_id: Option<NpcId>) {
        if self.nearby_npc == npc_id {
            return;
        }
        self.nearby_npc = npc_id;
        self.refresh_hint();
    }

    fn refresh_hint(&mut self) {
        let hint = self
            .nearby_npc
            .and_then(|id| self.level.npc(id))
            .map(|npc| format!("Press SPACE to talk to {}", npc.name));
        if self.interaction_hint != hint {
            self.interaction_hint = hint.clone();
            self.publish(Event::Interaction(InteractionEvent::HintChanged { hint }));
        }
    }

    fn set_status(&mut self, message: impl Into<String>) {
        let message = message.into();
        if self.status_message.as_deref() == Some(message.as_str()) {
            return;
        }
        self.status_message = Some(message.clone());
        self.publish(Event::Status(StatusEvent { message }));
    }

    fn invalid(&self, command: &'static str) -> RuntimeError {
        RuntimeError::InvalidState {
            state: self.state.name(),
            command,
        }
    }

    fn publish(&self, event: Event) {
        self.event_bus.publish(event);
    }

    fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state,
            player: self.player.clone(),
            level: LevelSummary::from(&self.level),
            status_message: self.status_message.clone(),
            interaction_hint: self.interaction_hint.clone(),
            gate_satisfied: self.gate_satisfied,
            tick: self.tick,
        }
    }

    fn publish_snapshot(&self) {
        self.snapshot_tx.send_replace(self.snapshot());
    }
}

fn level_banner(level: &Level) -> String {
    format!("Level {}: {}", level.order_number, level.name)
}
