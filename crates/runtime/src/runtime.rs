//! High-level runtime orchestrator.
//!
//! The runtime owns the progression worker, wires up command/event channels,
//! and exposes a builder-based API for hosts to drive a session.
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;

use game_core::{PlayerId, TimeStep};

use crate::api::{InputFlags, Result, RuntimeError, RuntimeHandle, SessionSnapshot};
use crate::config::RuntimeConfig;
use crate::events::{Event, EventBus, Topic};
use crate::gate::PuzzleGate;
use crate::puzzle::PuzzleValidator;
use crate::repository::{LevelStore, PlayerStore, PuzzleStore, Stores};
use crate::sandbox::CodeExecutionSandbox;
use crate::workers::{Command, ProgressionWorker, SessionSeed};

/// Main runtime that orchestrates one player session
///
/// Design: Runtime owns the worker and coordinates shutdown.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    worker_handle: JoinHandle<()>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.handle.subscribe(topic)
    }

    pub fn watch_snapshot(&self) -> watch::Receiver<SessionSnapshot> {
        self.handle.watch_snapshot()
    }

    /// Shutdown the runtime gracefully
    ///
    /// The worker persists the player before it stops. Outstanding handle
    /// clones see [`RuntimeError::CommandChannelClosed`] afterwards.
    pub async fn shutdown(self) -> Result<()> {
        let stopped = self.handle.shutdown_worker().await;
        drop(self.handle);

        self.worker_handle
            .await
            .map_err(RuntimeError::WorkerJoin)?;

        match stopped {
            // Worker already gone; the join above reports anything worse.
            Err(RuntimeError::CommandChannelClosed) | Err(RuntimeError::ReplyChannelClosed(_)) => {
                Ok(())
            }
            other => other,
        }
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    player_id: Option<PlayerId>,
    players: Option<Arc<dyn PlayerStore>>,
    levels: Option<Arc<dyn LevelStore>>,
    puzzles: Option<Arc<dyn PuzzleStore>>,
    time_step: Option<Box<dyn TimeStep>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            player_id: None,
            players: None,
            levels: None,
            puzzles: None,
            time_step: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Player whose session this runtime drives
    pub fn player(mut self, player_id: PlayerId) -> Self {
        self.player_id = Some(player_id);
        self
    }

    /// Set the required stores
    pub fn stores(
        mut self,
        players: impl PlayerStore + 'static,
        levels: impl LevelStore + 'static,
        puzzles: impl PuzzleStore + 'static,
    ) -> Self {
        self.players = Some(Arc::new(players));
        self.levels = Some(Arc::new(levels));
        self.puzzles = Some(Arc::new(puzzles));
        self
    }

    /// Set stores that are shared with other owners
    pub fn shared_stores(mut self, stores: Stores) -> Self {
        self.players = Some(stores.players);
        self.levels = Some(stores.levels);
        self.puzzles = Some(stores.puzzles);
        self
    }

    /// Replace the cadence derived from [`RuntimeConfig::tick_period`]
    pub fn time_step(mut self, time_step: impl TimeStep + 'static) -> Self {
        self.time_step = Some(Box::new(time_step));
        self
    }

    /// Build the runtime
    ///
    /// Loads the player and their current level, then spawns the worker.
    /// Must be called inside a tokio runtime.
    pub async fn build(self) -> Result<Runtime> {
        let player_id = self.player_id.ok_or(RuntimeError::MissingPlayer)?;
        let (Some(players), Some(levels), Some(puzzles)) = (self.players, self.levels, self.puzzles)
        else {
            return Err(RuntimeError::MissingStores);
        };
        let stores = Stores::new(players, levels, puzzles);

        let player = stores
            .players
            .get_by_id(player_id)
            .await?
            .ok_or(RuntimeError::PlayerNotFound(player_id))?;
        let level = stores
            .levels
            .get_by_order_number(player.current_level)
            .await?
            .ok_or(RuntimeError::LevelNotFound {
                order_number: player.current_level,
            })?;
        let gate_satisfied = PuzzleGate::new(Arc::clone(&stores.puzzles))
            .is_satisfied(level.id)
            .await?;

        tracing::info!(
            target: "runtime",
            player = %player.id,
            level = level.order_number,
            total_score = player.total_score,
            "session loaded"
        );

        let time_step = self
            .time_step
            .unwrap_or_else(|| Box::new(self.config.time_step()) as Box<dyn TimeStep>);
        let (command_tx, command_rx) = mpsc::channel::<Command>(self.config.command_buffer_size);
        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let input = Arc::new(InputFlags::default());
        let validator = Arc::new(PuzzleValidator::new(
            Arc::clone(&stores.puzzles),
            CodeExecutionSandbox::new(self.config.sandbox.clone()),
        ));

        let worker = ProgressionWorker::new(
            self.config,
            time_step,
            stores,
            SessionSeed {
                player,
                level,
                gate_satisfied,
            },
            Arc::clone(&input),
            command_rx,
            event_bus.clone(),
        );
        let snapshots = worker.subscribe_snapshots();

        let handle = RuntimeHandle::new(command_tx, event_bus, input, snapshots, validator);

        let worker_handle = tokio::spawn(async move {
            worker.run().await;
        });

        Ok(Runtime {
            handle,
            worker_handle,
        })
    }
}
