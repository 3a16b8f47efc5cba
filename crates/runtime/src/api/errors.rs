//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination and repositories so clients can
//! bubble them up with consistent context.
use thiserror::Error;
use tokio::sync::oneshot;

use game_core::PlayerId;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("player {0} not found")]
    PlayerNotFound(PlayerId),

    #[error("level with order number {order_number} not found")]
    LevelNotFound { order_number: u32 },

    #[error("runtime requires stores to be configured before building")]
    MissingStores,

    #[error("runtime requires a player id before building")]
    MissingPlayer,

    #[error("progression worker command channel closed")]
    CommandChannelClosed,

    #[error("progression worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("progression worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("cannot {command} while {state}")]
    InvalidState {
        state: &'static str,
        command: &'static str,
    },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
