//! Unified error types surfaced by the runtime API.
//!
//! Gameplay itself never fails. These errors cover worker coordination and
//! requests that name characters or rooms the worker does not hold.
use thiserror::Error;
use tokio::sync::oneshot;

use mud_core::{CharacterId, RoomId};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("simulation worker command channel closed")]
    CommandChannelClosed,

    #[error("simulation worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("simulation worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error("runtime requires oracles to be configured before building")]
    MissingOracles,

    #[error("unknown character {0}")]
    UnknownCharacter(CharacterId),

    #[error("character {0} already exists")]
    DuplicateCharacter(CharacterId),

    #[error("unknown {0}")]
    UnknownRoom(RoomId),

    #[error("{0} already exists")]
    DuplicateRoom(RoomId),
}
