//! Error types for board, placement, behavior, persistence and scheduling.

use std::path::PathBuf;

use thiserror::Error;

use relic_core::enums::SessionPhase;
use relic_core::types::{Position, UnitId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("position {0} is outside the board")]
    OutOfBounds(Position),
    #[error("cell {0} already holds a unit of the same class")]
    Occupied(Position),
    #[error("unit {0} is already on the board")]
    AlreadyPlaced(UnitId),
}

/// Why a defense could not be bought and placed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("unknown defense template `{0}`")]
    UnknownTemplate(String),
    #[error("not enough coins: need {needed}, have {available}")]
    InsufficientFunds { needed: u32, available: u32 },
    #[error("not enough army capacity: need {needed}, have {available}")]
    InsufficientCapacity { needed: u32, available: u32 },
    #[error(transparent)]
    Board(#[from] BoardError),
    #[error("session is {0:?}; placements are closed")]
    SessionClosed(SessionPhase),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BehaviorError {
    #[error("unit {0} has no board position")]
    Unplaced(UnitId),
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("invalid save slot name `{0}`")]
    InvalidSlot(String),
    #[error("no save in slot `{0}`")]
    MissingSlot(String),
    #[error("save data is invalid: {0}")]
    InvalidData(String),
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode or decode save data: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("engine cannot start from phase {0:?}")]
    NotStartable(SessionPhase),
    #[error("failed to spawn tick thread: {0}")]
    Spawn(#[source] std::io::Error),
}
