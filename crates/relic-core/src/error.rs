//! Error types shared across crates.

use std::path::PathBuf;

use thiserror::Error;

/// A configuration string did not name a known tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnknownTagError {
    #[error("unknown unit category `{0}`")]
    Category(String),
    #[error("unknown AI behavior `{0}`")]
    AiBehavior(String),
}

/// Loading or validating a game configuration failed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read configuration {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("configuration has no defense templates")]
    NoDefenses,
    #[error("configuration has no hostile templates")]
    NoHostiles,
    #[error("configuration has no levels")]
    NoLevels,
}
