use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the problem engine and the session driver.
///
/// Generation itself never fails; these cover bad keys coming from callers
/// and misuse of the round lifecycle.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("unknown problem family `{0}`")]
    UnknownFamily(String),
    #[error("unknown game mode `{0}`")]
    UnknownMode(String),
    #[error("the session is over")]
    GameOver,
    #[error("round {0} is still in flight")]
    RoundInFlight(u64),
    #[error("no round is in flight")]
    NoActiveRound,
    #[error("round {got} is stale (current round is {current})")]
    StaleRound { got: u64, current: u64 },
    #[error("invalid value for {field}: {value}")]
    InvalidConfig { field: &'static str, value: String },
}

/// Errors raised by the score store collaborators.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not authenticated")]
    NotAuthenticated,
    #[error("failed to access score file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to (de)serialize score data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("score store lock poisoned")]
    Poisoned,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error(transparent)]
    Invalid(#[from] QuizError),
}
