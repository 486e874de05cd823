use flags_core::FlagsError;
use thiserror::Error;

/// Errors raised while preparing or recording a tournament.
#[derive(Debug, Error)]
pub enum TournamentError {
    #[error("unknown engine '{0}' (expected alphabeta, mcts or random)")]
    UnknownEngine(String),

    #[error("bad setup: {0}")]
    Setup(#[from] FlagsError),

    #[error("failed to read or write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("invalid results file: {0}")]
    Json(#[from] serde_json::Error),
}
