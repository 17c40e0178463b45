use thiserror::Error;

/// Errors raised at the text boundaries of the world (CLI flags, move plans).
/// Generation and streaming themselves are total and never fail.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MeadowError {
    #[error("invalid chunk coordinate '{0}' (expected \"x,y\")")]
    InvalidChunkCoord(String),

    #[error("invalid move step '{step}': {reason}")]
    InvalidMoveStep { step: String, reason: String },

    #[error("invalid seed '{0}'")]
    InvalidSeed(String),
}
