use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecoveryError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("reconstructed value {0} is not an integer")]
    NonIntegralResult(String),
    #[error("need {needed} points to reconstruct, only {available} available")]
    InsufficientPoints { needed: usize, available: usize },
    #[error("threshold must be at least 1, got {0}")]
    InvalidThreshold(usize),
    #[error("invalid base {0:?}, expected 2..=36")]
    InvalidBase(String),
    #[error("invalid digits {value:?} for base {base}")]
    InvalidDigits { base: u32, value: String },
    #[error("invalid x coordinate {0:?}")]
    InvalidCoordinate(String),
    #[error("malformed share file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, RecoveryError>;
