//! Error types for the DEHA pose engine.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Landmark count mismatch: expected {expected}, got {actual}")]
    LandmarkCount { expected: usize, actual: usize },

    #[error("Non-finite coordinate for landmark {index}")]
    NonFiniteLandmark { index: usize },

    #[error("Invalid frame size: {width}x{height}")]
    FrameSize { width: u32, height: u32 },

    #[error("Timestamp went backwards: {previous_ms}ms then {current_ms}ms")]
    TimestampRegression { previous_ms: u64, current_ms: u64 },

    #[error("Unknown pose: {0}")]
    UnknownPose(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
