//! Crate error type

/// Errors raised at load boundaries and during actor construction.
///
/// The frame loop itself never returns these; they stop at the loaders.
#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A monster was built without the mandatory idle state
    #[error("monster '{monster}' has no idle state registered")]
    MissingIdleState { monster: String },

    /// Scene references a preset that was never loaded
    #[error("unknown monster preset: {0}")]
    UnknownPreset(String),

    /// Malformed observer wire message
    #[error("invalid event message: {0}")]
    InvalidEvent(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
