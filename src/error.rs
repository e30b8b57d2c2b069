use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
#[error("ephemeris failed at {instant}: {message}")]
pub struct EphemerisError {
    pub instant: String,
    pub message: String,
}

impl EphemerisError {
    pub fn new(instant: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            instant: instant.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("invalid sample request: {reason}")]
    InvalidRequest { reason: String },
    #[error(transparent)]
    Ephemeris(#[from] EphemerisError),
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl TrackerError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        TrackerError::InvalidRequest {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
