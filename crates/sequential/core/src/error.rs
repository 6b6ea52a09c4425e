use thiserror::Error;

/// Errors raised while configuring statistics and stopping times.
///
/// Every variant except [`SequentialError::Serialization`] is a configuration
/// error: it is detected at construction or deserialization time, before any
/// observation is accepted.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SequentialError {
    #[error("window size cannot be zero")]
    ZeroWindow,

    #[error("threshold at position {index} is not finite")]
    NonFiniteThreshold { index: usize },

    #[error("record type mismatch: expected \"{expected}\", found \"{found}\"")]
    TypeMismatch { expected: String, found: String },

    #[error("{what} have different lengths: {left} vs {right}")]
    ShapeMismatch {
        what: String,
        left: usize,
        right: usize,
    },

    #[error("invalid parameter {parameter}: {reason}")]
    InvalidParameter { parameter: String, reason: String },

    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl SequentialError {
    /// Whether this error stems from an invalid configuration.
    pub fn is_invalid_configuration(&self) -> bool {
        !matches!(self, SequentialError::Serialization(_))
    }
}

impl From<serde_json::Error> for SequentialError {
    fn from(e: serde_json::Error) -> Self {
        SequentialError::Serialization(e.to_string())
    }
}

/// Convenience type alias for sequential results.
pub type SequentialResult<T> = Result<T, SequentialError>;
