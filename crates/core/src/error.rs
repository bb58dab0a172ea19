/// Result alias that carries the custom [`FormCheckError`] type.
pub type Result<T> = std::result::Result<T, FormCheckError>;

/// Common error type for the core crate.
///
/// Frame analysis itself never fails: missing or partial poses degrade to
/// in-band feedback. Errors only surface at the edges, when configuration or
/// recorded sessions are loaded and when exercise names are parsed.
#[derive(Debug, thiserror::Error)]
pub enum FormCheckError {
    /// Free-form message for conditions without a dedicated variant.
    #[error("{0}")]
    Message(String),
    /// Wrapper around standard IO errors.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Malformed JSON in a config file or recorded session.
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    /// The exercise name did not match any supported exercise.
    #[error("unknown exercise `{0}`")]
    UnknownExercise(String),
    /// Offline sessions must be fed with non-decreasing timestamps.
    #[error("frame {index} goes back in time ({current} ms after {previous} ms)")]
    NonMonotonicTimestamp {
        index: usize,
        previous: f64,
        current: f64,
    },
    /// A configuration value is outside its valid range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl FormCheckError {
    /// Creates a new error that simply wraps the provided message.
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }
}

impl From<&str> for FormCheckError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for FormCheckError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}
