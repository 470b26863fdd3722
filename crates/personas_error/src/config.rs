//! Invalid settings and model catalogue entries.

/// A rejected setting, tagged with the place that rejected it.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// Which setting was wrong and why
    pub message: String,
    /// Line of the validating call
    pub line: u32,
    /// File of the validating call
    pub file: &'static str,
}

impl ConfigError {
    /// Reject a setting at the caller's location.
    ///
    /// Users see only the message; the location stays in logs.
    ///
    /// ```
    /// use personas_error::{ConfigError, PersonasError};
    ///
    /// let err: PersonasError =
    ///     ConfigError::new("model 'tiny' has a context window of 0 tokens").into();
    /// assert_eq!(err.user_message(), "model 'tiny' has a context window of 0 tokens");
    /// assert!(err.to_string().contains("Configuration Error"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
