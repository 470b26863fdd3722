//! Failures while rendering command output as JSON.

/// A `--format json` rendering failure, tagged with the call site.
///
/// # Examples
///
/// ```
/// use personas_error::{JsonError, PersonasError};
///
/// let source = JsonError::new("key must be a string");
/// assert!(source.line > 0);
///
/// let err: PersonasError = source.into();
/// assert_eq!(err.user_message(), "key must be a string");
/// assert!(err
///     .to_string()
///     .starts_with("Personas Error: JSON Error: key must be a string at line"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("JSON Error: {} at line {} in {}", message, line, file)]
pub struct JsonError {
    /// What the serializer reported
    pub message: String,
    /// Line of the rendering call
    pub line: u32,
    /// File of the rendering call
    pub file: &'static str,
}

impl JsonError {
    /// Record a serializer message at the caller's location.
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
