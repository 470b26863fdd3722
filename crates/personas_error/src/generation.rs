//! Generation port error types.

/// Failure modes of a single generation call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GenerationErrorKind {
    /// The call was abandoned because its cancellation token fired
    #[display("generation cancelled")]
    Cancelled,
    /// The backend rejected or failed the call
    #[display("{}", _0)]
    Failed(String),
}

/// Error returned by a generation port.
///
/// # Examples
///
/// ```
/// use personas_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::failed("rate limited");
/// assert_eq!(err.kind, GenerationErrorKind::Failed("rate limited".to_string()));
/// assert!(!err.is_cancelled());
/// assert!(GenerationError::cancelled().is_cancelled());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The specific failure
    pub kind: GenerationErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for a cancelled call.
    #[track_caller]
    pub fn cancelled() -> Self {
        Self::new(GenerationErrorKind::Cancelled)
    }

    /// Shorthand for a failed call carrying the backend's message.
    #[track_caller]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::new(GenerationErrorKind::Failed(message.into()))
    }

    /// Whether the call ended through cancellation rather than failure.
    pub fn is_cancelled(&self) -> bool {
        self.kind == GenerationErrorKind::Cancelled
    }
}
