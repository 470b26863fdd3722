//! Chain orchestration error types.

/// Specific error conditions raised while building or advancing a chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ChainErrorKind {
    /// A chain needs at least one step
    #[display("chain must contain at least one step")]
    EmptyChain,
    /// Input text was supplied without a model selection
    #[display("model not provided")]
    ModelNotProvided,
    /// The model registry has no entry for the requested model
    #[display("model '{}' not found", _0)]
    ModelNotFound(String),
    /// A step index beyond the end of the chain
    #[display("step {} is out of range for a chain of {} steps", index, len)]
    StepOutOfRange {
        /// Requested step index
        index: usize,
        /// Number of steps in the chain
        len: usize,
    },
    /// The chain reached a state that the state machine should never produce
    #[display("chain invariant violated: {}", _0)]
    InvariantViolation(String),
    /// A step definition has a blank system prompt
    #[display("step '{}' has an empty system prompt", _0)]
    EmptyPrompt(String),
    /// Failed to read a step definition file
    #[display("failed to read step definitions: {}", _0)]
    DefinitionRead(String),
    /// Failed to parse a step definition file
    #[display("failed to parse step definitions: {}", _0)]
    DefinitionParse(String),
    /// Failed to read the text fed to the first step
    #[display("failed to read input: {}", _0)]
    InputRead(String),
}

/// Error type for chain operations.
///
/// # Examples
///
/// ```
/// use personas_error::{ChainError, ChainErrorKind};
///
/// let err = ChainError::new(ChainErrorKind::EmptyChain);
/// assert!(format!("{}", err).contains("at least one step"));
/// assert_eq!(err.kind, ChainErrorKind::EmptyChain);
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Chain Error: {} at line {} in {}", kind, line, file)]
pub struct ChainError {
    /// The specific error condition
    pub kind: ChainErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ChainError {
    /// Create a new ChainError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ChainErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
