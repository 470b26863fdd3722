//! Top-level error wrapper types.

use crate::{ChainError, ConfigError, GenerationError, JsonError};

/// Every error condition the workspace can produce.
///
/// # Examples
///
/// ```
/// use personas_error::{ConfigError, PersonasError};
///
/// let err: PersonasError = ConfigError::new("missing models table").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum PersonasErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Chain construction or transition error
    #[from(ChainError)]
    Chain(ChainError),
    /// Generation port error
    #[from(GenerationError)]
    Generation(GenerationError),
    /// JSON serialization error
    #[from(JsonError)]
    Json(JsonError),
}

/// Personas error with kind discrimination.
///
/// # Examples
///
/// ```
/// use personas_error::{GenerationError, PersonasError, PersonasResult};
///
/// fn call() -> PersonasResult<String> {
///     Err(GenerationError::cancelled())?
/// }
///
/// let err = call().unwrap_err();
/// assert!(err.is_cancellation());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Personas Error: {}", _0)]
pub struct PersonasError(Box<PersonasErrorKind>);

impl PersonasError {
    /// Create a new error from a kind.
    pub fn new(kind: PersonasErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &PersonasErrorKind {
        &self.0
    }

    /// Whether this error is a cooperative cancellation of a generation call.
    pub fn is_cancellation(&self) -> bool {
        matches!(self.kind(), PersonasErrorKind::Generation(e) if e.is_cancelled())
    }

    /// The message a user should see, without source location details.
    ///
    /// # Examples
    ///
    /// ```
    /// use personas_error::{ChainError, ChainErrorKind, PersonasError};
    ///
    /// let err: PersonasError = ChainError::new(ChainErrorKind::ModelNotProvided).into();
    /// assert_eq!(err.user_message(), "model not provided");
    /// ```
    pub fn user_message(&self) -> String {
        match self.kind() {
            PersonasErrorKind::Config(e) => e.message.clone(),
            PersonasErrorKind::Chain(e) => e.kind.to_string(),
            PersonasErrorKind::Generation(e) => e.kind.to_string(),
            PersonasErrorKind::Json(e) => e.message.clone(),
        }
    }
}

// Generic From implementation for any type that converts to PersonasErrorKind
impl<T> From<T> for PersonasError
where
    T: Into<PersonasErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for personas operations.
pub type PersonasResult<T> = std::result::Result<T, PersonasError>;
