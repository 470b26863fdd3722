//! Error types for the personas workspace.
//!
//! Every error follows the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum names the specific condition
//! - `*Error` struct wraps the kind and records where it was raised
//! - constructors use `#[track_caller]` so the location is captured for free
//!
//! # Examples
//!
//! ```
//! use personas_error::{ChainError, ChainErrorKind, PersonasResult};
//!
//! fn start() -> PersonasResult<()> {
//!     Err(ChainError::new(ChainErrorKind::ModelNotProvided))?
//! }
//!
//! let err = start().unwrap_err();
//! assert!(format!("{}", err).contains("model not provided"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chain;
mod config;
mod error;
mod generation;
mod json;

pub use chain::{ChainError, ChainErrorKind};
pub use config::ConfigError;
pub use error::{PersonasError, PersonasErrorKind, PersonasResult};
pub use generation::{GenerationError, GenerationErrorKind};
pub use json::JsonError;
