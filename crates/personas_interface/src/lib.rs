//! Trait definitions for the personas prompt-chain engine.
//!
//! The chain driver talks to the outside world through two seams: a
//! [`GenerationPort`] that performs one prompt round-trip, and a
//! [`ModelRegistry`] that knows each model's context size. Callers observe the
//! driver through the read-only [`ChainView`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use tokio_util::sync::CancellationToken;
pub use traits::{GenerationPort, ModelRegistry};
pub use types::ChainView;
