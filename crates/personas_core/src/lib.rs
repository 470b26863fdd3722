//! Core data types for the personas prompt-chain engine.
//!
//! This crate holds the plain values shared by every other crate: chat
//! messages, generation requests and responses, chain step definitions and
//! model descriptions.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod message;
mod model;
mod request;
mod role;
mod step;

pub use message::Message;
pub use model::ModelInfo;
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse};
pub use role::Role;
pub use step::{ChainStep, StepKind};
