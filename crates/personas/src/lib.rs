//! Personas - multi-step LLM prompt chains
//!
//! Personas turns a block of source text into a derived artifact by running it
//! through an ordered chain of prompts, feeding each step's output to the next.
//! The built-in chain turns a video transcript into a "You are a..." persona
//! character sheet.
//!
//! # Features
//!
//! - **Context budgeting**: each model's context window is split between input
//!   and reply, and oversized input is truncated around the middle
//! - **Chain driver**: one generation call in flight at a time, cancelled and
//!   discarded when the input changes
//! - **Pluggable transport**: implement [`GenerationPort`] for any LLM backend
//! - **TOML configuration**: model table and step definitions
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use personas::{ChainDriver, PersonasConfig, PreviewPort, youtube_persona_steps};
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PersonasConfig::load()?;
//! let port = Arc::new(PreviewPort::new());
//! let mut driver = ChainDriver::new(youtube_persona_steps(), port, config.model_registry())?
//!     .with_settings(config.budget_settings());
//!
//! driver.set_inputs(Some("gpt-4o-mini"), Some("transcript text"));
//! let view = driver.run_until_idle().await;
//! println!("{:?}", view.output);
//! # Ok(())
//! # }
//! ```
//!
//! # Cargo Features
//!
//! - `observability` - OpenTelemetry span export to stdout

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod preview;
pub mod telemetry;

pub use preview::PreviewPort;

// Re-export error types
pub use personas_error::{
    ChainError, ChainErrorKind, ConfigError, GenerationError, GenerationErrorKind, JsonError,
    PersonasError, PersonasErrorKind, PersonasResult,
};

// Re-export core types
pub use personas_core::{
    ChainStep, GenerateRequest, GenerateRequestBuilder, GenerateResponse, Message, ModelInfo,
    Role, StepKind,
};

// Re-export interface
pub use personas_interface::{CancellationToken, ChainView, GenerationPort, ModelRegistry};

// Re-export chain engine
pub use personas_chain::{
    BudgetSettings, ChainDefinition, ChainDriver, ChainState, ContextBudget,
    DEFAULT_CHARS_PER_TOKEN, InMemoryModelRegistry, ModelEntry, PersonasConfig,
    RESERVED_OUTPUT_DIVISOR, StepState, TRUNCATION_MARKER, truncate_middle,
    youtube_persona_definition, youtube_persona_steps,
};
