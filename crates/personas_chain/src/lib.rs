//! Prompt-chain orchestration for the personas workspace.
//!
//! A chain is an ordered list of [`ChainStep`](personas_core::ChainStep)s.
//! Each step's output becomes the next step's input, and the last step's
//! output is the chain's result. This crate provides:
//!
//! - [`ContextBudget`] splits a model's context window into input and output
//!   allowances
//! - [`truncate_middle`] fits oversized input into the allowance
//! - [`ChainState`] is the immutable state machine
//! - [`ChainDriver`] runs the chain against a
//!   [`GenerationPort`](personas_interface::GenerationPort)
//! - [`PersonasConfig`] and [`ChainDefinition`] load models and steps from TOML
//!
//! # Example
//!
//! ```
//! use personas_chain::{ChainState, ContextBudget, truncate_middle};
//! use personas_core::ChainStep;
//!
//! let budget = ContextBudget::new(30, 3).unwrap();
//! let steps = vec![ChainStep::new("shorten", "Shorten the text.")];
//! let chain = ChainState::initialize(&steps, "x".repeat(100), budget).unwrap();
//!
//! let step = chain.active_step().unwrap();
//! let sent = truncate_middle(step.input().as_deref().unwrap(), chain.input_char_budget());
//! assert_eq!(sent.chars().count(), 65);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod budget;
mod config;
mod definition;
mod driver;
mod persona;
mod registry;
mod state;
mod truncate;

pub use budget::{ContextBudget, DEFAULT_CHARS_PER_TOKEN, RESERVED_OUTPUT_DIVISOR};
pub use config::{BudgetSettings, ModelEntry, PersonasConfig};
pub use definition::ChainDefinition;
pub use driver::ChainDriver;
pub use persona::{youtube_persona_definition, youtube_persona_steps};
pub use registry::InMemoryModelRegistry;
pub use state::{ChainState, StepState};
pub use truncate::{TRUNCATION_MARKER, truncate_middle};
