//! Model descriptions used for context budgeting.

use serde::{Deserialize, Serialize};

/// What the chain needs to know about a model.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
pub struct ModelInfo {
    /// Model identifier, as passed to the generation port
    id: String,
    /// Maximum context window in tokens (input plus output)
    context_tokens: usize,
    /// Optional free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl ModelInfo {
    /// Describe a model by identifier and context size.
    pub fn new(id: impl Into<String>, context_tokens: usize) -> Self {
        Self {
            id: id.into(),
            context_tokens,
            description: None,
        }
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
