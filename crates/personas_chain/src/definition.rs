//! Chain definitions loaded from TOML.
//!
//! ```toml
//! name = "summarise"
//!
//! [[step]]
//! name = "Outline"
//! system_prompt = "Outline the text."
//!
//! [[step]]
//! name = "Polish"
//! kind = "system_input_assistant-1"
//! system_prompt = "Turn the outline into prose."
//! ```

use personas_core::ChainStep;
use personas_error::{ChainError, ChainErrorKind, PersonasResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, instrument};

/// A validated, ordered list of chain steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainDefinition {
    /// Optional chain label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    /// Steps in execution order
    #[serde(rename = "step", default)]
    steps: Vec<ChainStep>,
}

impl ChainDefinition {
    /// Build a definition from steps, validating them.
    ///
    /// # Errors
    ///
    /// Returns [`ChainErrorKind::EmptyChain`] for no steps and
    /// [`ChainErrorKind::EmptyPrompt`] for a blank system prompt.
    pub fn new(name: Option<String>, steps: Vec<ChainStep>) -> PersonasResult<Self> {
        let definition = Self { name, steps };
        definition.validate()?;
        Ok(definition)
    }

    /// Wrap steps already known to be valid.
    pub(crate) fn from_valid_steps(name: Option<String>, steps: Vec<ChainStep>) -> Self {
        debug_assert!(!steps.is_empty());
        Self { name, steps }
    }

    /// Load and validate a definition from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> PersonasResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ChainError::new(ChainErrorKind::DefinitionRead(format!(
                "{}: {}",
                path.as_ref().display(),
                e
            )))
        })?;
        let definition: Self = content.parse()?;
        debug!(steps = definition.steps.len(), "Loaded chain definition");
        Ok(definition)
    }

    /// Chain label, if the definition has one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Steps in execution order.
    pub fn steps(&self) -> &[ChainStep] {
        &self.steps
    }

    /// Consume the definition, keeping its steps.
    pub fn into_steps(self) -> Vec<ChainStep> {
        self.steps
    }

    fn validate(&self) -> PersonasResult<()> {
        if self.steps.is_empty() {
            return Err(ChainError::new(ChainErrorKind::EmptyChain).into());
        }
        if let Some(step) = self.steps.iter().find(|s| s.system_prompt().trim().is_empty()) {
            return Err(ChainError::new(ChainErrorKind::EmptyPrompt(step.name().clone())).into());
        }
        Ok(())
    }
}

impl FromStr for ChainDefinition {
    type Err = personas_error::PersonasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let definition: Self = toml::from_str(s).map_err(|e| {
            ChainError::new(ChainErrorKind::DefinitionParse(e.to_string()))
        })?;
        definition.validate()?;
        Ok(definition)
    }
}
