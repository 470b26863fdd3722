//! Static chain step definitions.

use serde::{Deserialize, Serialize};

/// How a step prompts the model.
///
/// Only one mode exists today: a fixed system prompt, the step input as the
/// user message, and the assistant reply taken as the step output.
///
/// # Examples
///
/// ```
/// use personas_core::StepKind;
/// use std::str::FromStr;
///
/// let kind = StepKind::from_str("system_input_assistant-1").unwrap();
/// assert_eq!(kind, StepKind::SystemInputAssistant);
/// assert_eq!(kind.to_string(), "system_input_assistant-1");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
pub enum StepKind {
    /// System prompt + user input → assistant output
    #[default]
    #[serde(rename = "system_input_assistant-1")]
    #[strum(serialize = "system_input_assistant-1")]
    SystemInputAssistant,
}

/// One stage of a prompt chain, supplied by the caller and never mutated.
///
/// # Examples
///
/// ```
/// use personas_core::{ChainStep, StepKind};
///
/// let step = ChainStep::new("Analysis", "Analyse the speaker.");
/// assert_eq!(step.name(), "Analysis");
/// assert_eq!(*step.kind(), StepKind::SystemInputAssistant);
/// assert_eq!(step.system_prompt(), "Analyse the speaker.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
pub struct ChainStep {
    /// Human-readable step label
    name: String,
    /// Prompting mode
    #[serde(default)]
    kind: StepKind,
    /// Fixed system instruction for this step
    system_prompt: String,
}

impl ChainStep {
    /// Create a step using the default prompting mode.
    pub fn new(name: impl Into<String>, system_prompt: impl Into<String>) -> Self {
        Self::with_kind(name, StepKind::default(), system_prompt)
    }

    /// Create a step with an explicit prompting mode.
    pub fn with_kind(
        name: impl Into<String>,
        kind: StepKind,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            system_prompt: system_prompt.into(),
        }
    }
}
