//! Configuration for budgeting and the model table.
//!
//! Configuration is layered with the `config` crate:
//! - Bundled defaults (`personas.toml` shipped with the library)
//! - `~/.config/personas/personas.toml`
//! - `./personas.toml`
//!
//! Later sources override earlier ones; user files are optional.

use crate::{DEFAULT_CHARS_PER_TOKEN, InMemoryModelRegistry};
use config::{Config, File, FileFormat};
use personas_core::ModelInfo;
use personas_error::{ConfigError, PersonasError, PersonasResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Tuning for the character budget heuristic.
///
/// # Example
///
/// ```toml
/// [budget]
/// chars_per_token = 4
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_getters::Getters)]
pub struct BudgetSettings {
    /// Characters assumed per token when sizing step input
    #[serde(default = "default_chars_per_token")]
    chars_per_token: usize,
}

fn default_chars_per_token() -> usize {
    DEFAULT_CHARS_PER_TOKEN
}

impl Default for BudgetSettings {
    fn default() -> Self {
        Self {
            chars_per_token: DEFAULT_CHARS_PER_TOKEN,
        }
    }
}

impl BudgetSettings {
    /// Settings with an explicit characters-per-token factor.
    pub fn new(chars_per_token: usize) -> Self {
        Self { chars_per_token }
    }

    /// Validates that the factor is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if `chars_per_token` is zero.
    pub fn validate(&self) -> PersonasResult<()> {
        if self.chars_per_token == 0 {
            return Err(ConfigError::new("budget.chars_per_token must be greater than zero").into());
        }
        Ok(())
    }
}

/// One entry of the `[models]` table.
///
/// ```toml
/// [models."gpt-4o-mini"]
/// context_tokens = 128_000
/// description = "Fast, inexpensive"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ModelEntry {
    /// Context window in tokens
    pub context_tokens: usize,

    /// Optional human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
pub struct PersonasConfig {
    /// Budget heuristic tuning
    #[serde(default)]
    pub budget: BudgetSettings,

    /// Known models keyed by identifier
    #[serde(default)]
    pub models: HashMap<String, ModelEntry>,

    /// Model used when the caller does not pick one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_model: Option<String>,
}

impl PersonasConfig {
    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> PersonasResult<Self> {
        debug!("Loading configuration from file");

        let config: Self = Config::builder()
            .add_source(File::from(path.as_ref()).format(FileFormat::Toml))
            .build()
            .map_err(|e| {
                PersonasError::from(ConfigError::new(format!(
                    "Failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                PersonasError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.budget.validate()?;
        Ok(config)
    }

    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use personas_chain::PersonasConfig;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = PersonasConfig::load()?;
    /// let registry = config.model_registry();
    /// # Ok(())
    /// # }
    /// ```
    #[instrument]
    pub fn load() -> PersonasResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        const DEFAULT_CONFIG: &str = include_str!("../../../personas.toml");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/personas/personas.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("personas").required(false));

        let config: Self = builder
            .build()
            .map_err(|e| {
                PersonasError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                PersonasError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.budget.validate()?;
        debug!(models = config.models.len(), "Configuration loaded");
        Ok(config)
    }

    /// Build a registry from the `[models]` table.
    pub fn model_registry(&self) -> InMemoryModelRegistry {
        self.models
            .iter()
            .map(|(id, entry)| {
                let info = ModelInfo::new(id.clone(), entry.context_tokens);
                match &entry.description {
                    Some(description) => info.with_description(description.clone()),
                    None => info,
                }
            })
            .collect()
    }

    /// Budget heuristic settings.
    pub fn budget_settings(&self) -> BudgetSettings {
        self.budget
    }

    /// Pick the caller's model, falling back to `default_model`.
    pub fn select_model<'a>(&'a self, requested: Option<&'a str>) -> Option<&'a str> {
        requested.or(self.default_model.as_deref())
    }
}
