//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the personas binary.

mod budget;
mod commands;
mod preview;
mod steps;

pub use budget::{handle_budget, handle_models};
pub use commands::{Cli, Commands, OutputFormat};
pub use preview::run_preview;
pub use steps::handle_steps;

use personas::{
    ChainDefinition, ChainError, ChainErrorKind, ChainStep, JsonError, PersonasConfig,
    PersonasResult, youtube_persona_steps,
};
use serde::Serialize;
use std::path::Path;

/// Load an explicit configuration file, or the layered defaults.
pub fn load_config(path: Option<&Path>) -> PersonasResult<PersonasConfig> {
    match path {
        Some(path) => PersonasConfig::from_file(path),
        None => PersonasConfig::load(),
    }
}

/// Load steps from a definition file, or the built-in persona chain.
pub fn load_steps(path: Option<&Path>) -> PersonasResult<Vec<ChainStep>> {
    match path {
        Some(path) => Ok(ChainDefinition::from_file(path)?.into_steps()),
        None => Ok(youtube_persona_steps()),
    }
}

/// Resolve the model to use, falling back to the configured default.
pub fn select_model(config: &PersonasConfig, requested: Option<&str>) -> PersonasResult<String> {
    config
        .select_model(requested)
        .map(str::to_string)
        .ok_or_else(|| ChainError::new(ChainErrorKind::ModelNotProvided).into())
}

/// Print a value as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> PersonasResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| JsonError::new(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

/// First `limit` characters of `text`, followed by `...`.
pub fn excerpt(text: &str, limit: usize) -> String {
    let mut excerpt: String = text.chars().take(limit).collect();
    excerpt.push_str("...");
    excerpt
}
