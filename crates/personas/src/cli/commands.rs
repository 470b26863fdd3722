//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Personas - turn transcripts into persona character sheets with LLM prompt chains
#[derive(Parser, Debug)]
#[command(name = "personas")]
#[command(about = "Turn transcripts into persona character sheets with LLM prompt chains", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file to use instead of the layered defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the steps of a chain
    Steps {
        /// Step definition TOML file (defaults to the built-in persona chain)
        #[arg(long)]
        steps: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// List configured models
    Models {
        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Show the context budget for a model
    Budget {
        /// Model identifier (defaults to `default_model` from configuration)
        #[arg(long)]
        model: Option<String>,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },

    /// Run a chain offline and show what each step would send
    Preview {
        /// Text file to feed to the first step
        #[arg(long)]
        input: PathBuf,

        /// Model identifier (defaults to `default_model` from configuration)
        #[arg(long)]
        model: Option<String>,

        /// Step definition TOML file (defaults to the built-in persona chain)
        #[arg(long)]
        steps: Option<PathBuf>,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}
