//! Personas CLI binary.
//!
//! This binary provides command-line access to the personas chain engine:
//! - List chain steps and configured models
//! - Show the context budget for a model
//! - Preview a chain run offline

use clap::Parser;

mod cli;

use cli::{Cli, Commands, handle_budget, handle_models, handle_steps, load_config, run_preview};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing
    #[cfg(feature = "observability")]
    personas::telemetry::init_telemetry(cli.verbose)?;
    #[cfg(not(feature = "observability"))]
    personas::telemetry::init_console_telemetry(cli.verbose)?;

    let outcome = run(cli).await;

    #[cfg(feature = "observability")]
    personas::telemetry::shutdown_telemetry();

    if !outcome? {
        std::process::exit(1);
    }
    Ok(())
}

/// Execute the requested command. Returns `false` when a chain reported an error.
async fn run(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Steps { steps, format } => {
            handle_steps(steps.as_deref(), format)?;
        }

        Commands::Models { format } => {
            handle_models(&load_config(config_path)?, format)?;
        }

        Commands::Budget { model, format } => {
            handle_budget(&load_config(config_path)?, model.as_deref(), format)?;
        }

        Commands::Preview {
            input,
            model,
            steps,
            format,
        } => {
            let config = load_config(config_path)?;
            let view =
                run_preview(&config, &input, model.as_deref(), steps.as_deref(), format).await?;
            return Ok(view.error.is_none());
        }
    }

    Ok(true)
}
