//! Model and budget command handlers.

use super::{OutputFormat, print_json, select_model};
use personas::{ContextBudget, ModelInfo, PersonasConfig, PersonasResult};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct BudgetReport<'a> {
    model: &'a str,
    chars_per_token: usize,
    #[serde(flatten)]
    budget: ContextBudget,
}

/// Show the context budget for a model.
#[tracing::instrument(skip(config))]
pub fn handle_budget(
    config: &PersonasConfig,
    model: Option<&str>,
    format: OutputFormat,
) -> PersonasResult<()> {
    let model = select_model(config, model)?;
    let settings = config.budget_settings();
    let budget = ContextBudget::resolve(
        &config.model_registry(),
        &model,
        *settings.chars_per_token(),
    )?;

    match format {
        OutputFormat::Json => print_json(&BudgetReport {
            model: &model,
            chars_per_token: *settings.chars_per_token(),
            budget,
        })?,
        OutputFormat::Human => {
            println!("Model: {}", model);
            println!("  Context window:  {} tokens", budget.context_tokens());
            println!("  Reserved output: {} tokens", budget.reserved_output_tokens());
            println!("  Input:           {} tokens", budget.input_tokens());
            println!(
                "  Input budget:    {} chars ({} chars per token)",
                budget.input_chars(),
                settings.chars_per_token()
            );
        }
    }

    Ok(())
}

/// List configured models.
#[tracing::instrument(skip(config))]
pub fn handle_models(config: &PersonasConfig, format: OutputFormat) -> PersonasResult<()> {
    let registry = config.model_registry();
    let models: Vec<&ModelInfo> = registry.models();

    match format {
        OutputFormat::Json => print_json(&models)?,
        OutputFormat::Human => {
            println!("{:<28} {:>10}  Description", "Model", "Context");
            println!("{:-<70}", "");
            for model in &models {
                let marker = if config.default_model.as_deref() == Some(model.id().as_str()) {
                    " (default)"
                } else {
                    ""
                };
                println!(
                    "{:<28} {:>10}  {}{}",
                    model.id(),
                    model.context_tokens(),
                    model.description().as_deref().unwrap_or(""),
                    marker
                );
            }
            println!("Total: {} models", models.len());
        }
    }

    Ok(())
}
