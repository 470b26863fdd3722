//! Step listing command handler.

use super::{OutputFormat, load_steps, print_json};
use personas::PersonasResult;
use std::path::Path;

/// List the steps of a chain.
#[tracing::instrument(skip_all)]
pub fn handle_steps(steps: Option<&Path>, format: OutputFormat) -> PersonasResult<()> {
    let steps = load_steps(steps)?;

    match format {
        OutputFormat::Json => print_json(&steps)?,
        OutputFormat::Human => {
            println!("Chain with {} steps:", steps.len());
            println!("{:-<80}", "");
            for (index, step) in steps.iter().enumerate() {
                println!("{}. {} [{}]", index + 1, step.name(), step.kind());
                println!("   {}", step.system_prompt());
                println!("{:-<80}", "");
            }
        }
    }

    Ok(())
}
