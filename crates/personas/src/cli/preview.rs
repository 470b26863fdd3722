//! Offline chain preview command handler.

use super::{OutputFormat, excerpt, load_steps, print_json, select_model};
use personas::{
    ChainDriver, ChainError, ChainErrorKind, ChainState, ChainView, ContextBudget,
    GenerateRequest, PersonasConfig, PersonasResult, PreviewPort,
};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

/// Characters of the source text shown before the step breakdown.
const EXCERPT_CHARS: usize = 280;

/// What one step received.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepReport {
    /// Position in the chain
    pub index: usize,
    /// Step label
    pub name: String,
    /// Characters in the step's untruncated input
    pub input_chars: usize,
    /// Characters actually sent as the user message
    pub sent_chars: usize,
    /// Whether the input exceeded the character budget
    pub truncated: bool,
}

#[derive(Debug, Serialize)]
struct PreviewReport<'a> {
    model: &'a str,
    budget: ContextBudget,
    excerpt: String,
    steps: Vec<StepReport>,
    view: &'a ChainView,
}

/// Run the chain against [`PreviewPort`] and print what each step was sent.
///
/// Returns the final view so the caller can decide the exit status.
#[instrument(skip(config))]
pub async fn run_preview(
    config: &PersonasConfig,
    input: &Path,
    model: Option<&str>,
    steps: Option<&Path>,
    format: OutputFormat,
) -> PersonasResult<ChainView> {
    let model = select_model(config, model)?;
    let steps = load_steps(steps)?;
    let text = std::fs::read_to_string(input).map_err(|e| {
        ChainError::new(ChainErrorKind::InputRead(format!(
            "{}: {}",
            input.display(),
            e
        )))
    })?;

    let port = Arc::new(PreviewPort::new());
    let mut driver = ChainDriver::new(steps, Arc::clone(&port), config.model_registry())?
        .with_settings(config.budget_settings());

    driver.set_inputs(Some(&model), Some(&text));
    let view = driver.run_until_idle().await;
    info!(
        finished = view.is_finished,
        progress = view.progress,
        "Preview complete"
    );

    let Some(chain) = driver.chain() else {
        if let Some(error) = &view.error {
            eprintln!("Error: {}", error);
        } else {
            eprintln!("Input is empty; nothing to preview");
        }
        return Ok(view);
    };

    let reports = step_reports(chain, &port.requests());
    match format {
        OutputFormat::Json => print_json(&PreviewReport {
            model: &model,
            budget: *chain.budget(),
            excerpt: excerpt(&text, EXCERPT_CHARS),
            steps: reports,
            view: &view,
        })?,
        OutputFormat::Human => print_human(&model, chain, &text, &reports, &view),
    }

    Ok(view)
}

/// Pair each step with the request it produced, in chain order.
pub fn step_reports(chain: &ChainState, requests: &[GenerateRequest]) -> Vec<StepReport> {
    let budget = chain.input_char_budget();
    chain
        .steps()
        .iter()
        .zip(requests)
        .map(|(step, request)| {
            let input_chars = step.input().as_deref().map_or(0, |s| s.chars().count());
            StepReport {
                index: *step.index(),
                name: step.name().clone(),
                input_chars,
                sent_chars: request.user_text().map_or(0, |s| s.chars().count()),
                truncated: input_chars > budget,
            }
        })
        .collect()
}

fn print_human(
    model: &str,
    chain: &ChainState,
    text: &str,
    reports: &[StepReport],
    view: &ChainView,
) {
    let budget = chain.budget();
    println!(
        "Model: {} ({} token context, {} char input budget, {} reserved output tokens)",
        model,
        budget.context_tokens(),
        budget.input_chars(),
        budget.reserved_output_tokens()
    );
    println!("Input ({} chars):", text.chars().count());
    println!("  {}", excerpt(text, EXCERPT_CHARS));
    println!("{:-<80}", "");

    let total = chain.steps().len();
    for report in reports {
        println!("Step {}/{}: {}", report.index + 1, total, report.name);
        if report.truncated {
            println!(
                "  Sent {} of {} chars (truncated)",
                report.sent_chars, report.input_chars
            );
        } else {
            println!("  Sent {} chars", report.sent_chars);
        }
    }
    println!("{:-<80}", "");

    println!("Progress: {:.0}%", view.progress * 100.0);
    if let Some(error) = &view.error {
        println!("Error: {}", error);
    } else if view.is_finished {
        println!("Finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use personas::{ChainStep, Message};

    fn request(user_text: &str) -> GenerateRequest {
        GenerateRequest {
            model: "m".to_string(),
            messages: vec![Message::system("p"), Message::user(user_text)],
            max_tokens: 10,
        }
    }

    #[test]
    fn reports_follow_requests_and_flag_truncation() {
        let steps = vec![ChainStep::new("one", "p1"), ChainStep::new("two", "p2")];
        let budget = ContextBudget::new(30, 3).unwrap();
        let chain = ChainState::initialize(&steps, "x".repeat(100), budget)
            .unwrap()
            .complete_step(0, "short")
            .unwrap();

        let sent = format!("{}\n...\n{}", "x".repeat(30), "x".repeat(30));
        let reports = step_reports(&chain, &[request(&sent), request("short")]);

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].input_chars, 100);
        assert_eq!(reports[0].sent_chars, 65);
        assert!(reports[0].truncated);
        assert_eq!(reports[1].name, "two");
        assert_eq!(reports[1].sent_chars, 5);
        assert!(!reports[1].truncated);
    }

    #[test]
    fn steps_without_requests_are_omitted() {
        let steps = vec![ChainStep::new("one", "p1"), ChainStep::new("two", "p2")];
        let budget = ContextBudget::new(3000, 3).unwrap();
        let chain = ChainState::initialize(&steps, "text", budget).unwrap();

        let reports = step_reports(&chain, &[request("text")]);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].index, 0);
    }

    #[test]
    fn chain_snapshot_renders_as_json() {
        let steps = vec![ChainStep::new("one", "p1"), ChainStep::new("two", "p2")];
        let budget = ContextBudget::new(3000, 3).unwrap();
        let chain = ChainState::initialize(&steps, "text", budget)
            .unwrap()
            .complete_step(0, "draft")
            .unwrap();

        let json = serde_json::to_value(&chain).unwrap();
        assert_eq!(json["progress"], 0.5);
        assert_eq!(json["original_input"], "text");
        assert_eq!(json["steps"][0]["output"], "draft");
        assert_eq!(json["steps"][1]["input"], "draft");
        assert_eq!(json["steps"][1]["is_complete"], false);
        assert!(json["final_output"].is_null());
    }
}
