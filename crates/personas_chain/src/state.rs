//! Immutable chain snapshots and their transitions.
//!
//! A [`ChainState`] is never edited in place. [`ChainState::complete_step`]
//! builds the next snapshot, which keeps two properties true by construction:
//! steps run strictly left to right, and at most one step is ever ready to
//! execute.

use crate::ContextBudget;
use personas_core::ChainStep;
use personas_error::{ChainError, ChainErrorKind, PersonasResult};
use serde::Serialize;

/// Runtime state of one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, derive_getters::Getters)]
pub struct StepState {
    /// Position in the chain
    index: usize,
    /// Step label, copied from the definition
    name: String,
    /// System instruction, copied from the definition
    system_prompt: String,
    /// Untruncated input; present once the step may run
    input: Option<String>,
    /// Output; present once the step has produced a result
    output: Option<String>,
    /// Whether the step has finished
    is_complete: bool,
    /// Whether this is the final step
    is_last: bool,
}

impl StepState {
    /// Ready to execute: input present and not yet complete.
    pub fn is_active(&self) -> bool {
        !self.is_complete && self.input.is_some()
    }
}

/// Snapshot of a whole chain run.
///
/// # Examples
///
/// ```
/// use personas_chain::{ChainState, ContextBudget};
/// use personas_core::ChainStep;
///
/// let steps = vec![ChainStep::new("one", "p1"), ChainStep::new("two", "p2")];
/// let budget = ContextBudget::new(3000, 3).unwrap();
///
/// let chain = ChainState::initialize(&steps, "transcript", budget).unwrap();
/// let chain = chain.complete_step(0, "draft").unwrap();
/// assert_eq!(*chain.progress(), 0.5);
/// assert_eq!(chain.steps()[1].input().as_deref(), Some("draft"));
///
/// let chain = chain.complete_step(1, "sheet").unwrap();
/// assert_eq!(chain.final_output().as_deref(), Some("sheet"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, derive_getters::Getters)]
pub struct ChainState {
    /// Ordered step states
    steps: Vec<StepState>,
    /// Completed fraction, rounded to two decimals
    progress: f64,
    /// Context budget of the model driving this chain
    budget: ContextBudget,
    /// Text the first step was given
    original_input: String,
    /// Output of the last step, once it completes
    final_output: Option<String>,
}

impl ChainState {
    /// Build the initial snapshot: step 0 holds the original input, every
    /// other step waits.
    ///
    /// # Errors
    ///
    /// Returns [`ChainErrorKind::EmptyChain`] when `steps` is empty.
    pub fn initialize(
        steps: &[ChainStep],
        original_input: impl Into<String>,
        budget: ContextBudget,
    ) -> PersonasResult<Self> {
        if steps.is_empty() {
            return Err(ChainError::new(ChainErrorKind::EmptyChain).into());
        }

        let original_input = original_input.into();
        let last = steps.len() - 1;
        let steps = steps
            .iter()
            .enumerate()
            .map(|(index, step)| StepState {
                index,
                name: step.name().clone(),
                system_prompt: step.system_prompt().clone(),
                input: (index == 0).then(|| original_input.clone()),
                output: None,
                is_complete: false,
                is_last: index == last,
            })
            .collect();

        Ok(Self {
            steps,
            progress: 0.0,
            budget,
            original_input,
            final_output: None,
        })
    }

    /// Record `output` for step `index` and return the next snapshot.
    ///
    /// The output becomes the next step's input verbatim. `self` is left
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ChainErrorKind::StepOutOfRange`] for an unknown index and
    /// [`ChainErrorKind::InvariantViolation`] when the step is not the active
    /// step (already complete, or not yet given input).
    pub fn complete_step(&self, index: usize, output: impl Into<String>) -> PersonasResult<Self> {
        let len = self.steps.len();
        let step = self
            .steps
            .get(index)
            .ok_or_else(|| ChainError::new(ChainErrorKind::StepOutOfRange { index, len }))?;

        if !step.is_active() {
            return Err(ChainError::new(ChainErrorKind::InvariantViolation(format!(
                "step {} ('{}') is not the active step",
                index, step.name
            )))
            .into());
        }

        let output = output.into();
        let steps = self
            .steps
            .iter()
            .map(|s| {
                if s.index == index {
                    StepState {
                        output: Some(output.clone()),
                        is_complete: true,
                        ..s.clone()
                    }
                } else if s.index == index + 1 {
                    StepState {
                        input: Some(output.clone()),
                        ..s.clone()
                    }
                } else {
                    s.clone()
                }
            })
            .collect();

        let final_output = step.is_last.then(|| output.clone());

        Ok(Self {
            steps,
            progress: progress_fraction(index + 1, len),
            budget: self.budget,
            original_input: self.original_input.clone(),
            final_output,
        })
    }

    /// First step that has not completed, whether or not it has input.
    pub fn next_incomplete_step(&self) -> Option<&StepState> {
        self.steps.iter().find(|s| !s.is_complete)
    }

    /// The step ready to execute, if any.
    pub fn active_step(&self) -> Option<&StepState> {
        self.next_incomplete_step().filter(|s| s.is_active())
    }

    /// Number of completed steps.
    pub fn completed_steps(&self) -> usize {
        self.steps.iter().filter(|s| s.is_complete).count()
    }

    /// Whether the last step has produced the final output.
    pub fn is_finished(&self) -> bool {
        self.final_output.is_some()
    }

    /// Character allowance applied to each step's input at execution time.
    pub fn input_char_budget(&self) -> usize {
        *self.budget.input_chars()
    }

    /// Tokens reserved for each step's reply.
    pub fn reserved_output_budget(&self) -> usize {
        *self.budget.reserved_output_tokens()
    }
}

#[cfg(test)]
impl ChainState {
    /// Corrupt a snapshot so the driver's anomaly guard can be exercised.
    pub(crate) fn with_dangling_output(mut self, index: usize, output: &str) -> Self {
        self.steps[index].output = Some(output.to_string());
        self
    }

    /// Corrupt a snapshot by taking the input away from a step.
    pub(crate) fn without_input(mut self, index: usize) -> Self {
        self.steps[index].input = None;
        self
    }
}

/// `completed / total`, rounded to two decimal places.
fn progress_fraction(completed: usize, total: usize) -> f64 {
    (100.0 * completed as f64 / total as f64).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_rounds_to_two_decimals() {
        assert_eq!(progress_fraction(1, 3), 0.33);
        assert_eq!(progress_fraction(2, 3), 0.67);
        assert_eq!(progress_fraction(3, 3), 1.0);
        assert_eq!(progress_fraction(1, 8), 0.13);
    }
}
