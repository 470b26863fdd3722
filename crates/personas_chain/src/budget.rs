//! Context budgeting for chain steps.
//!
//! A model's context window is split between the prompt and the reply: one
//! third is reserved for output, the rest is available for input. Input size
//! is enforced in characters because no tokenizer runs locally.

use personas_core::ModelInfo;
use personas_error::{ChainError, ChainErrorKind, ConfigError, PersonasResult};
use personas_interface::ModelRegistry;
use serde::{Deserialize, Serialize};

/// Approximate characters per token used to turn a token budget into a
/// character budget. Overridable through [`crate::BudgetSettings`].
pub const DEFAULT_CHARS_PER_TOKEN: usize = 3;

/// The context window is divided by this to get the reserved output tokens.
pub const RESERVED_OUTPUT_DIVISOR: usize = 3;

/// Input and output allowances derived from a model's context size.
///
/// # Examples
///
/// ```
/// use personas_chain::ContextBudget;
///
/// let budget = ContextBudget::new(3000, 3).unwrap();
/// assert_eq!(*budget.reserved_output_tokens(), 1000);
/// assert_eq!(*budget.input_tokens(), 2000);
/// assert_eq!(*budget.input_chars(), 6000);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters,
)]
pub struct ContextBudget {
    /// Full context window of the model in tokens
    context_tokens: usize,
    /// Tokens reserved for the model's reply
    reserved_output_tokens: usize,
    /// Tokens left for the prompt
    input_tokens: usize,
    /// Character allowance for the user text of each step
    input_chars: usize,
}

impl ContextBudget {
    /// Split a context window of `context_tokens` tokens.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `chars_per_token` is zero or the
    /// window is too small to reserve at least one output token.
    pub fn new(context_tokens: usize, chars_per_token: usize) -> PersonasResult<Self> {
        if chars_per_token == 0 {
            return Err(ConfigError::new("chars_per_token must be greater than zero").into());
        }

        let reserved_output_tokens = context_tokens / RESERVED_OUTPUT_DIVISOR;
        if reserved_output_tokens == 0 {
            return Err(ConfigError::new(format!(
                "context size of {} tokens leaves no room for output",
                context_tokens
            ))
            .into());
        }

        let input_tokens = context_tokens - reserved_output_tokens;
        let input_chars = input_tokens.checked_mul(chars_per_token).ok_or_else(|| {
            ConfigError::new(format!(
                "input budget overflows: {} tokens at {} chars per token",
                input_tokens, chars_per_token
            ))
        })?;

        Ok(Self {
            context_tokens,
            reserved_output_tokens,
            input_tokens,
            input_chars,
        })
    }

    /// Budget for a known model.
    pub fn for_model(model: &ModelInfo, chars_per_token: usize) -> PersonasResult<Self> {
        Self::new(*model.context_tokens(), chars_per_token)
    }

    /// Resolve `model_id` through `registry` and budget it.
    ///
    /// # Errors
    ///
    /// Returns [`ChainErrorKind::ModelNotFound`] when the registry has no such
    /// model; no default budget is guessed.
    pub fn resolve<R: ModelRegistry + ?Sized>(
        registry: &R,
        model_id: &str,
        chars_per_token: usize,
    ) -> PersonasResult<Self> {
        let model = registry.resolve(model_id).ok_or_else(|| {
            ChainError::new(ChainErrorKind::ModelNotFound(model_id.to_string()))
        })?;
        Self::for_model(&model, chars_per_token)
    }

    /// Reserved output tokens as the `max_tokens` of a generation request.
    pub fn max_output_tokens(&self) -> u32 {
        u32::try_from(self.reserved_output_tokens).unwrap_or(u32::MAX)
    }
}
