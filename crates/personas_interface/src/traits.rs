//! Seams between the chain driver and its collaborators.

use async_trait::async_trait;
use personas_core::{GenerateRequest, GenerateResponse, ModelInfo};
use personas_error::PersonasResult;
use tokio_util::sync::CancellationToken;

/// Performs one prompt round-trip against a language model.
///
/// Implementations own transport, authentication, retries and rate limiting.
/// The chain always sends a system message followed by a user message.
///
/// Cancellation is cooperative: when `cancel` fires, an implementation should
/// stop work and return [`personas_error::GenerationError::cancelled`]. The
/// driver also races every call against the token, so an implementation that
/// ignores it is still abandoned promptly.
#[async_trait]
pub trait GenerationPort: Send + Sync {
    /// Generate text for the request.
    async fn generate(
        &self,
        request: &GenerateRequest,
        cancel: &CancellationToken,
    ) -> PersonasResult<GenerateResponse>;

    /// Port name for logging (e.g., "openai", "preview").
    fn port_name(&self) -> &'static str;
}

/// Looks up models by identifier.
pub trait ModelRegistry: Send + Sync {
    /// Resolve a model, or `None` if the identifier is unknown.
    fn resolve(&self, model_id: &str) -> Option<ModelInfo>;
}
