//! Offline generation port.

use async_trait::async_trait;
use personas_core::{GenerateRequest, GenerateResponse};
use personas_error::{GenerationError, PersonasResult};
use personas_interface::{CancellationToken, GenerationPort};
use std::sync::{Mutex, PoisonError};
use tracing::{debug, instrument};

/// Generation port that answers every request with its own user text.
///
/// Running a chain through it shows exactly what each step would send to a
/// real model, including truncation, without any network access.
///
/// # Examples
///
/// ```
/// use personas::{CancellationToken, GenerateRequest, GenerationPort, Message, PreviewPort};
///
/// # tokio_test(async {
/// let port = PreviewPort::new();
/// let request = GenerateRequest {
///     model: "any".to_string(),
///     messages: vec![Message::system("Summarise."), Message::user("some text")],
///     max_tokens: 100,
/// };
///
/// let response = port.generate(&request, &CancellationToken::new()).await.unwrap();
/// assert_eq!(response.content, "some text");
/// assert_eq!(port.requests().len(), 1);
/// # });
/// # fn tokio_test(f: impl std::future::Future<Output = ()>) {
/// #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
/// # }
/// ```
#[derive(Debug, Default)]
pub struct PreviewPort {
    requests: Mutex<Vec<GenerateRequest>>,
}

impl PreviewPort {
    /// Create a port with an empty request log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request answered so far, in order.
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl GenerationPort for PreviewPort {
    #[instrument(skip(self, request, cancel), fields(model = %request.model, max_tokens = request.max_tokens))]
    async fn generate(
        &self,
        request: &GenerateRequest,
        cancel: &CancellationToken,
    ) -> PersonasResult<GenerateResponse> {
        if cancel.is_cancelled() {
            return Err(GenerationError::cancelled().into());
        }

        let content = request.user_text().ok_or_else(|| {
            GenerationError::failed("request has no user message")
        })?;
        debug!(chars = content.chars().count(), "Echoing user text");

        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        Ok(GenerateResponse::new(content))
    }

    fn port_name(&self) -> &'static str {
        "preview"
    }
}
