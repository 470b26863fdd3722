//! Mock generation port for testing.

use async_trait::async_trait;
use personas_core::{GenerateRequest, GenerateResponse};
use personas_error::{GenerationError, PersonasResult};
use personas_interface::{CancellationToken, GenerationPort};
use std::sync::{Arc, Mutex};

/// Behavior configuration for mock responses.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Return the user text unchanged
    Echo,
    /// Return a sequence of responses, failing once it runs out
    Sequence(Vec<MockResponse>),
    /// Wait until the gate opens, then echo; ignores the call's own token
    Gated(CancellationToken),
    /// Panic inside generate() with the given message
    Panic(&'static str),
}

/// A single mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(String),
    Error(String),
    Cancelled,
}

/// Mock generation port that records every request it receives.
pub struct MockGenerationPort {
    behavior: MockBehavior,
    requests: Arc<Mutex<Vec<GenerateRequest>>>,
}

impl MockGenerationPort {
    /// Create a mock port that echoes user text.
    #[allow(dead_code)]
    pub fn new_echo() -> Self {
        Self::new_with_behavior(MockBehavior::Echo)
    }

    /// Create a mock port that answers with successive texts.
    #[allow(dead_code)]
    pub fn new_texts(texts: &[&str]) -> Self {
        Self::new_sequence(
            texts
                .iter()
                .map(|t| MockResponse::Success(t.to_string()))
                .collect(),
        )
    }

    /// Create a mock port with a sequence of responses.
    #[allow(dead_code)]
    pub fn new_sequence(responses: Vec<MockResponse>) -> Self {
        Self::new_with_behavior(MockBehavior::Sequence(responses))
    }

    /// Create a mock port that blocks until `gate` is cancelled.
    #[allow(dead_code)]
    pub fn new_gated(gate: CancellationToken) -> Self {
        Self::new_with_behavior(MockBehavior::Gated(gate))
    }

    /// Create a mock port whose every call panics.
    #[allow(dead_code)]
    pub fn new_panicking(message: &'static str) -> Self {
        Self::new_with_behavior(MockBehavior::Panic(message))
    }

    /// Create a mock port with custom behavior.
    pub fn new_with_behavior(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of times generate() was called.
    #[allow(dead_code)]
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Every request received so far, in order.
    #[allow(dead_code)]
    pub fn requests(&self) -> Vec<GenerateRequest> {
        self.requests.lock().unwrap().clone()
    }
}

fn echo(request: &GenerateRequest) -> GenerateResponse {
    GenerateResponse::new(request.user_text().unwrap_or_default())
}

#[async_trait]
impl GenerationPort for MockGenerationPort {
    async fn generate(
        &self,
        request: &GenerateRequest,
        _cancel: &CancellationToken,
    ) -> PersonasResult<GenerateResponse> {
        let call = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len() - 1
        };

        match &self.behavior {
            MockBehavior::Echo => Ok(echo(request)),
            MockBehavior::Sequence(responses) => match responses.get(call) {
                Some(MockResponse::Success(text)) => Ok(GenerateResponse::new(text.clone())),
                Some(MockResponse::Error(message)) => {
                    Err(GenerationError::failed(message.clone()).into())
                }
                Some(MockResponse::Cancelled) => Err(GenerationError::cancelled().into()),
                None => Err(GenerationError::failed("mock sequence exhausted").into()),
            },
            MockBehavior::Gated(gate) => {
                gate.cancelled().await;
                Ok(echo(request))
            }
            MockBehavior::Panic(message) => panic!("{}", message),
        }
    }

    fn port_name(&self) -> &'static str {
        "mock"
    }
}
