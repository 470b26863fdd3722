//! Request and response types for LLM generation.

use crate::Message;
use serde::{Deserialize, Serialize};

/// A generation request handed to a generation port.
///
/// # Examples
///
/// ```
/// use personas_core::{GenerateRequest, Message};
///
/// let request = GenerateRequest::builder()
///     .model("gpt-4o-mini")
///     .messages(vec![
///         Message::system("You are a careful analyst."),
///         Message::user("transcript text"),
///     ])
///     .max_tokens(1000u32)
///     .build()
///     .unwrap();
///
/// assert_eq!(request.messages.len(), 2);
/// assert_eq!(request.max_tokens, 1000);
/// assert_eq!(request.user_text(), Some("transcript text"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_builder::Builder)]
#[builder(setter(into))]
pub struct GenerateRequest {
    /// Model identifier to use
    pub model: String,
    /// The conversation messages to send, in order
    pub messages: Vec<Message>,
    /// Maximum number of tokens the model may generate
    pub max_tokens: u32,
}

impl GenerateRequest {
    /// Creates a new request builder.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }

    /// Content of the first system-role message, if any.
    pub fn system_prompt(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == crate::Role::System)
            .map(|m| m.content.as_str())
    }

    /// Content of the last user-role message, if any.
    pub fn user_text(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == crate::Role::User)
            .map(|m| m.content.as_str())
    }
}

/// Text produced by a generation call.
///
/// # Examples
///
/// ```
/// use personas_core::GenerateResponse;
///
/// let response = GenerateResponse::new("You are a...");
/// assert_eq!(response.content, "You are a...");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The generated text
    pub content: String,
}

impl GenerateResponse {
    /// Wrap generated text.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}
