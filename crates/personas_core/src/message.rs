//! Message types for generation requests.

use crate::Role;
use serde::{Deserialize, Serialize};

/// A single text message in a generation request.
///
/// # Examples
///
/// ```
/// use personas_core::{Message, Role};
///
/// let message = Message::system("Summarise the transcript.");
/// assert_eq!(message.role, Role::System);
/// assert_eq!(message.content, "Summarise the transcript.");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Message {
    /// The role of the message sender
    pub role: Role,
    /// The text of the message
    pub content: String,
}

impl Message {
    /// Create a message with an explicit role.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system-role message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Create a user-role message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }
}
