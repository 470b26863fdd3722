//! Role types for conversation participants.

use serde::{Deserialize, Serialize};

/// Who authored a message in a generation request.
///
/// # Examples
///
/// ```
/// use personas_core::Role;
///
/// assert_ne!(Role::System, Role::User);
/// assert_eq!(format!("{}", Role::System), "System");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Fixed instructions for the model
    System,
    /// Text supplied by the caller
    User,
    /// Text produced by the model
    Assistant,
}
