//! Read-only projections handed to callers.

use serde::{Deserialize, Serialize};

/// What a caller (a UI, a CLI) may observe about a running chain.
///
/// # Examples
///
/// ```
/// use personas_interface::ChainView;
///
/// let idle = ChainView::default();
/// assert!(!idle.is_finished);
/// assert!(!idle.is_transforming);
/// assert_eq!(idle.progress, 0.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChainView {
    /// The final output is available
    pub is_finished: bool,
    /// A chain exists and has not produced its final output yet
    pub is_transforming: bool,
    /// Completed fraction of the chain, in `[0, 1]`
    pub progress: f64,
    /// Final output of the last step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
    /// Last recorded error message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
