//! Test utilities for chain driver tests.
//!
//! This module provides a mock generation port and test helpers.

pub mod mock_port;

#[allow(unused_imports)]
pub use mock_port::{MockBehavior, MockGenerationPort, MockResponse};
