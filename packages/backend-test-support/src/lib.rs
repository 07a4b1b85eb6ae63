//! Backend test support utilities
//!
//! Shared by the backend's integration tests: one-time logging setup,
//! assertions over the JSON error contract, and unique test data.

pub mod error_body;
pub mod logging;
pub mod unique_helpers;
