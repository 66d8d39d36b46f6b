//! Engine test support utilities
//!
//! Shared helpers for the engine's unit and integration tests: unified
//! logging initialization and env-driven proptest configuration.

pub mod logging;
pub mod proptest_env;
