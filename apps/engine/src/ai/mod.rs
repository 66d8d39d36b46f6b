//! AI player module - handles automated game decisions.
//!
//! This module provides:
//! - the `AiPlayer` trait and three tiers (Easy, Medium, Hard)
//! - a shared hand evaluator
//! - the registry of tier factories
//! - the orchestrator that owns AI seats and opponent profiles
//! - thinking-delay strategies

mod brain;
pub mod config;
pub mod easy;
pub mod evaluator;
pub mod hard;
pub mod medium;
pub mod orchestrator;
pub mod pacing;
pub mod registry;
mod trait_def;

#[cfg(test)]
mod tests_props_legality;

pub use config::AiConfig;
pub use easy::EasyAi;
pub use hard::HardAi;
pub use medium::MediumAi;
pub use orchestrator::{AiInfo, AiOrchestrator, SectionTranscript};
pub use pacing::{NoDelay, ThinkingDelay, TierDelay};
pub use trait_def::{AiError, AiPlayer};
