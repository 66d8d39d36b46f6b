#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod ai;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod repos;
pub mod services;
pub mod telemetry;

// Re-exports for public API
pub use adapters::InMemoryStore;
pub use config::{AiPacing, EngineConfig};
pub use errors::{DomainError, ErrorCode};
pub use infra::{Clock, ManualClock, SystemClock};
pub use repos::GameStore;
pub use services::{ActionKind, CreatedSession, EventEnvelope, GameEngine, GameEvent, JoinedSeat, PendingAction};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    engine_test_support::logging::init();
}
