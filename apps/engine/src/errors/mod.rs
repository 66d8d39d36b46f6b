//! Error handling for the Jøssing engine.

pub mod domain;
pub mod error_code;

pub use domain::{CapacityKind, DomainError, InfraErrorKind, NotFoundKind, StateKind, ValidationKind};
pub use error_code::ErrorCode;
