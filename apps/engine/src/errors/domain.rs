//! Domain-level error type used across the engine, the store and the AI layer.
//!
//! This error type is transport- and storage-agnostic. A request-handling
//! collaborator maps it to user-facing messages via [`ErrorCode`].
//!
//! [`ErrorCode`]: super::ErrorCode

use thiserror::Error;

/// Input or rule violations by the acting player.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    InvalidBid,
    DealerRestriction,
    CardNotInHand,
    MustFollowSuit,
    OutOfTurn,
    AlreadyBid,
    ParseCard,
    InvalidPlayerName,
    InvalidMaxPlayers,
    NotAdmin,
    NotAiPlayer,
    Other(String),
}

/// Action attempted in the wrong session or section phase.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StateKind {
    PhaseMismatch,
    GameNotStarted,
    GameAlreadyStarted,
    GameFinished,
    NoOpenTrick,
}

/// Missing resource in domain terms.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NotFoundKind {
    Session,
    Player,
    Section,
    Hand,
    Trick,
    AiPlayer,
}

/// Seat-count related failures.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CapacityKind {
    SessionFull,
    NotEnoughPlayers,
    DeckExhausted,
}

/// Infra error kinds to distinguish operational failures.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum InfraErrorKind {
    Store,
    Ai,
    Config,
    DataCorruption,
}

/// Central domain error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Input/user validation or business rule violation
    #[error("validation error {0:?}: {1}")]
    Validation(ValidationKind, String),
    /// Action not allowed in the current phase
    #[error("state error {0:?}: {1}")]
    State(StateKind, String),
    /// Missing resource
    #[error("not found {0:?}: {1}")]
    NotFound(NotFoundKind, String),
    /// Seat capacity violated
    #[error("capacity error {0:?}: {1}")]
    Capacity(CapacityKind, String),
    /// Infrastructure/operational failures
    #[error("infra {0:?}: {1}")]
    Infra(InfraErrorKind, String),
}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }

    pub fn validation_other(detail: impl Into<String>) -> Self {
        let detail = detail.into();
        Self::Validation(ValidationKind::Other(detail.clone()), detail)
    }

    pub fn state(kind: StateKind, detail: impl Into<String>) -> Self {
        Self::State(kind, detail.into())
    }

    pub fn not_found(kind: NotFoundKind, detail: impl Into<String>) -> Self {
        Self::NotFound(kind, detail.into())
    }

    pub fn capacity(kind: CapacityKind, detail: impl Into<String>) -> Self {
        Self::Capacity(kind, detail.into())
    }

    pub fn infra(kind: InfraErrorKind, detail: impl Into<String>) -> Self {
        Self::Infra(kind, detail.into())
    }

    /// Soft rejections can be retried by the same actor with different input
    /// (another card, another bid). Everything else needs an external state
    /// change first.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DomainError::Validation(..))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_soft() {
        let err = DomainError::validation(ValidationKind::MustFollowSuit, "follow hearts");
        assert!(err.is_retryable());
    }

    #[test]
    fn other_categories_are_hard() {
        let errs = [
            DomainError::state(StateKind::PhaseMismatch, "bidding closed"),
            DomainError::not_found(NotFoundKind::Session, "missing"),
            DomainError::capacity(CapacityKind::SessionFull, "full"),
            DomainError::infra(InfraErrorKind::Store, "down"),
        ];
        for err in errs {
            assert!(!err.is_retryable(), "{err} should be hard");
        }
    }

    #[test]
    fn display_includes_detail() {
        let err = DomainError::not_found(NotFoundKind::Player, "player 7");
        assert_eq!(err.to_string(), "not found Player: player 7");
    }
}
