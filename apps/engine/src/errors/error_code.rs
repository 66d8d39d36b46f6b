//! Error codes for the Jøssing engine.
//!
//! Every failure the engine reports maps to one of these codes. Add new
//! codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE.

use core::fmt;

use super::domain::{
    CapacityKind, DomainError, InfraErrorKind, NotFoundKind, StateKind, ValidationKind,
};

/// Centralized error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation
    /// Bid outside `0..=hand_size`
    InvalidBid,
    /// Final bid would make the bid total equal the trick total
    DealerRestriction,
    /// Card not in hand
    CardNotInHand,
    /// Must follow suit
    MustFollowSuit,
    /// Out of turn
    OutOfTurn,
    /// Player already bid this section
    AlreadyBid,
    /// Parse card error
    ParseCard,
    /// Player name empty, too long or taken
    InvalidPlayerName,
    /// Seat count outside the allowed range
    InvalidMaxPlayers,
    /// Admin-only operation
    NotAdmin,
    /// Target player is not an AI
    NotAiPlayer,
    /// General validation error
    ValidationError,

    // State
    /// Phase mismatch
    PhaseMismatch,
    /// Game has not started
    GameNotStarted,
    /// Game already started
    GameAlreadyStarted,
    /// Game is over
    GameFinished,
    /// No trick is open
    NoOpenTrick,

    // Not found
    SessionNotFound,
    PlayerNotFound,
    SectionNotFound,
    HandNotFound,
    TrickNotFound,
    AiPlayerNotFound,

    // Capacity
    SessionFull,
    NotEnoughPlayers,
    DeckExhausted,

    // Infra
    StoreError,
    AiError,
    ConfigError,
    DataCorruption,
}

impl ErrorCode {
    /// Canonical string for this code.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidBid => "INVALID_BID",
            Self::DealerRestriction => "DEALER_RESTRICTION",
            Self::CardNotInHand => "CARD_NOT_IN_HAND",
            Self::MustFollowSuit => "MUST_FOLLOW_SUIT",
            Self::OutOfTurn => "OUT_OF_TURN",
            Self::AlreadyBid => "ALREADY_BID",
            Self::ParseCard => "PARSE_CARD",
            Self::InvalidPlayerName => "INVALID_PLAYER_NAME",
            Self::InvalidMaxPlayers => "INVALID_MAX_PLAYERS",
            Self::NotAdmin => "NOT_ADMIN",
            Self::NotAiPlayer => "NOT_AI_PLAYER",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::PhaseMismatch => "PHASE_MISMATCH",
            Self::GameNotStarted => "GAME_NOT_STARTED",
            Self::GameAlreadyStarted => "GAME_ALREADY_STARTED",
            Self::GameFinished => "GAME_FINISHED",
            Self::NoOpenTrick => "NO_OPEN_TRICK",
            Self::SessionNotFound => "SESSION_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::SectionNotFound => "SECTION_NOT_FOUND",
            Self::HandNotFound => "HAND_NOT_FOUND",
            Self::TrickNotFound => "TRICK_NOT_FOUND",
            Self::AiPlayerNotFound => "AI_PLAYER_NOT_FOUND",
            Self::SessionFull => "SESSION_FULL",
            Self::NotEnoughPlayers => "NOT_ENOUGH_PLAYERS",
            Self::DeckExhausted => "DECK_EXHAUSTED",
            Self::StoreError => "STORE_ERROR",
            Self::AiError => "AI_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&DomainError> for ErrorCode {
    fn from(err: &DomainError) -> Self {
        match err {
            DomainError::Validation(kind, _) => match kind {
                ValidationKind::InvalidBid => Self::InvalidBid,
                ValidationKind::DealerRestriction => Self::DealerRestriction,
                ValidationKind::CardNotInHand => Self::CardNotInHand,
                ValidationKind::MustFollowSuit => Self::MustFollowSuit,
                ValidationKind::OutOfTurn => Self::OutOfTurn,
                ValidationKind::AlreadyBid => Self::AlreadyBid,
                ValidationKind::ParseCard => Self::ParseCard,
                ValidationKind::InvalidPlayerName => Self::InvalidPlayerName,
                ValidationKind::InvalidMaxPlayers => Self::InvalidMaxPlayers,
                ValidationKind::NotAdmin => Self::NotAdmin,
                ValidationKind::NotAiPlayer => Self::NotAiPlayer,
                ValidationKind::Other(_) => Self::ValidationError,
            },
            DomainError::State(kind, _) => match kind {
                StateKind::PhaseMismatch => Self::PhaseMismatch,
                StateKind::GameNotStarted => Self::GameNotStarted,
                StateKind::GameAlreadyStarted => Self::GameAlreadyStarted,
                StateKind::GameFinished => Self::GameFinished,
                StateKind::NoOpenTrick => Self::NoOpenTrick,
            },
            DomainError::NotFound(kind, _) => match kind {
                NotFoundKind::Session => Self::SessionNotFound,
                NotFoundKind::Player => Self::PlayerNotFound,
                NotFoundKind::Section => Self::SectionNotFound,
                NotFoundKind::Hand => Self::HandNotFound,
                NotFoundKind::Trick => Self::TrickNotFound,
                NotFoundKind::AiPlayer => Self::AiPlayerNotFound,
            },
            DomainError::Capacity(kind, _) => match kind {
                CapacityKind::SessionFull => Self::SessionFull,
                CapacityKind::NotEnoughPlayers => Self::NotEnoughPlayers,
                CapacityKind::DeckExhausted => Self::DeckExhausted,
            },
            DomainError::Infra(kind, _) => match kind {
                InfraErrorKind::Store => Self::StoreError,
                InfraErrorKind::Ai => Self::AiError,
                InfraErrorKind::Config => Self::ConfigError,
                InfraErrorKind::DataCorruption => Self::DataCorruption,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    const ALL: &[ErrorCode] = &[
        ErrorCode::InvalidBid,
        ErrorCode::DealerRestriction,
        ErrorCode::CardNotInHand,
        ErrorCode::MustFollowSuit,
        ErrorCode::OutOfTurn,
        ErrorCode::AlreadyBid,
        ErrorCode::ParseCard,
        ErrorCode::InvalidPlayerName,
        ErrorCode::InvalidMaxPlayers,
        ErrorCode::NotAdmin,
        ErrorCode::NotAiPlayer,
        ErrorCode::ValidationError,
        ErrorCode::PhaseMismatch,
        ErrorCode::GameNotStarted,
        ErrorCode::GameAlreadyStarted,
        ErrorCode::GameFinished,
        ErrorCode::NoOpenTrick,
        ErrorCode::SessionNotFound,
        ErrorCode::PlayerNotFound,
        ErrorCode::SectionNotFound,
        ErrorCode::HandNotFound,
        ErrorCode::TrickNotFound,
        ErrorCode::AiPlayerNotFound,
        ErrorCode::SessionFull,
        ErrorCode::NotEnoughPlayers,
        ErrorCode::DeckExhausted,
        ErrorCode::StoreError,
        ErrorCode::AiError,
        ErrorCode::ConfigError,
        ErrorCode::DataCorruption,
    ];

    #[test]
    fn codes_are_unique_and_screaming_snake() {
        let mut seen = HashSet::new();
        for code in ALL {
            let s = code.as_str();
            assert!(seen.insert(s), "duplicate code {s}");
            assert!(s
                .chars()
                .all(|c| c.is_ascii_uppercase() || c == '_'));
        }
    }

    #[test]
    fn domain_errors_map_to_codes() {
        let err = DomainError::validation(ValidationKind::OutOfTurn, "seat 2 expected");
        assert_eq!(ErrorCode::from(&err), ErrorCode::OutOfTurn);

        let err = DomainError::capacity(CapacityKind::SessionFull, "6/6");
        assert_eq!(ErrorCode::from(&err).to_string(), "SESSION_FULL");
    }
}
