//! AI player trait definition.

use thiserror::Error;

use crate::domain::{BidRequest, Card, Difficulty, GameContext, PlayRequest, Position, Suit};
use crate::errors::domain::{DomainError, InfraErrorKind};

/// Errors that can occur during AI decision-making.
#[derive(Debug, Error)]
pub enum AiError {
    /// AI encountered an internal error
    #[error("AI internal error: {0}")]
    Internal(String),
    /// AI produced an invalid move
    #[error("AI invalid move: {0}")]
    InvalidMove(String),
}

impl From<AiError> for DomainError {
    fn from(err: AiError) -> Self {
        DomainError::infra(InfraErrorKind::Ai, err.to_string())
    }
}

/// Trait for AI players.
///
/// Implementations receive what the acting seat can see and must choose a
/// legal action from `req.legal_bids()` / `req.legal_plays()`.
///
/// The `observe_*` hooks feed the AI's section memory. The orchestrator
/// calls [`reset_memory`](AiPlayer::reset_memory) and replays the whole
/// section before every decision, so implementations never need to guard
/// against missed or duplicated observations.
pub trait AiPlayer: Send + Sync {
    fn difficulty(&self) -> Difficulty;

    /// Choose a bid value.
    fn make_bid(&self, req: &BidRequest, ctx: Option<&GameContext>) -> Result<u8, AiError>;

    /// Choose a card to play.
    fn play_card(&self, req: &PlayRequest, ctx: Option<&GameContext>) -> Result<Card, AiError>;

    /// Human-readable rationale for the last decision. Never affects play.
    fn describe_reasoning(&self) -> String;

    fn observe_bid(&self, _position: Position, _bid: u8) {}

    /// `leading` is the trick's suit before this card was played.
    fn observe_card(&self, _position: Position, _card: Card, _leading: Option<Suit>) {}

    fn reset_memory(&self) {}
}
