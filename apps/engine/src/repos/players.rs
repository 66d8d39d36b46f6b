//! Player records.

use time::OffsetDateTime;

use super::GameStore;
use crate::domain::{Difficulty, PlayerId, Position, SessionId};
use crate::errors::domain::{DomainError, NotFoundKind};

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub session_id: SessionId,
    pub name: String,
    pub is_admin: bool,
    /// 1..=seats; defines turn order.
    pub position: Position,
    pub total_score: u32,
    pub is_connected: bool,
    pub is_ai: bool,
    pub ai_difficulty: Option<Difficulty>,
    pub joined_at: OffsetDateTime,
}

impl Player {
    /// Human seat that dropped out and is now played by the AI.
    pub fn is_ai_controlled(&self) -> bool {
        self.is_ai || self.ai_difficulty.is_some()
    }
}

pub fn require_player(store: &dyn GameStore, id: PlayerId) -> Result<Player, DomainError> {
    store
        .find_player(id)?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Player, format!("Player {id} not found")))
}

/// Player seated at `pos`, from a position-ordered list.
pub fn at_position(players: &[Player], pos: Position) -> Result<&Player, DomainError> {
    players
        .iter()
        .find(|p| p.position == pos)
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Player, format!("No player at seat {pos}")))
}
