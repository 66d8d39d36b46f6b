//! Session records.

use time::OffsetDateTime;

use super::GameStore;
use crate::domain::{GameType, PlayerId, ScoringSystem, SessionId, SessionPhase};
use crate::errors::domain::{DomainError, NotFoundKind};

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub id: SessionId,
    pub admin_player_id: PlayerId,
    pub game_type: GameType,
    pub scoring: ScoringSystem,
    pub max_players: u8,
    /// 0 before the first deal.
    pub current_section_no: u8,
    pub phase: SessionPhase,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub started_at: Option<OffsetDateTime>,
    pub ended_at: Option<OffsetDateTime>,
}

impl Session {
    pub fn total_sections(&self) -> u8 {
        self.game_type.total_sections()
    }

    pub fn is_last_section(&self) -> bool {
        self.current_section_no >= self.total_sections()
    }
}

pub fn require_session(store: &dyn GameStore, id: SessionId) -> Result<Session, DomainError> {
    store
        .find_session(id)?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Session, format!("Session {id} not found")))
}
