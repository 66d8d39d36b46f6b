//! Trick and played-card records.

use time::OffsetDateTime;

use super::GameStore;
use crate::domain::{Card, Position, SectionId, Suit, TrickId};
use crate::errors::domain::{DomainError, NotFoundKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trick {
    pub id: TrickId,
    pub section_id: SectionId,
    /// 1..=hand_size
    pub trick_no: u8,
    pub lead_position: Position,
    pub leading_suit: Option<Suit>,
    pub winner_position: Option<Position>,
    pub completed_at: Option<OffsetDateTime>,
}

impl Trick {
    pub fn is_open(&self) -> bool {
        self.completed_at.is_none()
    }
}

/// Append-only; one per seat per trick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrickCard {
    pub trick_id: TrickId,
    pub position: Position,
    pub card: Card,
    pub played_at: OffsetDateTime,
}

/// The single incomplete trick of a section.
pub fn require_open_trick(store: &dyn GameStore, section_id: SectionId) -> Result<Trick, DomainError> {
    store
        .tricks_in_section(section_id)?
        .into_iter()
        .find(Trick::is_open)
        .ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Trick,
                format!("No open trick in section {section_id}"),
            )
        })
}

/// `(position, card)` pairs in play order.
pub fn plays_of(cards: &[TrickCard]) -> Vec<(Position, Card)> {
    cards.iter().map(|tc| (tc.position, tc.card)).collect()
}
