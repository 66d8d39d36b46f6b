use super::GameStore;
use crate::domain::{Card, PlayerId, SectionId};
use crate::errors::domain::{DomainError, NotFoundKind};

/// A player's remaining cards for one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand {
    pub player_id: PlayerId,
    pub section_id: SectionId,
    pub cards: Vec<Card>,
}

impl Hand {
    /// Remove `card`; returns whether it was held.
    pub fn take(&mut self, card: Card) -> bool {
        match self.cards.iter().position(|c| *c == card) {
            Some(idx) => {
                self.cards.remove(idx);
                true
            }
            None => false,
        }
    }
}

pub fn require_hand(
    store: &dyn GameStore,
    player_id: PlayerId,
    section_id: SectionId,
) -> Result<Hand, DomainError> {
    store.find_hand(player_id, section_id)?.ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::Hand,
            format!("No hand for player {player_id} in section {section_id}"),
        )
    })
}
