//! Per-section state records.

use time::OffsetDateTime;

use super::GameStore;
use crate::domain::{
    Card, PlayerId, Position, SeatScore, SectionId, SectionPhase, SessionId, Suit,
};
use crate::errors::domain::{DomainError, NotFoundKind};

/// One accepted bid; append-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidRecord {
    pub player_id: PlayerId,
    pub player_name: String,
    pub position: Position,
    pub bid: u8,
    pub placed_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionState {
    pub id: SectionId,
    pub session_id: SessionId,
    pub section_no: u8,
    /// Cards per player (and tricks) this section.
    pub hand_size: u8,
    pub dealer_position: Position,
    pub current_bidder_position: Option<Position>,
    /// Leader of the open trick during play.
    pub lead_player_position: Option<Position>,
    pub trump_card: Card,
    pub phase: SectionPhase,
    pub bids: Vec<BidRecord>,
    /// Indexed by `position - 1`.
    pub tricks_won: Vec<u8>,
    /// Filled on completion.
    pub results: Vec<SeatScore>,
    /// When the seat now due to act became due.
    pub turn_started_at: OffsetDateTime,
    pub started_at: OffsetDateTime,
    pub completed_at: Option<OffsetDateTime>,
}

impl SectionState {
    pub fn trump_suit(&self) -> Suit {
        self.trump_card.suit
    }

    pub fn seats(&self) -> u8 {
        self.tricks_won.len() as u8
    }

    /// `(position, bid)` pairs in bidding order.
    pub fn bid_pairs(&self) -> Vec<(Position, u8)> {
        self.bids.iter().map(|b| (b.position, b.bid)).collect()
    }

    pub fn bid_of(&self, pos: Position) -> Option<u8> {
        self.bids.iter().find(|b| b.position == pos).map(|b| b.bid)
    }
}

pub fn require_current_section(
    store: &dyn GameStore,
    session_id: SessionId,
) -> Result<SectionState, DomainError> {
    store.current_section(session_id)?.ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::Section,
            format!("No section dealt for session {session_id}"),
        )
    })
}
