//! Bids and card plays. Each action validates against stored state and
//! commits only when accepted.

use tracing::{debug, info, warn};

use super::sessions::ensure_playing;
use super::GameEngine;
use crate::domain::{
    BidAdvance, BiddingTable, Card, PlayAdvance, PlayerId, Position, SectionPhase, TrickView,
};
use crate::errors::domain::{DomainError, StateKind};
use crate::repos::hands::require_hand;
use crate::repos::players::require_player;
use crate::repos::sections::require_current_section;
use crate::repos::sessions::require_session;
use crate::repos::tricks::{plays_of, require_open_trick};
use crate::repos::{BidRecord, SectionState, Session, Trick, TrickCard};
use crate::services::events::GameEvent;

fn ensure_section_phase(section: &SectionState, phase: SectionPhase) -> Result<(), DomainError> {
    if section.phase != phase {
        return Err(DomainError::state(
            StateKind::PhaseMismatch,
            format!(
                "Section {} is in {:?}, expected {:?}",
                section.section_no, section.phase, phase
            ),
        ));
    }
    Ok(())
}

impl GameEngine {
    pub(super) fn bidding_table<'a>(
        &self,
        section: &SectionState,
        bids: &'a [(Position, u8)],
    ) -> BiddingTable<'a> {
        BiddingTable {
            seats: section.seats(),
            dealer: section.dealer_position,
            hand_size: section.hand_size,
            bids,
            dealer_restriction: self.config.dealer_restriction,
        }
    }

    /// Place a bid for the player's seat in the current section.
    pub fn place_bid(&self, player_id: PlayerId, bid: u8) -> Result<(), DomainError> {
        let session_id = require_player(self.store(), player_id)?.session_id;
        let lock = self.session_lock(session_id);
        let _guard = lock.lock();
        self.place_bid_locked(player_id, bid)
    }

    /// Play a card from the player's hand into the open trick.
    pub fn play_card(&self, player_id: PlayerId, card: Card) -> Result<(), DomainError> {
        let session_id = require_player(self.store(), player_id)?.session_id;
        let lock = self.session_lock(session_id);
        let _guard = lock.lock();
        self.play_card_locked(player_id, card)
    }

    /// Caller holds the session lock.
    pub(super) fn place_bid_locked(&self, player_id: PlayerId, bid: u8) -> Result<(), DomainError> {
        let player = require_player(self.store(), player_id)?;
        let session = require_session(self.store(), player.session_id)?;
        ensure_playing(&session)?;
        let mut section = require_current_section(self.store(), session.id)?;
        ensure_section_phase(&section, SectionPhase::Bidding)?;

        let pairs = section.bid_pairs();
        let advance = self
            .bidding_table(&section, &pairs)
            .validate_bid(player.position, bid)
            .inspect_err(|e| {
                debug!(session_id = %session.id, %player_id, position = player.position, bid, error = %e, "Bid rejected");
            })?;

        let now = self.clock.now();
        section.bids.push(BidRecord {
            player_id,
            player_name: player.name.clone(),
            position: player.position,
            bid,
            placed_at: now,
        });
        section.turn_started_at = now;
        let next_bidder = match advance {
            BidAdvance::Next(next) => {
                section.current_bidder_position = Some(next);
                Some(next)
            }
            BidAdvance::Complete { leader } => {
                section.current_bidder_position = None;
                section.lead_player_position = Some(leader);
                section.phase = SectionPhase::Playing;
                None
            }
        };
        self.store().update_section(&section)?;

        info!(
            session_id = %session.id,
            %player_id,
            position = player.position,
            section = section.section_no,
            bid,
            "Bid accepted"
        );
        self.publish(
            session.id,
            GameEvent::BidPlaced {
                player_id,
                position: player.position,
                bid,
                next_bidder,
            },
        );

        if let BidAdvance::Complete { leader } = advance {
            self.open_trick(&section, 1)?;
            debug!(
                session_id = %session.id,
                section = section.section_no,
                leader,
                "Transition: Bidding -> Playing"
            );
        }
        Ok(())
    }

    /// Caller holds the session lock.
    pub(super) fn play_card_locked(&self, player_id: PlayerId, card: Card) -> Result<(), DomainError> {
        let player = require_player(self.store(), player_id)?;
        let session = require_session(self.store(), player.session_id)?;
        ensure_playing(&session)?;
        let mut section = require_current_section(self.store(), session.id)?;
        ensure_section_phase(&section, SectionPhase::Playing)?;
        let mut trick = require_open_trick(self.store(), section.id).map_err(|_| {
            DomainError::state(
                StateKind::NoOpenTrick,
                format!("Section {} has no open trick", section.section_no),
            )
        })?;
        let mut hand = require_hand(self.store(), player_id, section.id)?;

        let plays = plays_of(&self.store().trick_cards(trick.id)?);
        let view = TrickView {
            seats: section.seats(),
            lead_position: trick.lead_position,
            trump: section.trump_suit(),
            plays: &plays,
        };
        let advance = view.validate_play(player.position, &hand.cards, card).inspect_err(|e| {
            debug!(session_id = %session.id, %player_id, position = player.position, %card, error = %e, "Card rejected");
        })?;

        let now = self.clock.now();
        if !hand.take(card) {
            warn!(session_id = %session.id, %player_id, %card, "Validated card vanished from hand");
        }
        self.store().save_hand(hand)?;
        self.store().append_trick_card(TrickCard {
            trick_id: trick.id,
            position: player.position,
            card,
            played_at: now,
        })?;
        if trick.leading_suit.is_none() {
            trick.leading_suit = Some(card.suit);
        }
        section.turn_started_at = now;

        self.store().update_trick(&trick)?;
        self.store().update_section(&section)?;

        info!(
            session_id = %session.id,
            %player_id,
            position = player.position,
            section = section.section_no,
            trick = trick.trick_no,
            %card,
            "Card accepted"
        );
        self.publish(
            session.id,
            GameEvent::CardPlayed {
                player_id,
                position: player.position,
                card,
                trick_no: trick.trick_no,
            },
        );

        if let PlayAdvance::TrickComplete { winner } = advance {
            self.close_trick(session, section, trick, winner)?;
        }
        Ok(())
    }

    fn close_trick(
        &self,
        session: Session,
        mut section: SectionState,
        mut trick: Trick,
        winner: Position,
    ) -> Result<(), DomainError> {
        let leading_suit = trick.leading_suit.ok_or_else(|| {
            DomainError::state(StateKind::NoOpenTrick, "Completed trick has no leading suit")
        })?;
        trick.winner_position = Some(winner);
        trick.completed_at = Some(self.clock.now());
        self.store().update_trick(&trick)?;

        if let Some(won) = section.tricks_won.get_mut(winner as usize - 1) {
            *won += 1;
        }
        section.lead_player_position = Some(winner);

        info!(
            session_id = %session.id,
            section = section.section_no,
            trick = trick.trick_no,
            winner,
            "Trick resolved"
        );
        self.publish(
            session.id,
            GameEvent::TrickCompleted {
                trick_no: trick.trick_no,
                winner,
                leading_suit,
            },
        );

        if trick.trick_no >= section.hand_size {
            debug!(session_id = %session.id, section = section.section_no, "Transition: Playing -> Completed");
            return self.complete_section(session, section);
        }
        self.store().update_section(&section)?;
        self.open_trick(&section, trick.trick_no + 1)
    }
}
