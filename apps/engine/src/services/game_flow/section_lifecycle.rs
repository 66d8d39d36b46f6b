//! Section transitions: deal, score, advance or finish.

use tracing::{debug, info};
use uuid::Uuid;

use super::GameEngine;
use crate::domain::scoring::{competition_ranks, score_section};
use crate::domain::state::{dealer_for_section, expected_bidder};
use crate::domain::{deal_section, hand_size_for_section, SectionPhase, SessionPhase};
use crate::errors::domain::{DomainError, StateKind};
use crate::repos::{Hand, Player, SectionState, Session, Trick};
use crate::services::events::GameEvent;

impl GameEngine {
    /// Deal the section after `session.current_section_no` and open bidding.
    pub(super) fn deal_next_section(
        &self,
        session: &mut Session,
        players: &[Player],
    ) -> Result<SectionState, DomainError> {
        let section_no = session.current_section_no + 1;
        let seats = players.len() as u8;
        let hand_size = hand_size_for_section(session.game_type, section_no, seats).ok_or_else(|| {
            DomainError::state(
                StateKind::PhaseMismatch,
                format!(
                    "Section {section_no} is past the end of a {:?} game",
                    session.game_type
                ),
            )
        })?;

        let deal = {
            let mut rng = self.rng.lock();
            deal_section(players.len(), hand_size, &mut *rng)?
        };
        let dealer = dealer_for_section(section_no, seats);
        let now = self.clock.now();
        let section = SectionState {
            id: Uuid::new_v4(),
            session_id: session.id,
            section_no,
            hand_size,
            dealer_position: dealer,
            current_bidder_position: Some(expected_bidder(dealer, 0, seats)),
            lead_player_position: None,
            trump_card: deal.trump_card,
            phase: SectionPhase::Bidding,
            bids: Vec::new(),
            tricks_won: vec![0; players.len()],
            results: Vec::new(),
            turn_started_at: now,
            started_at: now,
            completed_at: None,
        };

        self.store().create_section(section.clone())?;
        for (player, cards) in players.iter().zip(deal.hands) {
            self.store().save_hand(Hand {
                player_id: player.id,
                section_id: section.id,
                cards,
            })?;
        }
        session.current_section_no = section_no;
        session.updated_at = now;
        self.store().update_session(session)?;

        info!(
            session_id = %session.id,
            section = section_no,
            hand_size,
            dealer,
            trump = %deal.trump_card,
            "Section dealt"
        );
        debug!(session_id = %session.id, section = section_no, "Transition: Dealing -> Bidding");
        self.publish(
            session.id,
            GameEvent::SectionDealt {
                section_no,
                hand_size,
                dealer,
                trump_card: deal.trump_card,
            },
        );
        Ok(section)
    }

    /// Open the trick `trick_no` of `section` led by its lead seat.
    pub(super) fn open_trick(&self, section: &SectionState, trick_no: u8) -> Result<(), DomainError> {
        let lead_position = section.lead_player_position.ok_or_else(|| {
            DomainError::state(
                StateKind::PhaseMismatch,
                format!("Section {} has no lead seat", section.section_no),
            )
        })?;
        self.store().create_trick(Trick {
            id: Uuid::new_v4(),
            section_id: section.id,
            trick_no,
            lead_position,
            leading_suit: None,
            winner_position: None,
            completed_at: None,
        })
    }

    /// Score a section whose last trick just closed, then deal the next one
    /// or end the game.
    pub(super) fn complete_section(
        &self,
        mut session: Session,
        mut section: SectionState,
    ) -> Result<(), DomainError> {
        let results = score_section(session.scoring, &section.bid_pairs(), &section.tricks_won);
        let mut players = self.store().players_in_session(session.id)?;
        for p in players.iter_mut() {
            if let Some(line) = results.iter().find(|r| r.position == p.position) {
                p.total_score += line.points;
                self.store().update_player(p)?;
            }
        }

        let now = self.clock.now();
        section.phase = SectionPhase::Completed;
        section.current_bidder_position = None;
        section.lead_player_position = None;
        section.completed_at = Some(now);
        section.results = results.clone();
        self.store().update_section(&section)?;
        self.ai.record_section(session.id, &results);

        info!(
            session_id = %session.id,
            section = section.section_no,
            made = results.iter().filter(|r| r.made_bid()).count(),
            "Section scored"
        );
        self.publish(
            session.id,
            GameEvent::SectionCompleted {
                section_no: section.section_no,
                scores: results,
            },
        );

        if session.is_last_section() {
            return self.finish_session(session, &players);
        }
        self.deal_next_section(&mut session, &players)?;
        Ok(())
    }

    /// Mark the session finished and announce the winners.
    pub(super) fn finish_session(&self, mut session: Session, players: &[Player]) -> Result<(), DomainError> {
        let now = self.clock.now();
        session.phase = SessionPhase::Finished;
        session.ended_at = Some(now);
        session.updated_at = now;
        self.store().update_session(&session)?;

        let totals: Vec<u32> = players.iter().map(|p| p.total_score).collect();
        let winners = players
            .iter()
            .zip(competition_ranks(&totals))
            .filter(|(_, rank)| *rank == 1)
            .map(|(p, _)| p.id)
            .collect::<Vec<_>>();

        info!(
            session_id = %session.id,
            sections = session.current_section_no,
            winners = winners.len(),
            "Game finished"
        );
        self.publish(session.id, GameEvent::GameEnded { winners });
        self.retire_session(session.id);
        Ok(())
    }
}
