//! Read-only views: snapshots, score sheets, final stats and whose turn it is.

use super::{ActionKind, GameEngine, PendingAction};
use crate::domain::snapshot::{
    BidPublic, CompletedTrick, FinalGameStats, GameSnapshot, SeatPublic, SectionPublic,
    SectionScoreLine, SessionHeader,
};
use crate::domain::{
    legal_plays, Card, PlayerId, Position, SectionPhase, SessionId, SessionPhase, TrickView,
};
use crate::errors::domain::{DomainError, StateKind};
use crate::repos::players::{at_position, require_player};
use crate::repos::sessions::require_session;
use crate::repos::tricks::plays_of;
use crate::repos::{Player, SectionState, Session, Trick};

fn header(session: &Session) -> SessionHeader {
    SessionHeader {
        session_id: session.id,
        admin_player_id: session.admin_player_id,
        game_type: session.game_type,
        scoring: session.scoring,
        max_players: session.max_players,
        phase: session.phase,
        current_section_no: session.current_section_no,
        total_sections: session.total_sections(),
    }
}

fn seat_public(p: &Player) -> SeatPublic {
    SeatPublic {
        player_id: p.id,
        name: p.name.clone(),
        position: p.position,
        is_admin: p.is_admin,
        is_ai: p.is_ai,
        ai_difficulty: if p.is_ai { p.ai_difficulty } else { None },
        is_connected: p.is_connected,
        total_score: p.total_score,
    }
}

fn score_line(section: &SectionState) -> SectionScoreLine {
    SectionScoreLine {
        section_no: section.section_no,
        hand_size: section.hand_size,
        trump: section.trump_suit(),
        scores: section.results.clone(),
    }
}

/// Open trick plus the cards in it, if the section is in play.
struct OpenTrick {
    trick: Trick,
    plays: Vec<(Position, Card)>,
}

impl GameEngine {
    fn open_trick_of(&self, section: &SectionState) -> Result<Option<OpenTrick>, DomainError> {
        if section.phase != SectionPhase::Playing {
            return Ok(None);
        }
        let Some(trick) = self
            .store()
            .tricks_in_section(section.id)?
            .into_iter()
            .find(Trick::is_open)
        else {
            return Ok(None);
        };
        let plays = plays_of(&self.store().trick_cards(trick.id)?);
        Ok(Some(OpenTrick { trick, plays }))
    }

    /// Seat the section waits on and the kind of action it owes.
    fn actor_of(&self, section: &SectionState) -> Result<Option<(Position, ActionKind)>, DomainError> {
        match section.phase {
            SectionPhase::Bidding => Ok(section
                .current_bidder_position
                .map(|p| (p, ActionKind::Bid))),
            SectionPhase::Playing => Ok(self.open_trick_of(section)?.and_then(|open| {
                TrickView {
                    seats: section.seats(),
                    lead_position: open.trick.lead_position,
                    trump: section.trump_suit(),
                    plays: &open.plays,
                }
                .next_to_play()
                .map(|p| (p, ActionKind::Play))
            })),
            SectionPhase::Dealing | SectionPhase::Completed => Ok(None),
        }
    }

    /// Who the session is waiting on, `None` outside play.
    pub fn pending_action(&self, session_id: SessionId) -> Result<Option<PendingAction>, DomainError> {
        let session = require_session(self.store(), session_id)?;
        if session.phase != SessionPhase::Playing {
            return Ok(None);
        }
        let Some(section) = self.store().current_section(session_id)? else {
            return Ok(None);
        };
        let Some((position, kind)) = self.actor_of(&section)? else {
            return Ok(None);
        };
        let players = self.store().players_in_session(session_id)?;
        let player = at_position(&players, position)?;
        Ok(Some(PendingAction {
            player_id: player.id,
            position,
            kind,
            is_ai: player.is_ai_controlled(),
        }))
    }

    /// Game state as seen by `player_id`: public table facts plus their own hand.
    pub fn get_game_state(&self, player_id: PlayerId) -> Result<GameSnapshot, DomainError> {
        let viewer = require_player(self.store(), player_id)?;
        let session = require_session(self.store(), viewer.session_id)?;
        let players = self.store().players_in_session(session.id)?;
        let sections = self.store().sections_in_session(session.id)?;

        let history = sections
            .iter()
            .filter(|s| s.phase == SectionPhase::Completed)
            .map(score_line)
            .collect();

        let mut snapshot = GameSnapshot {
            session: header(&session),
            players: players.iter().map(seat_public).collect(),
            viewer_id: viewer.id,
            viewer_position: viewer.position,
            hand: Vec::new(),
            section: None,
            legal_bids: Vec::new(),
            legal_cards: Vec::new(),
            last_trick: None,
            history,
        };

        let Some(section) = sections.last() else {
            return Ok(snapshot);
        };

        let open = self.open_trick_of(section)?;
        let to_act = if session.phase == SessionPhase::Playing {
            self.actor_of(section)?.map(|(p, _)| p)
        } else {
            None
        };
        let hand = self
            .store()
            .find_hand(viewer.id, section.id)?
            .map(|h| h.cards)
            .unwrap_or_default();

        if to_act == Some(viewer.position) {
            match section.phase {
                SectionPhase::Bidding => {
                    let pairs = section.bid_pairs();
                    snapshot.legal_bids = self.bidding_table(section, &pairs).legal_bids();
                }
                SectionPhase::Playing => {
                    let leading = open.as_ref().and_then(|o| o.plays.first().map(|(_, c)| c.suit));
                    snapshot.legal_cards = legal_plays(&hand, leading);
                }
                SectionPhase::Dealing | SectionPhase::Completed => {}
            }
        }

        snapshot.last_trick = self.last_completed_trick(section)?;
        snapshot.section = Some(SectionPublic {
            section_no: section.section_no,
            hand_size: section.hand_size,
            dealer: section.dealer_position,
            trump_card: section.trump_card,
            trump: section.trump_suit(),
            phase: section.phase,
            bids: section
                .bids
                .iter()
                .map(|b| BidPublic {
                    player_id: b.player_id,
                    player_name: b.player_name.clone(),
                    position: b.position,
                    bid: b.bid,
                })
                .collect(),
            current_bidder: section.current_bidder_position,
            trick_no: open.as_ref().map(|o| o.trick.trick_no),
            lead_position: open.as_ref().map(|o| o.trick.lead_position),
            leading_suit: open.as_ref().and_then(|o| o.trick.leading_suit),
            current_trick: open.map(|o| o.plays).unwrap_or_default(),
            tricks_won: section.tricks_won.clone(),
            to_act,
        });
        snapshot.hand = if section.phase == SectionPhase::Completed {
            Vec::new()
        } else {
            hand
        };
        Ok(snapshot)
    }

    fn last_completed_trick(&self, section: &SectionState) -> Result<Option<CompletedTrick>, DomainError> {
        let last = self
            .store()
            .tricks_in_section(section.id)?
            .into_iter()
            .rev()
            .find(|t| !t.is_open());
        let Some(trick) = last else {
            return Ok(None);
        };
        let Some(winner) = trick.winner_position else {
            return Ok(None);
        };
        Ok(Some(CompletedTrick {
            trick_no: trick.trick_no,
            plays: plays_of(&self.store().trick_cards(trick.id)?),
            winner,
        }))
    }

    /// Score sheet: one line per completed section, in order.
    pub fn section_history(&self, session_id: SessionId) -> Result<Vec<SectionScoreLine>, DomainError> {
        require_session(self.store(), session_id)?;
        Ok(self
            .store()
            .sections_in_session(session_id)?
            .iter()
            .filter(|s| s.phase == SectionPhase::Completed)
            .map(score_line)
            .collect())
    }

    /// End-of-game summary; only available once the session is finished.
    pub fn get_final_game_stats(&self, session_id: SessionId) -> Result<FinalGameStats, DomainError> {
        let session = require_session(self.store(), session_id)?;
        if session.phase != SessionPhase::Finished {
            return Err(DomainError::state(
                StateKind::PhaseMismatch,
                format!("Session {session_id} is not finished"),
            ));
        }
        let players = self.store().players_in_session(session_id)?;
        let seats: Vec<SeatPublic> = players.iter().map(seat_public).collect();
        let history = self.section_history(session_id)?;
        Ok(FinalGameStats::from_history(&header(&session), &seats, &history))
    }
}
