//! Drives AI-controlled seats through the same entry points humans use.

use tracing::{debug, info, warn};

use super::{ActionKind, GameEngine, PendingAction};
use crate::ai::{AiConfig, SectionTranscript};
use crate::domain::{BidRequest, Card, Difficulty, GameContext, PlayRequest, PlayerId, SessionId};
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::repos::hands::require_hand;
use crate::repos::players::require_player;
use crate::repos::sections::require_current_section;
use crate::repos::sessions::require_session;
use crate::repos::tricks::plays_of;
use crate::repos::{Player, SectionState, Session, Trick};

/// Covers a full up-and-down game at any table size.
pub const MAX_AI_ITERATIONS: u32 = 2_000;

/// What the acting seat can see, built under the session lock.
pub(super) enum Request {
    Bid(BidRequest),
    Play(PlayRequest),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Move {
    Bid(u8),
    Play(Card),
}

impl Request {
    /// Lowest legal bid, or lowest legal card in suit-then-rank order.
    pub(super) fn lowest_legal(&self) -> Option<Move> {
        match self {
            Request::Bid(req) => req.legal_bids().first().copied().map(Move::Bid),
            Request::Play(req) => req.legal_plays().first().copied().map(Move::Play),
        }
    }
}

impl GameEngine {
    /// Build the request for the seat the session waits on.
    pub(super) fn request_for(&self, pending: &PendingAction) -> Result<Request, DomainError> {
        let player = require_player(self.store(), pending.player_id)?;
        let section = require_current_section(self.store(), player.session_id)?;
        let hand = require_hand(self.store(), player.id, section.id)?.cards;
        let seats = section.seats();

        match pending.kind {
            ActionKind::Bid => {
                let pairs = section.bid_pairs();
                let legal_bids = self.bidding_table(&section, &pairs).legal_bids();
                Ok(Request::Bid(BidRequest {
                    section_no: section.section_no,
                    hand,
                    max_bid: section.hand_size,
                    trump: section.trump_suit(),
                    seat: player.position,
                    seats,
                    dealer: section.dealer_position,
                    opponent_bids: pairs,
                    legal_bids,
                }))
            }
            ActionKind::Play => {
                let trick = self
                    .store()
                    .tricks_in_section(section.id)?
                    .into_iter()
                    .find(Trick::is_open)
                    .ok_or_else(|| {
                        DomainError::infra(
                            InfraErrorKind::DataCorruption,
                            format!("Section {} is in play without an open trick", section.id),
                        )
                    })?;
                let plays = plays_of(&self.store().trick_cards(trick.id)?);
                Ok(Request::Play(PlayRequest {
                    section_no: section.section_no,
                    hand,
                    leading: plays.first().map(|(_, c)| c.suit),
                    trick: plays,
                    trump: section.trump_suit(),
                    seat: player.position,
                    seats,
                    trick_no: trick.trick_no,
                    hand_size: section.hand_size,
                    bids: section.bid_pairs(),
                    tricks_won: section.tricks_won.clone(),
                }))
            }
        }
    }

    /// Commit a move. Caller holds the session lock.
    pub(super) fn apply_locked(&self, player_id: PlayerId, mv: Move) -> Result<(), DomainError> {
        match mv {
            Move::Bid(bid) => self.place_bid_locked(player_id, bid),
            Move::Play(card) => self.play_card_locked(player_id, card),
        }
    }

    /// Public record of the section so far, for AI memory replay.
    fn transcript(&self, section: &SectionState) -> Result<SectionTranscript, DomainError> {
        let mut transcript = SectionTranscript {
            bids: section.bid_pairs(),
            plays: Vec::new(),
        };
        for trick in self.store().tricks_in_section(section.id)? {
            let cards = self.store().trick_cards(trick.id)?;
            let leading = cards.first().map(|tc| tc.card.suit);
            for (idx, tc) in cards.iter().enumerate() {
                let seen = if idx == 0 { None } else { leading };
                transcript.plays.push((tc.position, tc.card, seen));
            }
        }
        Ok(transcript)
    }

    fn game_context(&self, session: &Session, section: &SectionState, players: &[Player]) -> GameContext {
        GameContext::new(section.section_no, session.total_sections(), session.scoring)
            .with_scores(players.iter().map(|p| p.total_score).collect())
            .with_profiles(self.ai.profiles(session.id))
    }

    fn ensure_ai_seat(&self, player: &Player) -> Result<(), DomainError> {
        if self.ai.is_registered(player.id) {
            return Ok(());
        }
        let difficulty = player.ai_difficulty.unwrap_or(Difficulty::Medium);
        self.ai.register(
            player.session_id,
            player.id,
            AiConfig::new(difficulty).with_seed(self.next_ai_seed()),
        )?;
        Ok(())
    }

    /// Let the AI act once if an AI-controlled seat is due.
    ///
    /// Returns the turn that was taken. A failing or illegal AI decision is
    /// replaced with the lowest legal action.
    pub fn ai_step(&self, session_id: SessionId) -> Result<Option<PendingAction>, DomainError> {
        let lock = self.session_lock(session_id);
        let _guard = lock.lock();

        let Some(pending) = self.pending_action(session_id)? else {
            return Ok(None);
        };
        if !pending.is_ai {
            return Ok(None);
        }
        let session = require_session(self.store(), session_id)?;
        let section = require_current_section(self.store(), session_id)?;
        let players = self.store().players_in_session(session_id)?;
        let player = require_player(self.store(), pending.player_id)?;
        self.ensure_ai_seat(&player)?;

        let ctx = self.game_context(&session, &section, &players);
        let transcript = self.transcript(&section)?;
        let request = self.request_for(&pending)?;
        let fallback = request.lowest_legal().ok_or_else(|| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("Seat {} has no legal action", pending.position),
            )
        })?;

        let decided = match &request {
            Request::Bid(req) => self
                .ai
                .decide_bid(player.id, req, Some(&ctx), &transcript)
                .map(|(bid, why)| (Move::Bid(bid), why)),
            Request::Play(req) => self
                .ai
                .decide_play(player.id, req, Some(&ctx), &transcript)
                .map(|(card, why)| (Move::Play(card), why)),
        };
        let mv = match decided {
            Ok((mv, reasoning)) => {
                debug!(%session_id, player_id = %player.id, position = player.position, ?mv, %reasoning, "AI decided");
                mv
            }
            Err(e) => {
                warn!(%session_id, player_id = %player.id, error = %e, ?fallback, "AI decision failed, using fallback");
                fallback
            }
        };

        match self.apply_locked(player.id, mv) {
            Ok(()) => {}
            Err(e) if e.is_retryable() && mv != fallback => {
                warn!(%session_id, player_id = %player.id, ?mv, error = %e, "AI move rejected, using fallback");
                self.apply_locked(player.id, fallback)?;
            }
            Err(e) => return Err(e),
        }
        Ok(Some(pending))
    }

    /// Run AI turns back to back until a human is due or the game ends.
    /// No thinking delays. Returns the number of actions taken.
    pub fn run_ai_turns(&self, session_id: SessionId) -> Result<u32, DomainError> {
        let mut actions = 0;
        while actions < MAX_AI_ITERATIONS {
            if self.ai_step(session_id)?.is_none() {
                return Ok(actions);
            }
            actions += 1;
        }
        warn!(%session_id, actions, "AI iteration limit reached");
        Ok(actions)
    }

    /// Async variant of [`run_ai_turns`](Self::run_ai_turns) that sleeps for
    /// each seat's thinking delay before it acts. The session lock is not
    /// held while sleeping.
    pub async fn drive_ai(&self, session_id: SessionId) -> Result<u32, DomainError> {
        let mut actions = 0;
        while actions < MAX_AI_ITERATIONS {
            let Some(pending) = self.pending_action(session_id)? else {
                break;
            };
            if !pending.is_ai {
                break;
            }
            let delay = self.ai.thinking_delay(pending.player_id);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            if self.ai_step(session_id)?.is_none() {
                break;
            }
            actions += 1;
        }
        if actions >= MAX_AI_ITERATIONS {
            warn!(%session_id, actions, "AI iteration limit reached");
        } else if actions > 0 {
            info!(%session_id, actions, "AI turns processed");
        }
        Ok(actions)
    }
}
