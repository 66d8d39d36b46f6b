//! Maps AI-controlled players to their AI instances.
//!
//! Before each decision the orchestrator resets the AI's memory and replays
//! the section's public bids and cards, so the AI sees exactly what the
//! table has seen. After each section it records every seat's
//! `(bid, tricks_won)` into rolling opponent profiles.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use serde::Serialize;
use tracing::debug;

use super::config::AiConfig;
use super::pacing::{NoDelay, ThinkingDelay};
use super::registry::by_difficulty;
use super::trait_def::AiPlayer;
use crate::domain::{
    BidRequest, Card, Difficulty, GameContext, OpponentProfile, PlayRequest, PlayerId, Position,
    SeatScore, SessionId, Suit,
};
use crate::errors::domain::{DomainError, NotFoundKind};

/// Presentation metadata for an AI seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AiInfo {
    pub difficulty: Difficulty,
    pub name: &'static str,
    pub version: &'static str,
}

/// Public record of the current section so far.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionTranscript {
    /// Bids in bidding order.
    pub bids: Vec<(Position, u8)>,
    /// Every card played this section with the trick's leading suit
    /// before it was played.
    pub plays: Vec<(Position, Card, Option<Suit>)>,
}

struct AiSeat {
    session_id: SessionId,
    ai: Box<dyn AiPlayer>,
    info: AiInfo,
}

impl AiSeat {
    fn replay(&self, transcript: &SectionTranscript) {
        self.ai.reset_memory();
        for &(pos, bid) in &transcript.bids {
            self.ai.observe_bid(pos, bid);
        }
        for &(pos, card, leading) in &transcript.plays {
            self.ai.observe_card(pos, card, leading);
        }
    }
}

pub struct AiOrchestrator {
    seats: DashMap<PlayerId, AiSeat>,
    profiles: DashMap<SessionId, Vec<OpponentProfile>>,
    pacing: Arc<dyn ThinkingDelay>,
}

impl Default for AiOrchestrator {
    fn default() -> Self {
        Self::new(Arc::new(NoDelay))
    }
}

impl AiOrchestrator {
    pub fn new(pacing: Arc<dyn ThinkingDelay>) -> Self {
        Self {
            seats: DashMap::new(),
            profiles: DashMap::new(),
            pacing,
        }
    }

    /// Attach (or replace) the AI playing for `player_id`.
    pub fn register(
        &self,
        session_id: SessionId,
        player_id: PlayerId,
        config: AiConfig,
    ) -> Result<AiInfo, DomainError> {
        let factory = by_difficulty(config.difficulty).ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::AiPlayer,
                format!("No AI registered for {}", config.difficulty),
            )
        })?;
        let info = AiInfo {
            difficulty: factory.difficulty,
            name: factory.name,
            version: factory.version,
        };
        self.register_with(session_id, player_id, (factory.make)(config.seed), info);
        Ok(info)
    }

    /// Attach (or replace) a caller-built AI, bypassing the registry.
    pub fn register_with(
        &self,
        session_id: SessionId,
        player_id: PlayerId,
        ai: Box<dyn AiPlayer>,
        info: AiInfo,
    ) {
        self.seats.insert(player_id, AiSeat { session_id, ai, info });
        debug!(%session_id, %player_id, difficulty = %info.difficulty, name = info.name, "AI registered");
    }

    pub fn unregister(&self, player_id: PlayerId) -> bool {
        self.seats.remove(&player_id).is_some()
    }

    pub fn is_registered(&self, player_id: PlayerId) -> bool {
        self.seats.contains_key(&player_id)
    }

    pub fn info(&self, player_id: PlayerId) -> Option<AiInfo> {
        self.seats.get(&player_id).map(|s| s.info)
    }

    /// How long this seat should appear to think.
    pub fn thinking_delay(&self, player_id: PlayerId) -> Duration {
        self.info(player_id)
            .map(|i| self.pacing.delay_for(i.difficulty))
            .unwrap_or(Duration::ZERO)
    }

    fn seat(
        &self,
        player_id: PlayerId,
    ) -> Result<dashmap::mapref::one::Ref<'_, PlayerId, AiSeat>, DomainError> {
        self.seats.get(&player_id).ok_or_else(|| {
            DomainError::not_found(NotFoundKind::AiPlayer, format!("No AI for player {player_id}"))
        })
    }

    /// Returns the bid and the AI's rationale.
    pub fn decide_bid(
        &self,
        player_id: PlayerId,
        req: &BidRequest,
        ctx: Option<&GameContext>,
        transcript: &SectionTranscript,
    ) -> Result<(u8, String), DomainError> {
        let seat = self.seat(player_id)?;
        seat.replay(transcript);
        let bid = seat.ai.make_bid(req, ctx)?;
        Ok((bid, seat.ai.describe_reasoning()))
    }

    /// Returns the card and the AI's rationale.
    pub fn decide_play(
        &self,
        player_id: PlayerId,
        req: &PlayRequest,
        ctx: Option<&GameContext>,
        transcript: &SectionTranscript,
    ) -> Result<(Card, String), DomainError> {
        let seat = self.seat(player_id)?;
        seat.replay(transcript);
        let card = seat.ai.play_card(req, ctx)?;
        Ok((card, seat.ai.describe_reasoning()))
    }

    /// Fold a completed section into the session's opponent profiles.
    pub fn record_section(&self, session_id: SessionId, scores: &[SeatScore]) {
        let mut profiles = self.profiles.entry(session_id).or_default();
        for s in scores {
            let idx = match profiles.iter().position(|p| p.position == s.position) {
                Some(i) => i,
                None => {
                    profiles.push(OpponentProfile::new(s.position));
                    profiles.len() - 1
                }
            };
            profiles[idx].record(s.bid, s.tricks_won);
        }
    }

    pub fn profiles(&self, session_id: SessionId) -> Vec<OpponentProfile> {
        self.profiles
            .get(&session_id)
            .map(|p| p.clone())
            .unwrap_or_default()
    }

    /// Drop every AI and profile belonging to a session.
    pub fn forget_session(&self, session_id: SessionId) {
        self.seats.retain(|_, seat| seat.session_id != session_id);
        self.profiles.remove(&session_id);
    }
}
