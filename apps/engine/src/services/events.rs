//! Event surface for realtime transports.
//!
//! Every committed transition is published as a [`GameEvent`] on a
//! per-session broadcast channel. Publishing never fails the operation that
//! produced the event: with no subscribers the event is dropped.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::trace;

use crate::domain::{
    Card, Difficulty, PlayerId, Position, SeatScore, SessionId, Suit,
};

const CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    PlayerJoined {
        player_id: PlayerId,
        name: String,
        position: Position,
    },
    PlayerLeft {
        player_id: PlayerId,
        position: Position,
        /// Seat handed to the AI instead of being vacated.
        replaced_by_ai: bool,
    },
    AiPlayerAdded {
        player_id: PlayerId,
        name: String,
        position: Position,
        difficulty: Difficulty,
    },
    AiPlayerRemoved {
        player_id: PlayerId,
        position: Position,
    },
    GameStarted {
        players: u8,
    },
    SectionDealt {
        section_no: u8,
        hand_size: u8,
        dealer: Position,
        trump_card: Card,
    },
    BidPlaced {
        player_id: PlayerId,
        position: Position,
        bid: u8,
        next_bidder: Option<Position>,
    },
    CardPlayed {
        player_id: PlayerId,
        position: Position,
        card: Card,
        trick_no: u8,
    },
    TrickCompleted {
        trick_no: u8,
        winner: Position,
        leading_suit: Suit,
    },
    SectionCompleted {
        section_no: u8,
        scores: Vec<SeatScore>,
    },
    GameEnded {
        winners: Vec<PlayerId>,
    },
    TurnExpired {
        player_id: PlayerId,
        position: Position,
    },
}

/// Event with the session it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope {
    pub session_id: SessionId,
    pub event: GameEvent,
}

#[derive(Default)]
pub struct EventBus {
    channels: DashMap<SessionId, broadcast::Sender<EventEnvelope>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, session_id: SessionId) -> broadcast::Receiver<EventEnvelope> {
        self.channels
            .entry(session_id)
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .subscribe()
    }

    pub fn publish(&self, session_id: SessionId, event: GameEvent) {
        let Some(tx) = self.channels.get(&session_id) else {
            trace!(%session_id, ?event, "no subscribers; event dropped");
            return;
        };
        if tx.send(EventEnvelope { session_id, event }).is_err() {
            trace!(%session_id, "all subscribers gone");
        }
    }

    /// Drop the channel once a session is over.
    pub fn close(&self, session_id: SessionId) {
        self.channels.remove(&session_id);
    }
}
