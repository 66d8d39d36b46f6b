use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::domain::DomainError;

pub type SessionId = Uuid;
pub type PlayerId = Uuid;
pub type SectionId = Uuid;
pub type TrickId = Uuid;

/// Seat position, 1-based (1..=seats). Fixed for a session and defines turn order.
pub type Position = u8;

/// Session-level lifecycle.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Lobby: players join, leave, AI seats are added.
    Waiting,
    /// Sections are being dealt and played.
    Playing,
    /// Every section of the schedule is complete.
    Finished,
}

/// Per-section lifecycle.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionPhase {
    Dealing,
    /// Players bid in seat order starting left of the dealer.
    Bidding,
    /// Tricks are being played.
    Playing,
    /// All tricks resolved and scored.
    Completed,
}

/// AI opponent tier.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub const fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Difficulty {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DomainError::validation_other(format!("Unknown difficulty: {s}")))
    }
}

/// Seat / turn math helpers over 1-based positions.
///
/// These live in `domain` so every layer (services, AI, views) shares a
/// single source of truth for rotation and "who acts next".
/// Clockwise direction is positive (+1).
#[inline]
pub fn seat_offset(pos: Position, delta: i16, seats: u8) -> Position {
    debug_assert!(seats > 0 && (1..=seats).contains(&pos));
    let zero_based = pos as i16 - 1 + delta;
    (zero_based.rem_euclid(seats as i16) + 1) as Position
}

/// Next seat clockwise, wrapping from the last seat to 1.
#[inline]
pub fn next_seat(pos: Position, seats: u8) -> Position {
    seat_offset(pos, 1, seats)
}

/// Dealer for a 1-based section number: `((n - 1) mod seats) + 1`.
#[inline]
pub fn dealer_for_section(section_no: u8, seats: u8) -> Position {
    debug_assert!(section_no >= 1, "section_no is 1-based");
    ((section_no.saturating_sub(1)) % seats) + 1
}

/// Bidding starts at left-of-dealer, then rotates clockwise by `bid_count`.
#[inline]
pub fn expected_bidder(dealer: Position, bid_count: u8, seats: u8) -> Position {
    seat_offset(dealer, 1 + bid_count as i16, seats)
}

/// Expected actor seat during a trick.
///
/// `leader` played first; `play_count` cards are already in the trick.
#[inline]
pub fn expected_actor(leader: Position, play_count: u8, seats: u8) -> Position {
    seat_offset(leader, play_count as i16, seats)
}

/// Steps clockwise from `from` to reach `to` (0 when equal).
#[inline]
pub fn clockwise_distance(from: Position, to: Position, seats: u8) -> u8 {
    ((to as i16 - from as i16).rem_euclid(seats as i16)) as u8
}
