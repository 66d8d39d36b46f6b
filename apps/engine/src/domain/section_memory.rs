//! What an AI remembers about the current section.
//!
//! Fed through `observe_*` calls as bids and cards become public. The
//! orchestrator rebuilds it from the table before every decision, so it
//! always reflects the section truthfully.

use std::collections::HashSet;

use super::cards_types::{Card, Rank, Suit};
use super::state::Position;

#[derive(Debug, Clone, Default)]
pub struct SectionMemory {
    bids: Vec<(Position, u8)>,
    played: HashSet<Card>,
    /// Every card seen, with the seat that played it, in play order.
    plays: Vec<(Position, Card)>,
    /// Seats shown to be out of a suit (failed to follow).
    voids: HashSet<(Position, Suit)>,
}

impl SectionMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn observe_bid(&mut self, pos: Position, bid: u8) {
        self.bids.push((pos, bid));
    }

    /// Record a play; `leading` is the trick's suit before this card.
    pub fn observe_play(&mut self, pos: Position, card: Card, leading: Option<Suit>) {
        if let Some(lead) = leading {
            if card.suit != lead {
                self.voids.insert((pos, lead));
            }
        }
        self.played.insert(card);
        self.plays.push((pos, card));
    }

    pub fn bids(&self) -> &[(Position, u8)] {
        &self.bids
    }

    pub fn plays(&self) -> &[(Position, Card)] {
        &self.plays
    }

    pub fn is_played(&self, card: Card) -> bool {
        self.played.contains(&card)
    }

    pub fn played_in_suit(&self, suit: Suit) -> usize {
        self.played.iter().filter(|c| c.suit == suit).count()
    }

    pub fn shown_void(&self, pos: Position, suit: Suit) -> bool {
        self.voids.contains(&(pos, suit))
    }

    /// Cards of `suit` neither played nor held in `hand`.
    pub fn unseen_in_suit(&self, suit: Suit, hand: &[Card]) -> Vec<Card> {
        Rank::ALL
            .iter()
            .map(|&rank| Card::new(suit, rank))
            .filter(|c| !self.played.contains(c) && !hand.contains(c))
            .collect()
    }

    /// Number of unseen cards of the same suit that outrank `card`.
    pub fn higher_unseen(&self, card: Card, hand: &[Card]) -> usize {
        self.unseen_in_suit(card.suit, hand)
            .iter()
            .filter(|c| c.rank > card.rank)
            .count()
    }

    /// Top of its suit among cards still out (ignores trump).
    pub fn is_boss(&self, card: Card, hand: &[Card]) -> bool {
        self.higher_unseen(card, hand) == 0
    }
}
