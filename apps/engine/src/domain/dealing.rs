//! Deck construction, shuffling and round-robin dealing.

use rand::Rng;

use crate::domain::rules::DECK_SIZE;
use crate::domain::{Card, Rank, Suit};
use crate::errors::domain::{CapacityKind, DomainError};

/// A full 52-card deck in standard order, one card per (suit, rank).
pub fn create_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(DECK_SIZE);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            deck.push(Card { suit, rank });
        }
    }
    deck
}

/// In-place Fisher-Yates shuffle.
///
/// `random_range` draws without modulo bias, so every permutation is
/// equally likely for a uniform source.
pub fn shuffle<R: Rng + ?Sized>(deck: &mut [Card], rng: &mut R) {
    for i in (1..deck.len()).rev() {
        let j = rng.random_range(0..=i);
        deck.swap(i, j);
    }
}

/// Outcome of dealing one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    /// One hand per seat, index 0 is position 1. Sorted for display.
    pub hands: Vec<Vec<Card>>,
    /// First undealt card; its suit is trump for the section.
    pub trump_card: Card,
    /// Cards nobody sees this section.
    pub remainder: Vec<Card>,
}

impl Deal {
    pub fn trump_suit(&self) -> Suit {
        self.trump_card.suit
    }
}

/// Round-robin deal: card `i` goes to player `i mod num_players` for
/// `cards_per_player` rounds; the next card reveals trump.
pub fn deal(deck: &[Card], num_players: usize, cards_per_player: u8) -> Result<Deal, DomainError> {
    if num_players == 0 {
        return Err(DomainError::validation_other("Cannot deal to zero players"));
    }
    let dealt = num_players * cards_per_player as usize;
    if dealt + 1 > deck.len() {
        return Err(DomainError::capacity(
            CapacityKind::DeckExhausted,
            format!(
                "{num_players} players x {cards_per_player} cards + trump exceeds {} cards",
                deck.len()
            ),
        ));
    }

    let mut hands: Vec<Vec<Card>> = vec![Vec::with_capacity(cards_per_player as usize); num_players];
    for (i, card) in deck[..dealt].iter().enumerate() {
        hands[i % num_players].push(*card);
    }
    for hand in &mut hands {
        hand.sort();
    }

    Ok(Deal {
        hands,
        trump_card: deck[dealt],
        remainder: deck[dealt + 1..].to_vec(),
    })
}

/// Fresh deck, shuffled with `rng`, dealt for one section.
pub fn deal_section<R: Rng + ?Sized>(
    num_players: usize,
    cards_per_player: u8,
    rng: &mut R,
) -> Result<Deal, DomainError> {
    let mut deck = create_deck();
    shuffle(&mut deck, rng);
    deal(&deck, num_players, cards_per_player)
}
