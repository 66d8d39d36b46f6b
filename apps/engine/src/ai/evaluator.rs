//! Shared hand evaluation and trick helpers used by every AI tier.

use crate::domain::{card_beats, Card, Position, Rank, Suit};

/// Summary of a hand relative to the section's trump suit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandStrength {
    pub trump_count: u8,
    /// Trumps ranked Jack or better.
    pub high_trumps: u8,
    /// A=4, K=3, Q=2, J=1; trumps weighted x1.5.
    pub high_card_points: f32,
    pub voids: u8,
    pub singletons: u8,
    /// Card count per suit, indexed by [`Suit::index`].
    pub suit_lengths: [u8; 4],
}

const TRUMP_WEIGHT: f32 = 1.5;

pub fn high_card_points(rank: Rank) -> f32 {
    match rank {
        Rank::Ace => 4.0,
        Rank::King => 3.0,
        Rank::Queen => 2.0,
        Rank::Jack => 1.0,
        _ => 0.0,
    }
}

pub fn evaluate(hand: &[Card], trump: Suit) -> HandStrength {
    let mut suit_lengths = [0u8; 4];
    let mut trump_count = 0;
    let mut high_trumps = 0;
    let mut hcp = 0.0;

    for card in hand {
        suit_lengths[card.suit.index()] += 1;
        let points = high_card_points(card.rank);
        if card.suit == trump {
            trump_count += 1;
            if card.rank.is_high() {
                high_trumps += 1;
            }
            hcp += points * TRUMP_WEIGHT;
        } else {
            hcp += points;
        }
    }

    HandStrength {
        trump_count,
        high_trumps,
        high_card_points: hcp,
        voids: suit_lengths.iter().filter(|&&n| n == 0).count() as u8,
        singletons: suit_lengths.iter().filter(|&&n| n == 1).count() as u8,
        suit_lengths,
    }
}

impl HandStrength {
    pub fn length(&self, suit: Suit) -> u8 {
        self.suit_lengths[suit.index()]
    }
}

/// Ordering key: any trump outranks any non-trump, then by rank.
pub fn strength_key(card: Card, trump: Suit) -> (bool, u8) {
    (card.suit == trump, card.value())
}

/// Seat and card currently taking the trick.
pub fn current_winner(trick: &[(Position, Card)], trump: Suit) -> Option<(Position, Card)> {
    let &(first_pos, first) = trick.first()?;
    let lead = first.suit;
    Some(
        trick[1..]
            .iter()
            .fold((first_pos, first), |(bp, best), &(p, c)| {
                if card_beats(c, best, trump, lead) {
                    (p, c)
                } else {
                    (bp, best)
                }
            }),
    )
}

/// Cards among `candidates` that would take the trick right now.
pub fn winning_cards(candidates: &[Card], trick: &[(Position, Card)], trump: Suit) -> Vec<Card> {
    match current_winner(trick, trump) {
        None => candidates.to_vec(),
        Some((_, best)) => {
            let lead = trick[0].1.suit;
            candidates
                .iter()
                .copied()
                .filter(|&c| card_beats(c, best, trump, lead))
                .collect()
        }
    }
}

/// Cards among `candidates` that would not take the trick right now.
pub fn losing_cards(candidates: &[Card], trick: &[(Position, Card)], trump: Suit) -> Vec<Card> {
    if trick.is_empty() {
        return Vec::new();
    }
    let winners = winning_cards(candidates, trick, trump);
    candidates
        .iter()
        .copied()
        .filter(|c| !winners.contains(c))
        .collect()
}

pub fn lowest(cards: &[Card], trump: Suit) -> Option<Card> {
    cards.iter().copied().min_by_key(|&c| strength_key(c, trump))
}

pub fn highest(cards: &[Card], trump: Suit) -> Option<Card> {
    cards.iter().copied().max_by_key(|&c| strength_key(c, trump))
}

pub fn non_trumps(cards: &[Card], trump: Suit) -> Vec<Card> {
    cards.iter().copied().filter(|c| c.suit != trump).collect()
}

pub fn trumps(cards: &[Card], trump: Suit) -> Vec<Card> {
    cards.iter().copied().filter(|c| c.suit == trump).collect()
}

/// Longest non-trump suit held, ties to the higher suit.
pub fn longest_side_suit(hand: &[Card], trump: Suit) -> Option<Suit> {
    let strength = evaluate(hand, trump);
    Suit::ALL
        .into_iter()
        .filter(|&s| s != trump && strength.length(s) > 0)
        .max_by_key(|&s| strength.length(s))
}
