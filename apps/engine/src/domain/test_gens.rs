// Proptest generators for domain types.
// These generators ensure unique cards and valid seatings by construction.

use proptest::prelude::*;

use crate::domain::rules::{MAX_SEATS, MIN_SEATS};
use crate::domain::{create_deck, Card, Position, Rank, Suit};

pub fn suit() -> impl Strategy<Value = Suit> {
    prop::sample::select(Suit::ALL.to_vec())
}

pub fn rank() -> impl Strategy<Value = Rank> {
    prop::sample::select(Rank::ALL.to_vec())
}

pub fn card() -> impl Strategy<Value = Card> {
    (suit(), rank()).prop_map(|(suit, rank)| Card { suit, rank })
}

/// Vector of `count` unique cards drawn from one deck.
pub fn unique_cards(count: usize) -> impl Strategy<Value = Vec<Card>> {
    Just(()).prop_perturb(move |_, mut rng| {
        let mut all_cards = create_deck();
        for i in 0..count.min(all_cards.len()) {
            let j = rng.random_range(i..all_cards.len());
            all_cards.swap(i, j);
        }
        all_cards.truncate(count);
        all_cards
    })
}

/// Hand of 1..=10 unique cards.
pub fn hand() -> impl Strategy<Value = Vec<Card>> {
    (1usize..=10).prop_flat_map(unique_cards)
}

pub fn seats() -> impl Strategy<Value = u8> {
    MIN_SEATS..=MAX_SEATS
}

/// A full trick: `(seats, leader, plays in order, trump)`.
pub fn complete_trick() -> impl Strategy<Value = (u8, Position, Vec<(Position, Card)>, Suit)> {
    seats().prop_flat_map(|n| {
        (Just(n), 1..=n, unique_cards(n as usize), suit()).prop_map(|(n, leader, cards, trump)| {
            let plays = cards
                .into_iter()
                .enumerate()
                .map(|(i, c)| ((((leader - 1) as usize + i) % n as usize) as u8 + 1, c))
                .collect();
            (n, leader, plays, trump)
        })
    })
}

/// Two distinct cards.
pub fn two_distinct_cards() -> impl Strategy<Value = (Card, Card)> {
    unique_cards(2).prop_map(|cards| (cards[0], cards[1]))
}
