/// Property-based tests for trick winner resolution
use proptest::prelude::*;

use crate::domain::{card_beats, resolve_trick_winner, Card, Position, Suit};
use crate::domain::{test_gens, test_prelude};

/// Independent oracle: best trump if any, else best of the leading suit.
fn oracle_trick_winner(plays: &[(Position, Card)], trump: Suit) -> Position {
    let lead = plays[0].1.suit;
    let best_in = |suit: Suit| {
        plays
            .iter()
            .filter(|(_, c)| c.suit == suit)
            .max_by_key(|(_, c)| c.rank)
            .map(|(p, _)| *p)
    };
    best_in(trump)
        .or_else(|| best_in(lead))
        .unwrap_or(plays[0].0)
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Same inputs always give the same winner, and it matches the oracle.
    #[test]
    fn prop_trick_winner_is_deterministic(
        (_seats, leader, plays, trump) in test_gens::complete_trick(),
    ) {
        let lead = plays[0].1.suit;
        let first = resolve_trick_winner(&plays, leader, trump, lead);
        let second = resolve_trick_winner(&plays, leader, trump, lead);
        prop_assert!(first.is_some());
        prop_assert_eq!(first, second);
        prop_assert_eq!(first, Some(oracle_trick_winner(&plays, trump)));
    }

    /// Trump beats non-trump whatever the leading suit.
    #[test]
    fn prop_trump_beats_non_trump(
        (a, b) in test_gens::two_distinct_cards(),
        trump in test_gens::suit(),
        leading in test_gens::suit(),
    ) {
        let t = Card::new(trump, a.rank);
        let n = if b.suit == trump {
            // pick any other suit for the non-trump card
            let other = Suit::ALL.into_iter().find(|s| *s != trump).unwrap();
            Card::new(other, b.rank)
        } else {
            b
        };
        prop_assert!(card_beats(t, n, trump, leading));
        prop_assert!(!card_beats(n, t, trump, leading));
    }

    /// Winner's card is never an off-suit discard.
    #[test]
    fn prop_winner_is_trump_or_leading(
        (_seats, leader, plays, trump) in test_gens::complete_trick(),
    ) {
        let lead = plays[0].1.suit;
        let winner = resolve_trick_winner(&plays, leader, trump, lead).unwrap();
        let card = plays.iter().find(|(p, _)| *p == winner).unwrap().1;
        prop_assert!(card.suit == trump || card.suit == lead);
    }
}
