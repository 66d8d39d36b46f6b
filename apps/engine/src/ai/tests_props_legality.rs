//! Every tier, on every random branch, only ever picks legal actions.

use proptest::prelude::*;

use crate::ai::registry::registered_ais;
use crate::domain::rules::valid_bid_range;
use crate::domain::{legal_plays, BidRequest, Card, PlayRequest, Position, Suit};
use crate::domain::{test_gens, test_prelude};

/// Hand + trick-so-far drawn from one deck, plus table shape.
fn play_setup() -> impl Strategy<Value = (u8, Position, Vec<Card>, Vec<(Position, Card)>, Suit)> {
    (3u8..=7, 1usize..=7).prop_flat_map(|(seats, hand_len)| {
        (
            Just(seats),
            1..=seats,
            0..seats as usize,
            Just(hand_len),
            test_gens::unique_cards(52),
            test_gens::suit(),
        )
            .prop_map(|(seats, seat, already, hand_len, deck, trump)| {
                let hand = deck[..hand_len].to_vec();
                let leader = ((seat as usize - 1 + seats as usize - already) % seats as usize) as u8 + 1;
                let trick = deck[hand_len..hand_len + already]
                    .iter()
                    .enumerate()
                    .map(|(i, c)| (((leader as usize - 1 + i) % seats as usize) as u8 + 1, *c))
                    .collect();
                (seats, seat, hand, trick, trump)
            })
    })
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    #[test]
    fn prop_ai_cards_are_legal(
        (seats, seat, hand, trick, trump) in play_setup(),
        seed in any::<u64>(),
        bid in 0u8..=3,
    ) {
        let leading = trick.first().map(|(_, c): &(Position, Card)| c.suit);
        let hand_size = hand.len() as u8;
        let req = PlayRequest {
            section_no: hand_size,
            hand: hand.clone(),
            trick,
            trump,
            leading,
            seat,
            seats,
            trick_no: 1,
            hand_size,
            bids: (1..=seats).map(|p| (p, bid.min(hand_size))).collect(),
            tricks_won: vec![0; seats as usize],
        };
        let legal = legal_plays(&hand, leading);
        for factory in registered_ais() {
            // many seeds so the random branches get exercised too
            for offset in 0..8u64 {
                let ai = (factory.make)(Some(seed.wrapping_add(offset)));
                let card = ai.play_card(&req, None).unwrap();
                prop_assert!(legal.contains(&card), "{} played illegal {card}", factory.name);
            }
        }
    }

    #[test]
    fn prop_ai_bids_are_legal(
        hand in test_gens::hand(),
        seats in 3u8..=7,
        seed in any::<u64>(),
        trump in test_gens::suit(),
        forbidden in proptest::option::of(0u8..=10),
    ) {
        let max_bid = hand.len() as u8;
        let legal: Vec<u8> = valid_bid_range(max_bid)
            .filter(|b| Some(*b) != forbidden)
            .collect();
        let req = BidRequest {
            section_no: max_bid,
            hand,
            max_bid,
            trump,
            seat: seats,
            seats,
            dealer: seats,
            opponent_bids: (1..seats).map(|p| (p, max_bid / 2)).collect(),
            legal_bids: legal.clone(),
        };
        for factory in registered_ais() {
            for offset in 0..8u64 {
                let ai = (factory.make)(Some(seed.wrapping_add(offset)));
                let bid = ai.make_bid(&req, None).unwrap();
                prop_assert!(legal.contains(&bid), "{} bid illegal {bid}", factory.name);
            }
        }
    }
}
