use std::collections::HashSet;

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::domain::rules::{hand_size_for_section, GameType};
use crate::domain::{create_deck, deal, shuffle, Card};
use crate::domain::{test_gens, test_prelude};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Hands + trump + remainder is exactly the shuffled deck.
    #[test]
    fn prop_deal_partitions_deck(
        seats in test_gens::seats(),
        section in 1u8..=20,
        seed in any::<u64>(),
    ) {
        let hand_size = hand_size_for_section(GameType::UpAndDown, section, seats).unwrap();
        let mut deck = create_deck();
        shuffle(&mut deck, &mut ChaCha20Rng::seed_from_u64(seed));
        let d = deal(&deck, seats as usize, hand_size).unwrap();

        let mut seen: Vec<Card> = d.hands.iter().flatten().copied().collect();
        for hand in &d.hands {
            prop_assert_eq!(hand.len(), hand_size as usize);
        }
        seen.push(d.trump_card);
        seen.extend(d.remainder.iter().copied());

        prop_assert_eq!(seen.len(), 52);
        let unique: HashSet<Card> = seen.iter().copied().collect();
        prop_assert_eq!(unique.len(), 52);
        let full: HashSet<Card> = deck.iter().copied().collect();
        prop_assert_eq!(unique, full);
        prop_assert_eq!(d.trump_card, deck[seats as usize * hand_size as usize]);
    }
}
