use proptest::prelude::*;

use crate::domain::{hand_has_suit, is_legal_play, legal_plays};
use crate::domain::{test_gens, test_prelude};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Following suit is forced exactly when the hand holds the leading suit.
    #[test]
    fn prop_legal_plays_respect_follow_suit(
        hand in test_gens::hand(),
        lead in test_gens::suit(),
    ) {
        let legal = legal_plays(&hand, Some(lead));
        prop_assert!(!legal.is_empty());
        for card in &legal {
            prop_assert!(hand.contains(card));
        }
        if hand_has_suit(&hand, lead) {
            prop_assert!(legal.iter().all(|c| c.suit == lead));
        } else {
            prop_assert_eq!(legal.len(), hand.len());
        }
        for card in &hand {
            prop_assert_eq!(is_legal_play(&hand, Some(lead), *card), legal.contains(card));
        }
    }

    /// On lead, every held card is legal.
    #[test]
    fn prop_leading_allows_whole_hand(hand in test_gens::hand()) {
        prop_assert_eq!(legal_plays(&hand, None).len(), hand.len());
    }
}
