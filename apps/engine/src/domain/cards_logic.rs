//! Card game logic: checking suits in hands, comparing card strength

use super::cards_types::{Card, Suit};

pub fn hand_has_suit(hand: &[Card], suit: Suit) -> bool {
    hand.iter().any(|c| c.suit == suit)
}

/// Does `candidate` take the trick away from `current_best`?
///
/// Only ever called against the running best of a trick, so the "two
/// unrelated off-suit cards" case can answer `false` without breaking
/// transitivity.
pub fn card_beats(candidate: Card, current_best: Card, trump: Suit, leading: Suit) -> bool {
    let cand_trump = candidate.suit == trump;
    let best_trump = current_best.suit == trump;
    if cand_trump && !best_trump {
        return true;
    }
    if best_trump && !cand_trump {
        return false;
    }
    if cand_trump && best_trump {
        return candidate.value() > current_best.value();
    }

    // Neither is trump: only the leading suit counts
    let cand_follows = candidate.suit == leading;
    let best_follows = current_best.suit == leading;
    if cand_follows && !best_follows {
        return true;
    }
    if cand_follows && best_follows {
        return candidate.value() > current_best.value();
    }
    false
}

/// Cards the holder may legally play given the trick's leading suit.
///
/// Must follow the leading suit when able; otherwise (or when leading) any
/// held card is legal. Returned sorted.
pub fn legal_plays(hand: &[Card], leading: Option<Suit>) -> Vec<Card> {
    if let Some(lead) = leading {
        if hand_has_suit(hand, lead) {
            let mut v: Vec<Card> = hand.iter().copied().filter(|c| c.suit == lead).collect();
            v.sort();
            return v;
        }
    }
    let mut any = hand.to_vec();
    any.sort();
    any
}

/// Is `card` a legal play out of `hand`?
pub fn is_legal_play(hand: &[Card], leading: Option<Suit>, card: Card) -> bool {
    if !hand.contains(&card) {
        return false;
    }
    match leading {
        Some(lead) if hand_has_suit(hand, lead) => card.suit == lead,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cards_types::Rank;

    fn c(s: &str) -> Card {
        s.parse().unwrap()
    }

    #[test]
    fn test_card_beats_logic() {
        let lead = Suit::Hearts;
        let trump = Suit::Spades;

        assert!(card_beats(c("AH"), c("KH"), trump, lead));
        assert!(!card_beats(c("TH"), c("AH"), trump, lead));
        assert!(card_beats(c("TS"), c("AH"), trump, lead));
        assert!(card_beats(c("TS"), c("TD"), trump, lead));
        assert!(card_beats(c("AH"), c("TD"), trump, lead));
    }

    #[test]
    fn test_card_beats_trump_beats_lead() {
        assert!(card_beats(c("2S"), c("AH"), Suit::Spades, Suit::Hearts));
        assert!(!card_beats(c("AH"), c("2S"), Suit::Spades, Suit::Hearts));
    }

    #[test]
    fn test_card_beats_within_trump_rank_decides() {
        assert!(card_beats(c("AS"), c("QS"), Suit::Spades, Suit::Clubs));
        assert!(!card_beats(c("QS"), c("AS"), Suit::Spades, Suit::Clubs));
    }

    #[test]
    fn test_card_beats_within_lead_rank_decides() {
        assert!(card_beats(c("QD"), c("JD"), Suit::Hearts, Suit::Diamonds));
    }

    #[test]
    fn test_off_suit_never_wins_directly() {
        // Clubs led, hearts trump: a diamond cannot beat a club or another diamond.
        assert!(!card_beats(c("AD"), c("2C"), Suit::Hearts, Suit::Clubs));
        assert!(!card_beats(c("AD"), c("3D"), Suit::Hearts, Suit::Clubs));
    }

    #[test]
    fn test_hand_has_suit() {
        let hand = vec![
            Card::new(Suit::Clubs, Rank::Two),
            Card::new(Suit::Diamonds, Rank::Ace),
        ];
        assert!(hand_has_suit(&hand, Suit::Clubs));
        assert!(!hand_has_suit(&hand, Suit::Hearts));
    }

    #[test]
    fn legal_plays_forces_follow() {
        let hand = vec![c("2H"), c("KS"), c("9H"), c("3C")];
        assert_eq!(legal_plays(&hand, Some(Suit::Hearts)), vec![c("2H"), c("9H")]);
        assert_eq!(legal_plays(&hand, Some(Suit::Diamonds)).len(), 4);
        assert_eq!(legal_plays(&hand, None).len(), 4);
    }

    #[test]
    fn is_legal_play_checks_ownership_and_suit() {
        let hand = vec![c("2H"), c("KS")];
        assert!(is_legal_play(&hand, Some(Suit::Hearts), c("2H")));
        assert!(!is_legal_play(&hand, Some(Suit::Hearts), c("KS")));
        assert!(!is_legal_play(&hand, None, c("AD")));
        assert!(is_legal_play(&hand, Some(Suit::Clubs), c("KS")));
    }
}
