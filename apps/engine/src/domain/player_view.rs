//! What a seat can see at its decision point.
//!
//! [`BidRequest`] and [`PlayRequest`] are the primary interface between the
//! engine and AI players. Both carry everything visible to the acting seat
//! plus the legal options computed by the engine.
//!
//! # For AI Developers
//!
//! **Always use** [`BidRequest::legal_bids`] and [`PlayRequest::legal_plays`]
//! instead of re-implementing the rules. A decision outside those sets is
//! rejected by the engine and replaced with the lowest legal action.

use serde::{Deserialize, Serialize};

use crate::domain::state::{clockwise_distance, expected_bidder, Position};
use crate::domain::{legal_plays, Card, Suit};

/// Request for a bid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidRequest {
    /// Section number (1-based).
    pub section_no: u8,
    /// Your cards, sorted suit-then-rank.
    pub hand: Vec<Card>,
    /// Largest bid allowed (the section's hand size).
    pub max_bid: u8,
    /// Trump suit revealed at the deal.
    pub trump: Suit,
    /// Your seat (1-based).
    pub seat: Position,
    pub seats: u8,
    pub dealer: Position,
    /// Bids already placed this section, in bidding order.
    pub opponent_bids: Vec<(Position, u8)>,
    /// Bids the engine will accept from you right now.
    pub legal_bids: Vec<u8>,
}

impl BidRequest {
    pub fn legal_bids(&self) -> &[u8] {
        &self.legal_bids
    }

    /// 0 for the first bidder, `seats - 1` for the dealer.
    pub fn bid_order(&self) -> u8 {
        let first = expected_bidder(self.dealer, 0, self.seats);
        clockwise_distance(first, self.seat, self.seats)
    }

    pub fn is_last_to_bid(&self) -> bool {
        self.opponent_bids.len() + 1 == self.seats as usize
    }

    pub fn opponent_bid_total(&self) -> u16 {
        self.opponent_bids.iter().map(|&(_, b)| b as u16).sum()
    }

    /// Closest legal bid to `target`, preferring the lower one on ties.
    pub fn nearest_legal(&self, target: i32) -> Option<u8> {
        self.legal_bids
            .iter()
            .copied()
            .min_by_key(|&b| ((b as i32 - target).abs(), b))
    }
}

/// Request for a card play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayRequest {
    pub section_no: u8,
    /// Your remaining cards.
    pub hand: Vec<Card>,
    /// Cards already in the open trick, in play order.
    pub trick: Vec<(Position, Card)>,
    pub trump: Suit,
    /// Suit of the first card in the trick, `None` when you lead.
    pub leading: Option<Suit>,
    pub seat: Position,
    pub seats: u8,
    /// 1-based number of the open trick.
    pub trick_no: u8,
    /// Tricks in the whole section (the hand size).
    pub hand_size: u8,
    /// Every seat's bid, in bidding order.
    pub bids: Vec<(Position, u8)>,
    /// Tricks won so far this section, indexed by `position - 1`.
    pub tricks_won: Vec<u8>,
}

impl PlayRequest {
    /// Cards the engine will accept (follow suit when able).
    pub fn legal_plays(&self) -> Vec<Card> {
        legal_plays(&self.hand, self.leading)
    }

    pub fn is_leading(&self) -> bool {
        self.trick.is_empty()
    }

    pub fn is_last_to_play(&self) -> bool {
        self.trick.len() + 1 == self.seats as usize
    }

    pub fn my_bid(&self) -> Option<u8> {
        self.bid_of(self.seat)
    }

    pub fn bid_of(&self, pos: Position) -> Option<u8> {
        self.bids.iter().find(|&&(p, _)| p == pos).map(|&(_, b)| b)
    }

    pub fn won_by(&self, pos: Position) -> u8 {
        self.tricks_won
            .get(pos as usize - 1)
            .copied()
            .unwrap_or(0)
    }

    /// Tricks still to win to make the bid; negative once over.
    pub fn tricks_needed(&self) -> i16 {
        self.my_bid().unwrap_or(0) as i16 - self.won_by(self.seat) as i16
    }

    /// Tricks not yet decided, including the open one.
    pub fn tricks_remaining(&self) -> u8 {
        self.hand_size.saturating_sub(self.trick_no) + 1
    }

    /// Whether winning this trick still helps reach the bid.
    pub fn wants_trick(&self) -> bool {
        self.tricks_needed() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Rank;

    fn card(s: &str) -> Card {
        s.parse().unwrap()
    }

    #[test]
    fn bid_order_counts_from_left_of_dealer() {
        let mut req = BidRequest {
            section_no: 3,
            hand: vec![],
            max_bid: 3,
            trump: Suit::Hearts,
            seat: 1,
            seats: 4,
            dealer: 4,
            opponent_bids: vec![],
            legal_bids: vec![0, 1, 2, 3],
        };
        assert_eq!(req.bid_order(), 0);
        req.seat = 4;
        assert_eq!(req.bid_order(), 3);
        assert_eq!(req.nearest_legal(5), Some(3));
        assert_eq!(req.nearest_legal(-2), Some(0));
    }

    #[test]
    fn play_request_helpers() {
        let req = PlayRequest {
            section_no: 4,
            hand: vec![card("AH"), card("2H"), card("KS")],
            trick: vec![(2, card("5H"))],
            trump: Suit::Spades,
            leading: Some(Suit::Hearts),
            seat: 3,
            seats: 3,
            trick_no: 2,
            hand_size: 4,
            bids: vec![(2, 1), (3, 2), (1, 0)],
            tricks_won: vec![0, 1, 0],
        };
        assert_eq!(
            req.legal_plays(),
            vec![Card::new(Suit::Hearts, Rank::Two), Card::new(Suit::Hearts, Rank::Ace)]
        );
        assert!(!req.is_leading());
        assert!(!req.is_last_to_play());
        assert_eq!(req.tricks_needed(), 2);
        assert_eq!(req.tricks_remaining(), 3);
        assert!(req.wants_trick());
    }
}
