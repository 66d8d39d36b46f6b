//! Bidding: turn order, range checks, the optional dealer restriction and
//! the first-trick leader.

use crate::domain::rules::valid_bid_range;
use crate::domain::state::{clockwise_distance, expected_bidder, Position};
use crate::errors::domain::{DomainError, ValidationKind};

/// Read-only view of a section's bidding table.
#[derive(Debug, Clone, Copy)]
pub struct BiddingTable<'a> {
    pub seats: u8,
    pub dealer: Position,
    pub hand_size: u8,
    /// Bids in the order they were placed.
    pub bids: &'a [(Position, u8)],
    /// Last bidder may not make total bids equal the number of tricks.
    pub dealer_restriction: bool,
}

/// What happens after an accepted bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidAdvance {
    /// Bidding continues with this seat.
    Next(Position),
    /// Every seat has bid; `leader` leads trick 1.
    Complete { leader: Position },
}

impl<'a> BiddingTable<'a> {
    pub fn is_complete(&self) -> bool {
        self.bids.len() >= self.seats as usize
    }

    /// Seat expected to bid next, `None` once everybody has bid.
    pub fn current_bidder(&self) -> Option<Position> {
        if self.is_complete() {
            return None;
        }
        Some(expected_bidder(self.dealer, self.bids.len() as u8, self.seats))
    }

    pub fn has_bid(&self, pos: Position) -> bool {
        self.bids.iter().any(|&(p, _)| p == pos)
    }

    fn is_last_bid(&self) -> bool {
        self.bids.len() + 1 == self.seats as usize
    }

    fn bids_total(&self) -> u16 {
        self.bids.iter().map(|&(_, b)| b as u16).sum()
    }

    /// Bid value the final bidder is barred from, when the restriction applies.
    pub fn forbidden_bid(&self) -> Option<u8> {
        if !self.dealer_restriction || !self.is_last_bid() {
            return None;
        }
        let total = self.bids_total();
        let hand = self.hand_size as u16;
        (total <= hand).then(|| (hand - total) as u8)
    }

    /// Legal bid values for the current bidder, ascending.
    pub fn legal_bids(&self) -> Vec<u8> {
        if self.is_complete() {
            return Vec::new();
        }
        let forbidden = self.forbidden_bid();
        valid_bid_range(self.hand_size)
            .filter(|b| Some(*b) != forbidden)
            .collect()
    }

    /// Check a bid without touching any state.
    pub fn validate_bid(&self, who: Position, bid: u8) -> Result<BidAdvance, DomainError> {
        if self.has_bid(who) {
            return Err(DomainError::validation(
                ValidationKind::AlreadyBid,
                format!("Seat {who} has already bid this section"),
            ));
        }
        let Some(expected) = self.current_bidder() else {
            return Err(DomainError::validation(
                ValidationKind::OutOfTurn,
                "Bidding is complete",
            ));
        };
        if expected != who {
            return Err(DomainError::validation(
                ValidationKind::OutOfTurn,
                format!("Out of turn: seat {expected} bids next, not seat {who}"),
            ));
        }
        if !valid_bid_range(self.hand_size).contains(&bid) {
            return Err(DomainError::validation(
                ValidationKind::InvalidBid,
                format!("Bid {bid} outside 0..={}", self.hand_size),
            ));
        }
        if self.forbidden_bid() == Some(bid) {
            return Err(DomainError::validation(
                ValidationKind::DealerRestriction,
                format!(
                    "Final bid of {bid} would make total bids equal {} tricks",
                    self.hand_size
                ),
            ));
        }

        if self.is_last_bid() {
            let mut all: Vec<(Position, u8)> = self.bids.to_vec();
            all.push((who, bid));
            let leader = first_trick_leader(&all, self.dealer, self.seats).ok_or_else(|| {
                DomainError::validation_other("Invariant violated: no leader after full bidding")
            })?;
            return Ok(BidAdvance::Complete { leader });
        }

        Ok(BidAdvance::Next(expected_bidder(
            self.dealer,
            self.bids.len() as u8 + 1,
            self.seats,
        )))
    }
}

/// Highest bidder leads trick 1; ties go to the smallest clockwise
/// distance from the dealer's seat (the dealer itself counts as 0).
pub fn first_trick_leader(bids: &[(Position, u8)], dealer: Position, seats: u8) -> Option<Position> {
    bids.iter()
        .copied()
        .max_by(|&(pa, ba), &(pb, bb)| {
            ba.cmp(&bb).then_with(|| {
                clockwise_distance(dealer, pb, seats).cmp(&clockwise_distance(dealer, pa, seats))
            })
        })
        .map(|(pos, _)| pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table<'a>(bids: &'a [(Position, u8)], restriction: bool) -> BiddingTable<'a> {
        BiddingTable {
            seats: 4,
            dealer: 2,
            hand_size: 3,
            bids,
            dealer_restriction: restriction,
        }
    }

    #[test]
    fn current_bidder_starts_left_of_dealer() {
        assert_eq!(table(&[], false).current_bidder(), Some(3));
        assert_eq!(table(&[(3, 1), (4, 0)], false).current_bidder(), Some(1));
        assert_eq!(
            table(&[(3, 1), (4, 0), (1, 2), (2, 0)], false).current_bidder(),
            None
        );
    }

    #[test]
    fn leader_tie_break_uses_distance_from_dealer() {
        // dealer 2: distance order is 2, 3, 4, 1
        assert_eq!(first_trick_leader(&[(3, 1), (4, 2), (1, 2), (2, 0)], 2, 4), Some(4));
        assert_eq!(first_trick_leader(&[(3, 2), (4, 2), (1, 2), (2, 0)], 2, 4), Some(3));
        assert_eq!(first_trick_leader(&[(3, 2), (4, 2), (1, 2), (2, 2)], 2, 4), Some(2));
        assert_eq!(first_trick_leader(&[(3, 0), (4, 0), (1, 1), (2, 0)], 2, 4), Some(1));
        assert_eq!(first_trick_leader(&[], 2, 4), None);
    }

    #[test]
    fn restriction_only_bites_last_bidder() {
        let t = table(&[(3, 1), (4, 0)], true);
        assert_eq!(t.forbidden_bid(), None);
        assert_eq!(t.legal_bids(), vec![0, 1, 2, 3]);

        let t = table(&[(3, 1), (4, 0), (1, 1)], true);
        assert_eq!(t.forbidden_bid(), Some(1));
        assert_eq!(t.legal_bids(), vec![0, 2, 3]);

        let t = table(&[(3, 1), (4, 0), (1, 1)], false);
        assert_eq!(t.legal_bids(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn restriction_is_void_when_total_already_over() {
        let t = table(&[(3, 3), (4, 3), (1, 3)], true);
        assert_eq!(t.forbidden_bid(), None);
    }
}
