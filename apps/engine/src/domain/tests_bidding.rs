use crate::domain::bidding::{BidAdvance, BiddingTable};
use crate::domain::Position;
use crate::errors::domain::{DomainError, ValidationKind};

fn table(bids: &[(Position, u8)], hand_size: u8, restriction: bool) -> BiddingTable<'_> {
    BiddingTable {
        seats: 4,
        dealer: 1,
        hand_size,
        bids,
        dealer_restriction: restriction,
    }
}

fn kind(err: DomainError) -> ValidationKind {
    match err {
        DomainError::Validation(kind, _) => kind,
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn bids_follow_seat_order_from_left_of_dealer() {
    let mut bids: Vec<(Position, u8)> = Vec::new();
    for (expected, next) in [(2, 3), (3, 4), (4, 1)] {
        let adv = table(&bids, 3, false).validate_bid(expected, 1).unwrap();
        assert_eq!(adv, BidAdvance::Next(next));
        bids.push((expected, 1));
    }
    let adv = table(&bids, 3, false).validate_bid(1, 2).unwrap();
    assert_eq!(adv, BidAdvance::Complete { leader: 1 });
}

#[test]
fn out_of_turn_bid_is_rejected() {
    let err = table(&[], 3, false).validate_bid(3, 1).unwrap_err();
    assert_eq!(kind(err), ValidationKind::OutOfTurn);
}

#[test]
fn second_bid_from_same_seat_is_rejected() {
    let err = table(&[(2, 1)], 3, false).validate_bid(2, 1).unwrap_err();
    assert_eq!(kind(err), ValidationKind::AlreadyBid);
}

#[test]
fn bid_above_hand_size_is_rejected() {
    let err = table(&[], 3, false).validate_bid(2, 4).unwrap_err();
    assert_eq!(kind(err), ValidationKind::InvalidBid);
    assert!(table(&[], 3, false).validate_bid(2, 3).is_ok());
    assert!(table(&[], 3, false).validate_bid(2, 0).is_ok());
}

#[test]
fn dealer_restriction_rejects_balancing_bid() {
    let bids = [(2, 1), (3, 0), (4, 1)];
    let err = table(&bids, 3, true).validate_bid(1, 1).unwrap_err();
    assert_eq!(kind(err), ValidationKind::DealerRestriction);
    assert!(table(&bids, 3, true).validate_bid(1, 0).is_ok());
    assert!(table(&bids, 3, false).validate_bid(1, 1).is_ok());
}

#[test]
fn all_zero_bids_lead_from_dealer() {
    // highest bid is 0 for everyone: the dealer is closest (distance 0)
    let bids = [(2, 0), (3, 0), (4, 0)];
    let adv = table(&bids, 1, false).validate_bid(1, 0).unwrap();
    assert_eq!(adv, BidAdvance::Complete { leader: 1 });
}

#[test]
fn bidding_table_rejects_after_completion() {
    let bids = [(2, 0), (3, 0), (4, 0), (1, 0)];
    let t = table(&bids, 1, false);
    assert!(t.is_complete());
    assert!(t.legal_bids().is_empty());
    let err = t.validate_bid(2, 0).unwrap_err();
    assert_eq!(kind(err), ValidationKind::AlreadyBid);
}
