use crate::domain::tricks::{resolve_trick_winner, PlayAdvance, TrickView};
use crate::domain::{Card, Position, Suit};
use crate::errors::domain::{DomainError, ValidationKind};

fn c(s: &str) -> Card {
    s.parse().unwrap()
}

fn view<'a>(plays: &'a [(Position, Card)], lead: Position) -> TrickView<'a> {
    TrickView {
        seats: 4,
        lead_position: lead,
        trump: Suit::Spades,
        plays,
    }
}

fn kind(err: DomainError) -> ValidationKind {
    match err {
        DomainError::Validation(kind, _) => kind,
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn highest_of_leading_suit_wins_without_trump() {
    let plays = [(2, c("5H")), (3, c("KH")), (4, c("AD")), (1, c("9H"))];
    assert_eq!(
        resolve_trick_winner(&plays, 2, Suit::Spades, Suit::Hearts),
        Some(3)
    );
}

#[test]
fn lowest_trump_beats_ace_of_leading_suit() {
    let plays = [(1, c("AH")), (2, c("2S")), (3, c("KH")), (4, c("3H"))];
    assert_eq!(
        resolve_trick_winner(&plays, 1, Suit::Spades, Suit::Hearts),
        Some(2)
    );
}

#[test]
fn higher_trump_overtrumps() {
    let plays = [(3, c("4C")), (4, c("5S")), (1, c("JS")), (2, c("AC"))];
    assert_eq!(
        resolve_trick_winner(&plays, 3, Suit::Spades, Suit::Clubs),
        Some(1)
    );
}

#[test]
fn off_suit_discards_never_win() {
    let plays = [(1, c("2H")), (2, c("AD")), (3, c("AC")), (4, c("KD"))];
    assert_eq!(
        resolve_trick_winner(&plays, 1, Suit::Spades, Suit::Hearts),
        Some(1)
    );
}

#[test]
fn winner_requires_leader_card() {
    let plays = [(2, c("2H"))];
    assert_eq!(resolve_trick_winner(&plays, 1, Suit::Spades, Suit::Hearts), None);
}

#[test]
fn play_order_follows_leader() {
    let plays = [(3, c("4H"))];
    let v = view(&plays, 3);
    assert_eq!(v.next_to_play(), Some(4));
    assert_eq!(
        v.validate_play(4, &[c("9H"), c("2C")], c("9H")).unwrap(),
        PlayAdvance::Next(1)
    );
    let err = v.validate_play(1, &[c("9H")], c("9H")).unwrap_err();
    assert_eq!(kind(err), ValidationKind::OutOfTurn);
}

#[test]
fn must_follow_when_holding_leading_suit() {
    let plays = [(1, c("4H"))];
    let v = view(&plays, 1);
    let err = v.validate_play(2, &[c("9H"), c("2S")], c("2S")).unwrap_err();
    assert_eq!(kind(err), ValidationKind::MustFollowSuit);
    // void in hearts: anything goes
    assert!(v.validate_play(2, &[c("3D"), c("2S")], c("2S")).is_ok());
}

#[test]
fn card_not_held_is_rejected() {
    let v = view(&[], 1);
    let err = v.validate_play(1, &[c("9H")], c("AS")).unwrap_err();
    assert_eq!(kind(err), ValidationKind::CardNotInHand);
}

#[test]
fn last_card_resolves_trick() {
    let plays = [(4, c("4D")), (1, c("QD")), (2, c("2S"))];
    let v = view(&plays, 4);
    assert_eq!(
        v.validate_play(3, &[c("AD")], c("AD")).unwrap(),
        PlayAdvance::TrickComplete { winner: 2 }
    );
}
