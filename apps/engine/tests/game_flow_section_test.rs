mod common;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use common::{due, engine_with, first_legal_card, seat_humans, seeded_config};
use jossing_engine::domain::{
    create_deck, GameType, PlayerId, ScoringSystem, SectionId, SectionPhase, SessionId,
    SessionPhase, TrickId,
};
use jossing_engine::errors::{DomainError, InfraErrorKind, StateKind, ValidationKind};
use jossing_engine::repos::{Hand, Player, SectionState, Session, Trick, TrickCard};
use jossing_engine::{ActionKind, EngineConfig, GameEngine, GameEvent, GameStore, InMemoryStore};

#[test]
fn four_player_up_game_first_section_end_to_end() {
    let (engine, store) = engine_with(seeded_config(11));
    let (sid, players) = seat_humans(&engine, GameType::Up, 4);
    engine.start_game(sid, players[0]).unwrap();

    let snap = engine.get_game_state(players[0]).unwrap();
    assert_eq!(snap.session.phase, SessionPhase::Playing);
    let section = snap.section.as_ref().unwrap();
    assert_eq!(section.section_no, 1);
    assert_eq!(section.hand_size, 1);
    assert_eq!(section.dealer, 1);
    assert_eq!(section.phase, SectionPhase::Bidding);
    for &pid in &players {
        assert_eq!(engine.get_game_state(pid).unwrap().hand.len(), 1);
    }

    // bidding starts left of the dealer and wraps round to the dealer
    let mut bids = Vec::new();
    for expected_seat in [2u8, 3, 4, 1] {
        let turn = due(&engine, sid);
        assert_eq!(turn.position, expected_seat);
        assert_eq!(turn.kind, ActionKind::Bid);
        let bid = u8::from(expected_seat % 2 == 0);
        engine.place_bid(turn.player_id, bid).unwrap();
        bids.push((expected_seat, bid));
    }

    let section = store.current_section(sid).unwrap().unwrap();
    assert_eq!(section.phase, SectionPhase::Playing);
    // highest bid 1 is shared by seats 2 and 4; seat 2 is closer clockwise to the dealer
    assert_eq!(section.lead_player_position, Some(2));

    for _ in 0..4 {
        let turn = due(&engine, sid);
        assert_eq!(turn.kind, ActionKind::Play);
        let card = first_legal_card(&engine, turn.player_id);
        engine.play_card(turn.player_id, card).unwrap();
    }

    let sections = store.sections_in_session(sid).unwrap();
    let first = &sections[0];
    assert_eq!(first.phase, SectionPhase::Completed);
    assert_eq!(first.tricks_won.iter().map(|&w| w as u32).sum::<u32>(), 1);
    assert_eq!(first.tricks_won.iter().filter(|&&w| w == 1).count(), 1);

    let tricks = store.tricks_in_section(first.id).unwrap();
    assert_eq!(tricks.len(), 1);
    assert!(tricks[0].winner_position.is_some());

    let players_after = store.players_in_session(sid).unwrap();
    for p in &players_after {
        let bid = bids.iter().find(|(s, _)| *s == p.position).unwrap().1;
        let won = first.tricks_won[p.position as usize - 1];
        assert_eq!(p.total_score, ScoringSystem::Classic.section_points(bid, won));
    }

    // play moves straight on to section 2
    let section = store.current_section(sid).unwrap().unwrap();
    assert_eq!(section.section_no, 2);
    assert_eq!(section.hand_size, 2);
    assert_eq!(section.dealer_position, 2);
    assert_eq!(engine.section_history(sid).unwrap().len(), 1);
}

#[test]
fn out_of_range_bid_is_rejected_without_state_change() {
    let (engine, _store) = engine_with(seeded_config(3));
    let (sid, players) = seat_humans(&engine, GameType::Up, 4);
    engine.start_game(sid, players[0]).unwrap();

    let turn = due(&engine, sid);
    let before = engine.get_game_state(turn.player_id).unwrap();
    assert_eq!(before.legal_bids, vec![0, 1]);

    let err = engine.place_bid(turn.player_id, 2).unwrap_err();
    assert!(matches!(err, DomainError::Validation(ValidationKind::InvalidBid, _)));
    assert!(err.is_retryable());

    let after = engine.get_game_state(turn.player_id).unwrap();
    assert_eq!(before, after);
    assert_eq!(after.section.unwrap().current_bidder, Some(turn.position));
}

#[test]
fn out_of_turn_and_repeat_bids_are_rejected() {
    let (engine, _store) = engine_with(seeded_config(5));
    let (sid, players) = seat_humans(&engine, GameType::Up, 3);
    engine.start_game(sid, players[0]).unwrap();

    // dealer is seat 1; seat 2 bids first
    let err = engine.place_bid(players[0], 0).unwrap_err();
    assert!(matches!(err, DomainError::Validation(ValidationKind::OutOfTurn, _)));

    engine.place_bid(players[1], 0).unwrap();
    let err = engine.place_bid(players[1], 1).unwrap_err();
    assert!(matches!(err, DomainError::Validation(ValidationKind::AlreadyBid, _)));
}

#[test]
fn card_not_held_is_rejected_without_state_change() {
    let (engine, _store) = engine_with(seeded_config(21));
    let (sid, players) = seat_humans(&engine, GameType::Up, 4);
    engine.start_game(sid, players[0]).unwrap();
    for _ in 0..4 {
        let turn = due(&engine, sid);
        engine.place_bid(turn.player_id, 0).unwrap();
    }

    let turn = due(&engine, sid);
    assert_eq!(turn.kind, ActionKind::Play);
    let before = engine.get_game_state(turn.player_id).unwrap();
    let foreign = create_deck()
        .into_iter()
        .find(|c| !before.hand.contains(c))
        .unwrap();

    let err = engine.play_card(turn.player_id, foreign).unwrap_err();
    assert!(matches!(err, DomainError::Validation(ValidationKind::CardNotInHand, _)));

    let after = engine.get_game_state(turn.player_id).unwrap();
    assert_eq!(before, after);
    assert!(after.section.unwrap().current_trick.is_empty());
}

#[test]
fn bidding_after_all_bids_is_a_phase_error() {
    let (engine, _store) = engine_with(seeded_config(8));
    let (sid, players) = seat_humans(&engine, GameType::Up, 3);
    engine.start_game(sid, players[0]).unwrap();
    for _ in 0..3 {
        let turn = due(&engine, sid);
        engine.place_bid(turn.player_id, 0).unwrap();
    }
    let err = engine.place_bid(players[0], 0).unwrap_err();
    assert!(matches!(err, DomainError::State(StateKind::PhaseMismatch, _)));
    assert!(!err.is_retryable());
}

#[test]
fn dealer_restriction_bars_the_balancing_bid() {
    let config = EngineConfig {
        dealer_restriction: true,
        ..seeded_config(13)
    };
    let (engine, _store) = engine_with(config);
    let (sid, players) = seat_humans(&engine, GameType::Up, 4);
    engine.start_game(sid, players[0]).unwrap();
    for _ in 0..3 {
        let turn = due(&engine, sid);
        engine.place_bid(turn.player_id, 0).unwrap();
    }

    let dealer = due(&engine, sid);
    assert_eq!(dealer.position, 1);
    let snap = engine.get_game_state(dealer.player_id).unwrap();
    assert_eq!(snap.legal_bids, vec![0]);

    let err = engine.place_bid(dealer.player_id, 1).unwrap_err();
    assert!(matches!(err, DomainError::Validation(ValidationKind::DealerRestriction, _)));
    engine.place_bid(dealer.player_id, 0).unwrap();
}

#[test]
fn hands_shrink_by_one_per_trick() {
    let (engine, _store) = engine_with(seeded_config(34));
    let (sid, players) = seat_humans(&engine, GameType::Up, 3);
    engine.start_game(sid, players[0]).unwrap();

    // finish section 1
    for _ in 0..3 {
        let turn = due(&engine, sid);
        engine.place_bid(turn.player_id, 0).unwrap();
    }
    for _ in 0..3 {
        let turn = due(&engine, sid);
        engine.play_card(turn.player_id, first_legal_card(&engine, turn.player_id)).unwrap();
    }

    // section 2: two cards each
    for _ in 0..3 {
        let turn = due(&engine, sid);
        engine.place_bid(turn.player_id, 1).unwrap();
    }
    for &pid in &players {
        assert_eq!(engine.get_game_state(pid).unwrap().hand.len(), 2);
    }
    for _ in 0..3 {
        let turn = due(&engine, sid);
        engine.play_card(turn.player_id, first_legal_card(&engine, turn.player_id)).unwrap();
    }
    for &pid in &players {
        let snap = engine.get_game_state(pid).unwrap();
        assert_eq!(snap.hand.len(), 1);
        assert_eq!(snap.last_trick.as_ref().unwrap().trick_no, 1);
        assert_eq!(snap.section.as_ref().unwrap().trick_no, Some(2));
    }
}

/// In-memory store whose section writes can be made to fail.
#[derive(Default)]
struct FlakyStore {
    inner: InMemoryStore,
    fail_section_writes: AtomicBool,
}

impl GameStore for FlakyStore {
    fn create_session(&self, session: Session) -> Result<(), DomainError> {
        self.inner.create_session(session)
    }
    fn find_session(&self, id: SessionId) -> Result<Option<Session>, DomainError> {
        self.inner.find_session(id)
    }
    fn update_session(&self, session: &Session) -> Result<(), DomainError> {
        self.inner.update_session(session)
    }
    fn create_player(&self, player: Player) -> Result<(), DomainError> {
        self.inner.create_player(player)
    }
    fn find_player(&self, id: PlayerId) -> Result<Option<Player>, DomainError> {
        self.inner.find_player(id)
    }
    fn update_player(&self, player: &Player) -> Result<(), DomainError> {
        self.inner.update_player(player)
    }
    fn delete_player(&self, id: PlayerId) -> Result<(), DomainError> {
        self.inner.delete_player(id)
    }
    fn players_in_session(&self, session_id: SessionId) -> Result<Vec<Player>, DomainError> {
        self.inner.players_in_session(session_id)
    }
    fn create_section(&self, section: SectionState) -> Result<(), DomainError> {
        self.inner.create_section(section)
    }
    fn update_section(&self, section: &SectionState) -> Result<(), DomainError> {
        if self.fail_section_writes.load(Ordering::SeqCst) {
            return Err(DomainError::infra(InfraErrorKind::Store, "section write failed"));
        }
        self.inner.update_section(section)
    }
    fn current_section(&self, session_id: SessionId) -> Result<Option<SectionState>, DomainError> {
        self.inner.current_section(session_id)
    }
    fn sections_in_session(&self, session_id: SessionId) -> Result<Vec<SectionState>, DomainError> {
        self.inner.sections_in_session(session_id)
    }
    fn save_hand(&self, hand: Hand) -> Result<(), DomainError> {
        self.inner.save_hand(hand)
    }
    fn find_hand(&self, player_id: PlayerId, section_id: SectionId) -> Result<Option<Hand>, DomainError> {
        self.inner.find_hand(player_id, section_id)
    }
    fn create_trick(&self, trick: Trick) -> Result<(), DomainError> {
        self.inner.create_trick(trick)
    }
    fn update_trick(&self, trick: &Trick) -> Result<(), DomainError> {
        self.inner.update_trick(trick)
    }
    fn tricks_in_section(&self, section_id: SectionId) -> Result<Vec<Trick>, DomainError> {
        self.inner.tricks_in_section(section_id)
    }
    fn append_trick_card(&self, card: TrickCard) -> Result<(), DomainError> {
        self.inner.append_trick_card(card)
    }
    fn trick_cards(&self, trick_id: TrickId) -> Result<Vec<TrickCard>, DomainError> {
        self.inner.trick_cards(trick_id)
    }
}

#[test]
fn card_event_waits_for_the_section_write() {
    let store = Arc::new(FlakyStore::default());
    let engine = GameEngine::new(store.clone(), seeded_config(19)).unwrap();
    let (sid, players) = seat_humans(&engine, GameType::Up, 3);
    engine.start_game(sid, players[0]).unwrap();
    for _ in 0..3 {
        let turn = due(&engine, sid);
        // all-zero bids never total the one trick on offer
        engine.place_bid(turn.player_id, 0).unwrap();
    }

    let mut events = engine.subscribe(sid);
    let turn = due(&engine, sid);
    assert_eq!(turn.kind, ActionKind::Play);
    let card = first_legal_card(&engine, turn.player_id);
    store.fail_section_writes.store(true, Ordering::SeqCst);
    let err = engine.play_card(turn.player_id, card).unwrap_err();
    assert!(matches!(err, DomainError::Infra(InfraErrorKind::Store, _)));
    while let Ok(env) = events.try_recv() {
        assert!(
            !matches!(env.event, GameEvent::CardPlayed { .. }),
            "card announced without being stored"
        );
    }
}
