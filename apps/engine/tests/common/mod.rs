#![allow(dead_code)]

use std::sync::Arc;

use jossing_engine::domain::{Card, GameType, PlayerId, ScoringSystem, SessionId};
use jossing_engine::{EngineConfig, GameEngine, InMemoryStore, PendingAction};

// Logging is auto-installed for every test binary
#[ctor::ctor]
fn init_logging() {
    engine_test_support::logging::init();
}

pub const HUMAN_NAMES: [&str; 7] = ["Ada", "Bo", "Cato", "Dag", "Eir", "Frej", "Gro"];

pub fn seeded_config(seed: u64) -> EngineConfig {
    EngineConfig {
        rng_seed: Some(seed),
        turn_deadline: None,
        ..EngineConfig::default()
    }
}

/// Engine over a fresh in-memory store; the store handle is returned for
/// direct inspection.
pub fn engine_with(config: EngineConfig) -> (GameEngine, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let engine = GameEngine::new(store.clone(), config).expect("valid engine config");
    (engine, store)
}

/// Session with `humans` seated players, in seat order. Not started.
pub fn seat_humans(engine: &GameEngine, game_type: GameType, humans: usize) -> (SessionId, Vec<PlayerId>) {
    let created = engine
        .create_session(HUMAN_NAMES[0], game_type, ScoringSystem::Classic, humans.max(3) as u8)
        .expect("create session");
    let mut players = vec![created.player_id];
    for name in HUMAN_NAMES.iter().take(humans).skip(1) {
        let seat = engine.join_session(created.session_id, name).expect("join");
        assert_eq!(seat.position as usize, players.len() + 1);
        players.push(seat.player_id);
    }
    (created.session_id, players)
}

pub fn due(engine: &GameEngine, session_id: SessionId) -> PendingAction {
    engine
        .pending_action(session_id)
        .expect("pending action")
        .expect("someone should be due")
}

/// Lowest legal card for the due seat, read from its own snapshot.
pub fn first_legal_card(engine: &GameEngine, player_id: PlayerId) -> Card {
    let snap = engine.get_game_state(player_id).expect("snapshot");
    *snap.legal_cards.first().expect("legal card for the due seat")
}
