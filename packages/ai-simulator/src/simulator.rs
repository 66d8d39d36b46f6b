//! Runs whole AI-only games through the engine's public API.
//!
//! Every seat is AI controlled: the host seat runs on autopilot and the
//! rest are AI players, or autopiloted seats when tiers are mixed.

use std::sync::Arc;

use jossing_engine::domain::snapshot::{FinalGameStats, SectionScoreLine};
use jossing_engine::domain::{Difficulty, GameType, ScoringSystem, SessionPhase};
use jossing_engine::{DomainError, EngineConfig, GameEngine, GameStore, InMemoryStore};
use tracing::debug;

/// Table shape shared by every game of a run.
#[derive(Debug, Clone)]
pub struct TableSetup {
    pub game_type: GameType,
    pub scoring: ScoringSystem,
    /// Tier per seat, seat 1 first.
    pub seats: Vec<Difficulty>,
    pub dealer_restriction: bool,
}

/// Result of simulating a complete game.
#[derive(Debug, Clone)]
pub struct GameResult {
    pub seed: u64,
    pub stats: FinalGameStats,
    pub history: Vec<SectionScoreLine>,
    /// Bids plus cards played.
    pub actions: u32,
}

#[derive(Debug)]
pub enum SimulatorError {
    /// Engine rejected a setup step or an AI turn
    Engine(DomainError),
    /// Game stopped short of the end
    Stalled { phase: SessionPhase, actions: u32 },
}

impl std::fmt::Display for SimulatorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulatorError::Engine(err) => write!(f, "Engine error: {err}"),
            SimulatorError::Stalled { phase, actions } => {
                write!(f, "Game stalled in {phase:?} after {actions} actions")
            }
        }
    }
}

impl std::error::Error for SimulatorError {}

impl From<DomainError> for SimulatorError {
    fn from(err: DomainError) -> Self {
        SimulatorError::Engine(err)
    }
}

pub struct Simulator {
    setup: TableSetup,
}

impl Simulator {
    pub fn new(setup: TableSetup) -> Self {
        Self { setup }
    }

    pub fn setup(&self) -> &TableSetup {
        &self.setup
    }

    /// Play one game to the end on a fresh engine seeded with `seed`.
    pub fn simulate_game(&self, seed: u64) -> Result<GameResult, SimulatorError> {
        let store = Arc::new(InMemoryStore::new());
        let config = EngineConfig {
            rng_seed: Some(seed),
            turn_deadline: None,
            dealer_restriction: self.setup.dealer_restriction,
            ..EngineConfig::default()
        };
        let engine = GameEngine::new(store.clone(), config)?;

        let seats = &self.setup.seats;
        let created = engine.create_session(
            "Host",
            self.setup.game_type,
            self.setup.scoring,
            seats.len() as u8,
        )?;
        let sid = created.session_id;

        let rest = &seats[1..];
        if rest.iter().all(|d| *d == rest[0]) {
            engine.add_ai_players(sid, rest[0])?;
        } else {
            for (idx, &difficulty) in rest.iter().enumerate() {
                let seat = engine.join_session(sid, &format!("Seat {}", idx + 2))?;
                engine.enable_autopilot(seat.player_id, difficulty)?;
            }
        }
        engine.enable_autopilot(created.player_id, seats[0])?;
        engine.start_game(sid, created.player_id)?;

        let actions = engine.run_ai_turns(sid)?;
        let phase = store
            .find_session(sid)?
            .map(|s| s.phase)
            .unwrap_or(SessionPhase::Waiting);
        if phase != SessionPhase::Finished {
            return Err(SimulatorError::Stalled { phase, actions });
        }
        debug!(%sid, seed, actions, "Game simulated");

        Ok(GameResult {
            seed,
            stats: engine.get_final_game_stats(sid)?,
            history: engine.section_history(sid)?,
            actions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(seats: Vec<Difficulty>) -> TableSetup {
        TableSetup {
            game_type: GameType::Up,
            scoring: ScoringSystem::Classic,
            seats,
            dealer_restriction: false,
        }
    }

    #[test]
    fn uniform_table_plays_every_section() {
        let sim = Simulator::new(setup(vec![Difficulty::Medium; 4]));
        let result = sim.simulate_game(5).unwrap();
        assert_eq!(result.stats.sections_played, 10);
        assert_eq!(result.history.len(), 10);
        assert_eq!(result.actions, 40 + 4 * 55);
    }

    #[test]
    fn mixed_table_is_deterministic_per_seed() {
        let sim = Simulator::new(setup(vec![
            Difficulty::Easy,
            Difficulty::Medium,
            Difficulty::Hard,
        ]));
        let a = sim.simulate_game(12).unwrap();
        let b = sim.simulate_game(12).unwrap();
        let totals = |r: &GameResult| {
            r.stats
                .players
                .iter()
                .map(|p| (p.position, p.total_score))
                .collect::<Vec<_>>()
        };
        assert_eq!(totals(&a), totals(&b));
    }
}
