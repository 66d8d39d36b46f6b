//! Game flow service: the authoritative engine surface.
//!
//! Every mutating call validates against the stored state first and only
//! then writes, under a per-session lock, so a rejected call leaves the
//! session exactly as it was. Events are published after the writes.

mod ai_coordinator;
mod deadlines;
mod player_actions;
mod queries;
mod section_lifecycle;
mod sessions;

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::Serialize;
use tokio::sync::broadcast;

use crate::ai::{AiOrchestrator, NoDelay, ThinkingDelay, TierDelay};
use crate::config::{AiPacing, EngineConfig};
use crate::domain::{PlayerId, Position, SessionId, SessionPhase};
use crate::errors::domain::DomainError;
use crate::infra::{Clock, SystemClock};
use crate::repos::GameStore;
use crate::services::events::{EventBus, EventEnvelope, GameEvent};

/// Returned by [`GameEngine::create_session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CreatedSession {
    pub session_id: SessionId,
    pub player_id: PlayerId,
}

/// Returned by [`GameEngine::join_session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct JoinedSeat {
    pub player_id: PlayerId,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Bid,
    Play,
}

/// Seat the session is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PendingAction {
    pub player_id: PlayerId,
    pub position: Position,
    pub kind: ActionKind,
    /// Seat is played by the AI (seated AI or a replaced human).
    pub is_ai: bool,
}

pub struct GameEngine {
    store: Arc<dyn GameStore>,
    config: EngineConfig,
    rng: Mutex<ChaCha20Rng>,
    clock: Arc<dyn Clock>,
    events: EventBus,
    ai: Arc<AiOrchestrator>,
    locks: DashMap<SessionId, Arc<Mutex<()>>>,
}

impl GameEngine {
    /// Fails with `Infra(Config)` when the config does not pass
    /// [`EngineConfig::validate`].
    pub fn new(store: Arc<dyn GameStore>, config: EngineConfig) -> Result<Self, DomainError> {
        config.validate()?;
        let rng = match config.rng_seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_os_rng(),
        };
        let pacing: Arc<dyn ThinkingDelay> = match config.ai_pacing {
            AiPacing::Off => Arc::new(NoDelay),
            AiPacing::Realistic => Arc::new(TierDelay::new(config.rng_seed)),
        };
        Ok(Self {
            store,
            config,
            rng: Mutex::new(rng),
            clock: Arc::new(SystemClock),
            events: EventBus::new(),
            ai: Arc::new(AiOrchestrator::new(pacing)),
            locks: DashMap::new(),
        })
    }

    /// Builder: replace the time source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Builder: replace the AI thinking-delay strategy.
    pub fn with_pacing(mut self, pacing: Arc<dyn ThinkingDelay>) -> Self {
        self.ai = Arc::new(AiOrchestrator::new(pacing));
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn ai(&self) -> &AiOrchestrator {
        &self.ai
    }

    pub fn subscribe(&self, session_id: SessionId) -> broadcast::Receiver<EventEnvelope> {
        self.events.subscribe(session_id)
    }

    fn store(&self) -> &dyn GameStore {
        self.store.as_ref()
    }

    /// Only live sessions are tracked; finished or unknown sessions get a
    /// throwaway lock so late callers cannot re-grow the map.
    fn session_lock(&self, session_id: SessionId) -> Arc<Mutex<()>> {
        if let Some(lock) = self.locks.get(&session_id) {
            return lock.clone();
        }
        let live = matches!(
            self.store.find_session(session_id),
            Ok(Some(session)) if session.phase != SessionPhase::Finished
        );
        if !live {
            return Arc::new(Mutex::new(()));
        }
        self.locks
            .entry(session_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Drop everything kept per session once it is finished. Callers still
    /// holding the lock keep their own `Arc`.
    fn retire_session(&self, session_id: SessionId) {
        self.ai.forget_session(session_id);
        self.events.close(session_id);
        self.locks.remove(&session_id);
    }

    fn publish(&self, session_id: SessionId, event: GameEvent) {
        self.events.publish(session_id, event);
    }

    /// Seed for a new AI seat: drawn from the engine RNG when the engine is
    /// seeded, so whole games replay deterministically.
    fn next_ai_seed(&self) -> Option<u64> {
        self.config
            .rng_seed
            .map(|_| self.rng.lock().next_u64())
    }
}
