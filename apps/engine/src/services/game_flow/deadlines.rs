//! Per-turn deadline: an actor that stalls past `turn_deadline` gets the
//! lowest legal action played for them.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::{GameEngine, PendingAction};
use crate::domain::{SessionId, SessionPhase};
use crate::errors::domain::{DomainError, InfraErrorKind};
use crate::repos::sections::require_current_section;
use crate::repos::sessions::require_session;
use crate::services::events::GameEvent;

impl GameEngine {
    /// Auto-act for the due seat if its turn is overdue. Returns the turn
    /// that was expired.
    pub fn expire_overdue_turn(&self, session_id: SessionId) -> Result<Option<PendingAction>, DomainError> {
        let Some(limit) = self.config.turn_deadline else {
            return Ok(None);
        };
        let lock = self.session_lock(session_id);
        let _guard = lock.lock();

        let Some(pending) = self.pending_action(session_id)? else {
            return Ok(None);
        };
        let section = require_current_section(self.store(), session_id)?;
        let elapsed = self.clock.now() - section.turn_started_at;
        if elapsed < limit {
            return Ok(None);
        }

        let mv = self.request_for(&pending)?.lowest_legal().ok_or_else(|| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("Seat {} has no legal action", pending.position),
            )
        })?;
        warn!(
            %session_id,
            player_id = %pending.player_id,
            position = pending.position,
            kind = ?pending.kind,
            ?mv,
            elapsed_secs = elapsed.whole_seconds(),
            "Turn deadline passed, auto-acting"
        );
        self.apply_locked(pending.player_id, mv)?;
        self.publish(
            session_id,
            GameEvent::TurnExpired {
                player_id: pending.player_id,
                position: pending.position,
            },
        );
        Ok(Some(pending))
    }

    /// Check the session's deadline every `period` until it finishes.
    /// AI seats that become due after an expiry are driven right away.
    pub fn spawn_deadline_watcher(self: &Arc<Self>, session_id: SessionId, period: Duration) -> JoinHandle<()> {
        let engine = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                match require_session(engine.store(), session_id) {
                    Ok(session) if session.phase == SessionPhase::Finished => break,
                    Ok(_) => {}
                    Err(e) => {
                        warn!(%session_id, error = %e, "Deadline watcher stopping");
                        break;
                    }
                }
                match engine.expire_overdue_turn(session_id) {
                    Ok(Some(_)) => {
                        if let Err(e) = engine.drive_ai(session_id).await {
                            warn!(%session_id, error = %e, "AI drive after expiry failed");
                        }
                    }
                    Ok(None) => {}
                    Err(e) => warn!(%session_id, error = %e, "Deadline check failed"),
                }
            }
            debug!(%session_id, "Deadline watcher done");
        })
    }
}
