//! Session lifecycle: create, join, leave, seat AI players, start.

use tracing::{debug, info};
use uuid::Uuid;

use super::{CreatedSession, GameEngine, JoinedSeat};
use crate::ai::registry::pick_ai_name;
use crate::ai::AiConfig;
use crate::domain::rules::{MAX_SEATS, MIN_SEATS};
use crate::domain::{Difficulty, GameType, PlayerId, ScoringSystem, SessionId, SessionPhase};
use crate::errors::domain::{CapacityKind, DomainError, StateKind, ValidationKind};
use crate::repos::players::require_player;
use crate::repos::sessions::require_session;
use crate::repos::{Player, Session};
use crate::services::events::GameEvent;

pub const MAX_NAME_CHARS: usize = 24;

/// Difficulty given to a human seat taken over mid-game.
const REPLACEMENT_DIFFICULTY: Difficulty = Difficulty::Medium;

fn normalize_name(raw: &str) -> Result<String, DomainError> {
    let name = raw.trim();
    let len = name.chars().count();
    if len == 0 || len > MAX_NAME_CHARS {
        return Err(DomainError::validation(
            ValidationKind::InvalidPlayerName,
            format!("Player name must be 1..={MAX_NAME_CHARS} characters"),
        ));
    }
    Ok(name.to_string())
}

fn ensure_name_free(players: &[Player], name: &str) -> Result<(), DomainError> {
    if players.iter().any(|p| p.name.eq_ignore_ascii_case(name)) {
        return Err(DomainError::validation(
            ValidationKind::InvalidPlayerName,
            format!("Name {name:?} is already taken in this session"),
        ));
    }
    Ok(())
}

pub(super) fn ensure_waiting(session: &Session) -> Result<(), DomainError> {
    match session.phase {
        SessionPhase::Waiting => Ok(()),
        SessionPhase::Playing => Err(DomainError::state(
            StateKind::GameAlreadyStarted,
            format!("Session {} has already started", session.id),
        )),
        SessionPhase::Finished => Err(DomainError::state(
            StateKind::GameFinished,
            format!("Session {} is finished", session.id),
        )),
    }
}

pub(super) fn ensure_playing(session: &Session) -> Result<(), DomainError> {
    match session.phase {
        SessionPhase::Playing => Ok(()),
        SessionPhase::Waiting => Err(DomainError::state(
            StateKind::GameNotStarted,
            format!("Session {} has not started", session.id),
        )),
        SessionPhase::Finished => Err(DomainError::state(
            StateKind::GameFinished,
            format!("Session {} is finished", session.id),
        )),
    }
}

fn ensure_admin(session: &Session, requester_id: PlayerId) -> Result<(), DomainError> {
    if session.admin_player_id != requester_id {
        return Err(DomainError::validation(
            ValidationKind::NotAdmin,
            format!("Player {requester_id} is not the session admin"),
        ));
    }
    Ok(())
}

impl GameEngine {
    /// Open a session with its admin seated at position 1.
    pub fn create_session(
        &self,
        admin_name: &str,
        game_type: GameType,
        scoring: ScoringSystem,
        max_players: u8,
    ) -> Result<CreatedSession, DomainError> {
        let name = normalize_name(admin_name)?;
        if !(MIN_SEATS..=MAX_SEATS).contains(&max_players) {
            return Err(DomainError::validation(
                ValidationKind::InvalidMaxPlayers,
                format!("max_players must be within {MIN_SEATS}..={MAX_SEATS}, got {max_players}"),
            ));
        }
        let max_players = max_players.min(self.config.max_players_limit);

        let now = self.clock.now();
        let session_id = Uuid::new_v4();
        let player_id = Uuid::new_v4();

        self.store().create_session(Session {
            id: session_id,
            admin_player_id: player_id,
            game_type,
            scoring,
            max_players,
            current_section_no: 0,
            phase: SessionPhase::Waiting,
            created_at: now,
            updated_at: now,
            started_at: None,
            ended_at: None,
        })?;
        self.store().create_player(Player {
            id: player_id,
            session_id,
            name: name.clone(),
            is_admin: true,
            position: 1,
            total_score: 0,
            is_connected: true,
            is_ai: false,
            ai_difficulty: None,
            joined_at: now,
        })?;

        info!(%session_id, %player_id, ?game_type, ?scoring, max_players, "Session created");
        self.publish(
            session_id,
            GameEvent::PlayerJoined {
                player_id,
                name,
                position: 1,
            },
        );
        Ok(CreatedSession {
            session_id,
            player_id,
        })
    }

    /// Seat a human at the next free position.
    pub fn join_session(&self, session_id: SessionId, player_name: &str) -> Result<JoinedSeat, DomainError> {
        let name = normalize_name(player_name)?;
        let lock = self.session_lock(session_id);
        let _guard = lock.lock();

        let session = require_session(self.store(), session_id)?;
        ensure_waiting(&session)?;
        let players = self.store().players_in_session(session_id)?;
        if players.len() >= session.max_players as usize {
            return Err(DomainError::capacity(
                CapacityKind::SessionFull,
                format!("Session {session_id} is full ({} seats)", session.max_players),
            ));
        }
        ensure_name_free(&players, &name)?;

        let player_id = Uuid::new_v4();
        let position = players.len() as u8 + 1;
        self.store().create_player(Player {
            id: player_id,
            session_id,
            name: name.clone(),
            is_admin: false,
            position,
            total_score: 0,
            is_connected: true,
            is_ai: false,
            ai_difficulty: None,
            joined_at: self.clock.now(),
        })?;
        self.touch(session)?;

        info!(%session_id, %player_id, position, "Player joined");
        self.publish(
            session_id,
            GameEvent::PlayerJoined {
                player_id,
                name,
                position,
            },
        );
        Ok(JoinedSeat {
            player_id,
            position,
        })
    }

    /// Leave a session.
    ///
    /// Before the start the seat is vacated and the rest compacted. During
    /// play the seat stays and the AI takes it over; once no connected human
    /// remains the session is finished.
    pub fn leave_session(&self, session_id: SessionId, player_id: PlayerId) -> Result<(), DomainError> {
        let lock = self.session_lock(session_id);
        let _guard = lock.lock();

        let mut session = require_session(self.store(), session_id)?;
        let mut player = require_player(self.store(), player_id)?;
        if player.session_id != session_id {
            return Err(DomainError::validation_other(format!(
                "Player {player_id} is not seated in session {session_id}"
            )));
        }

        match session.phase {
            SessionPhase::Finished => {
                return Err(DomainError::state(
                    StateKind::GameFinished,
                    format!("Session {session_id} is finished"),
                ))
            }
            SessionPhase::Waiting => {
                self.store().delete_player(player_id)?;
                self.ai.unregister(player_id);
                let players = self.compact_seats(session_id)?;
                info!(%session_id, %player_id, position = player.position, "Player left lobby");
                self.publish(
                    session_id,
                    GameEvent::PlayerLeft {
                        player_id,
                        position: player.position,
                        replaced_by_ai: false,
                    },
                );
                if players.is_empty() {
                    debug!(%session_id, "Lobby empty, closing session");
                    let now = self.clock.now();
                    session.phase = SessionPhase::Finished;
                    session.ended_at = Some(now);
                    session.updated_at = now;
                    self.store().update_session(&session)?;
                    self.retire_session(session_id);
                    return Ok(());
                }
                if session.admin_player_id == player_id {
                    self.reassign_admin(&mut session, &players)?;
                }
                self.touch(session)?;
            }
            SessionPhase::Playing => {
                player.is_connected = false;
                // an autopilot seat keeps the tier it already plays at
                let difficulty = *player.ai_difficulty.get_or_insert(REPLACEMENT_DIFFICULTY);
                self.store().update_player(&player)?;
                if !self.ai.is_registered(player_id) {
                    self.ai.register(
                        session_id,
                        player_id,
                        AiConfig::new(difficulty).with_seed(self.next_ai_seed()),
                    )?;
                }
                info!(%session_id, %player_id, position = player.position, "Player left, AI takes the seat");
                self.publish(
                    session_id,
                    GameEvent::PlayerLeft {
                        player_id,
                        position: player.position,
                        replaced_by_ai: true,
                    },
                );

                let players = self.store().players_in_session(session_id)?;
                if !players.iter().any(|p| !p.is_ai && p.is_connected) {
                    info!(%session_id, "No connected humans left, finishing session");
                    return self.finish_session(session, &players);
                }
                if session.admin_player_id == player_id {
                    self.reassign_admin(&mut session, &players)?;
                }
                self.touch(session)?;
            }
        }
        Ok(())
    }

    /// Transport presence. A human who comes back takes their seat back
    /// from the AI.
    pub fn set_connected(&self, player_id: PlayerId, connected: bool) -> Result<(), DomainError> {
        let session_id = require_player(self.store(), player_id)?.session_id;
        let lock = self.session_lock(session_id);
        let _guard = lock.lock();

        let mut player = require_player(self.store(), player_id)?;
        if player.is_ai || player.is_connected == connected {
            return Ok(());
        }
        player.is_connected = connected;
        if connected && player.ai_difficulty.take().is_some() {
            self.ai.unregister(player_id);
            debug!(%session_id, %player_id, "Seat handed back from AI");
        }
        self.store().update_player(&player)?;
        debug!(%session_id, %player_id, connected, "Presence changed");
        Ok(())
    }

    /// Let the AI play a human's seat while they stay connected.
    pub fn enable_autopilot(&self, player_id: PlayerId, difficulty: Difficulty) -> Result<(), DomainError> {
        let session_id = require_player(self.store(), player_id)?.session_id;
        let lock = self.session_lock(session_id);
        let _guard = lock.lock();

        let session = require_session(self.store(), session_id)?;
        if session.phase == SessionPhase::Finished {
            return Err(DomainError::state(
                StateKind::GameFinished,
                format!("Session {session_id} is finished"),
            ));
        }
        let mut player = require_player(self.store(), player_id)?;
        if player.is_ai {
            return Ok(());
        }
        player.ai_difficulty = Some(difficulty);
        self.store().update_player(&player)?;
        self.ai.register(
            session_id,
            player_id,
            AiConfig::new(difficulty).with_seed(self.next_ai_seed()),
        )?;
        debug!(%session_id, %player_id, %difficulty, "Autopilot on");
        Ok(())
    }

    /// Hand a connected human's seat back from the autopilot. A player who
    /// left gets the seat back through [`GameEngine::set_connected`].
    pub fn disable_autopilot(&self, player_id: PlayerId) -> Result<(), DomainError> {
        let session_id = require_player(self.store(), player_id)?.session_id;
        let lock = self.session_lock(session_id);
        let _guard = lock.lock();

        let mut player = require_player(self.store(), player_id)?;
        if player.is_ai || player.ai_difficulty.is_none() {
            return Ok(());
        }
        if !player.is_connected {
            return Err(DomainError::validation_other(format!(
                "Player {player_id} is not connected"
            )));
        }
        player.ai_difficulty = None;
        self.store().update_player(&player)?;
        self.ai.unregister(player_id);
        debug!(%session_id, %player_id, "Autopilot off");
        Ok(())
    }

    /// Start the game and deal section 1. Admin only.
    pub fn start_game(&self, session_id: SessionId, admin_player_id: PlayerId) -> Result<(), DomainError> {
        let lock = self.session_lock(session_id);
        let _guard = lock.lock();

        let mut session = require_session(self.store(), session_id)?;
        ensure_waiting(&session)?;
        ensure_admin(&session, admin_player_id)?;
        let players = self.store().players_in_session(session_id)?;
        let min = self.config.min_players_to_start;
        if players.len() < min as usize {
            return Err(DomainError::capacity(
                CapacityKind::NotEnoughPlayers,
                format!("Need at least {min} players to start, have {}", players.len()),
            ));
        }

        for p in players.iter().filter(|p| p.is_ai_controlled()) {
            if !self.ai.is_registered(p.id) {
                let difficulty = p.ai_difficulty.unwrap_or(REPLACEMENT_DIFFICULTY);
                self.ai
                    .register(session_id, p.id, AiConfig::new(difficulty).with_seed(self.next_ai_seed()))?;
            }
        }

        let now = self.clock.now();
        session.phase = SessionPhase::Playing;
        session.started_at = Some(now);
        session.updated_at = now;
        info!(%session_id, players = players.len(), "Game started");
        self.publish(
            session_id,
            GameEvent::GameStarted {
                players: players.len() as u8,
            },
        );
        self.deal_next_section(&mut session, &players)?;
        Ok(())
    }

    /// Fill every empty seat with an AI player. Returns how many joined.
    pub fn add_ai_players(&self, session_id: SessionId, difficulty: Difficulty) -> Result<u8, DomainError> {
        let lock = self.session_lock(session_id);
        let _guard = lock.lock();

        let session = require_session(self.store(), session_id)?;
        ensure_waiting(&session)?;
        let mut players = self.store().players_in_session(session_id)?;
        let free = (session.max_players as usize).saturating_sub(players.len());
        if free == 0 {
            return Err(DomainError::capacity(
                CapacityKind::SessionFull,
                format!("Session {session_id} has no empty seats"),
            ));
        }

        for _ in 0..free {
            let name = pick_ai_name(players.iter().map(|p| p.name.as_str()));
            let player = Player {
                id: Uuid::new_v4(),
                session_id,
                name,
                is_admin: false,
                position: players.len() as u8 + 1,
                total_score: 0,
                is_connected: true,
                is_ai: true,
                ai_difficulty: Some(difficulty),
                joined_at: self.clock.now(),
            };
            self.store().create_player(player.clone())?;
            self.ai.register(
                session_id,
                player.id,
                AiConfig::new(difficulty).with_seed(self.next_ai_seed()),
            )?;
            debug!(%session_id, player_id = %player.id, position = player.position, %difficulty, "AI seated");
            self.publish(
                session_id,
                GameEvent::AiPlayerAdded {
                    player_id: player.id,
                    name: player.name.clone(),
                    position: player.position,
                    difficulty,
                },
            );
            players.push(player);
        }
        self.touch(session)?;

        info!(%session_id, added = free, %difficulty, "AI players added");
        Ok(free as u8)
    }

    /// Remove an AI seat before the start. Admin only.
    pub fn remove_ai_player(
        &self,
        session_id: SessionId,
        player_id: PlayerId,
        requester_id: PlayerId,
    ) -> Result<(), DomainError> {
        let lock = self.session_lock(session_id);
        let _guard = lock.lock();

        let session = require_session(self.store(), session_id)?;
        ensure_admin(&session, requester_id)?;
        ensure_waiting(&session)?;
        let player = require_player(self.store(), player_id)?;
        if player.session_id != session_id || !player.is_ai {
            return Err(DomainError::validation(
                ValidationKind::NotAiPlayer,
                format!("Player {player_id} is not an AI seat in session {session_id}"),
            ));
        }

        self.store().delete_player(player_id)?;
        self.ai.unregister(player_id);
        self.compact_seats(session_id)?;
        self.touch(session)?;

        info!(%session_id, %player_id, position = player.position, "AI player removed");
        self.publish(
            session_id,
            GameEvent::AiPlayerRemoved {
                player_id,
                position: player.position,
            },
        );
        Ok(())
    }

    /// Renumber remaining seats `1..=n` keeping their order.
    fn compact_seats(&self, session_id: SessionId) -> Result<Vec<Player>, DomainError> {
        let mut players = self.store().players_in_session(session_id)?;
        for (idx, p) in players.iter_mut().enumerate() {
            let position = idx as u8 + 1;
            if p.position != position {
                p.position = position;
                self.store().update_player(p)?;
            }
        }
        Ok(players)
    }

    /// Admin goes to the lowest seated connected human, else the lowest seat.
    fn reassign_admin(&self, session: &mut Session, players: &[Player]) -> Result<(), DomainError> {
        let heir = players
            .iter()
            .find(|p| !p.is_ai && p.is_connected && p.id != session.admin_player_id)
            .or_else(|| players.iter().find(|p| p.id != session.admin_player_id));
        let Some(heir) = heir else {
            return Ok(());
        };
        for p in players {
            let is_admin = p.id == heir.id;
            if p.is_admin != is_admin {
                let mut updated = p.clone();
                updated.is_admin = is_admin;
                self.store().update_player(&updated)?;
            }
        }
        session.admin_player_id = heir.id;
        info!(session_id = %session.id, admin = %heir.id, "Admin reassigned");
        Ok(())
    }

    fn touch(&self, mut session: Session) -> Result<(), DomainError> {
        session.updated_at = self.clock.now();
        self.store().update_session(&session)
    }
}
