//! In-process store: the authoritative state for a single-process engine
//! and the default for tests.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::domain::{PlayerId, SectionId, SessionId, TrickId};
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};
use crate::repos::{GameStore, Hand, Player, SectionState, Session, Trick, TrickCard};

#[derive(Default)]
struct Tables {
    sessions: HashMap<SessionId, Session>,
    players: HashMap<PlayerId, Player>,
    sections: HashMap<SectionId, SectionState>,
    hands: HashMap<(PlayerId, SectionId), Hand>,
    tricks: HashMap<TrickId, Trick>,
    trick_cards: HashMap<TrickId, Vec<TrickCard>>,
}

#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn duplicate(what: &str, id: impl std::fmt::Display) -> DomainError {
    DomainError::infra(InfraErrorKind::Store, format!("Duplicate {what} {id}"))
}

impl GameStore for InMemoryStore {
    fn create_session(&self, session: Session) -> Result<(), DomainError> {
        let mut t = self.tables.write();
        if t.sessions.contains_key(&session.id) {
            return Err(duplicate("session", session.id));
        }
        t.sessions.insert(session.id, session);
        Ok(())
    }

    fn find_session(&self, id: SessionId) -> Result<Option<Session>, DomainError> {
        Ok(self.tables.read().sessions.get(&id).cloned())
    }

    fn update_session(&self, session: &Session) -> Result<(), DomainError> {
        let mut t = self.tables.write();
        let slot = t.sessions.get_mut(&session.id).ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Session, format!("Session {}", session.id))
        })?;
        *slot = session.clone();
        Ok(())
    }

    fn create_player(&self, player: Player) -> Result<(), DomainError> {
        let mut t = self.tables.write();
        if t.players.contains_key(&player.id) {
            return Err(duplicate("player", player.id));
        }
        t.players.insert(player.id, player);
        Ok(())
    }

    fn find_player(&self, id: PlayerId) -> Result<Option<Player>, DomainError> {
        Ok(self.tables.read().players.get(&id).cloned())
    }

    fn update_player(&self, player: &Player) -> Result<(), DomainError> {
        let mut t = self.tables.write();
        let slot = t.players.get_mut(&player.id).ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Player, format!("Player {}", player.id))
        })?;
        *slot = player.clone();
        Ok(())
    }

    fn delete_player(&self, id: PlayerId) -> Result<(), DomainError> {
        self.tables
            .write()
            .players
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Player, format!("Player {id}")))
    }

    fn players_in_session(&self, session_id: SessionId) -> Result<Vec<Player>, DomainError> {
        let t = self.tables.read();
        let mut players: Vec<Player> = t
            .players
            .values()
            .filter(|p| p.session_id == session_id)
            .cloned()
            .collect();
        players.sort_by_key(|p| p.position);
        Ok(players)
    }

    fn create_section(&self, section: SectionState) -> Result<(), DomainError> {
        let mut t = self.tables.write();
        let clash = t
            .sections
            .values()
            .any(|s| s.session_id == section.session_id && s.section_no == section.section_no);
        if clash || t.sections.contains_key(&section.id) {
            return Err(duplicate("section", section.section_no));
        }
        t.sections.insert(section.id, section);
        Ok(())
    }

    fn update_section(&self, section: &SectionState) -> Result<(), DomainError> {
        let mut t = self.tables.write();
        let slot = t.sections.get_mut(&section.id).ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Section, format!("Section {}", section.id))
        })?;
        *slot = section.clone();
        Ok(())
    }

    fn current_section(&self, session_id: SessionId) -> Result<Option<SectionState>, DomainError> {
        let t = self.tables.read();
        Ok(t.sections
            .values()
            .filter(|s| s.session_id == session_id)
            .max_by_key(|s| s.section_no)
            .cloned())
    }

    fn sections_in_session(&self, session_id: SessionId) -> Result<Vec<SectionState>, DomainError> {
        let t = self.tables.read();
        let mut out: Vec<SectionState> = t
            .sections
            .values()
            .filter(|s| s.session_id == session_id)
            .cloned()
            .collect();
        out.sort_by_key(|s| s.section_no);
        Ok(out)
    }

    fn save_hand(&self, hand: Hand) -> Result<(), DomainError> {
        self.tables
            .write()
            .hands
            .insert((hand.player_id, hand.section_id), hand);
        Ok(())
    }

    fn find_hand(&self, player_id: PlayerId, section_id: SectionId) -> Result<Option<Hand>, DomainError> {
        Ok(self.tables.read().hands.get(&(player_id, section_id)).cloned())
    }

    fn create_trick(&self, trick: Trick) -> Result<(), DomainError> {
        let mut t = self.tables.write();
        if t.tricks.contains_key(&trick.id) {
            return Err(duplicate("trick", trick.id));
        }
        t.trick_cards.insert(trick.id, Vec::new());
        t.tricks.insert(trick.id, trick);
        Ok(())
    }

    fn update_trick(&self, trick: &Trick) -> Result<(), DomainError> {
        let mut t = self.tables.write();
        let slot = t.tricks.get_mut(&trick.id).ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Trick, format!("Trick {}", trick.id))
        })?;
        *slot = trick.clone();
        Ok(())
    }

    fn tricks_in_section(&self, section_id: SectionId) -> Result<Vec<Trick>, DomainError> {
        let t = self.tables.read();
        let mut out: Vec<Trick> = t
            .tricks
            .values()
            .filter(|tr| tr.section_id == section_id)
            .cloned()
            .collect();
        out.sort_by_key(|tr| tr.trick_no);
        Ok(out)
    }

    fn append_trick_card(&self, card: TrickCard) -> Result<(), DomainError> {
        let mut t = self.tables.write();
        let cards = t.trick_cards.get_mut(&card.trick_id).ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Trick, format!("Trick {}", card.trick_id))
        })?;
        if cards.iter().any(|c| c.position == card.position) {
            return Err(DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("Seat {} already played into trick {}", card.position, card.trick_id),
            ));
        }
        cards.push(card);
        Ok(())
    }

    fn trick_cards(&self, trick_id: TrickId) -> Result<Vec<TrickCard>, DomainError> {
        Ok(self
            .tables
            .read()
            .trick_cards
            .get(&trick_id)
            .cloned()
            .unwrap_or_default())
    }
}
