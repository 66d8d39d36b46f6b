//! Persistence boundary for the engine.
//!
//! The engine only talks to storage through [`GameStore`]. Each call must be
//! atomic and immediately visible to later reads in the same process. The
//! record types live beside their `require_*` helpers in the submodules.

pub mod hands;
pub mod players;
pub mod sections;
pub mod sessions;
pub mod tricks;

pub use hands::Hand;
pub use players::Player;
pub use sections::{BidRecord, SectionState};
pub use sessions::Session;
pub use tricks::{Trick, TrickCard};

use crate::domain::{PlayerId, SectionId, SessionId, TrickId};
use crate::errors::domain::DomainError;

pub trait GameStore: Send + Sync {
    fn create_session(&self, session: Session) -> Result<(), DomainError>;
    fn find_session(&self, id: SessionId) -> Result<Option<Session>, DomainError>;
    fn update_session(&self, session: &Session) -> Result<(), DomainError>;

    fn create_player(&self, player: Player) -> Result<(), DomainError>;
    fn find_player(&self, id: PlayerId) -> Result<Option<Player>, DomainError>;
    fn update_player(&self, player: &Player) -> Result<(), DomainError>;
    fn delete_player(&self, id: PlayerId) -> Result<(), DomainError>;
    /// Players of a session ordered by position.
    fn players_in_session(&self, session_id: SessionId) -> Result<Vec<Player>, DomainError>;

    fn create_section(&self, section: SectionState) -> Result<(), DomainError>;
    fn update_section(&self, section: &SectionState) -> Result<(), DomainError>;
    /// Section with the highest number, if any was dealt.
    fn current_section(&self, session_id: SessionId) -> Result<Option<SectionState>, DomainError>;
    /// All sections of a session ordered by section number.
    fn sections_in_session(&self, session_id: SessionId) -> Result<Vec<SectionState>, DomainError>;

    /// Insert or replace the hand for `(player_id, section_id)`.
    fn save_hand(&self, hand: Hand) -> Result<(), DomainError>;
    fn find_hand(&self, player_id: PlayerId, section_id: SectionId) -> Result<Option<Hand>, DomainError>;

    fn create_trick(&self, trick: Trick) -> Result<(), DomainError>;
    fn update_trick(&self, trick: &Trick) -> Result<(), DomainError>;
    /// Tricks of a section ordered by trick number.
    fn tricks_in_section(&self, section_id: SectionId) -> Result<Vec<Trick>, DomainError>;
    fn append_trick_card(&self, card: TrickCard) -> Result<(), DomainError>;
    /// Cards of a trick in play order.
    fn trick_cards(&self, trick_id: TrickId) -> Result<Vec<TrickCard>, DomainError>;
}
