//! Domain layer: pure game logic types and helpers.

pub mod bidding;
pub mod cards_logic;
pub mod cards_parsing;
pub mod cards_serde;
pub mod cards_types;
pub mod dealing;
pub mod game_context;
pub mod player_view;
pub mod rules;
pub mod scoring;
pub mod section_memory;
pub mod snapshot;
pub mod state;
pub mod tricks;

#[cfg(test)]
pub(crate) mod test_gens;
#[cfg(test)]
pub(crate) mod test_prelude;
#[cfg(test)]
mod tests_bidding;
#[cfg(test)]
mod tests_props_dealing;
#[cfg(test)]
mod tests_props_legality;
#[cfg(test)]
mod tests_props_trick_winner;
#[cfg(test)]
mod tests_scoring;
#[cfg(test)]
mod tests_tricks;

// Re-exports for ergonomics
pub use bidding::{first_trick_leader, BidAdvance, BiddingTable};
pub use cards_logic::{card_beats, hand_has_suit, is_legal_play, legal_plays};
pub use cards_types::{Card, Rank, Suit};
pub use dealing::{create_deck, deal, deal_section, shuffle, Deal};
pub use game_context::{GameContext, OpponentProfile};
pub use player_view::{BidRequest, PlayRequest};
pub use rules::{hand_size_for_section, GameType};
pub use scoring::{ScoringSystem, SeatScore};
pub use section_memory::SectionMemory;
pub use state::{
    Difficulty, PlayerId, Position, SectionId, SectionPhase, SessionId, SessionPhase, TrickId,
};
pub use tricks::{resolve_trick_winner, PlayAdvance, TrickView};
