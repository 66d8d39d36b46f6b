//! Public snapshot API for observing game state without exposing internals.
//!
//! A [`GameSnapshot`] is always taken from one player's point of view: it
//! carries that player's hand only.

use serde::{Deserialize, Serialize};

use crate::domain::rules::GameType;
use crate::domain::scoring::{competition_ranks, ScoringSystem, SeatScore};
use crate::domain::state::{
    Difficulty, PlayerId, Position, SectionPhase, SessionId, SessionPhase,
};
use crate::domain::{Card, Suit};

/// Public info about a single seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatPublic {
    pub player_id: PlayerId,
    pub name: String,
    pub position: Position,
    pub is_admin: bool,
    pub is_ai: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_difficulty: Option<Difficulty>,
    pub is_connected: bool,
    pub total_score: u32,
}

/// Session-level header present in all snapshots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionHeader {
    pub session_id: SessionId,
    pub admin_player_id: PlayerId,
    pub game_type: GameType,
    pub scoring: ScoringSystem,
    pub max_players: u8,
    pub phase: SessionPhase,
    /// 0 until the game starts.
    pub current_section_no: u8,
    pub total_sections: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BidPublic {
    pub player_id: PlayerId,
    pub player_name: String,
    pub position: Position,
    pub bid: u8,
}

/// Shared public facts about the current section (no private hands).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionPublic {
    pub section_no: u8,
    pub hand_size: u8,
    pub dealer: Position,
    pub trump_card: Card,
    pub trump: Suit,
    pub phase: SectionPhase,
    pub bids: Vec<BidPublic>,
    pub current_bidder: Option<Position>,
    /// 1-based number of the open trick during play.
    pub trick_no: Option<u8>,
    pub lead_position: Option<Position>,
    pub leading_suit: Option<Suit>,
    pub current_trick: Vec<(Position, Card)>,
    /// Indexed by `position - 1`.
    pub tricks_won: Vec<u8>,
    /// Seat expected to act next, if anyone.
    pub to_act: Option<Position>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletedTrick {
    pub trick_no: u8,
    pub plays: Vec<(Position, Card)>,
    pub winner: Position,
}

/// Per-section outcome; one line of the score sheet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionScoreLine {
    pub section_no: u8,
    pub hand_size: u8,
    pub trump: Suit,
    pub scores: Vec<SeatScore>,
}

/// Game state as seen by one player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub session: SessionHeader,
    pub players: Vec<SeatPublic>,
    pub viewer_id: PlayerId,
    pub viewer_position: Position,
    /// Viewer's own remaining cards; empty outside a section.
    pub hand: Vec<Card>,
    pub section: Option<SectionPublic>,
    /// Non-empty only when the viewer is due to bid.
    pub legal_bids: Vec<u8>,
    /// Non-empty only when the viewer is due to play.
    pub legal_cards: Vec<Card>,
    pub last_trick: Option<CompletedTrick>,
    pub history: Vec<SectionScoreLine>,
}

impl GameSnapshot {
    pub fn is_viewer_turn(&self) -> bool {
        self.section
            .as_ref()
            .and_then(|s| s.to_act)
            .is_some_and(|p| p == self.viewer_position)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerFinalStats {
    pub player_id: PlayerId,
    pub name: String,
    pub position: Position,
    pub is_ai: bool,
    /// Competition rank: tied totals share a rank.
    pub rank: u8,
    pub total_score: u32,
    pub exact_bids: u8,
    pub busts: u8,
    pub tricks_won: u32,
    pub best_section_score: u32,
}

/// End-of-game summary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalGameStats {
    pub session_id: SessionId,
    pub game_type: GameType,
    pub scoring: ScoringSystem,
    pub sections_played: u8,
    /// Ordered by rank, then position.
    pub players: Vec<PlayerFinalStats>,
    pub winners: Vec<PlayerId>,
}

impl FinalGameStats {
    /// Fold the score sheet into per-player stats.
    pub fn from_history(header: &SessionHeader, seats: &[SeatPublic], history: &[SectionScoreLine]) -> Self {
        let totals: Vec<u32> = seats.iter().map(|s| s.total_score).collect();
        let ranks = competition_ranks(&totals);

        let mut players: Vec<PlayerFinalStats> = seats
            .iter()
            .zip(ranks)
            .map(|(seat, rank)| {
                let lines = history
                    .iter()
                    .filter_map(|l| l.scores.iter().find(|s| s.position == seat.position));
                let mut stats = PlayerFinalStats {
                    player_id: seat.player_id,
                    name: seat.name.clone(),
                    position: seat.position,
                    is_ai: seat.is_ai,
                    rank,
                    total_score: seat.total_score,
                    exact_bids: 0,
                    busts: 0,
                    tricks_won: 0,
                    best_section_score: 0,
                };
                for s in lines {
                    if s.made_bid() {
                        stats.exact_bids += 1;
                    } else {
                        stats.busts += 1;
                    }
                    stats.tricks_won += s.tricks_won as u32;
                    stats.best_section_score = stats.best_section_score.max(s.points);
                }
                stats
            })
            .collect();
        players.sort_by_key(|p| (p.rank, p.position));

        let winners = players
            .iter()
            .filter(|p| p.rank == 1)
            .map(|p| p.player_id)
            .collect();

        Self {
            session_id: header.session_id,
            game_type: header.game_type,
            scoring: header.scoring,
            sections_played: history.len() as u8,
            players,
            winners,
        }
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn seat(position: Position, total: u32) -> SeatPublic {
        SeatPublic {
            player_id: Uuid::new_v4(),
            name: format!("P{position}"),
            position,
            is_admin: position == 1,
            is_ai: false,
            ai_difficulty: None,
            is_connected: true,
            total_score: total,
        }
    }

    fn line(section_no: u8, scores: &[(Position, u8, u8)]) -> SectionScoreLine {
        SectionScoreLine {
            section_no,
            hand_size: section_no,
            trump: Suit::Hearts,
            scores: scores
                .iter()
                .map(|&(position, bid, won)| SeatScore {
                    position,
                    bid,
                    tricks_won: won,
                    points: ScoringSystem::Classic.section_points(bid, won),
                })
                .collect(),
        }
    }

    #[test]
    fn final_stats_share_rank_on_ties() {
        let header = SessionHeader {
            session_id: Uuid::new_v4(),
            admin_player_id: Uuid::new_v4(),
            game_type: GameType::Up,
            scoring: ScoringSystem::Classic,
            max_players: 3,
            phase: SessionPhase::Finished,
            current_section_no: 2,
            total_sections: 10,
        };
        let seats = vec![seat(1, 11), seat(2, 22), seat(3, 22)];
        let history = vec![
            line(1, &[(1, 1, 1), (2, 0, 0), (3, 0, 0)]),
            line(2, &[(1, 1, 0), (2, 2, 2), (3, 2, 2)]),
        ];
        let stats = FinalGameStats::from_history(&header, &seats, &history);

        assert_eq!(stats.sections_played, 2);
        assert_eq!(stats.winners.len(), 2);
        assert_eq!(stats.players[0].position, 2);
        assert_eq!(stats.players[0].rank, 1);
        assert_eq!(stats.players[1].rank, 1);
        assert_eq!(stats.players[2].rank, 3);
        assert_eq!(stats.players[2].exact_bids, 1);
        assert_eq!(stats.players[2].busts, 1);
        assert_eq!(stats.players[0].best_section_score, 12);
    }
}
