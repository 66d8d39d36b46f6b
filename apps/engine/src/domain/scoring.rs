use serde::{Deserialize, Serialize};

use crate::domain::state::Position;

/// Points formula applied on every section completion.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringSystem {
    /// Exact bid scores `10 + bid`.
    #[default]
    Classic,
    /// Exact bid scores `5 * (bid + 1)`.
    Modern,
}

impl ScoringSystem {
    /// Points for one player; a miss (bust) always scores 0.
    pub fn section_points(self, bid: u8, tricks_won: u8) -> u32 {
        if bid != tricks_won {
            return 0;
        }
        match self {
            ScoringSystem::Classic => 10 + bid as u32,
            ScoringSystem::Modern => 5 * (bid as u32 + 1),
        }
    }
}

/// One seat's outcome for a completed section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatScore {
    pub position: Position,
    pub bid: u8,
    pub tricks_won: u8,
    pub points: u32,
}

impl SeatScore {
    pub fn made_bid(&self) -> bool {
        self.bid == self.tricks_won
    }
}

/// Score every seat of a completed section.
///
/// `tricks_won` is indexed by `position - 1`. Seats without a bid are skipped.
pub fn score_section(
    system: ScoringSystem,
    bids: &[(Position, u8)],
    tricks_won: &[u8],
) -> Vec<SeatScore> {
    let mut out: Vec<SeatScore> = bids
        .iter()
        .map(|&(position, bid)| {
            let won = tricks_won
                .get(position as usize - 1)
                .copied()
                .unwrap_or(0);
            SeatScore {
                position,
                bid,
                tricks_won: won,
                points: system.section_points(bid, won),
            }
        })
        .collect();
    out.sort_by_key(|s| s.position);
    out
}

/// Competition ranking (1, 2, 2, 4) of totals, returned in input order.
pub fn competition_ranks(totals: &[u32]) -> Vec<u8> {
    totals
        .iter()
        .map(|t| 1 + totals.iter().filter(|o| *o > t).count() as u8)
        .collect()
}
