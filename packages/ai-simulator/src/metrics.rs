//! Metrics collection and output for AI simulation results.

use std::collections::BTreeMap;

use jossing_engine::domain::snapshot::SectionScoreLine;
use jossing_engine::domain::{Difficulty, GameType, Position, ScoringSystem};
use serde::Serialize;

use crate::simulator::GameResult;

/// Complete game metrics for output.
#[derive(Debug, Clone, Serialize)]
pub struct GameMetrics {
    pub game_id: u32,
    pub seed: u64,
    pub timestamp: String,
    pub config: GameConfig,
    pub result: GameResultMetrics,
    pub sections: Vec<SectionMetrics>,
    pub player_metrics: Vec<PlayerMetrics>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameConfig {
    pub game_type: GameType,
    pub scoring: ScoringSystem,
    pub difficulties: Vec<Difficulty>,
    pub total_games: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameResultMetrics {
    /// Indexed by seat, seat 1 first.
    pub final_scores: Vec<u32>,
    pub winners: Vec<Position>,
    pub actions: u32,
    pub duration_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionMetrics {
    pub section_no: u8,
    pub hand_size: u8,
    pub trump: String,
    pub bid_total: u32,
    pub bid_accuracy: Vec<BidAccuracy>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BidAccuracy {
    pub seat: Position,
    pub bid: u8,
    pub tricks: u8,
    pub points: u32,
    pub exact: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underbid: Option<u8>, // tricks > bid
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overbid: Option<u8>, // tricks < bid
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerMetrics {
    pub seat: Position,
    pub difficulty: Difficulty,
    pub rank: u8,
    pub total_score: u32,
    pub bid_accuracy: BidAccuracyStats,
    pub avg_tricks_per_section: f64,
    pub best_section_score: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BidAccuracyStats {
    pub exact: u32,
    pub underbid: u32,
    pub overbid: u32,
    pub exact_pct: f64,
}

impl BidAccuracyStats {
    fn record(&mut self, bid: u8, tricks: u8) {
        match tricks.cmp(&bid) {
            std::cmp::Ordering::Equal => self.exact += 1,
            std::cmp::Ordering::Greater => self.underbid += 1,
            std::cmp::Ordering::Less => self.overbid += 1,
        }
        let total = self.exact + self.underbid + self.overbid;
        self.exact_pct = self.exact as f64 / total as f64 * 100.0;
    }
}

/// Build metrics from a finished game.
pub fn build_game_metrics(
    game_id: u32,
    config: GameConfig,
    result: &GameResult,
    duration_ms: f64,
) -> GameMetrics {
    let timestamp = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("unknown"));

    let sections: Vec<SectionMetrics> = result.history.iter().map(build_section_metrics).collect();

    let mut by_seat: Vec<_> = result.stats.players.iter().collect();
    by_seat.sort_by_key(|p| p.position);

    let player_metrics = by_seat
        .iter()
        .map(|p| {
            let mut accuracy = BidAccuracyStats::default();
            let mut tricks = 0u32;
            for s in result
                .history
                .iter()
                .filter_map(|line| line.scores.iter().find(|s| s.position == p.position))
            {
                accuracy.record(s.bid, s.tricks_won);
                tricks += s.tricks_won as u32;
            }
            let avg_tricks = if sections.is_empty() {
                0.0
            } else {
                tricks as f64 / sections.len() as f64
            };
            PlayerMetrics {
                seat: p.position,
                difficulty: config
                    .difficulties
                    .get(p.position as usize - 1)
                    .copied()
                    .unwrap_or(Difficulty::Medium),
                rank: p.rank,
                total_score: p.total_score,
                bid_accuracy: accuracy,
                avg_tricks_per_section: avg_tricks,
                best_section_score: p.best_section_score,
            }
        })
        .collect();

    let winners = result
        .stats
        .players
        .iter()
        .filter(|p| p.rank == 1)
        .map(|p| p.position)
        .collect();

    GameMetrics {
        game_id,
        seed: result.seed,
        timestamp,
        result: GameResultMetrics {
            final_scores: by_seat.iter().map(|p| p.total_score).collect(),
            winners,
            actions: result.actions,
            duration_ms,
        },
        config,
        sections,
        player_metrics,
    }
}

fn build_section_metrics(line: &SectionScoreLine) -> SectionMetrics {
    let bid_accuracy = line
        .scores
        .iter()
        .map(|s| BidAccuracy {
            seat: s.position,
            bid: s.bid,
            tricks: s.tricks_won,
            points: s.points,
            exact: s.made_bid(),
            underbid: (s.tricks_won > s.bid).then(|| s.tricks_won - s.bid),
            overbid: (s.tricks_won < s.bid).then(|| s.bid - s.tricks_won),
        })
        .collect();
    SectionMetrics {
        section_no: line.section_no,
        hand_size: line.hand_size,
        trump: format!("{:?}", line.trump),
        bid_total: line.scores.iter().map(|s| s.bid as u32).sum(),
        bid_accuracy,
    }
}

/// Running exact-bid tally per AI tier across a run.
#[derive(Debug, Default)]
pub struct TierSummary {
    tiers: BTreeMap<&'static str, (BidAccuracyStats, u32, u32)>,
}

impl TierSummary {
    pub fn add(&mut self, metrics: &GameMetrics) {
        for p in &metrics.player_metrics {
            let entry = self.tiers.entry(p.difficulty.as_str()).or_default();
            entry.0.exact += p.bid_accuracy.exact;
            entry.0.underbid += p.bid_accuracy.underbid;
            entry.0.overbid += p.bid_accuracy.overbid;
            entry.1 += 1;
            if p.rank == 1 {
                entry.2 += 1;
            }
        }
    }

    /// `(tier, exact_pct, seats played, wins)` in tier order.
    pub fn rows(&self) -> Vec<(&'static str, f64, u32, u32)> {
        self.tiers
            .iter()
            .map(|(tier, (acc, seats, wins))| {
                let total = acc.exact + acc.underbid + acc.overbid;
                let pct = if total == 0 {
                    0.0
                } else {
                    acc.exact as f64 / total as f64 * 100.0
                };
                (*tier, pct, *seats, *wins)
            })
            .collect()
    }
}

/// CSV summary row for quick analysis.
#[derive(Debug, Serialize)]
pub struct CsvSummaryRow {
    pub game_id: u32,
    pub seed: u64,
    pub players: usize,
    pub game_type: String,
    pub scoring: String,
    pub winners: String,
    pub scores: String,
    pub difficulties: String,
}

fn joined<T: ToString>(items: impl IntoIterator<Item = T>) -> String {
    items
        .into_iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(";")
}

impl From<&GameMetrics> for CsvSummaryRow {
    fn from(metrics: &GameMetrics) -> Self {
        CsvSummaryRow {
            game_id: metrics.game_id,
            seed: metrics.seed,
            players: metrics.config.difficulties.len(),
            game_type: format!("{:?}", metrics.config.game_type),
            scoring: format!("{:?}", metrics.config.scoring),
            winners: joined(metrics.result.winners.iter()),
            scores: joined(metrics.result.final_scores.iter()),
            difficulties: joined(metrics.config.difficulties.iter()),
        }
    }
}
