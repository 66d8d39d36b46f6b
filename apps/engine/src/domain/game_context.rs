//! Game-wide context handed to AI players next to a bid/play request.
//!
//! Fields are progressive: a fresh context only knows the section schedule;
//! the orchestrator adds scores and opponent profiles as the game goes on.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::scoring::ScoringSystem;
use super::state::Position;

/// Sections kept per opponent profile.
pub const PROFILE_WINDOW: usize = 5;

/// Rolling record of one seat's recent `(bid, tricks_won)` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpponentProfile {
    pub position: Position,
    pub recent: VecDeque<(u8, u8)>,
}

impl OpponentProfile {
    pub fn new(position: Position) -> Self {
        Self {
            position,
            recent: VecDeque::with_capacity(PROFILE_WINDOW),
        }
    }

    pub fn record(&mut self, bid: u8, tricks_won: u8) {
        if self.recent.len() == PROFILE_WINDOW {
            self.recent.pop_front();
        }
        self.recent.push_back((bid, tricks_won));
    }

    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
    }

    /// Share of recent sections where the bid was made exactly.
    pub fn exact_rate(&self) -> f32 {
        if self.recent.is_empty() {
            return 0.0;
        }
        let hits = self.recent.iter().filter(|(b, w)| b == w).count();
        hits as f32 / self.recent.len() as f32
    }

    /// Mean of `bid - tricks_won`: positive for a habitual overbidder.
    pub fn bias(&self) -> f32 {
        if self.recent.is_empty() {
            return 0.0;
        }
        let sum: i32 = self
            .recent
            .iter()
            .map(|&(b, w)| b as i32 - w as i32)
            .sum();
        sum as f32 / self.recent.len() as f32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameContext {
    pub section_no: u8,
    pub total_sections: u8,
    pub scoring: ScoringSystem,
    /// Totals before the current section, indexed by `position - 1`.
    scores: Vec<u32>,
    opponent_profiles: Vec<OpponentProfile>,
}

impl GameContext {
    pub fn new(section_no: u8, total_sections: u8, scoring: ScoringSystem) -> Self {
        Self {
            section_no,
            total_sections,
            scoring,
            scores: Vec::new(),
            opponent_profiles: Vec::new(),
        }
    }

    /// Builder: add cumulative scores.
    pub fn with_scores(mut self, scores: Vec<u32>) -> Self {
        self.scores = scores;
        self
    }

    /// Builder: add opponent profiles.
    pub fn with_profiles(mut self, profiles: Vec<OpponentProfile>) -> Self {
        self.opponent_profiles = profiles;
        self
    }

    pub fn scores(&self) -> &[u32] {
        &self.scores
    }

    pub fn opponent_profiles(&self) -> &[OpponentProfile] {
        &self.opponent_profiles
    }

    pub fn profile(&self, pos: Position) -> Option<&OpponentProfile> {
        self.opponent_profiles.iter().find(|p| p.position == pos)
    }

    pub fn sections_left(&self) -> u8 {
        self.total_sections.saturating_sub(self.section_no)
    }

    /// Lead over (or deficit to) the best other seat.
    pub fn score_margin(&self, me: Position) -> i64 {
        let Some(&mine) = self.scores.get(me as usize - 1) else {
            return 0;
        };
        let best_other = self
            .scores
            .iter()
            .enumerate()
            .filter(|(i, _)| *i + 1 != me as usize)
            .map(|(_, s)| *s)
            .max()
            .unwrap_or(0);
        mine as i64 - best_other as i64
    }
}
