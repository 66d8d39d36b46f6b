//! Shared types for the simulator.

use clap::ValueEnum;
use jossing_engine::domain::{Difficulty, GameType, ScoringSystem};

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Jsonl,
    /// CSV summary only.
    Csv,
}

/// AI tier for every seat, or a rotation through all three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DifficultyArg {
    Easy,
    Medium,
    Hard,
    Mixed,
}

impl DifficultyArg {
    /// Tier per seat, seat 1 first.
    pub fn seats(self, players: u8) -> Vec<Difficulty> {
        (0..players as usize)
            .map(|idx| match self {
                DifficultyArg::Easy => Difficulty::Easy,
                DifficultyArg::Medium => Difficulty::Medium,
                DifficultyArg::Hard => Difficulty::Hard,
                DifficultyArg::Mixed => Difficulty::ALL[idx % Difficulty::ALL.len()],
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum GameTypeArg {
    Up,
    UpAndDown,
}

impl From<GameTypeArg> for GameType {
    fn from(arg: GameTypeArg) -> Self {
        match arg {
            GameTypeArg::Up => GameType::Up,
            GameTypeArg::UpAndDown => GameType::UpAndDown,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ScoringArg {
    Classic,
    Modern,
}

impl From<ScoringArg> for ScoringSystem {
    fn from(arg: ScoringArg) -> Self {
        match arg {
            ScoringArg::Classic => ScoringSystem::Classic,
            ScoringArg::Modern => ScoringSystem::Modern,
        }
    }
}
