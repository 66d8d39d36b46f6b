//! Simulated "thinking" before an AI acts.
//!
//! Pure presentation: the engine sleeps for the returned duration before
//! asking the AI for a decision. Removing or shortening it never changes
//! what gets played.

use std::ops::RangeInclusive;
use std::sync::Mutex;
use std::time::Duration;

use rand::prelude::*;

use crate::domain::Difficulty;

pub trait ThinkingDelay: Send + Sync {
    fn delay_for(&self, difficulty: Difficulty) -> Duration;
}

/// No pause at all (tests, simulator).
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDelay;

impl ThinkingDelay for NoDelay {
    fn delay_for(&self, _difficulty: Difficulty) -> Duration {
        Duration::ZERO
    }
}

/// Uniform delay within a tier-specific window.
pub struct TierDelay {
    rng: Mutex<StdRng>,
}

impl TierDelay {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }

    /// Millisecond window per tier; harder tiers think longer.
    pub fn window(difficulty: Difficulty) -> RangeInclusive<u64> {
        match difficulty {
            Difficulty::Easy => 300..=900,
            Difficulty::Medium => 500..=1500,
            Difficulty::Hard => 800..=2500,
        }
    }
}

impl ThinkingDelay for TierDelay {
    fn delay_for(&self, difficulty: Difficulty) -> Duration {
        let window = Self::window(difficulty);
        let ms = match self.rng.lock() {
            Ok(mut rng) => rng.random_range(window),
            Err(_) => *window.start(),
        };
        Duration::from_millis(ms)
    }
}
