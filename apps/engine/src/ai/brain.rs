//! State shared by every tier: seeded RNG, section memory and the last
//! rationale. Each tier owns one `Brain` and adds its own strategy on top.

use std::sync::{Mutex, MutexGuard};

use rand::prelude::*;

use super::trait_def::AiError;
use crate::domain::{Card, Position, SectionMemory, Suit};

pub struct Brain {
    /// `AiPlayer` methods take `&self`, so the RNG lives behind a mutex.
    rng: Mutex<StdRng>,
    memory: Mutex<SectionMemory>,
    reasoning: Mutex<String>,
}

fn lock<'a, T>(m: &'a Mutex<T>, what: &str) -> Result<MutexGuard<'a, T>, AiError> {
    m.lock()
        .map_err(|e| AiError::Internal(format!("{what} lock poisoned: {e}")))
}

impl Brain {
    /// `Some(seed)` for reproducible play, `None` for OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
            memory: Mutex::new(SectionMemory::new()),
            reasoning: Mutex::new(String::new()),
        }
    }

    /// True with probability `p`.
    pub fn roll(&self, p: f64) -> Result<bool, AiError> {
        Ok(lock(&self.rng, "RNG")?.random_bool(p.clamp(0.0, 1.0)))
    }

    /// Uniform choice among `options`.
    pub fn pick<T: Copy>(&self, options: &[T]) -> Result<T, AiError> {
        let mut rng = lock(&self.rng, "RNG")?;
        options
            .choose(&mut *rng)
            .copied()
            .ok_or_else(|| AiError::InvalidMove("Nothing to choose from".into()))
    }

    /// Small uniform noise in `[-amp, amp]`.
    pub fn jitter(&self, amp: f32) -> Result<f32, AiError> {
        if amp <= 0.0 {
            return Ok(0.0);
        }
        Ok(lock(&self.rng, "RNG")?.random_range(-amp..=amp))
    }

    /// Random phrasing for rationales.
    pub fn flavor(&self, lines: &[&'static str]) -> &'static str {
        match self.rng.lock() {
            Ok(mut rng) => lines.choose(&mut *rng).copied().unwrap_or(""),
            Err(_) => lines.first().copied().unwrap_or(""),
        }
    }

    pub fn note(&self, text: impl Into<String>) {
        if let Ok(mut r) = self.reasoning.lock() {
            *r = text.into();
        }
    }

    pub fn reasoning(&self) -> String {
        self.reasoning
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    pub fn memory(&self) -> Result<SectionMemory, AiError> {
        Ok(lock(&self.memory, "memory")?.clone())
    }

    pub fn observe_bid(&self, pos: Position, bid: u8) {
        if let Ok(mut m) = self.memory.lock() {
            m.observe_bid(pos, bid);
        }
    }

    pub fn observe_card(&self, pos: Position, card: Card, leading: Option<Suit>) {
        if let Ok(mut m) = self.memory.lock() {
            m.observe_play(pos, card, leading);
        }
    }

    pub fn reset_memory(&self) {
        if let Ok(mut m) = self.memory.lock() {
            m.reset();
        }
    }
}

/// Guard against a strategy returning something outside the legal set.
pub fn ensure_legal_bid(bid: u8, legal: &[u8]) -> Result<u8, AiError> {
    if legal.contains(&bid) {
        Ok(bid)
    } else {
        Err(AiError::InvalidMove(format!("Bid {bid} not in {legal:?}")))
    }
}

pub fn ensure_legal_card(card: Card, legal: &[Card]) -> Result<Card, AiError> {
    if legal.contains(&card) {
        Ok(card)
    } else {
        Err(AiError::InvalidMove(format!("{card} is not a legal play")))
    }
}
