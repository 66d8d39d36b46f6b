//! How to register an AI tier
//!
//! 1) Implement `AiPlayer` for your type in its module.
//! 2) Add an `AiFactory` entry to the static list with stable `name` and `version`.
//! 3) Keep constructors free of side effects.
//! 4) Determinism: same seed ⇒ same behavior.

use crate::ai::{AiPlayer, EasyAi, HardAi, MediumAi};
use crate::domain::Difficulty;

/// Factory definition for constructing AI implementations.
pub struct AiFactory {
    pub difficulty: Difficulty,
    pub name: &'static str,
    pub version: &'static str,
    pub make: fn(seed: Option<u64>) -> Box<dyn AiPlayer>,
}

static AI_FACTORIES: &[AiFactory] = &[
    AiFactory {
        difficulty: Difficulty::Easy,
        name: EasyAi::NAME,
        version: EasyAi::VERSION,
        make: make_easy,
    },
    AiFactory {
        difficulty: Difficulty::Medium,
        name: MediumAi::NAME,
        version: MediumAi::VERSION,
        make: make_medium,
    },
    AiFactory {
        difficulty: Difficulty::Hard,
        name: HardAi::NAME,
        version: HardAi::VERSION,
        make: make_hard,
    },
];

/// Seat names handed to AI players, in order of use.
pub const AI_NAMES: &[&str] = &[
    "Astrid", "Bjørn", "Solveig", "Leif", "Ingrid", "Torstein", "Sigrid", "Eirik", "Ragnhild",
    "Halvard",
];

/// Returns the statically registered AI factories.
pub fn registered_ais() -> &'static [AiFactory] {
    AI_FACTORIES
}

pub fn by_difficulty(difficulty: Difficulty) -> Option<&'static AiFactory> {
    registered_ais().iter().find(|f| f.difficulty == difficulty)
}

/// First roster name not already taken (case-insensitive), else `"AI <n>"`.
pub fn pick_ai_name<'a>(taken: impl IntoIterator<Item = &'a str> + Clone) -> String {
    let is_taken = |n: &str| taken.clone().into_iter().any(|t| t.eq_ignore_ascii_case(n));
    AI_NAMES
        .iter()
        .copied()
        .find(|n| !is_taken(n))
        .map(|n| n.to_string())
        .unwrap_or_else(|| {
            (1..)
                .map(|i| format!("AI {i}"))
                .find(|n| !is_taken(n))
                .unwrap_or_default()
        })
}

fn make_easy(seed: Option<u64>) -> Box<dyn AiPlayer> {
    Box::new(EasyAi::new(seed))
}

fn make_medium(seed: Option<u64>) -> Box<dyn AiPlayer> {
    Box::new(MediumAi::new(seed))
}

fn make_hard(seed: Option<u64>) -> Box<dyn AiPlayer> {
    Box::new(HardAi::new(seed))
}

#[cfg(test)]
mod ai_registry_smoke {
    use super::*;

    #[test]
    fn every_difficulty_has_a_factory() {
        for d in Difficulty::ALL {
            let factory = by_difficulty(d).expect("tier must be registered");
            let ai = (factory.make)(Some(123));
            assert_eq!(ai.difficulty(), d);
        }
    }

    #[test]
    fn ai_names_skip_taken() {
        assert_eq!(pick_ai_name(["astrid", "Bob"]), "Bjørn");
        let all: Vec<&str> = AI_NAMES.to_vec();
        assert_eq!(pick_ai_name(all), "AI 1");
    }
}
