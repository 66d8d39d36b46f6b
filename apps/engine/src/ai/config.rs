//! Per-seat AI configuration.

use serde::{Deserialize, Serialize};

use crate::domain::Difficulty;

/// Standard configuration for an AI seat.
///
/// ```json
/// {"difficulty": "hard", "seed": 12345}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiConfig {
    pub difficulty: Difficulty,
    /// Fixed RNG seed for reproducible decisions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl AiConfig {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_json_config() {
        let cfg: AiConfig = serde_json::from_str(r#"{"difficulty":"medium","seed":9}"#).unwrap();
        assert_eq!(cfg, AiConfig::new(Difficulty::Medium).with_seed(Some(9)));
        let cfg: AiConfig = serde_json::from_str(r#"{"difficulty":"easy"}"#).unwrap();
        assert_eq!(cfg.seed, None);
    }
}
