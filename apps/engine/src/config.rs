//! Engine configuration.
//!
//! Built from defaults, deserialized from a config file, or read from
//! `JOSSING_*` environment variables.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::rules::{MAX_SEATS, MIN_SEATS};
use crate::errors::domain::{DomainError, InfraErrorKind};

/// Whether AI seats pause before acting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiPacing {
    /// Act immediately (tests, simulator).
    #[default]
    Off,
    /// Tier-scaled thinking delays.
    Realistic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seated players needed before the admin can start.
    pub min_players_to_start: u8,
    /// Upper clamp for a session's `max_players`.
    pub max_players_limit: u8,
    /// `None` disables the turn deadline.
    pub turn_deadline: Option<Duration>,
    pub dealer_restriction: bool,
    pub ai_pacing: AiPacing,
    /// Fixed seed for shuffles and AI jitter.
    pub rng_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_players_to_start: MIN_SEATS,
            max_players_limit: MAX_SEATS,
            turn_deadline: Some(Duration::from_secs(60)),
            dealer_restriction: false,
            ai_pacing: AiPacing::Off,
            rng_seed: None,
        }
    }
}

impl EngineConfig {
    /// Read `JOSSING_*` variables on top of the defaults.
    pub fn from_env() -> Result<Self, DomainError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(v) = parsed::<u8, _>(&lookup, "JOSSING_MIN_PLAYERS")? {
            cfg.min_players_to_start = v;
        }
        if let Some(v) = parsed::<u8, _>(&lookup, "JOSSING_MAX_PLAYERS")? {
            cfg.max_players_limit = v;
        }
        if let Some(secs) = parsed::<u64, _>(&lookup, "JOSSING_TURN_DEADLINE_SECS")? {
            cfg.turn_deadline = (secs > 0).then(|| Duration::from_secs(secs));
        }
        if let Some(v) = parsed::<bool, _>(&lookup, "JOSSING_DEALER_RESTRICTION")? {
            cfg.dealer_restriction = v;
        }
        if let Some(raw) = lookup("JOSSING_AI_PACING") {
            cfg.ai_pacing = match raw.trim().to_ascii_lowercase().as_str() {
                "off" => AiPacing::Off,
                "realistic" => AiPacing::Realistic,
                other => return Err(config_error("JOSSING_AI_PACING", other)),
            };
        }
        if let Some(v) = parsed::<u64, _>(&lookup, "JOSSING_RNG_SEED")? {
            cfg.rng_seed = Some(v);
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if !(MIN_SEATS..=MAX_SEATS).contains(&self.max_players_limit) {
            return Err(DomainError::infra(
                InfraErrorKind::Config,
                format!(
                    "max_players_limit must be within {MIN_SEATS}..={MAX_SEATS}, got {}",
                    self.max_players_limit
                ),
            ));
        }
        if self.min_players_to_start < MIN_SEATS
            || self.min_players_to_start > self.max_players_limit
        {
            return Err(DomainError::infra(
                InfraErrorKind::Config,
                format!(
                    "min_players_to_start must be within {MIN_SEATS}..={}, got {}",
                    self.max_players_limit, self.min_players_to_start
                ),
            ));
        }
        Ok(())
    }
}

fn parsed<T, F>(lookup: &F, key: &str) -> Result<Option<T>, DomainError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| config_error(key, &raw)),
    }
}

fn config_error(key: &str, raw: &str) -> DomainError {
    DomainError::infra(InfraErrorKind::Config, format!("Invalid value for {key}: {raw:?}"))
}
