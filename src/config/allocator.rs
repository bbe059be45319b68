//! Allocator configuration structures.

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::eviction::EvictionPolicy;
use crate::core::rules::DEFAULT_SLOT_COUNT;

/// Environment variable holding the roster size.
pub const ENV_SLOT_COUNT: &str = "RAID_SLOT_COUNT";
/// Environment variable holding the squad size.
pub const ENV_SQUAD_SIZE: &str = "RAID_SQUAD_SIZE";
/// Environment variable holding the eviction policy (`requeue` or `drop`).
pub const ENV_EVICTION_POLICY: &str = "RAID_EVICTION_POLICY";
/// Environment variable holding the resolver step ceiling.
pub const ENV_MAX_SEARCH_STEPS: &str = "RAID_MAX_SEARCH_STEPS";

/// Default number of slots per squad.
pub const DEFAULT_SQUAD_SIZE: usize = 5;

/// Allocator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocatorConfig {
    /// Minimum roster size; shorter rule lists are padded with closed slots.
    pub slot_count: usize,
    /// Slots per squad, used for grouping output.
    pub squad_size: usize,
    /// Handling of signups displaced by a lock.
    pub eviction: EvictionPolicy,
    /// Ceiling on resolver branches per invocation; `None` searches exhaustively.
    pub max_search_steps: Option<u64>,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            slot_count: DEFAULT_SLOT_COUNT,
            squad_size: DEFAULT_SQUAD_SIZE,
            eviction: EvictionPolicy::default(),
            max_search_steps: None,
        }
    }
}

impl AllocatorConfig {
    /// Default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the roster size.
    #[must_use]
    pub const fn with_slot_count(mut self, slot_count: usize) -> Self {
        self.slot_count = slot_count;
        self
    }

    /// Set the squad size.
    #[must_use]
    pub const fn with_squad_size(mut self, squad_size: usize) -> Self {
        self.squad_size = squad_size;
        self
    }

    /// Set the eviction policy.
    #[must_use]
    pub const fn with_eviction(mut self, eviction: EvictionPolicy) -> Self {
        self.eviction = eviction;
        self
    }

    /// Set the resolver step ceiling.
    #[must_use]
    pub const fn with_max_search_steps(mut self, steps: Option<u64>) -> Self {
        self.max_search_steps = steps;
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.slot_count == 0 {
            return Err("slot_count must be greater than 0".into());
        }
        if self.squad_size == 0 {
            return Err("squad_size must be greater than 0".into());
        }
        if self.max_search_steps == Some(0) {
            return Err("max_search_steps must be greater than 0 when set".into());
        }
        Ok(())
    }

    /// Parse configuration from a JSON string and validate.
    pub fn from_json_str(input: &str) -> Result<Self, String> {
        let cfg: Self = serde_json::from_str(input).map_err(|e| format!("parse error: {e}"))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Build configuration from the environment, loading `.env` if present.
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, String> {
        // A missing .env file is normal.
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        if let Some(raw) = lookup(ENV_SLOT_COUNT) {
            cfg.slot_count = parse_var(ENV_SLOT_COUNT, &raw)?;
        }
        if let Some(raw) = lookup(ENV_SQUAD_SIZE) {
            cfg.squad_size = parse_var(ENV_SQUAD_SIZE, &raw)?;
        }
        if let Some(raw) = lookup(ENV_EVICTION_POLICY) {
            cfg.eviction =
                EvictionPolicy::parse(&raw).map_err(|e| format!("{ENV_EVICTION_POLICY}: {e}"))?;
        }
        if let Some(raw) = lookup(ENV_MAX_SEARCH_STEPS) {
            cfg.max_search_steps = Some(parse_var(ENV_MAX_SEARCH_STEPS, &raw)?);
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

fn parse_var<T>(key: &str, raw: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| format!("{key}: invalid value `{raw}`: {e}"))
}
