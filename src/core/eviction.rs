//! Explicit bookkeeping for lock overwrites.
//!
//! A lock always lands on its slot. Whoever sat there before is evicted, and
//! the policy decides whether the evicted signup rejoins the waitlist or is
//! dropped from the run.

use serde::{Deserialize, Serialize};

use crate::core::model::SignupRef;

/// What to do with a signup displaced by a lock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvictionPolicy {
    /// Append the evicted signup to the waitlist.
    #[default]
    Requeue,
    /// Record the evicted signup as dropped.
    Drop,
}

impl EvictionPolicy {
    /// Parse `requeue` / `drop` (case-insensitive).
    pub fn parse(value: &str) -> Result<Self, String> {
        match value.trim().to_ascii_lowercase().as_str() {
            "requeue" => Ok(Self::Requeue),
            "drop" => Ok(Self::Drop),
            other => Err(format!("unknown eviction policy `{other}`")),
        }
    }

    pub(crate) const fn outcome(self) -> EvictionOutcome {
        match self {
            Self::Requeue => EvictionOutcome::Requeued,
            Self::Drop => EvictionOutcome::Dropped,
        }
    }
}

/// Where an evicted signup ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvictionOutcome {
    /// Appended to the waitlist.
    Requeued,
    /// Removed from the run.
    Dropped,
}

/// One lock overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eviction {
    /// Contested slot.
    pub slot: usize,
    /// Previous occupant.
    pub evicted: SignupRef,
    /// Locked signup that took the slot.
    pub by: SignupRef,
    /// Policy result for the previous occupant.
    pub outcome: EvictionOutcome,
}
