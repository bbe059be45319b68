//! Error types for allocation operations.
//!
//! Unsatisfiable rosters are not errors: a signup that cannot be seated lands on
//! the waitlist. These variants cover caller contract violations that are
//! rejected before the allocator runs.

use thiserror::Error;

use crate::core::model::SignupId;

/// Errors produced while validating or configuring an allocation run.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AllocationError {
    /// A locked signup points past the end of the roster.
    #[error("signup {signup} locked to slot {slot}, but the roster has {slot_count} slots")]
    LockSlotOutOfRange {
        /// Offending signup.
        signup: SignupId,
        /// Requested lock index.
        slot: usize,
        /// Number of slots in the rule set.
        slot_count: usize,
    },
    /// A record claims a lock but carries no lock index.
    #[error("signup {0} is locked without a slot index")]
    LockWithoutSlot(SignupId),
    /// Two signups in one queue share an identifier.
    #[error("duplicate signup id {0}")]
    DuplicateSignupId(SignupId),
    /// Allocator configuration failed validation.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    /// Input could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
