//! Input checks run before allocation.

use std::collections::HashSet;

use crate::core::error::AllocationError;
use crate::core::model::Signup;
use crate::core::rules::RuleSet;

/// Reject queues the allocator must not see.
///
/// Lock indices must address an existing slot and signup ids must be unique.
/// Cancelled signups are still checked for duplicate ids but their locks are
/// ignored, since they never reach a slot.
pub fn validate_queue(rules: &RuleSet, signups: &[Signup]) -> Result<(), AllocationError> {
    let mut seen = HashSet::with_capacity(signups.len());
    for signup in signups {
        if !seen.insert(signup.id) {
            return Err(AllocationError::DuplicateSignupId(signup.id));
        }
        if signup.is_cancelled() {
            continue;
        }
        if let Some(slot) = signup.lock_slot {
            if slot >= rules.len() {
                return Err(AllocationError::LockSlotOutOfRange {
                    signup: signup.id,
                    slot,
                    slot_count: rules.len(),
                });
            }
        }
    }
    Ok(())
}
