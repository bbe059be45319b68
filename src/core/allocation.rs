//! Result of one allocation run.

use serde::{Deserialize, Serialize};

use crate::core::eviction::Eviction;
use crate::core::model::{Signup, SignupRef, SlotArray};

/// Counters describing one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationStats {
    /// Signups seated in the final roster.
    pub placed: usize,
    /// Signups on the waitlist.
    pub waitlisted: usize,
    /// Cancelled signups skipped.
    pub cancelled: usize,
    /// Lock overwrites.
    pub evicted: usize,
    /// Evicted signups dropped from the run.
    pub dropped: usize,
    /// Resolver invocations.
    pub resolver_runs: usize,
    /// Branches explored across all resolver invocations.
    pub search_steps: u64,
}

/// Final roster plus overflow, expressed as queue positions.
///
/// Contains nothing run-specific, so identical inputs compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// One cell per slot.
    pub slots: SlotArray,
    /// Signups that could not be seated, in the order they failed.
    pub waitlist: Vec<SignupRef>,
    /// Evicted signups removed under the drop policy.
    pub dropped: Vec<SignupRef>,
    /// Lock overwrites in the order they happened.
    pub evictions: Vec<Eviction>,
    /// Cancelled signups that were skipped.
    pub cancelled: Vec<SignupRef>,
    /// Run counters.
    pub stats: AllocationStats,
}

/// An allocation with queue positions replaced by the signups themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAllocation<'a> {
    /// One cell per slot.
    pub slots: Vec<Option<&'a Signup>>,
    /// Waitlisted signups in order.
    pub waitlist: Vec<&'a Signup>,
}

impl Allocation {
    /// Seated signups in slot order.
    pub fn placed(&self) -> impl Iterator<Item = (usize, SignupRef)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, cell)| cell.map(|r| (idx, r)))
    }

    /// Slot holding `signup`, if seated.
    pub fn slot_of(&self, signup: SignupRef) -> Option<usize> {
        self.slots.iter().position(|cell| *cell == Some(signup))
    }

    /// Whether `signup` is on the waitlist.
    pub fn is_waitlisted(&self, signup: SignupRef) -> bool {
        self.waitlist.contains(&signup)
    }

    /// Every input signup is accounted for exactly once.
    pub fn is_conserved(&self, total: usize) -> bool {
        self.placed().count() + self.waitlist.len() + self.cancelled.len() + self.dropped.len()
            == total
    }

    /// Slot cells grouped into squads of `squad_size`.
    pub fn squads(&self, squad_size: usize) -> Vec<&[Option<SignupRef>]> {
        if squad_size == 0 {
            return Vec::new();
        }
        self.slots.chunks(squad_size).collect()
    }

    /// Map queue positions back onto the signups that produced this run.
    pub fn resolve<'a>(&self, signups: &'a [Signup]) -> ResolvedAllocation<'a> {
        ResolvedAllocation {
            slots: self
                .slots
                .iter()
                .map(|cell| cell.and_then(|r| signups.get(r.index())))
                .collect(),
            waitlist: self
                .waitlist
                .iter()
                .filter_map(|r| signups.get(r.index()))
                .collect(),
        }
    }
}
