//! Backtracking resolver.
//!
//! Re-derives a full arrangement for a prefix of the queue when first-fit
//! cannot seat a newcomer without disturbing earlier placements. The search is
//! depth-first over an explicit frame stack: the earliest unresolved signup is
//! tried in every eligible slot (lowest index first) before any later signup's
//! alternatives are considered, and the first complete arrangement wins.
//!
//! Each frame owns its own copy of the slot array, so sibling branches never
//! alias state. The cost is exponential in the prefix length in the worst case;
//! sparse rules keep the branching factor small in practice. Homogeneous
//! rosters are the bad case: a 25-slot roster where every slot takes the same
//! categories, oversubscribed by one, explores on the order of 25! branches
//! before giving up. Callers allocating full-size rosters should always set
//! a step ceiling with [`Resolver::new`] or `max_search_steps` in the
//! allocator configuration.

use crate::core::audit::{AuditAction, AuditTrail};
use crate::core::model::{Signup, SignupRef, SlotArray};
use crate::core::rules::RuleSet;
use crate::core::scanner::scan;

/// Outcome of one resolver invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Every signup in the prefix was seated.
    Solved {
        /// The arrangement found.
        slots: SlotArray,
        /// Branches pushed during the search.
        steps: u64,
    },
    /// No arrangement exists (or the step ceiling was reached).
    Exhausted {
        /// Branches pushed during the search.
        steps: u64,
        /// True when the search stopped at the ceiling rather than running dry.
        hit_limit: bool,
    },
}

impl Resolution {
    /// Branches pushed during the search.
    pub const fn steps(&self) -> u64 {
        match self {
            Self::Solved { steps, .. } | Self::Exhausted { steps, .. } => *steps,
        }
    }
}

/// Where a frame's candidate enumeration stands.
#[derive(Debug, Clone, Copy)]
enum Cursor {
    Fresh,
    After(usize),
    Spent,
}

struct Frame {
    depth: usize,
    slots: SlotArray,
    cursor: Cursor,
}

/// Depth-first search over placements for a queue prefix.
#[derive(Debug, Clone, Copy, Default)]
pub struct Resolver {
    max_steps: Option<u64>,
}

impl Resolver {
    /// Resolver with an optional ceiling on explored branches.
    pub const fn new(max_steps: Option<u64>) -> Self {
        Self { max_steps }
    }

    /// Search for an arrangement of `remaining` on top of `working`.
    ///
    /// `remaining` lists queue positions into `signups`, in queue order;
    /// cancelled and waitlisted signups must already be excluded. Locked
    /// signups are forced onto their slot without branching.
    pub fn resolve(
        &self,
        rules: &RuleSet,
        signups: &[Signup],
        working: SlotArray,
        remaining: &[SignupRef],
    ) -> Resolution {
        self.search(rules, signups, working, remaining, None)
    }

    pub(crate) fn search(
        &self,
        rules: &RuleSet,
        signups: &[Signup],
        working: SlotArray,
        remaining: &[SignupRef],
        mut trail: Option<&mut AuditTrail<'_>>,
    ) -> Resolution {
        let mut steps = 0_u64;
        let mut stack = vec![Frame {
            depth: 0,
            slots: working,
            cursor: Cursor::Fresh,
        }];

        while let Some(top) = stack.last_mut() {
            let Some(&current) = remaining.get(top.depth) else {
                let depth = top.depth;
                let slots = std::mem::take(&mut top.slots);
                tracing::trace!(depth, steps, "resolver found arrangement");
                if let Some(trail) = trail.as_deref_mut() {
                    trail.emit(AuditAction::Resolved, None, None, Some(depth));
                }
                return Resolution::Solved { slots, steps };
            };
            let signup = &signups[current.index()];

            let next = match (signup.lock_slot, top.cursor) {
                (_, Cursor::Spent) => None,
                (Some(lock), _) => {
                    top.cursor = Cursor::Spent;
                    Some(lock)
                }
                (None, Cursor::Fresh) => scan(rules, &top.slots, signup, None),
                (None, Cursor::After(prev)) => scan(rules, &top.slots, signup, Some(prev)),
            };

            let Some(slot) = next else {
                let depth = top.depth;
                tracing::trace!(depth, signup = %signup.id, "resolver backtracking");
                if let Some(trail) = trail.as_deref_mut() {
                    trail.emit(AuditAction::Backtrack, Some(signup.id), None, Some(depth));
                }
                stack.pop();
                continue;
            };

            if let Some(limit) = self.max_steps {
                if steps >= limit {
                    tracing::warn!(limit, "resolver step ceiling reached");
                    if let Some(trail) = trail.as_deref_mut() {
                        trail.emit(AuditAction::StepLimit, Some(signup.id), None, Some(top.depth));
                    }
                    return Resolution::Exhausted {
                        steps,
                        hit_limit: true,
                    };
                }
            }
            steps += 1;

            let action = if signup.is_locked() {
                AuditAction::LockForced
            } else {
                top.cursor = Cursor::After(slot);
                AuditAction::Branch
            };
            let depth = top.depth;
            tracing::trace!(depth, slot, signup = %signup.id, "resolver branch");
            if let Some(trail) = trail.as_deref_mut() {
                trail.emit(action, Some(signup.id), Some(slot), Some(depth));
            }

            let mut child = top.slots.clone();
            if let Some(cell) = child.get_mut(slot) {
                *cell = Some(current);
            }
            stack.push(Frame {
                depth: depth + 1,
                slots: child,
                cursor: Cursor::Fresh,
            });
        }

        Resolution::Exhausted {
            steps,
            hit_limit: false,
        }
    }
}
