//! # Raid Roster
//!
//! Deterministic slot allocation for recurring multiplayer raid sessions.
//!
//! Members submit signups for a fixed roster of slots. Each slot carries a rule
//! saying who may occupy it; administrators may lock a signup onto a specific
//! slot. This crate maps the signup queue onto the roster and overflows the
//! rest into a waitlist.
//!
//! ## Algorithm
//!
//! - **First-fit scanner**: a signup takes the lowest-index open slot whose rule
//!   admits it (sponsor path or category membership).
//! - **Backtracking resolver**: when first-fit fails, the seated prefix of the
//!   queue plus the newcomer is re-derived by depth-first search, earliest
//!   signup first, lowest slot first, stopping at the first complete
//!   arrangement.
//! - **Allocator**: skips cancelled signups, forces locks (evicting occupants
//!   explicitly), and waitlists signups that neither pass can seat. The
//!   waitlist is sticky for the rest of the run.
//!
//! Allocation is synchronous and pure: identical inputs in identical order give
//! identical output.
//!
//! ## Search cost
//!
//! The resolver is exhaustive by default. On a roster whose slots all accept
//! the same categories, an oversubscribed queue makes it walk every
//! permutation of the seated prefix, which for 25 slots will not finish.
//! Production callers on full-size rosters should set a step ceiling through
//! `AllocatorBuilder::max_search_steps` (or `RAID_MAX_SEARCH_STEPS`); a signup
//! whose search hits the ceiling is waitlisted and a `StepLimit` audit event
//! is recorded.
//!
//! ```rust
//! use raid_roster::core::{allocate, RuleSet, Signup, SignupRef, SlotRule};
//!
//! let rules: RuleSet = vec![
//!     SlotRule::categories(["healer"]),
//!     SlotRule::categories(["dps"]),
//! ]
//! .into_iter()
//! .collect();
//! let signups = vec![Signup::new(1, "dps"), Signup::new(2, "healer")];
//!
//! let allocation = allocate(&rules, &signups)?;
//! assert_eq!(allocation.slots, vec![Some(SignupRef(1)), Some(SignupRef(0))]);
//! assert!(allocation.waitlist.is_empty());
//! # Ok::<(), raid_roster::core::AllocationError>(())
//! ```
//!
//! For complete scenarios, see `tests/allocation_test.rs`.

#![deny(warnings)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Core allocation abstractions and the allocator itself.
pub mod core;
/// Configuration models for the allocator.
pub mod config;
/// Builders to construct allocators from configuration.
pub mod builders;
/// Shared utilities.
pub mod util;
