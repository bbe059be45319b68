//! Allocation orchestrator.
//!
//! Drives the signup queue through first-fit placement, escalating to the
//! backtracking resolver when a newcomer does not fit, and parks whatever still
//! cannot be seated on the waitlist. Each call is pure: rules and signups in,
//! a fresh [`Allocation`] out.
//!
//! Per signup, in queue order:
//!
//! 1. cancelled: skipped
//! 2. already waitlisted: skipped
//! 3. locked: forced onto its slot, evicting any occupant
//! 4. unlocked: first-fit against the committed roster; on failure the resolver
//!    re-derives the whole seated prefix plus this signup; if that fails too the
//!    signup is waitlisted and the roster is left as it was
//!
//! The waitlist is sticky within a run: a waitlisted signup is never retried,
//! even if a later lock or cancellation frees room.

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::AllocatorConfig;
use crate::core::allocation::{Allocation, AllocationStats};
use crate::core::audit::{AuditAction, AuditSink, AuditTrail, NullAuditSink};
use crate::core::error::AllocationError;
use crate::core::eviction::{Eviction, EvictionOutcome, EvictionPolicy};
use crate::core::model::{Signup, SignupRef, SlotArray};
use crate::core::resolver::{Resolution, Resolver};
use crate::core::rules::{RuleSet, SlotRule};
use crate::core::scanner::scan;
use crate::core::validate::validate_queue;

/// Rule-constrained slot allocator.
#[derive(Debug, Clone)]
pub struct Allocator {
    config: AllocatorConfig,
    resolver: Resolver,
}

impl Default for Allocator {
    fn default() -> Self {
        let config = AllocatorConfig::default();
        Self {
            resolver: Resolver::new(config.max_search_steps),
            config,
        }
    }
}

impl Allocator {
    /// Create an allocator from validated configuration.
    pub fn new(config: AllocatorConfig) -> Result<Self, AllocationError> {
        config.validate().map_err(AllocationError::InvalidConfig)?;
        Ok(Self {
            resolver: Resolver::new(config.max_search_steps),
            config,
        })
    }

    /// Active configuration.
    pub const fn config(&self) -> &AllocatorConfig {
        &self.config
    }

    /// Pad raw rules to the configured roster size.
    pub fn rule_set(&self, rules: Vec<SlotRule>) -> RuleSet {
        RuleSet::normalized(rules, self.config.slot_count)
    }

    /// Slot cells of `allocation` grouped by the configured squad size.
    pub fn squads<'a>(&self, allocation: &'a Allocation) -> Vec<&'a [Option<SignupRef>]> {
        allocation.squads(self.config.squad_size)
    }

    /// Allocate `signups` onto the slots described by `rules`.
    pub fn allocate(
        &self,
        rules: &RuleSet,
        signups: &[Signup],
    ) -> Result<Allocation, AllocationError> {
        self.allocate_audited(rules, signups, &mut NullAuditSink)
    }

    /// Allocate while recording every decision to `audit`.
    pub fn allocate_audited(
        &self,
        rules: &RuleSet,
        signups: &[Signup],
        audit: &mut dyn AuditSink,
    ) -> Result<Allocation, AllocationError> {
        validate_queue(rules, signups)?;

        let run_id = Uuid::new_v4();
        let mut trail = AuditTrail::new(run_id, audit);
        let mut run = Run::new(rules.len());

        for (idx, signup) in signups.iter().enumerate() {
            let current = SignupRef(idx);
            if signup.is_cancelled() {
                run.cancelled.push(current);
                trail.emit(AuditAction::SkipCancelled, Some(signup.id), None, None);
                continue;
            }
            if run.waitlist.contains(&current) {
                continue;
            }
            match signup.lock_slot {
                Some(slot) => run.force_lock(signups, current, slot, self.config.eviction, &mut trail),
                None => self.place_unlocked(rules, signups, current, &mut run, &mut trail),
            }
        }

        let allocation = run.finish();
        info!(
            %run_id,
            placed = allocation.stats.placed,
            waitlisted = allocation.stats.waitlisted,
            cancelled = allocation.stats.cancelled,
            evicted = allocation.stats.evicted,
            resolver_runs = allocation.stats.resolver_runs,
            "allocation complete"
        );
        Ok(allocation)
    }

    fn place_unlocked(
        &self,
        rules: &RuleSet,
        signups: &[Signup],
        current: SignupRef,
        run: &mut Run,
        trail: &mut AuditTrail<'_>,
    ) {
        let signup = &signups[current.index()];

        if let Some(slot) = scan(rules, &run.slots, signup, None) {
            run.slots[slot] = Some(current);
            run.seated.push(current);
            debug!(signup = %signup.id, slot, "placed by first fit");
            trail.emit(AuditAction::Placed, Some(signup.id), Some(slot), None);
            return;
        }

        let mut prefix = run.seated.clone();
        prefix.push(current);
        let working = run.lock_baseline(signups);

        run.stats.resolver_runs += 1;
        trail.emit(AuditAction::ResolveStarted, Some(signup.id), None, Some(prefix.len()));
        let resolution = self
            .resolver
            .search(rules, signups, working, &prefix, Some(&mut *trail));
        run.stats.search_steps += resolution.steps();

        match resolution {
            Resolution::Solved { slots, steps } => {
                let slot = slots.iter().position(|cell| *cell == Some(current));
                debug!(signup = %signup.id, ?slot, steps, "placed after reshuffle");
                run.slots = slots;
                run.seated = prefix;
                trail.emit(AuditAction::Placed, Some(signup.id), slot, None);
            }
            Resolution::Exhausted { steps, hit_limit } => {
                debug!(signup = %signup.id, steps, hit_limit, "waitlisted");
                run.waitlist.push(current);
                trail.emit(AuditAction::Waitlisted, Some(signup.id), None, None);
            }
        }
    }
}

/// Allocate with the default configuration.
pub fn allocate(rules: &RuleSet, signups: &[Signup]) -> Result<Allocation, AllocationError> {
    Allocator::default().allocate(rules, signups)
}

/// Mutable state of one run. The allocator is its only writer.
struct Run {
    slots: SlotArray,
    /// Signups currently holding a slot, in queue order.
    seated: Vec<SignupRef>,
    waitlist: Vec<SignupRef>,
    cancelled: Vec<SignupRef>,
    dropped: Vec<SignupRef>,
    evictions: Vec<Eviction>,
    stats: AllocationStats,
}

impl Run {
    fn new(slot_count: usize) -> Self {
        Self {
            slots: vec![None; slot_count],
            seated: Vec::new(),
            waitlist: Vec::new(),
            cancelled: Vec::new(),
            dropped: Vec::new(),
            evictions: Vec::new(),
            stats: AllocationStats::default(),
        }
    }

    /// Place a locked signup, evicting whoever holds the slot.
    ///
    /// Two locks on one slot resolve last-write-wins.
    fn force_lock(
        &mut self,
        signups: &[Signup],
        current: SignupRef,
        slot: usize,
        policy: EvictionPolicy,
        trail: &mut AuditTrail<'_>,
    ) {
        let signup = &signups[current.index()];
        let Some(cell) = self.slots.get_mut(slot) else {
            return;
        };

        if let Some(previous) = cell.replace(current) {
            self.seated.retain(|r| *r != previous);
            let outcome = policy.outcome();
            match outcome {
                EvictionOutcome::Requeued => self.waitlist.push(previous),
                EvictionOutcome::Dropped => self.dropped.push(previous),
            }
            self.evictions.push(Eviction {
                slot,
                evicted: previous,
                by: current,
                outcome,
            });
            let evicted_id = signups[previous.index()].id;
            warn!(slot, evicted = %evicted_id, by = %signup.id, ?outcome, "lock evicted occupant");
            trail.emit(AuditAction::Evicted, Some(evicted_id), Some(slot), None);
        }

        self.seated.push(current);
        debug!(signup = %signup.id, slot, "lock forced");
        trail.emit(AuditAction::LockForced, Some(signup.id), Some(slot), None);
    }

    /// Empty roster holding only the seated locks.
    fn lock_baseline(&self, signups: &[Signup]) -> SlotArray {
        let mut working = vec![None; self.slots.len()];
        for &seated in &self.seated {
            if let Some(cell) = signups[seated.index()]
                .lock_slot
                .and_then(|slot| working.get_mut(slot))
            {
                *cell = Some(seated);
            }
        }
        working
    }

    fn finish(mut self) -> Allocation {
        self.stats.placed = self.slots.iter().flatten().count();
        self.stats.waitlisted = self.waitlist.len();
        self.stats.cancelled = self.cancelled.len();
        self.stats.evicted = self.evictions.len();
        self.stats.dropped = self.dropped.len();
        Allocation {
            slots: self.slots,
            waitlist: self.waitlist,
            dropped: self.dropped,
            evictions: self.evictions,
            cancelled: self.cancelled,
            stats: self.stats,
        }
    }
}
