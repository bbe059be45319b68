//! Audit sink implementations.
//!
//! Every placement decision and every branch the resolver explores can be
//! recorded, so a surprising roster can be explained after the fact.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::model::SignupId;

/// What happened at one step of an allocation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// Cancelled signup ignored.
    SkipCancelled,
    /// First-fit placement committed.
    Placed,
    /// Lock forced onto its slot.
    LockForced,
    /// A lock displaced the previous occupant.
    Evicted,
    /// Resolver invoked for a prefix of the queue.
    ResolveStarted,
    /// Resolver tried a candidate slot.
    Branch,
    /// Resolver ran out of candidates at a depth.
    Backtrack,
    /// Resolver found a full arrangement.
    Resolved,
    /// Resolver hit the configured step ceiling.
    StepLimit,
    /// Signup moved to the waitlist.
    Waitlisted,
}

/// Audit event structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationEvent {
    /// Run the event belongs to.
    pub run_id: Uuid,
    /// Monotonic sequence number within the run.
    pub seq: u64,
    /// Action taken.
    pub action: AuditAction,
    /// Signup concerned, if any.
    pub signup: Option<SignupId>,
    /// Slot concerned, if any.
    pub slot: Option<usize>,
    /// Resolver search depth, if any.
    pub depth: Option<usize>,
}

/// Audit sink abstraction.
pub trait AuditSink: Send {
    /// Record an audit event.
    fn record(&mut self, event: AllocationEvent);
}

/// Sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAuditSink;

impl AuditSink for NullAuditSink {
    fn record(&mut self, _event: AllocationEvent) {}
}

/// In-memory audit sink for testing and dev.
pub struct InMemoryAuditSink {
    events: VecDeque<AllocationEvent>,
    max_events: usize,
}

impl InMemoryAuditSink {
    /// Create a new in-memory sink with a bounded buffer.
    pub fn new(max_events: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(max_events.min(4096)),
            max_events,
        }
    }

    /// Retrieve a snapshot of stored events.
    pub fn events(&self) -> Vec<AllocationEvent> {
        self.events.iter().cloned().collect()
    }

    /// Events with the given action, in order.
    pub fn with_action(&self, action: AuditAction) -> Vec<AllocationEvent> {
        self.events
            .iter()
            .filter(|e| e.action == action)
            .cloned()
            .collect()
    }
}

impl AuditSink for InMemoryAuditSink {
    fn record(&mut self, event: AllocationEvent) {
        if self.max_events == 0 {
            return;
        }
        if self.events.len() >= self.max_events {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }
}

/// Stamps events with a run id and sequence before handing them to a sink.
pub(crate) struct AuditTrail<'a> {
    run_id: Uuid,
    seq: u64,
    sink: &'a mut dyn AuditSink,
}

impl<'a> AuditTrail<'a> {
    pub(crate) fn new(run_id: Uuid, sink: &'a mut dyn AuditSink) -> Self {
        Self { run_id, seq: 0, sink }
    }

    pub(crate) fn emit(
        &mut self,
        action: AuditAction,
        signup: Option<SignupId>,
        slot: Option<usize>,
        depth: Option<usize>,
    ) {
        let event = AllocationEvent {
            run_id: self.run_id,
            seq: self.seq,
            action,
            signup,
            slot,
            depth,
        };
        self.seq += 1;
        self.sink.record(event);
    }
}
