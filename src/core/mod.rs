//! Core allocation abstractions: rules, signups, scanner, resolver, orchestrator.

pub mod error;
pub mod model;
pub mod rules;
pub mod scanner;
pub mod resolver;
pub mod eviction;
pub mod allocation;
pub mod allocator;
pub mod audit;
pub mod validate;
pub mod view;

pub use error::{AllocationError, AppResult};
pub use model::{signups_from_json_str, CategoryTag, Signup, SignupId, SignupRecord, SignupRef, SlotArray};
pub use rules::{RuleSet, RuleSummary, SlotRule, DEFAULT_SLOT_COUNT};
pub use scanner::{candidates, scan};
pub use resolver::{Resolution, Resolver};
pub use eviction::{Eviction, EvictionOutcome, EvictionPolicy};
pub use allocation::{Allocation, AllocationStats, ResolvedAllocation};
pub use allocator::{allocate, Allocator};
pub use audit::{AllocationEvent, AuditAction, AuditSink, InMemoryAuditSink, NullAuditSink};
pub use validate::validate_queue;
pub use view::{apply_view, SlotView};
