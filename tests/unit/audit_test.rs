//! Tests for audit sinks

use raid_roster::core::{
    AllocationEvent, Allocator, AuditAction, AuditSink, InMemoryAuditSink, RuleSet, Signup,
    SignupId, SlotRule,
};
use uuid::Uuid;

fn event(seq: u64, action: AuditAction) -> AllocationEvent {
    AllocationEvent {
        run_id: Uuid::nil(),
        seq,
        action,
        signup: Some(SignupId(seq)),
        slot: None,
        depth: None,
    }
}

#[test]
fn test_in_memory_audit_sink() {
    let mut sink = InMemoryAuditSink::new(10);

    sink.record(event(1, AuditAction::Placed));
    assert_eq!(sink.events().len(), 1);

    let events = sink.events();
    assert_eq!(events[0].seq, 1);
    assert_eq!(events[0].action, AuditAction::Placed);
}

#[test]
fn test_audit_sink_overflow() {
    let mut sink = InMemoryAuditSink::new(2);

    sink.record(event(1, AuditAction::Placed));
    sink.record(event(2, AuditAction::Placed));
    sink.record(event(3, AuditAction::Waitlisted));

    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].seq, 2); // First one popped
    assert_eq!(events[1].seq, 3);
}

#[test]
fn test_run_events_share_run_id() {
    let rules: RuleSet = vec![SlotRule::categories(["tank"])].into_iter().collect();
    let signups = vec![
        Signup::new(1, "tank"),
        Signup::new(2, "tank"),
        Signup::new(3, "dps").cancel_at(10),
    ];
    let mut sink = InMemoryAuditSink::new(64);

    Allocator::default()
        .allocate_audited(&rules, &signups, &mut sink)
        .unwrap();

    let events = sink.events();
    assert!(!events.is_empty());
    assert!(events.iter().all(|e| e.run_id == events[0].run_id));
    assert_eq!(sink.with_action(AuditAction::Placed).len(), 1);
    assert_eq!(sink.with_action(AuditAction::Waitlisted).len(), 1);
    assert_eq!(sink.with_action(AuditAction::SkipCancelled).len(), 1);
}

#[test]
fn test_events_serialize() {
    let json = serde_json::to_string(&event(7, AuditAction::StepLimit)).unwrap();
    assert!(json.contains("\"action\":\"step_limit\""));
}
