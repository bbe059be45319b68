//! Tests for utility functions

use raid_roster::util::{init_tracing, DEFAULT_LOG_FILTER};

#[test]
fn test_init_tracing_is_idempotent() {
    init_tracing();
    init_tracing();
    tracing::info!("telemetry initialized");
}

#[test]
fn test_default_filter_targets_crate() {
    assert!(DEFAULT_LOG_FILTER.starts_with("raid_roster"));
}
