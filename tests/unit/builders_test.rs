//! Tests for builder modules

use raid_roster::builders::{build_allocator, AllocatorBuilder};
use raid_roster::config::AllocatorConfig;
use raid_roster::core::{AllocationError, EvictionPolicy};

#[test]
fn test_allocator_builder_defaults() {
    let builder = AllocatorBuilder::new();
    assert_eq!(builder.config(), &AllocatorConfig::default());

    let allocator = builder.build().unwrap();
    assert_eq!(allocator.config().slot_count, 25);
}

#[test]
fn test_allocator_builder_overrides() {
    let allocator = AllocatorBuilder::new()
        .slot_count(10)
        .squad_size(2)
        .eviction(EvictionPolicy::Drop)
        .max_search_steps(500)
        .build()
        .unwrap();

    let cfg = allocator.config();
    assert_eq!(cfg.slot_count, 10);
    assert_eq!(cfg.squad_size, 2);
    assert_eq!(cfg.eviction, EvictionPolicy::Drop);
    assert_eq!(cfg.max_search_steps, Some(500));
}

#[test]
fn test_build_allocator_rejects_invalid_config() {
    let cfg = AllocatorConfig::new().with_squad_size(0);
    let err = build_allocator(&cfg).unwrap_err();
    assert!(matches!(err, AllocationError::InvalidConfig(msg) if msg.contains("squad_size")));
}
