//! Tests for configuration validation

use raid_roster::config::AllocatorConfig;
use raid_roster::core::EvictionPolicy;

#[test]
fn test_default_config_is_valid() {
    let cfg = AllocatorConfig::default();
    assert!(cfg.validate().is_ok());
    assert_eq!(cfg.slot_count, 25);
    assert_eq!(cfg.squad_size, 5);
    assert_eq!(cfg.eviction, EvictionPolicy::Requeue);
    assert_eq!(cfg.max_search_steps, None);
}

#[test]
fn test_config_invalid_slot_count() {
    let invalid = AllocatorConfig::new().with_slot_count(0);
    assert!(invalid.validate().is_err());
}

#[test]
fn test_config_invalid_squad_size() {
    let invalid = AllocatorConfig::new().with_squad_size(0);
    assert!(invalid.validate().is_err());
}

#[test]
fn test_config_invalid_step_ceiling() {
    let invalid = AllocatorConfig::new().with_max_search_steps(Some(0));
    assert!(invalid.validate().is_err());
}

#[test]
fn test_config_from_json() {
    let json = r#"{
        "slot_count": 10,
        "squad_size": 5,
        "eviction": "drop",
        "max_search_steps": 100000
    }"#;

    let config = AllocatorConfig::from_json_str(json).unwrap();
    assert_eq!(config.slot_count, 10);
    assert_eq!(config.eviction, EvictionPolicy::Drop);
    assert_eq!(config.max_search_steps, Some(100_000));
}

#[test]
fn test_config_from_partial_json_uses_defaults() {
    let config = AllocatorConfig::from_json_str(r#"{"slot_count": 30}"#).unwrap();
    assert_eq!(config.slot_count, 30);
    assert_eq!(config.squad_size, 5);
}

#[test]
fn test_config_from_json_rejects_invalid() {
    assert!(AllocatorConfig::from_json_str(r#"{"squad_size": 0}"#).is_err());
    assert!(AllocatorConfig::from_json_str("{").is_err());
}
