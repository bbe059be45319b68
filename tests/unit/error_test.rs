//! Tests for error types

use raid_roster::core::{AllocationError, SignupId};

#[test]
fn test_lock_out_of_range_error() {
    let err = AllocationError::LockSlotOutOfRange {
        signup: SignupId(9),
        slot: 30,
        slot_count: 25,
    };
    assert_eq!(
        format!("{}", err),
        "signup #9 locked to slot 30, but the roster has 25 slots"
    );
}

#[test]
fn test_lock_without_slot_error() {
    let err = AllocationError::LockWithoutSlot(SignupId(3));
    assert_eq!(format!("{}", err), "signup #3 is locked without a slot index");
}

#[test]
fn test_duplicate_id_error() {
    let err = AllocationError::DuplicateSignupId(SignupId(4));
    assert_eq!(format!("{}", err), "duplicate signup id #4");
}

#[test]
fn test_invalid_config_error() {
    let err = AllocationError::InvalidConfig("slot_count must be greater than 0".to_string());
    assert_eq!(format!("{}", err), "invalid config: slot_count must be greater than 0");
}

#[test]
fn test_parse_error_from_bad_json() {
    let err = raid_roster::core::signups_from_json_str("not json").unwrap_err();
    assert!(matches!(err, AllocationError::Parse(_)));
}
