//! CAB Function Tests
//!
//! Tests for the selector to function table and the per-group accumulator.
//! Run with: cargo test --no-default-features --features std --test function_tests

use scratch_dcc_bridge::protocol::accumulator::FunctionGroups;
use scratch_dcc_bridge::protocol::functions::{
    feature_for, function_number, lookup, FunctionTableEntry, FUNCTION_TABLE,
};
use scratch_dcc_bridge::types::{FeatureGroup, Selector};

fn sel(raw: u8) -> Selector {
    Selector::new(raw).unwrap()
}

// =============================================================================
// Table Tests
// =============================================================================

#[test]
fn test_table_covers_every_selector() {
    assert_eq!(FUNCTION_TABLE.len(), 32);
}

#[test]
fn test_motion_and_reserved_rows() {
    for raw in [0, 1, 2, 3, 4, 31] {
        assert_eq!(lookup(sel(raw)), FunctionTableEntry::RESERVED);
        assert!(lookup(sel(raw)).is_reserved());
        assert!(feature_for(sel(raw)).is_none());
    }
}

#[test]
fn test_feature_rows_are_valid() {
    for raw in 5..=30 {
        let entry = lookup(sel(raw));
        assert!(!entry.is_reserved(), "selector {raw}");
        assert!(entry.group_index < 3);
        assert!(entry.slot_index < 5);
        assert!(matches!(entry.group_base, 128 | 176 | 160));
    }
}

#[test]
fn test_on_off_pairs_share_slot() {
    for on in (5..=29).step_by(2) {
        let on_entry = lookup(sel(on));
        let off_entry = lookup(sel(on + 1));
        assert_eq!(on_entry.group_index, off_entry.group_index);
        assert_eq!(on_entry.slot_index, off_entry.slot_index);
        assert_ne!(on_entry.bit_value, 0);
        assert_eq!(off_entry.bit_value, 0);
    }
}

#[test]
fn test_f0_entry() {
    let toggle = feature_for(sel(5)).unwrap();
    assert_eq!(toggle.group, FeatureGroup::F0ToF4);
    assert_eq!(toggle.bit_value, 16);
    assert!(toggle.is_on());
}

#[test]
fn test_group_assignment() {
    assert_eq!(feature_for(sel(13)).unwrap().group, FeatureGroup::F0ToF4);
    assert_eq!(feature_for(sel(15)).unwrap().group, FeatureGroup::F5ToF8);
    assert_eq!(feature_for(sel(22)).unwrap().group, FeatureGroup::F5ToF8);
    assert_eq!(feature_for(sel(23)).unwrap().group, FeatureGroup::F9ToF12);
    assert_eq!(feature_for(sel(30)).unwrap().group, FeatureGroup::F9ToF12);
}

#[test]
fn test_function_numbers() {
    assert_eq!(function_number(sel(5)), Some((0, true)));
    assert_eq!(function_number(sel(6)), Some((0, false)));
    assert_eq!(function_number(sel(7)), Some((1, true)));
    assert_eq!(function_number(sel(29)), Some((12, true)));
    assert_eq!(function_number(sel(30)), Some((12, false)));
    assert_eq!(function_number(sel(1)), None);
    assert_eq!(function_number(sel(31)), None);
}

// =============================================================================
// Accumulator Tests
// =============================================================================

#[test]
fn test_initial_codes_are_bases() {
    let groups = FunctionGroups::new();
    for group in FeatureGroup::ALL {
        assert_eq!(groups.code(group), group.base());
    }
}

#[test]
fn test_f0_then_f1() {
    let mut groups = FunctionGroups::new();
    assert_eq!(groups.apply(feature_for(sel(5)).unwrap()).code, 144);
    assert_eq!(groups.apply(feature_for(sel(7)).unwrap()).code, 145);
}

#[test]
fn test_f1_on_f3_on_f1_off() {
    let mut groups = FunctionGroups::new();
    groups.apply(feature_for(sel(7)).unwrap());
    groups.apply(feature_for(sel(11)).unwrap());
    let result = groups.apply(feature_for(sel(8)).unwrap());
    assert_eq!(result.group, FeatureGroup::F0ToF4);
    assert_eq!(result.code, 132);
}

#[test]
fn test_repeated_on_does_not_accumulate() {
    let mut groups = FunctionGroups::new();
    groups.apply(feature_for(sel(9)).unwrap());
    let result = groups.apply(feature_for(sel(9)).unwrap());
    assert_eq!(result.code, 130);
}

#[test]
fn test_groups_are_independent() {
    let mut groups = FunctionGroups::new();
    groups.apply(feature_for(sel(7)).unwrap());
    let result = groups.apply(feature_for(sel(15)).unwrap());
    assert_eq!(result.group, FeatureGroup::F5ToF8);
    assert_eq!(result.code, 177);
    assert_eq!(groups.code(FeatureGroup::F0ToF4), 129);
    assert_eq!(groups.code(FeatureGroup::F9ToF12), 160);
}

#[test]
fn test_all_on_codes() {
    let mut groups = FunctionGroups::new();
    for on in (5..=29).step_by(2) {
        groups.apply(feature_for(sel(on)).unwrap());
    }
    assert_eq!(groups.code(FeatureGroup::F0ToF4), 128 + 31);
    assert_eq!(groups.code(FeatureGroup::F5ToF8), 176 + 15);
    assert_eq!(groups.code(FeatureGroup::F9ToF12), 160 + 15);
}

#[test]
fn test_slots_and_reset() {
    let mut groups = FunctionGroups::default();
    groups.apply(feature_for(sel(5)).unwrap());
    assert_eq!(groups.slots(FeatureGroup::F0ToF4), &[0, 0, 0, 0, 16]);
    groups.reset();
    assert_eq!(groups, FunctionGroups::new());
}
