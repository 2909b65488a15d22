//! Types Module Tests
//!
//! Tests for domain types (Selector, SpeedStep, SensorIndex, etc.)
//! Run with: cargo test --no-default-features --features std --test types_tests

use scratch_dcc_bridge::types::{
    Address, Button, Direction, FeatureGroup, Motion, SensorIndex, Selector, SpeedStep,
};

// =============================================================================
// Selector Tests
// =============================================================================

#[test]
fn test_selector_range() {
    assert!(Selector::new(0).is_some());
    assert!(Selector::new(31).is_some());
    assert!(Selector::new(32).is_none());
    assert!(Selector::new(0xFF).is_none());
}

#[test]
fn test_selector_value_roundtrip() {
    for raw in 0..=31 {
        assert_eq!(Selector::new(raw).unwrap().value(), raw);
    }
}

#[test]
fn test_selector_motion_split() {
    for raw in 0..5 {
        assert!(Selector::new(raw).unwrap().is_motion());
    }
    for raw in 5..=31 {
        assert!(!Selector::new(raw).unwrap().is_motion());
        assert!(Selector::new(raw).unwrap().motion().is_none());
    }
}

#[test]
fn test_selector_motion_mapping() {
    let motion = |raw| Selector::new(raw).unwrap().motion();
    assert_eq!(motion(0), Some(Motion::Stop));
    assert_eq!(motion(1), Some(Motion::Run(Direction::Forward)));
    assert_eq!(motion(2), Some(Motion::Run(Direction::Reverse)));
    assert_eq!(motion(3), Some(Motion::Accessory(false)));
    assert_eq!(motion(4), Some(Motion::Accessory(true)));
}

#[test]
fn test_selector_debug() {
    let s = format!("{:?}", Selector::new(7).unwrap());
    assert_eq!(s, "Selector(7)");
}

// =============================================================================
// Direction / Address Tests
// =============================================================================

#[test]
fn test_direction_digits() {
    assert_eq!(Direction::Forward.as_digit(), 1);
    assert_eq!(Direction::Reverse.as_digit(), 0);
}

#[test]
fn test_address_value() {
    assert_eq!(Address(0).value(), 0);
    assert_eq!(Address(255).value(), 255);
}

// =============================================================================
// SpeedStep Tests
// =============================================================================

#[test]
fn test_speed_scaling() {
    assert_eq!(SpeedStep::from_raw(10).scaled(4), 40);
    assert_eq!(SpeedStep::from_raw(0).scaled(4), 0);
    assert_eq!(SpeedStep::from_raw(63).scaled(4), 252);
}

#[test]
fn test_speed_clamped() {
    assert_eq!(SpeedStep::from_raw(64).raw(), 63);
    assert_eq!(SpeedStep::from_raw(200).scaled(4), 252);
}

#[test]
fn test_speed_default_zero() {
    assert_eq!(SpeedStep::default().raw(), 0);
}

// =============================================================================
// SensorIndex Tests
// =============================================================================

#[test]
fn test_sensor_index_order() {
    for (i, sensor) in SensorIndex::ALL.iter().enumerate() {
        assert_eq!(sensor.index(), i);
        assert_eq!(SensorIndex::from_index(i), Some(*sensor));
    }
    assert!(SensorIndex::from_index(5).is_none());
}

#[test]
fn test_sensor_index_from_digit() {
    assert_eq!(SensorIndex::from_digit(b'1'), Some(SensorIndex::Pin0));
    assert_eq!(SensorIndex::from_digit(b'3'), Some(SensorIndex::Pin2));
    assert_eq!(SensorIndex::from_digit(b'5'), Some(SensorIndex::ButtonB));
    assert!(SensorIndex::from_digit(b'0').is_none());
    assert!(SensorIndex::from_digit(b'6').is_none());
    assert!(SensorIndex::from_digit(b'9').is_none());
    assert!(SensorIndex::from_digit(b'A').is_none());
}

#[test]
fn test_button_sensor() {
    assert_eq!(Button::A.sensor(), SensorIndex::ButtonA);
    assert_eq!(Button::B.sensor(), SensorIndex::ButtonB);
}

// =============================================================================
// FeatureGroup Tests
// =============================================================================

#[test]
fn test_feature_group_bases() {
    assert_eq!(FeatureGroup::F0ToF4.base(), 128);
    assert_eq!(FeatureGroup::F5ToF8.base(), 176);
    assert_eq!(FeatureGroup::F9ToF12.base(), 160);
}

#[test]
fn test_feature_group_indices() {
    for (i, group) in FeatureGroup::ALL.iter().enumerate() {
        assert_eq!(group.index(), i);
    }
}
