//! Command Translator Tests
//!
//! Tests for RX write to DCC++ command translation.
//! Run with: cargo test --no-default-features --features std --test translator_tests

use scratch_dcc_bridge::protocol::dcc::DccCommand;
use scratch_dcc_bridge::protocol::frame::FrameError;
use scratch_dcc_bridge::protocol::sensors::{OutboundFrame, SensorLatch};
use scratch_dcc_bridge::translator::{CommandTranslator, Translation};
use scratch_dcc_bridge::types::{Address, Direction, FeatureGroup, SensorIndex};

fn pending(translator: &mut CommandTranslator, bytes: &[u8]) -> Option<String> {
    translator
        .decode(bytes)
        .unwrap()
        .pending()
        .map(|text| text.as_str().to_owned())
}

// =============================================================================
// Motion Tests
// =============================================================================

#[test]
fn test_forward_scenario() {
    let mut translator = CommandTranslator::default();
    assert_eq!(
        pending(&mut translator, &[0x82, 1, 7, 10]).as_deref(),
        Some("<t 1 7 40 1>")
    );
}

#[test]
fn test_motion_and_accessory_every_field() {
    let mut translator = CommandTranslator::default();
    let untouched = translator.groups().clone();
    for selector in 0..5u8 {
        for address in 0..=255u8 {
            for speed in 0..64u8 {
                let expected = match selector {
                    0 => format!("<t 1 {address} 0 0>"),
                    1 => format!("<t 1 {address} {} 1>", u16::from(speed) * 4),
                    2 => format!("<t 1 {address} {} 0>", u16::from(speed) * 4),
                    3 => format!("<a {address} 0 0>"),
                    _ => format!("<a {address} 0 1>"),
                };
                assert_eq!(
                    pending(&mut translator, &[0x82, selector, address, speed]),
                    Some(expected)
                );
            }
        }
    }
    assert_eq!(translator.groups(), &untouched);
}

#[test]
fn test_reverse() {
    let mut translator = CommandTranslator::default();
    assert_eq!(
        pending(&mut translator, &[0x82, 2, 7, 10]).as_deref(),
        Some("<t 1 7 40 0>")
    );
}

#[test]
fn test_stop_ignores_speed() {
    let mut translator = CommandTranslator::default();
    assert_eq!(
        pending(&mut translator, &[0x82, 0, 9, 50]).as_deref(),
        Some("<t 1 9 0 0>")
    );
}

#[test]
fn test_accessory() {
    let mut translator = CommandTranslator::default();
    assert_eq!(
        pending(&mut translator, &[0x82, 4, 21]).as_deref(),
        Some("<a 21 0 1>")
    );
    assert_eq!(
        pending(&mut translator, &[0x82, 3, 21]).as_deref(),
        Some("<a 21 0 0>")
    );
}

#[test]
fn test_custom_speed_scale() {
    let mut translator = CommandTranslator::new(2);
    assert_eq!(
        pending(&mut translator, &[0x82, 1, 7, 10]).as_deref(),
        Some("<t 1 7 20 1>")
    );
}

#[test]
fn test_action_command_typed() {
    let mut translator = CommandTranslator::default();
    let Ok(Translation::Action { command, .. }) = translator.decode(&[0x82, 1, 5, 63]) else {
        panic!("Expected Action");
    };
    assert_eq!(
        command,
        Some(DccCommand::Throttle {
            address: Address(5),
            speed: 252,
            direction: Direction::Forward,
        })
    );
}

// =============================================================================
// Function Tests
// =============================================================================

#[test]
fn test_f0_then_f1_scenario() {
    let mut translator = CommandTranslator::default();
    assert_eq!(
        pending(&mut translator, &[0x82, 5, 3]).as_deref(),
        Some("<f 3 144>")
    );
    assert_eq!(
        pending(&mut translator, &[0x82, 7, 3]).as_deref(),
        Some("<f 3 145>")
    );
}

#[test]
fn test_function_state_survives_motion() {
    let mut translator = CommandTranslator::default();
    pending(&mut translator, &[0x82, 7, 3]);
    pending(&mut translator, &[0x82, 1, 3, 10]);
    assert_eq!(
        pending(&mut translator, &[0x82, 11, 3]).as_deref(),
        Some("<f 3 133>")
    );
}

#[test]
fn test_upper_groups() {
    let mut translator = CommandTranslator::default();
    assert_eq!(
        pending(&mut translator, &[0x82, 21, 4]).as_deref(),
        Some("<f 4 184>")
    );
    assert_eq!(
        pending(&mut translator, &[0x82, 25, 4]).as_deref(),
        Some("<f 4 162>")
    );
    assert_eq!(translator.groups().code(FeatureGroup::F5ToF8), 184);
}

#[test]
fn test_reserved_selector_is_ignored() {
    let mut translator = CommandTranslator::default();
    pending(&mut translator, &[0x82, 7, 3]);
    let before = translator.groups().clone();

    let translation = translator.decode(&[0x82, 31, 3, 0, 0x1F]).unwrap();
    assert_eq!(translation.pending(), None);
    let Translation::Action { command, rows } = translation else {
        panic!("Expected Action");
    };
    assert!(command.is_none());
    assert_eq!(rows.len(), 1);
    assert_eq!(translator.groups(), &before);
}

// =============================================================================
// Text Tests
// =============================================================================

#[test]
fn test_text_passthrough() {
    let mut translator = CommandTranslator::default();
    assert_eq!(pending(&mut translator, &[0x81, b'H', b'i']).as_deref(), Some("Hi"));
}

#[test]
fn test_text_dcc_command_passthrough() {
    let mut translator = CommandTranslator::default();
    let mut frame = vec![0x81];
    frame.extend_from_slice(b"<1>");
    assert_eq!(pending(&mut translator, &frame).as_deref(), Some("<1>"));
}

#[test]
fn test_text_stops_at_nul() {
    let mut translator = CommandTranslator::default();
    assert_eq!(
        pending(&mut translator, &[0x81, b'O', b'K', 0, b'x']).as_deref(),
        Some("OK")
    );
}

#[test]
fn test_text_drops_non_ascii() {
    let mut translator = CommandTranslator::default();
    assert_eq!(
        pending(&mut translator, &[0x81, b'A', 0xC3, 0xA9, b'B']).as_deref(),
        Some("AB")
    );
}

#[test]
fn test_text_does_not_touch_functions() {
    let mut translator = CommandTranslator::default();
    pending(&mut translator, &[0x81, b'x']);
    assert_eq!(translator.groups().code(FeatureGroup::F0ToF4), 128);
}

// =============================================================================
// Error Tests
// =============================================================================

#[test]
fn test_decode_errors() {
    let mut translator = CommandTranslator::default();
    assert_eq!(translator.decode(&[]), Err(FrameError::Empty));
    assert_eq!(translator.decode(&[0x00]), Err(FrameError::UnknownOpcode(0)));
    assert_eq!(translator.decode(&[0x82, 1]), Err(FrameError::Truncated));
    assert_eq!(translator.decode(&[0x82, 40, 1]), Err(FrameError::InvalidSelector(40)));
}

// =============================================================================
// Encode Tests
// =============================================================================

#[test]
fn test_encode_sensors() {
    let translator = CommandTranslator::default();
    let mut latch = SensorLatch::new();
    latch.set(SensorIndex::Pin2);

    let mut frame = OutboundFrame::new();
    translator.encode(&latch, &mut frame);
    assert_eq!(frame.as_bytes()[6], 1);
    assert_eq!(frame, latch.frame());
}
