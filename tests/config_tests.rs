//! Configuration and Constants Tests
//!
//! Tests to verify configuration values are valid and consistent.
//! Run with: cargo test --no-default-features --features std --test config_tests

use scratch_dcc_bridge::config::*;

// =============================================================================
// Timing Tests
// =============================================================================

#[test]
fn notify_period() {
    assert_eq!(NOTIFY_PERIOD_MS, 200);
}

#[test]
fn scroll_delay() {
    assert_eq!(SCROLL_DELAY_MS, 120);
}

// =============================================================================
// Frame Layout Tests
// =============================================================================

#[test]
fn sensor_field_fits_tx_frame() {
    assert_eq!(TX_FRAME_LEN, 20);
    assert!(SENSOR_FIELD_OFFSET + SENSOR_COUNT <= TX_FRAME_LEN);
}

#[test]
fn opcodes_distinct() {
    assert_eq!(OPCODE_DISPLAY_TEXT, 0x81);
    assert_eq!(OPCODE_ACTION, 0x82);
}

#[test]
fn selector_ranges() {
    assert_eq!(MOTION_SELECTOR_LIMIT, 5);
    assert_eq!(MAX_SELECTOR, 31);
}

#[test]
fn speed_range_fits_command() {
    // Highest scaled speed must stay a plausible DCC++ speed step
    assert!(u16::from(MAX_SPEED_RAW) * SPEED_SCALE < 256);
}

#[test]
fn function_groups_layout() {
    assert_eq!(FUNCTION_GROUPS, 3);
    assert_eq!(SLOTS_PER_GROUP, 5);
}

#[test]
fn command_text_holds_longest_command() {
    // Longest throttle command
    assert!("<t 1 255 252 1>".len() <= COMMAND_MAX_LEN);
}

// =============================================================================
// Matrix Tests
// =============================================================================

#[test]
fn matrix_geometry() {
    assert_eq!(MATRIX_ROWS, 5);
    assert_eq!(MATRIX_COLUMNS, 5);
    assert_eq!(PIXEL_ON, 255);
    assert_eq!(PIXEL_OFF, 0);
}

#[test]
fn display_characters() {
    assert_eq!(STARTUP_CHAR, 'S');
    assert_eq!(CONNECTED_CHAR, 'C');
    assert_eq!(DISCONNECTED_CHAR, 'D');
}

// =============================================================================
// Serial Tests
// =============================================================================

#[test]
fn serial_settings() {
    assert_eq!(DCC_TERMINATOR, b'>');
    assert_eq!(DCC_BAUD, 115_200);
    assert_eq!(BLE_BAUD, 115_200);
}

#[test]
fn uart_buffers_hold_a_line() {
    assert!(buffers::DCC_RX >= TELEMETRY_LINE_MAX);
    assert!(buffers::DCC_TX >= COMMAND_MAX_LEN);
}

#[test]
fn pin_assignments() {
    assert_eq!(pins::DCC_TX, "PA9");
    assert_eq!(pins::DCC_RX, "PA10");
    assert_eq!(pins::BUTTON_A, "PC13");
}

// =============================================================================
// LinkConfig Tests
// =============================================================================

#[test]
fn link_config_default_matches_constants() {
    let config = LinkConfig::default();
    assert_eq!(config, LinkConfig::DEFAULT);
    assert_eq!(config.notify_period_ms, NOTIFY_PERIOD_MS);
    assert_eq!(config.scroll_delay_ms, SCROLL_DELAY_MS);
    assert_eq!(config.speed_scale, SPEED_SCALE);
}
