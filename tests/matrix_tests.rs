//! LED Matrix Model Tests
//!
//! Tests for applying display requests and stepping scrolls.
//! Run with: cargo test --no-default-features --features std --test matrix_tests

use scratch_dcc_bridge::link::DisplayCommand;
use scratch_dcc_bridge::matrix::{scroll_step, MatrixState, Scene};

fn scroll(text: &str, delay_ms: u32) -> DisplayCommand {
    DisplayCommand::Scroll {
        text: text.try_into().unwrap(),
        delay_ms,
    }
}

// =============================================================================
// Cell Tests
// =============================================================================

#[test]
fn test_starts_blank() {
    let matrix = MatrixState::new();
    assert_eq!(matrix.scene(), &Scene::Cells);
    assert!(matrix.cells().iter().flatten().all(|&v| v == 0));
    assert_eq!(matrix.step_delay_ms(), None);
}

#[test]
fn test_set_pixel() {
    let mut matrix = MatrixState::default();
    matrix.apply(DisplayCommand::SetPixel {
        x: 4,
        y: 2,
        intensity: 255,
    });
    assert_eq!(matrix.cell(4, 2), Some(255));
    assert_eq!(matrix.cell(2, 4), Some(0));
}

#[test]
fn test_set_pixel_out_of_range_ignored() {
    let mut matrix = MatrixState::new();
    matrix.apply(DisplayCommand::Print('C'));
    matrix.apply(DisplayCommand::SetPixel {
        x: 5,
        y: 0,
        intensity: 255,
    });
    assert_eq!(matrix.scene(), &Scene::Glyph('C'));
    assert_eq!(matrix.cell(5, 0), None);
}

#[test]
fn test_pixel_replaces_glyph() {
    let mut matrix = MatrixState::new();
    matrix.apply(DisplayCommand::Print('S'));
    matrix.apply(DisplayCommand::SetPixel {
        x: 0,
        y: 0,
        intensity: 0,
    });
    assert_eq!(matrix.scene(), &Scene::Cells);
}

// =============================================================================
// Scroll Tests
// =============================================================================

#[test]
fn test_scroll_runs_until_span() {
    let mut matrix = MatrixState::new();
    matrix.apply(scroll("Hi", 120));
    assert!(matrix.is_animating());
    assert_eq!(matrix.step_delay_ms(), Some(120));

    assert!(matrix.advance(1, 3));
    assert!(matrix.advance(1, 3));
    assert!(!matrix.advance(1, 3));
    assert!(!matrix.is_animating());
    assert_eq!(matrix.scene(), &Scene::Cells);
}

#[test]
fn test_scroll_offset_advances() {
    let mut matrix = MatrixState::new();
    matrix.apply(scroll("Go", 50));
    matrix.advance(2, 100);
    let Scene::Scroll { text, offset, .. } = matrix.scene() else {
        panic!("Expected Scroll");
    };
    assert_eq!(text.as_str(), "Go");
    assert_eq!(*offset, 2);
}

#[test]
fn test_stop_animation() {
    let mut matrix = MatrixState::new();
    matrix.apply(scroll("Hello", 120));
    matrix.apply(DisplayCommand::StopAnimation);
    assert!(!matrix.is_animating());
    assert!(!matrix.advance(1, 10));
}

#[test]
fn test_stop_keeps_glyph() {
    let mut matrix = MatrixState::new();
    matrix.apply(DisplayCommand::Print('D'));
    matrix.apply(DisplayCommand::StopAnimation);
    assert_eq!(matrix.scene(), &Scene::Glyph('D'));
}

#[test]
fn test_new_scroll_restarts() {
    let mut matrix = MatrixState::new();
    matrix.apply(scroll("A", 120));
    matrix.advance(2, 100);
    matrix.apply(scroll("B", 120));
    assert!(matches!(matrix.scene(), Scene::Scroll { offset: 0, .. }));
}

#[test]
fn test_scroll_step_is_one_column() {
    assert_eq!(scroll_step(10), 2);
    assert_eq!(scroll_step(5), 1);
    assert_eq!(scroll_step(3), 1);
}

#[test]
fn test_scroll_moves_one_column_per_step() {
    // 128 px panel plus two 10 px glyphs, two pixels per step
    let span = 128 + 2 * 10;
    let mut matrix = MatrixState::new();
    matrix.apply(scroll("Hi", 120));

    let mut steps = 1;
    while matrix.advance(scroll_step(10), span) {
        steps += 1;
    }
    assert_eq!(steps, 74);
    assert_eq!(matrix.scene(), &Scene::Cells);
}

#[test]
fn test_zero_step_still_advances() {
    let mut matrix = MatrixState::new();
    matrix.apply(scroll("A", 120));
    matrix.advance(0, 100);
    assert!(matches!(matrix.scene(), Scene::Scroll { offset: 1, .. }));
}
