//! LED matrix model
//!
//! What the 5x5 matrix currently shows, driven by [`DisplayCommand`]s from
//! the link. The firmware renders this model onto the status panel; the
//! model itself has no hardware dependency.

use crate::config::{MATRIX_COLUMNS, MATRIX_ROWS, PIXEL_OFF};
use crate::link::ports::DisplayCommand;
use crate::protocol::dcc::CommandText;

/// Scroll step for a rendered glyph `glyph_width` columns wide
///
/// A message moves one matrix column per step, a fifth of a glyph, so a
/// wider font scrolls at the same character rate.
#[must_use]
pub const fn scroll_step(glyph_width: usize) -> usize {
    let step = glyph_width / MATRIX_COLUMNS;
    if step == 0 {
        1
    } else {
        step
    }
}

/// Cell intensities, indexed `[y][x]`
pub type Cells = [[u8; MATRIX_COLUMNS]; MATRIX_ROWS];

/// Content currently on the matrix
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Scene {
    /// Individual cells
    Cells,
    /// A single character
    Glyph(char),
    /// Scrolling message
    Scroll {
        /// Message text
        text: CommandText,
        /// Columns scrolled so far
        offset: usize,
        /// Delay between steps
        delay_ms: u32,
    },
}

/// Matrix contents
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatrixState {
    cells: Cells,
    scene: Scene,
}

impl MatrixState {
    /// Blank matrix
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cells: [[PIXEL_OFF; MATRIX_COLUMNS]; MATRIX_ROWS],
            scene: Scene::Cells,
        }
    }

    /// Apply a display request
    pub fn apply(&mut self, command: DisplayCommand) {
        match command {
            DisplayCommand::Print(c) => self.scene = Scene::Glyph(c),
            DisplayCommand::Scroll { text, delay_ms } => {
                self.scene = Scene::Scroll {
                    text,
                    offset: 0,
                    delay_ms,
                };
            }
            DisplayCommand::StopAnimation => {
                if self.is_animating() {
                    self.scene = Scene::Cells;
                }
            }
            DisplayCommand::SetPixel { x, y, intensity } => {
                let (x, y) = (usize::from(x), usize::from(y));
                if x < MATRIX_COLUMNS && y < MATRIX_ROWS {
                    self.cells[y][x] = intensity;
                    self.scene = Scene::Cells;
                }
            }
        }
    }

    /// Advance a running scroll by `step` columns
    ///
    /// `span` is the number of columns the whole message takes to pass.
    /// When the scroll completes the matrix falls back to its cells.
    /// Returns true while the scroll is still running.
    pub fn advance(&mut self, step: usize, span: usize) -> bool {
        let Scene::Scroll { offset, .. } = &mut self.scene else {
            return false;
        };
        *offset += step.max(1);
        if *offset >= span {
            self.scene = Scene::Cells;
            return false;
        }
        true
    }

    /// Check if a scroll is running
    #[must_use]
    pub fn is_animating(&self) -> bool {
        matches!(self.scene, Scene::Scroll { .. })
    }

    /// Delay until the next scroll step, None when idle
    #[must_use]
    pub fn step_delay_ms(&self) -> Option<u32> {
        match self.scene {
            Scene::Scroll { delay_ms, .. } => Some(delay_ms),
            _ => None,
        }
    }

    /// Cell intensities
    #[must_use]
    pub const fn cells(&self) -> &Cells {
        &self.cells
    }

    /// Intensity of one cell, None when out of range
    #[must_use]
    pub fn cell(&self, x: usize, y: usize) -> Option<u8> {
        self.cells.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Current scene
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }
}

impl Default for MatrixState {
    fn default() -> Self {
        Self::new()
    }
}
