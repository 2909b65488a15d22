//! Inbound RX Characteristic Frames
//!
//! Byte 0 of every write is an opcode:
//!
//! ```text
//! 0x81  text...                           display text block
//! 0x82  sel addr [speed] [row3 row4]      display (bitmap) block
//! ```
//!
//! For action frames the selector picks a motion/accessory opcode (0-4) or a
//! CAB function toggle (5-30). Body byte `n` is matrix row `n`, so the bytes
//! after the speed field land on rows 3 and 4; anything further is off the
//! matrix.

use core::fmt;

use crate::config::{MATRIX_COLUMNS, MATRIX_ROWS, OPCODE_ACTION, OPCODE_DISPLAY_TEXT};
use crate::types::{Address, Selector, SpeedStep};

/// Reason an RX write was ignored
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameError {
    /// Zero-length write
    Empty,
    /// Opcode other than 0x81/0x82
    UnknownOpcode(u8),
    /// Action frame without selector and address
    Truncated,
    /// Selector byte outside the 5-bit range
    InvalidSelector(u8),
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty frame"),
            Self::UnknownOpcode(op) => write!(f, "unknown opcode 0x{op:02X}"),
            Self::Truncated => write!(f, "truncated action frame"),
            Self::InvalidSelector(sel) => write!(f, "selector {sel} out of range"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for FrameError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Empty => defmt::write!(f, "empty frame"),
            Self::UnknownOpcode(op) => defmt::write!(f, "unknown opcode 0x{:02X}", op),
            Self::Truncated => defmt::write!(f, "truncated action frame"),
            Self::InvalidSelector(sel) => defmt::write!(f, "selector {} out of range", sel),
        }
    }
}

/// A decoded RX write
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InboundFrame<'a> {
    /// Text after the 0x81 opcode
    DisplayText(&'a [u8]),
    /// Action frame after the 0x82 opcode
    Action(ActionFrame<'a>),
}

impl<'a> InboundFrame<'a> {
    /// Parse raw characteristic bytes
    pub fn parse(bytes: &'a [u8]) -> Result<Self, FrameError> {
        let (&opcode, body) = bytes.split_first().ok_or(FrameError::Empty)?;
        match opcode {
            OPCODE_DISPLAY_TEXT => Ok(Self::DisplayText(body)),
            OPCODE_ACTION => ActionFrame::parse(body).map(Self::Action),
            other => Err(FrameError::UnknownOpcode(other)),
        }
    }
}

/// Action frame body (opcode stripped)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionFrame<'a> {
    selector: Selector,
    address: Address,
    body: &'a [u8],
}

impl<'a> ActionFrame<'a> {
    const SPEED_POS: usize = 2;
    const ROWS_POS: usize = 3;

    /// Parse the bytes following the opcode
    pub fn parse(body: &'a [u8]) -> Result<Self, FrameError> {
        let &[sel, addr, ..] = body else {
            return Err(FrameError::Truncated);
        };
        let selector = Selector::new(sel).ok_or(FrameError::InvalidSelector(sel))?;
        Ok(Self {
            selector,
            address: Address(addr),
            body,
        })
    }

    /// Selector field
    #[must_use]
    pub const fn selector(&self) -> Selector {
        self.selector
    }

    /// Address field
    #[must_use]
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Speed field, zero when the frame stops short of it
    #[must_use]
    pub fn speed(&self) -> SpeedStep {
        self.body
            .get(Self::SPEED_POS)
            .map_or(SpeedStep::default(), |&raw| SpeedStep::from_raw(raw))
    }

    /// Bitmap rows carried after the speed field, placed at their body position
    #[must_use]
    pub fn rows(&self) -> BitmapRows<'a> {
        BitmapRows::starting_at(
            self.body.get(Self::ROWS_POS..).unwrap_or(&[]),
            Self::ROWS_POS,
        )
    }
}

/// 5-bit-per-row bitmap, bit n of a row lights column n
///
/// Row bytes are drawn from `first_row` downwards; rows past the bottom of
/// the matrix are dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitmapRows<'a> {
    rows: &'a [u8],
    first_row: usize,
}

impl<'a> BitmapRows<'a> {
    /// Wrap raw row bytes starting at the top row
    #[must_use]
    pub const fn new(rows: &'a [u8]) -> Self {
        Self::starting_at(rows, 0)
    }

    /// Wrap raw row bytes whose first byte is matrix row `first_row`
    #[must_use]
    pub const fn starting_at(rows: &'a [u8], first_row: usize) -> Self {
        Self { rows, first_row }
    }

    /// Matrix row of the first byte
    #[must_use]
    pub const fn first_row(&self) -> usize {
        self.first_row
    }

    /// Number of rows that land on the matrix
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows
            .len()
            .min(MATRIX_ROWS.saturating_sub(self.first_row))
    }

    /// Check for a bitmap with no rows on the matrix
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check a single cell
    #[must_use]
    pub fn is_lit(&self, x: usize, y: usize) -> bool {
        x < MATRIX_COLUMNS
            && y < MATRIX_ROWS
            && y.checked_sub(self.first_row)
                .and_then(|i| self.rows.get(i))
                .is_some_and(|row| row & (1 << x) != 0)
    }

    /// Every cell of the rows present as (x, y, lit)
    pub fn cells(&self) -> impl Iterator<Item = (u8, u8, bool)> + 'a {
        let first = self.first_row;
        self.rows
            .iter()
            .take(self.len())
            .enumerate()
            .flat_map(move |(i, &row)| {
                let y = (first + i) as u8;
                (0..MATRIX_COLUMNS).map(move |x| (x as u8, y, row & (1 << x) != 0))
            })
    }
}
