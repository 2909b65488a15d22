//! OLED Status Panel
//!
//! The board has no LED matrix, so the 5x5 matrix is emulated on an SSD1306
//! 128x64 panel over I2C. [`run_display`] owns the panel, applies queued
//! [`DisplayCommand`]s to a [`MatrixState`] and steps running scrolls.

use embassy_futures::select::{select, Either};
use embassy_stm32::i2c::I2c;
use embassy_stm32::mode::Async;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Receiver;
use embassy_time::{Duration, Timer};
use embedded_graphics::mono_font::ascii::FONT_10X20;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};

use crate::config::{MATRIX_COLUMNS, MATRIX_ROWS};
use crate::hal::i2c::{I2cAddress, I2cBus, I2cResult};
use crate::link::ports::DisplayCommand;
use crate::matrix::{scroll_step, MatrixState, Scene};

/// Display width in pixels
pub const DISPLAY_WIDTH: u32 = 128;

/// Display height in pixels
pub const DISPLAY_HEIGHT: u32 = 64;

/// Edge of one matrix cell in pixels
const CELL_SIZE: u32 = 11;

/// Gap between cells
const CELL_GAP: u32 = 1;

/// Pixel width of one scroll glyph
const SCROLL_GLYPH_WIDTH: u32 = 10;

/// SSD1306 commands
mod cmd {
    pub const SET_CONTRAST: u8 = 0x81;
    pub const DISPLAY_ALL_ON_RESUME: u8 = 0xA4;
    pub const NORMAL_DISPLAY: u8 = 0xA6;
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const SET_DISPLAY_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_MULTIPLEX: u8 = 0xA8;
    pub const SET_START_LINE: u8 = 0x40;
    pub const MEMORY_MODE: u8 = 0x20;
    pub const COLUMN_ADDR: u8 = 0x21;
    pub const PAGE_ADDR: u8 = 0x22;
    pub const COM_SCAN_DEC: u8 = 0xC8;
    pub const SEG_REMAP: u8 = 0xA0;
    pub const CHARGE_PUMP: u8 = 0x8D;
}

/// Control byte for command writes
const CONTROL_COMMAND: u8 = 0x00;

/// Control byte for data writes
const CONTROL_DATA: u8 = 0x40;

/// Frame buffer (1 bit per pixel)
pub struct DisplayBuffer {
    /// Pixel data (128x64 / 8 = 1024 bytes)
    buffer: [u8; 1024],
}

impl DisplayBuffer {
    /// Create an empty buffer
    #[must_use]
    pub const fn new() -> Self {
        Self { buffer: [0; 1024] }
    }

    /// Clear the buffer
    pub fn clear(&mut self) {
        self.buffer.fill(0);
    }

    /// Set a pixel
    pub fn set_pixel(&mut self, x: u32, y: u32, on: bool) {
        if x >= DISPLAY_WIDTH || y >= DISPLAY_HEIGHT {
            return;
        }

        let byte_idx = (y / 8 * DISPLAY_WIDTH + x) as usize;
        let bit = 1 << (y % 8);

        if on {
            self.buffer[byte_idx] |= bit;
        } else {
            self.buffer[byte_idx] &= !bit;
        }
    }

    /// Raw page-ordered bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }
}

impl Default for DisplayBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawTarget for DisplayBuffer {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if let (Ok(x), Ok(y)) = (u32::try_from(coord.x), u32::try_from(coord.y)) {
                self.set_pixel(x, y, color.is_on());
            }
        }
        Ok(())
    }
}

impl OriginDimensions for DisplayBuffer {
    fn size(&self) -> Size {
        Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT)
    }
}

/// SSD1306 panel
pub struct Panel<'d> {
    bus: I2cBus<'d>,
    buffer: DisplayBuffer,
}

impl<'d> Panel<'d> {
    /// Create a panel driver
    #[must_use]
    pub fn new(i2c: I2c<'d, Async>) -> Self {
        Self {
            bus: I2cBus::new(i2c),
            buffer: DisplayBuffer::new(),
        }
    }

    /// Run the SSD1306 128x64 init sequence and blank the panel
    pub async fn init(&mut self) -> I2cResult<()> {
        let init_cmds = [
            cmd::DISPLAY_OFF,
            cmd::SET_DISPLAY_CLOCK_DIV,
            0x80,
            cmd::SET_MULTIPLEX,
            0x3F,
            cmd::SET_DISPLAY_OFFSET,
            0x00,
            cmd::SET_START_LINE,
            cmd::CHARGE_PUMP,
            0x14,
            cmd::MEMORY_MODE,
            0x00, // horizontal addressing
            cmd::SEG_REMAP | 0x01,
            cmd::COM_SCAN_DEC,
            cmd::SET_COM_PINS,
            0x12,
            cmd::SET_CONTRAST,
            0xCF,
            cmd::SET_PRECHARGE,
            0xF1,
            cmd::SET_VCOM_DETECT,
            0x40,
            cmd::DISPLAY_ALL_ON_RESUME,
            cmd::NORMAL_DISPLAY,
            cmd::DISPLAY_ON,
        ];
        self.bus
            .write_prefixed(I2cAddress::SSD1306, CONTROL_COMMAND, &init_cmds)
            .await?;
        debug!("panel ready at {}", I2cAddress::SSD1306);

        self.buffer.clear();
        self.flush().await
    }

    /// Push the frame buffer to the panel
    pub async fn flush(&mut self) -> I2cResult<()> {
        let window = [cmd::COLUMN_ADDR, 0, 127, cmd::PAGE_ADDR, 0, 7];
        self.bus
            .write_prefixed(I2cAddress::SSD1306, CONTROL_COMMAND, &window)
            .await?;
        self.bus
            .write_prefixed(I2cAddress::SSD1306, CONTROL_DATA, self.buffer.as_bytes())
            .await
    }

    /// Redraw the frame buffer from the matrix model
    pub fn render(&mut self, matrix: &MatrixState) {
        self.buffer.clear();
        match matrix.scene() {
            Scene::Cells => draw_cells(&mut self.buffer, matrix),
            Scene::Glyph(c) => {
                let mut utf8 = [0u8; 4];
                let style = MonoTextStyle::new(&FONT_10X20, BinaryColor::On);
                let origin = Point::new(59, 22);
                let _ = Text::with_baseline(c.encode_utf8(&mut utf8), origin, style, Baseline::Top)
                    .draw(&mut self.buffer);
            }
            Scene::Scroll { text, offset, .. } => {
                let style = MonoTextStyle::new(&FONT_10X20, BinaryColor::On);
                let offset = i32::try_from(*offset).unwrap_or(i32::MAX);
                let origin = Point::new((DISPLAY_WIDTH as i32).saturating_sub(offset), 22);
                let _ = Text::with_baseline(text.as_str(), origin, style, Baseline::Top)
                    .draw(&mut self.buffer);
            }
        }
    }
}

fn draw_cells(buffer: &mut DisplayBuffer, matrix: &MatrixState) {
    let pitch = CELL_SIZE + CELL_GAP;
    let grid_width = pitch * MATRIX_COLUMNS as u32;
    let left = (DISPLAY_WIDTH - grid_width) / 2;
    let top = (DISPLAY_HEIGHT - pitch * MATRIX_ROWS as u32) / 2;

    for (y, row) in matrix.cells().iter().enumerate() {
        for (x, &intensity) in row.iter().enumerate() {
            let corner = Point::new(
                (left + x as u32 * pitch) as i32,
                (top + y as u32 * pitch) as i32,
            );
            let style = if intensity > 0 {
                PrimitiveStyle::with_fill(BinaryColor::On)
            } else {
                PrimitiveStyle::with_stroke(BinaryColor::On, 1)
            };
            let _ = Rectangle::new(corner, Size::new(CELL_SIZE, CELL_SIZE))
                .into_styled(style)
                .draw(buffer);
        }
    }
}

/// Columns a message needs to scroll fully past the panel
#[must_use]
pub fn scroll_span(text: &str) -> usize {
    (DISPLAY_WIDTH + SCROLL_GLYPH_WIDTH * text.chars().count() as u32) as usize
}

/// Display task body
///
/// Waits for queued requests; while a scroll runs, steps it after each
/// delay unless a new request arrives first.
pub async fn run_display<M: RawMutex, const N: usize>(
    panel: &mut Panel<'_>,
    commands: Receiver<'_, M, DisplayCommand, N>,
) -> ! {
    let mut matrix = MatrixState::new();

    loop {
        match matrix.step_delay_ms() {
            Some(delay_ms) => {
                let step = Timer::after(Duration::from_millis(u64::from(delay_ms)));
                match select(commands.receive(), step).await {
                    Either::First(command) => matrix.apply(command),
                    Either::Second(()) => {
                        let span = match matrix.scene() {
                            Scene::Scroll { text, .. } => scroll_span(text),
                            _ => 0,
                        };
                        matrix.advance(scroll_step(SCROLL_GLYPH_WIDTH as usize), span);
                    }
                }
            }
            None => matrix.apply(commands.receive().await),
        }

        panel.render(&matrix);
        if let Err(e) = panel.flush().await {
            warn!("panel flush failed: {}", defmt::Debug2Format(&e));
        }
    }
}
