//! I2C Bus Abstractions
//!
//! Async I2C for the status panel, using the embassy-stm32 DMA driver.

use embassy_stm32::i2c::{Error as I2cError, I2c};
use embassy_stm32::mode::Async;

/// I2C operation result
pub type I2cResult<T> = Result<T, I2cError>;

/// I2C device address wrapper
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct I2cAddress(u8);

impl I2cAddress {
    /// SSD1306 OLED panel address
    pub const SSD1306: Self = Self(0x3C);

    /// Get the 7-bit address
    #[must_use]
    pub const fn addr(self) -> u8 {
        self.0
    }
}

impl defmt::Format for I2cAddress {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "0x{:02X}", self.0);
    }
}

/// Owned I2C bus
pub struct I2cBus<'d> {
    i2c: I2c<'d, Async>,
}

impl<'d> I2cBus<'d> {
    /// Wrap an async I2C peripheral
    #[must_use]
    pub fn new(i2c: I2c<'d, Async>) -> Self {
        Self { i2c }
    }

    /// Write a control byte followed by a payload in one transaction
    pub async fn write_prefixed(
        &mut self,
        addr: I2cAddress,
        control: u8,
        payload: &[u8],
    ) -> I2cResult<()> {
        let mut buf = [0u8; 33];
        for chunk in payload.chunks(buf.len() - 1) {
            buf[0] = control;
            buf[1..=chunk.len()].copy_from_slice(chunk);
            self.i2c.write(addr.addr(), &buf[..=chunk.len()]).await?;
        }
        Ok(())
    }
}
