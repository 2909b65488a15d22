//! DCC++ Command Set
//!
//! Text commands sent to the base station:
//!
//! ```text
//! <t REGISTER ADDR SPEED DIR>   throttle
//! <a ADDR 0 STATE>              accessory
//! <f ADDR CODE>                 CAB function group
//! ```

use core::fmt;

use heapless::String;

use crate::config::{COMMAND_MAX_LEN, TRAIN_REGISTER};
use crate::types::{Address, Direction};

/// Bounded text of one outbound command
pub type CommandText = String<COMMAND_MAX_LEN>;

/// Typed DCC++ command
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DccCommand {
    /// Set speed and direction of the train in the throttle register
    Throttle {
        /// Decoder address
        address: Address,
        /// Scaled speed (0 stops)
        speed: u16,
        /// Travel direction
        direction: Direction,
    },
    /// Switch an accessory decoder
    Accessory {
        /// Accessory address
        address: Address,
        /// Activate (true) or deactivate
        active: bool,
    },
    /// Send the code of one CAB function group
    Function {
        /// Decoder address
        address: Address,
        /// Group base plus active function bits
        code: u8,
    },
}

impl DccCommand {
    /// Stop command (speed 0, direction 0)
    #[must_use]
    pub const fn stop(address: Address) -> Self {
        Self::Throttle {
            address,
            speed: 0,
            direction: Direction::Reverse,
        }
    }

    /// Render into a bounded string, None if it does not fit
    #[must_use]
    pub fn render(&self) -> Option<CommandText> {
        let mut text = CommandText::new();
        fmt::write(&mut text, format_args!("{self}")).ok()?;
        Some(text)
    }
}

impl fmt::Display for DccCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Throttle {
                address,
                speed,
                direction,
            } => write!(
                f,
                "<t {TRAIN_REGISTER} {} {speed} {}>",
                address.value(),
                direction.as_digit()
            ),
            Self::Accessory { address, active } => {
                write!(f, "<a {} 0 {}>", address.value(), u8::from(active))
            }
            Self::Function { address, code } => write!(f, "<f {} {code}>", address.value()),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for DccCommand {
    fn format(&self, f: defmt::Formatter) {
        match *self {
            Self::Throttle {
                address,
                speed,
                direction,
            } => defmt::write!(f, "<t {} {} {} {}>", TRAIN_REGISTER, address.value(), speed, direction.as_digit()),
            Self::Accessory { address, active } => {
                defmt::write!(f, "<a {} 0 {}>", address.value(), u8::from(active));
            }
            Self::Function { address, code } => defmt::write!(f, "<f {} {}>", address.value(), code),
        }
    }
}
