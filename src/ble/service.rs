//! Scratch Link GATT service
//!
//! Primary service 0xF005 with two characteristics:
//! - TX (read, notify): 20-byte sensor status frame
//! - RX (write, write without response): block commands from Scratch

use crate::config::{RX_FRAME_MAX, TX_FRAME_LEN};

/// 16-bit service UUID advertised to Scratch Link
pub const SERVICE_UUID16: u16 = 0xF005;

/// TX characteristic UUID (5261da01-fa7e-42ab-850b-7c80220097cc)
pub const TX_UUID: [u8; 16] = [
    0x52, 0x61, 0xda, 0x01, 0xfa, 0x7e, 0x42, 0xab, 0x85, 0x0b, 0x7c, 0x80, 0x22, 0x00, 0x97, 0xcc,
];

/// RX characteristic UUID (5261da02-fa7e-42ab-850b-7c80220097cc)
pub const RX_UUID: [u8; 16] = [
    0x52, 0x61, 0xda, 0x02, 0xfa, 0x7e, 0x42, 0xab, 0x85, 0x0b, 0x7c, 0x80, 0x22, 0x00, 0x97, 0xcc,
];

/// Characteristics of the service, as numbered on the co-processor link
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Characteristic {
    /// Status frame to Scratch
    Tx,
    /// Commands from Scratch
    Rx,
}

impl Characteristic {
    /// Identifier used in co-processor messages
    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            Self::Tx => 0x01,
            Self::Rx => 0x02,
        }
    }

    /// Look up by co-processor identifier
    #[must_use]
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            0x01 => Some(Self::Tx),
            0x02 => Some(Self::Rx),
            _ => None,
        }
    }

    /// 128-bit UUID
    #[must_use]
    pub const fn uuid(self) -> &'static [u8; 16] {
        match self {
            Self::Tx => &TX_UUID,
            Self::Rx => &RX_UUID,
        }
    }

    /// Maximum value length
    #[must_use]
    pub const fn max_len(self) -> usize {
        match self {
            Self::Tx => TX_FRAME_LEN,
            Self::Rx => RX_FRAME_MAX,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Characteristic {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Tx => defmt::write!(f, "TX"),
            Self::Rx => defmt::write!(f, "RX"),
        }
    }
}
