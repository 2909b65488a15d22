//! BLE co-processor link
//!
//! The radio stack runs on a network co-processor attached over a UART.
//! Messages in both directions are SLIP framed (RFC 1055); the first byte
//! of a frame is the message kind.
//!
//! ```text
//! co-processor -> host
//!   0x01                      peer connected
//!   0x02                      peer disconnected
//!   0x03 char data...         characteristic written by the peer
//!
//! host -> co-processor
//!   0x10 uuid16(le)           start advertising a service
//!   0x11 char data...         set characteristic value
//!   0x12 char data...         notify characteristic value
//! ```

use heapless::Vec;

use crate::ble::service::Characteristic;

/// SLIP frame delimiter
pub const END: u8 = 0xC0;
/// SLIP escape
pub const ESC: u8 = 0xDB;
/// Escaped END
pub const ESC_END: u8 = 0xDC;
/// Escaped ESC
pub const ESC_ESC: u8 = 0xDD;

/// Largest decoded frame (kind + characteristic + value)
pub const FRAME_MAX: usize = 32;

/// Largest encoded frame (every byte escaped plus delimiters)
pub const ENCODED_MAX: usize = FRAME_MAX * 2 + 2;

mod kind {
    pub const CONNECTED: u8 = 0x01;
    pub const DISCONNECTED: u8 = 0x02;
    pub const WRITTEN: u8 = 0x03;
    pub const ADVERTISE: u8 = 0x10;
    pub const SET_VALUE: u8 = 0x11;
    pub const NOTIFY: u8 = 0x12;
}

/// Incremental SLIP decoder
pub struct SlipDecoder {
    frame: [u8; FRAME_MAX],
    len: usize,
    escaped: bool,
    overflowed: bool,
}

impl SlipDecoder {
    /// Create an empty decoder
    #[must_use]
    pub const fn new() -> Self {
        Self {
            frame: [0; FRAME_MAX],
            len: 0,
            escaped: false,
            overflowed: false,
        }
    }

    /// Feed a byte, returns a complete non-empty frame on END
    pub fn push(&mut self, byte: u8) -> Option<&[u8]> {
        if byte == END {
            let len = core::mem::take(&mut self.len);
            self.escaped = false;
            if core::mem::take(&mut self.overflowed) || len == 0 {
                return None;
            }
            return Some(&self.frame[..len]);
        }

        let byte = if self.escaped {
            self.escaped = false;
            match byte {
                ESC_END => END,
                ESC_ESC => ESC,
                // invalid escape, keep the raw byte
                other => other,
            }
        } else if byte == ESC {
            self.escaped = true;
            return None;
        } else {
            byte
        };

        if self.overflowed {
            return None;
        }
        if self.len < FRAME_MAX {
            self.frame[self.len] = byte;
            self.len += 1;
        } else {
            self.overflowed = true;
        }
        None
    }
}

impl Default for SlipDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// SLIP-encode a payload, None if it does not fit
#[must_use]
pub fn slip_encode(payload: &[u8]) -> Option<Vec<u8, ENCODED_MAX>> {
    let mut out = Vec::new();
    out.push(END).ok()?;
    for &b in payload {
        match b {
            END => out.extend_from_slice(&[ESC, ESC_END]).ok()?,
            ESC => out.extend_from_slice(&[ESC, ESC_ESC]).ok()?,
            _ => out.push(b).ok()?,
        }
    }
    out.push(END).ok()?;
    Some(out)
}

/// Reason a co-processor frame was ignored
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventError {
    /// Frame kind not understood
    UnknownKind(u8),
    /// Write event without characteristic id
    Truncated,
    /// Write to a characteristic this service does not have
    UnknownCharacteristic(u8),
}

#[cfg(feature = "embedded")]
impl defmt::Format for EventError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::UnknownKind(k) => defmt::write!(f, "unknown kind 0x{:02X}", k),
            Self::Truncated => defmt::write!(f, "truncated event"),
            Self::UnknownCharacteristic(c) => defmt::write!(f, "unknown characteristic {}", c),
        }
    }
}

/// Event reported by the co-processor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoprocEvent<'a> {
    /// Peer connected
    Connected,
    /// Peer disconnected
    Disconnected,
    /// Peer wrote a characteristic
    Written {
        /// Target characteristic
        characteristic: Characteristic,
        /// Written value
        data: &'a [u8],
    },
}

impl<'a> CoprocEvent<'a> {
    /// Parse a decoded frame
    pub fn parse(frame: &'a [u8]) -> Result<Self, EventError> {
        match *frame {
            [kind::CONNECTED, ..] => Ok(Self::Connected),
            [kind::DISCONNECTED, ..] => Ok(Self::Disconnected),
            [kind::WRITTEN, id, ref data @ ..] => Characteristic::from_id(id)
                .map(|characteristic| Self::Written {
                    characteristic,
                    data,
                })
                .ok_or(EventError::UnknownCharacteristic(id)),
            [kind::WRITTEN] => Err(EventError::Truncated),
            [other, ..] => Err(EventError::UnknownKind(other)),
            [] => Err(EventError::Truncated),
        }
    }
}

/// Request sent to the co-processor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostRequest<'a> {
    /// Advertise a 16-bit service UUID
    Advertise(u16),
    /// Set a characteristic value without notifying
    SetValue(Characteristic, &'a [u8]),
    /// Notify a characteristic value
    Notify(Characteristic, &'a [u8]),
}

impl HostRequest<'_> {
    /// Encode as a SLIP frame, None if the value is too long
    #[must_use]
    pub fn encode(&self) -> Option<Vec<u8, ENCODED_MAX>> {
        let mut payload: Vec<u8, FRAME_MAX> = Vec::new();
        match *self {
            Self::Advertise(uuid) => {
                payload.push(kind::ADVERTISE).ok()?;
                payload.extend_from_slice(&uuid.to_le_bytes()).ok()?;
            }
            Self::SetValue(characteristic, value) | Self::Notify(characteristic, value) => {
                if value.len() > characteristic.max_len() {
                    return None;
                }
                let kind = if matches!(self, Self::Notify(..)) {
                    kind::NOTIFY
                } else {
                    kind::SET_VALUE
                };
                payload.push(kind).ok()?;
                payload.push(characteristic.id()).ok()?;
                payload.extend_from_slice(value).ok()?;
            }
        }
        slip_encode(&payload)
    }
}
