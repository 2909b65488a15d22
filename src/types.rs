//! Shared types used across the bridge firmware
//!
//! This module defines domain-specific types that enforce invariants
//! at construction time and keep raw protocol bytes out of the logic.

use core::fmt;

use crate::config::{MAX_SELECTOR, MAX_SPEED_RAW, MOTION_SELECTOR_LIMIT, SENSOR_COUNT};

/// 5-bit selector carried in byte 1 of an action frame
///
/// Values below [`MOTION_SELECTOR_LIMIT`] are motion/accessory opcodes,
/// the rest index the CAB function table.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Selector(u8);

impl Selector {
    /// Create a selector, returns None if outside the 5-bit range
    #[must_use]
    pub const fn new(raw: u8) -> Option<Self> {
        if raw <= MAX_SELECTOR {
            Some(Self(raw))
        } else {
            None
        }
    }

    /// Raw selector value
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Check if this selector addresses the motion/accessory path
    #[must_use]
    pub const fn is_motion(self) -> bool {
        self.0 < MOTION_SELECTOR_LIMIT
    }

    /// Motion instruction for selectors 0-4
    #[must_use]
    pub const fn motion(self) -> Option<Motion> {
        match self.0 {
            0 => Some(Motion::Stop),
            1 => Some(Motion::Run(Direction::Forward)),
            2 => Some(Motion::Run(Direction::Reverse)),
            3 => Some(Motion::Accessory(false)),
            4 => Some(Motion::Accessory(true)),
            _ => None,
        }
    }
}

impl fmt::Debug for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Selector({})", self.0)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Selector {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "sel{}", self.0);
    }
}

/// Motion or accessory instruction encoded by selectors 0-4
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Motion {
    /// Stop the train (direction 0)
    Stop,
    /// Run the train in a direction at the frame's speed
    Run(Direction),
    /// Switch an accessory (true = activate)
    Accessory(bool),
}

/// Train travel direction as sent in a `<t>` command
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Reverse (0)
    Reverse,
    /// Forward (1)
    Forward,
}

impl Direction {
    /// DCC++ direction digit
    #[must_use]
    pub const fn as_digit(self) -> u8 {
        match self {
            Self::Reverse => 0,
            Self::Forward => 1,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Direction {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Reverse => defmt::write!(f, "REV"),
            Self::Forward => defmt::write!(f, "FWD"),
        }
    }
}

/// Decoder or accessory address (0-255)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(pub u8);

impl Address {
    /// Get the raw address
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Address {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "@{}", self.0);
    }
}

/// Raw speed step from the front end (0-63)
///
/// Values above [`MAX_SPEED_RAW`] are clamped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct SpeedStep(u8);

impl SpeedStep {
    /// Create from the raw frame byte
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        if raw > MAX_SPEED_RAW {
            Self(MAX_SPEED_RAW)
        } else {
            Self(raw)
        }
    }

    /// Raw step value
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Speed sent to the base station
    #[must_use]
    pub const fn scaled(self, scale: u16) -> u16 {
        self.0 as u16 * scale
    }
}

/// One of the five latched sensor flags
///
/// The discriminant is the flag's position in the TX frame sensor field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SensorIndex {
    /// Pin 0 contact (`<Q1>`)
    Pin0 = 0,
    /// Pin 1 contact (`<Q2>`)
    Pin1 = 1,
    /// Pin 2 contact (`<Q3>`)
    Pin2 = 2,
    /// Button A (`<Q4>` or local press)
    ButtonA = 3,
    /// Button B (`<Q5>` or local press)
    ButtonB = 4,
}

impl SensorIndex {
    /// All flags in frame order
    pub const ALL: [Self; SENSOR_COUNT] = [
        Self::Pin0,
        Self::Pin1,
        Self::Pin2,
        Self::ButtonA,
        Self::ButtonB,
    ];

    /// Create from a 0-based index, None if out of range
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Pin0),
            1 => Some(Self::Pin1),
            2 => Some(Self::Pin2),
            3 => Some(Self::ButtonA),
            4 => Some(Self::ButtonB),
            _ => None,
        }
    }

    /// Create from the digit of a `<Qn` sensor report ('1'-'5')
    #[must_use]
    pub const fn from_digit(digit: u8) -> Option<Self> {
        if digit >= b'1' {
            Self::from_index((digit - b'1') as usize)
        } else {
            None
        }
    }

    /// Position within the sensor field
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for SensorIndex {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Pin0 => defmt::write!(f, "P0"),
            Self::Pin1 => defmt::write!(f, "P1"),
            Self::Pin2 => defmt::write!(f, "P2"),
            Self::ButtonA => defmt::write!(f, "BtnA"),
            Self::ButtonB => defmt::write!(f, "BtnB"),
        }
    }
}

/// Local push buttons
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Button {
    /// Button A
    A,
    /// Button B
    B,
}

impl Button {
    /// Sensor flag latched by a press
    #[must_use]
    pub const fn sensor(self) -> SensorIndex {
        match self {
            Self::A => SensorIndex::ButtonA,
            Self::B => SensorIndex::ButtonB,
        }
    }
}

/// BLE connection state change
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// Peer connected
    Connected,
    /// Peer disconnected
    Disconnected,
}

#[cfg(feature = "embedded")]
impl defmt::Format for ConnectionEvent {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Connected => defmt::write!(f, "connected"),
            Self::Disconnected => defmt::write!(f, "disconnected"),
        }
    }
}

/// CAB function group
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FeatureGroup {
    /// F0-F4, base 128
    F0ToF4,
    /// F5-F8, base 176
    F5ToF8,
    /// F9-F12, base 160
    F9ToF12,
}

impl FeatureGroup {
    /// All groups in accumulator order
    pub const ALL: [Self; 3] = [Self::F0ToF4, Self::F5ToF8, Self::F9ToF12];

    /// Group base value sent in the `<f>` command
    #[must_use]
    pub const fn base(self) -> u8 {
        match self {
            Self::F0ToF4 => 128,
            Self::F5ToF8 => 176,
            Self::F9ToF12 => 160,
        }
    }

    /// Accumulator index
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::F0ToF4 => 0,
            Self::F5ToF8 => 1,
            Self::F9ToF12 => 2,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for FeatureGroup {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::F0ToF4 => defmt::write!(f, "F0-F4"),
            Self::F5ToF8 => defmt::write!(f, "F5-F8"),
            Self::F9ToF12 => defmt::write!(f, "F9-F12"),
        }
    }
}
