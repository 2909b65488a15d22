//! Sensor Latch
//!
//! Edge-triggered flags for the three contact pins and two buttons. Any
//! producer may set a flag; the notifier reads the whole latch into a TX
//! frame once per period and clears it.

use crate::config::{SENSOR_COUNT, SENSOR_FIELD_OFFSET, TX_FRAME_LEN};
use crate::types::SensorIndex;

/// Latched sensor flags
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SensorLatch {
    flags: [bool; SENSOR_COUNT],
}

impl SensorLatch {
    /// Create with every flag clear
    #[must_use]
    pub const fn new() -> Self {
        Self {
            flags: [false; SENSOR_COUNT],
        }
    }

    /// Latch a flag (idempotent)
    pub fn set(&mut self, sensor: SensorIndex) {
        self.flags[sensor.index()] = true;
    }

    /// Latch a flag by raw index, returns false if the index is out of range
    pub fn set_index(&mut self, index: usize) -> bool {
        match SensorIndex::from_index(index) {
            Some(sensor) => {
                self.set(sensor);
                true
            }
            None => false,
        }
    }

    /// Check a single flag
    #[must_use]
    pub const fn is_set(&self, sensor: SensorIndex) -> bool {
        self.flags[sensor as usize]
    }

    /// Check if any flag is latched
    #[must_use]
    pub fn any(&self) -> bool {
        self.flags.iter().any(|&f| f)
    }

    /// Clear every flag
    pub fn clear(&mut self) {
        self.flags = [false; SENSOR_COUNT];
    }

    /// Write the TX frame for the current flags
    pub fn encode(&self, frame: &mut OutboundFrame) {
        frame.0 = [0; TX_FRAME_LEN];
        for (i, &flag) in self.flags.iter().enumerate() {
            frame.0[SENSOR_FIELD_OFFSET + i] = u8::from(flag);
        }
    }

    /// Encode a fresh frame
    #[must_use]
    pub fn frame(&self) -> OutboundFrame {
        let mut frame = OutboundFrame::new();
        self.encode(&mut frame);
        frame
    }

    /// Encode then clear in one step
    pub fn take_frame(&mut self) -> OutboundFrame {
        let frame = self.frame();
        self.clear();
        frame
    }
}

/// Value of the TX characteristic
///
/// ```text
/// [0..4]   reserved, zero
/// [4..9]   pin0, pin1, pin2, buttonA, buttonB (0/1)
/// [9..20]  zero
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutboundFrame([u8; TX_FRAME_LEN]);

impl OutboundFrame {
    /// All-zero frame
    #[must_use]
    pub const fn new() -> Self {
        Self([0; TX_FRAME_LEN])
    }

    /// Flag value for one sensor
    #[must_use]
    pub const fn sensor(&self, sensor: SensorIndex) -> bool {
        self.0[SENSOR_FIELD_OFFSET + sensor as usize] != 0
    }

    /// Raw characteristic bytes
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; TX_FRAME_LEN] {
        &self.0
    }
}

impl Default for OutboundFrame {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for OutboundFrame {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Tx{}",
            &self.0[SENSOR_FIELD_OFFSET..SENSOR_FIELD_OFFSET + SENSOR_COUNT]
        );
    }
}
