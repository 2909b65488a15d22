//! BLE Subsystem
//!
//! The Scratch GATT service and the serial link to the BLE co-processor
//! that hosts it.

pub mod coproc;
pub mod service;
pub mod transport;
