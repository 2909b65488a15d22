//! Communication Protocols
//!
//! Scratch BLE frame decoding, CAB function state, sensor latching and
//! the DCC++ text command set spoken to the base station.

pub mod accumulator;
pub mod dcc;
pub mod frame;
pub mod functions;
pub mod sensors;
pub mod telemetry;
