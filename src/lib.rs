//! Scratch to DCC++ Bridge Firmware Library
//!
//! Core of an embedded node that lets Scratch blocks drive a model railway.
//! Scratch talks to the node over a BLE GATT service; the node talks to a
//! DCC++ base station over a serial line.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  RX writes   ┌──────────────────┐  "<t 1 3 40 1>"  ┌──────────┐
//! │              │ ───────────► │  translator      │ ───────────────► │          │
//! │   Scratch    │              │  (frame decode,  │                  │  DCC++   │
//! │  (BLE peer)  │              │   CAB functions) │                  │  base    │
//! │              │  TX notify   ├──────────────────┤  "<Q3>"          │  station │
//! │              │ ◄─────────── │  sensor latch    │ ◄─────────────── │          │
//! └──────────────┘   every      └──────────────────┘                  └──────────┘
//!                    200 ms            ▲  buttons A/B
//! ```
//!
//! [`link::Bridge`] holds all shared state behind one mutex; the firmware
//! binary runs one embassy task per activity (notifier, serial reader,
//! command forwarder, co-processor events, buttons, display).
//!
//! # Design Principles
//!
//! - **Type-driven design**: selectors, speeds and sensor indices are
//!   validated once at the edge
//! - **No unsafe code**
//! - **Functional core, imperative shell**: frame decoding and command
//!   rendering are pure and host-tested; I/O lives in task loops
//! - **Explicit error handling**: malformed input is reported, never
//!   panics

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Must stay first so the logging macros are visible to every module
#[macro_use]
mod fmt;

// Re-export dependencies needed by the binary (only in embedded mode)
#[cfg(feature = "embedded")]
pub use embassy_executor;
#[cfg(feature = "embedded")]
pub use embassy_stm32;
#[cfg(feature = "embedded")]
pub use embassy_time;

/// Hardware Abstraction Layer
///
/// Buttons and the I2C bus on the STM32G474.
#[cfg(feature = "embedded")]
pub mod hal;

/// Peripheral Drivers
///
/// OLED panel standing in for the LED matrix.
#[cfg(feature = "embedded")]
pub mod drivers;

/// Scratch and DCC++ wire formats
pub mod protocol;

/// Frame to command translation
pub mod translator;

/// Shared state and task loops
pub mod link;

/// BLE service and co-processor link
pub mod ble;

/// LED matrix model
pub mod matrix;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::types::*;

    pub use crate::link::{Bridge, Display, DisplayCommand, Transport};
    pub use crate::protocol::dcc::{CommandText, DccCommand};
    pub use crate::protocol::frame::FrameError;
    pub use crate::protocol::sensors::{OutboundFrame, SensorLatch};
    pub use crate::translator::CommandTranslator;

    // Embassy
    #[cfg(feature = "embedded")]
    pub use embassy_time::{Duration, Instant, Timer};
}
