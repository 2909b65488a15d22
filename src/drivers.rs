//! Peripheral Drivers
//!
//! Drivers for external parts on the board.

pub mod display;
