//! Hardware Abstraction Layer
//!
//! Thin wrappers over the STM32G474 peripherals the bridge uses. Serial
//! ports are used directly as `embassy_stm32::usart::BufferedUart` halves.

pub mod gpio;
pub mod i2c;
