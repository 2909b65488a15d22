//! System configuration and protocol constants
//!
//! This module defines compile-time constants for the bridge firmware.
//! Frame layouts, opcodes, timing, serial settings and pin mappings are
//! centralized here.

/// Period of the status notification to the Scratch peer
pub const NOTIFY_PERIOD_MS: u64 = 200;

/// Delay between scroll steps when displaying text
pub const SCROLL_DELAY_MS: u32 = 120;

/// Length of the TX (notify) characteristic value
pub const TX_FRAME_LEN: usize = 20;

/// Maximum length of an RX (write) characteristic value
pub const RX_FRAME_MAX: usize = 20;

/// Offset of the first sensor flag inside the TX frame
pub const SENSOR_FIELD_OFFSET: usize = 4;

/// Number of latched sensor flags
pub const SENSOR_COUNT: usize = 5;

/// Opcode of a 'display text' block write
pub const OPCODE_DISPLAY_TEXT: u8 = 0x81;

/// Opcode of a 'display' (bitmap) block write
pub const OPCODE_ACTION: u8 = 0x82;

/// Selectors below this value are motion/accessory instructions
pub const MOTION_SELECTOR_LIMIT: u8 = 5;

/// Highest selector representable in the 5-bit field
pub const MAX_SELECTOR: u8 = 31;

/// Multiplier applied to the raw speed field
pub const SPEED_SCALE: u16 = 4;

/// Highest raw speed value sent by the front end
pub const MAX_SPEED_RAW: u8 = 63;

/// Throttle register used for every `<t>` command
pub const TRAIN_REGISTER: u8 = 1;

/// Number of CAB function groups tracked
pub const FUNCTION_GROUPS: usize = 3;

/// Slots per CAB function group
pub const SLOTS_PER_GROUP: usize = 5;

/// Bitmap rows the 5x5 matrix can show
pub const MATRIX_ROWS: usize = 5;

/// Bitmap columns the 5x5 matrix can show
pub const MATRIX_COLUMNS: usize = 5;

/// Pixel intensity for a lit bitmap cell
pub const PIXEL_ON: u8 = 255;

/// Pixel intensity for a dark bitmap cell
pub const PIXEL_OFF: u8 = 0;

/// Terminator of DCC++ responses on the serial link
pub const DCC_TERMINATOR: u8 = b'>';

/// Longest DCC++ response line kept before it is discarded
pub const TELEMETRY_LINE_MAX: usize = 64;

/// Capacity of an outbound command string
pub const COMMAND_MAX_LEN: usize = 32;

/// DCC++ base station baud rate
pub const DCC_BAUD: u32 = 115_200;

/// BLE co-processor baud rate
pub const BLE_BAUD: u32 = 115_200;

/// Button debounce time in milliseconds
pub const BUTTON_DEBOUNCE_MS: u64 = 20;

/// Depth of the display command queue
pub const DISPLAY_QUEUE_DEPTH: usize = 8;

/// Character shown once the firmware has started
pub const STARTUP_CHAR: char = 'S';

/// Character shown when the Scratch peer connects
pub const CONNECTED_CHAR: char = 'C';

/// Character shown when the Scratch peer disconnects
pub const DISCONNECTED_CHAR: char = 'D';

/// Serial buffer sizes
pub mod buffers {
    //! Ring buffer sizes for the buffered UARTs

    /// DCC++ UART transmit buffer
    pub const DCC_TX: usize = 64;

    /// DCC++ UART receive buffer
    pub const DCC_RX: usize = 128;

    /// BLE co-processor UART transmit buffer
    pub const BLE_TX: usize = 64;

    /// BLE co-processor UART receive buffer
    pub const BLE_RX: usize = 128;
}

/// Pin assignments for GPIO
pub mod pins {
    //! GPIO pin assignments matching the wiring diagram

    /// USART1 TX to the DCC++ base station RX
    pub const DCC_TX: &str = "PA9";

    /// USART1 RX from the DCC++ base station TX
    pub const DCC_RX: &str = "PA10";

    /// USART2 TX to the BLE co-processor
    pub const BLE_TX: &str = "PA2";

    /// USART2 RX from the BLE co-processor
    pub const BLE_RX: &str = "PA3";

    /// Button A (active low, EXTI13)
    pub const BUTTON_A: &str = "PC13";

    /// Button B (active low, EXTI1)
    pub const BUTTON_B: &str = "PB1";

    /// I2C1 SCL (display)
    pub const I2C1_SCL: &str = "PB8";

    /// I2C1 SDA (display)
    pub const I2C1_SDA: &str = "PB9";
}

/// Runtime link settings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinkConfig {
    /// Notifier period in milliseconds
    pub notify_period_ms: u64,
    /// Scroll step delay for text messages
    pub scroll_delay_ms: u32,
    /// Multiplier applied to raw speed values
    pub speed_scale: u16,
}

impl LinkConfig {
    /// Settings built from the compile-time constants
    pub const DEFAULT: Self = Self {
        notify_period_ms: NOTIFY_PERIOD_MS,
        scroll_delay_ms: SCROLL_DELAY_MS,
        speed_scale: SPEED_SCALE,
    };
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
