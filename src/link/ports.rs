//! Collaborator interfaces
//!
//! The link drives a display and a radio transport it does not own. Both
//! are traits so the firmware can wire real peripherals and tests can wire
//! recorders.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Sender;

use crate::protocol::dcc::CommandText;
use crate::protocol::sensors::OutboundFrame;

/// 5x5 matrix style display
pub trait Display {
    /// Show a single character
    fn print_char(&mut self, c: char);
    /// Scroll a message across the display
    fn scroll_text(&mut self, text: &str, delay_ms: u32);
    /// Abort a running scroll
    fn stop_animation(&mut self);
    /// Set one matrix cell (0 = off, 255 = full)
    fn set_pixel(&mut self, x: u8, y: u8, intensity: u8);
}

/// BLE transport carrying the TX characteristic
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Transport error
    type Error: embedded_io_async::Error;

    /// Check if a peer is connected
    fn is_connected(&self) -> bool;

    /// Notify the TX characteristic
    async fn notify(&mut self, frame: &OutboundFrame) -> Result<(), Self::Error>;
}

/// Display request queued for the display task
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisplayCommand {
    /// Show a single character
    Print(char),
    /// Scroll a message
    Scroll {
        /// Message text
        text: CommandText,
        /// Delay between scroll steps
        delay_ms: u32,
    },
    /// Abort a running scroll
    StopAnimation,
    /// Set one matrix cell
    SetPixel {
        /// Column (0-4)
        x: u8,
        /// Row (0-4)
        y: u8,
        /// Intensity (0-255)
        intensity: u8,
    },
}

impl<M: RawMutex, const N: usize> Display for Sender<'_, M, DisplayCommand, N> {
    fn print_char(&mut self, c: char) {
        queue(self, DisplayCommand::Print(c));
    }

    fn scroll_text(&mut self, text: &str, delay_ms: u32) {
        let mut bounded = CommandText::new();
        for c in text.chars() {
            if bounded.push(c).is_err() {
                break;
            }
        }
        queue(
            self,
            DisplayCommand::Scroll {
                text: bounded,
                delay_ms,
            },
        );
    }

    fn stop_animation(&mut self) {
        queue(self, DisplayCommand::StopAnimation);
    }

    fn set_pixel(&mut self, x: u8, y: u8, intensity: u8) {
        queue(self, DisplayCommand::SetPixel { x, y, intensity });
    }
}

fn queue<M: RawMutex, const N: usize>(
    sender: &Sender<'_, M, DisplayCommand, N>,
    command: DisplayCommand,
) {
    if sender.try_send(command).is_err() {
        warn!("display queue full, request dropped");
    }
}
