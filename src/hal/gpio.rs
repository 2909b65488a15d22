//! GPIO Abstractions
//!
//! Push buttons A and B. Both are active low with the internal pull-up and
//! wired to EXTI lines, so a press is an edge wait rather than a poll.

use embassy_time::{Duration, Timer};
use embedded_hal::digital::InputPin;
use embedded_hal_async::digital::Wait;

use crate::config::BUTTON_DEBOUNCE_MS;
use crate::types::Button;

/// Button state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonState {
    /// Button is released
    Released,
    /// Button is pressed
    Pressed,
}

impl defmt::Format for ButtonState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Released => defmt::write!(f, "Released"),
            Self::Pressed => defmt::write!(f, "Pressed"),
        }
    }
}

/// Debounced push button on an edge-capable input
pub struct ButtonInput<P> {
    pin: P,
    button: Button,
}

impl<P: InputPin + Wait> ButtonInput<P> {
    /// Wrap an input configured with pull-up
    #[must_use]
    pub const fn new(pin: P, button: Button) -> Self {
        Self { pin, button }
    }

    /// Current level; a pin read error counts as released
    pub fn state(&mut self) -> ButtonState {
        match self.pin.is_low() {
            Ok(true) => ButtonState::Pressed,
            _ => ButtonState::Released,
        }
    }

    /// Wait for a debounced press
    ///
    /// Returns once the pin fell and was still low after the debounce time.
    /// Waits for release first so a held button reports one press.
    pub async fn wait_for_press(&mut self) -> Button {
        loop {
            if self.state() == ButtonState::Pressed && self.pin.wait_for_high().await.is_err() {
                continue;
            }
            if self.pin.wait_for_falling_edge().await.is_err() {
                continue;
            }
            Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;
            if self.state() == ButtonState::Pressed {
                trace!("button {} pressed", self.button.sensor());
                return self.button;
            }
        }
    }
}
