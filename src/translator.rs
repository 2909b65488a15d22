//! Command Translator
//!
//! Turns RX characteristic writes into DCC++ commands. Text writes pass
//! through verbatim; action writes become throttle, accessory or function
//! commands, the latter through the CAB function accumulator.

use crate::protocol::accumulator::{FunctionCode, FunctionGroups};
use crate::protocol::dcc::{CommandText, DccCommand};
use crate::protocol::frame::{ActionFrame, BitmapRows, FrameError, InboundFrame};
use crate::protocol::functions;
use crate::protocol::sensors::{OutboundFrame, SensorLatch};
use crate::types::Motion;

/// Outcome of decoding one RX write
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Translation<'a> {
    /// Text block, forwarded verbatim and scrolled on the display
    Text(CommandText),
    /// Display block, a command (if the selector maps to one) and bitmap rows
    Action {
        /// Decoded command, None for the reserved selector
        command: Option<DccCommand>,
        /// Rows for the matrix display
        rows: BitmapRows<'a>,
    },
}

impl Translation<'_> {
    /// Text to publish as the pending command
    #[must_use]
    pub fn pending(&self) -> Option<CommandText> {
        match self {
            Self::Text(text) => Some(text.clone()),
            Self::Action { command, .. } => command.as_ref().and_then(DccCommand::render),
        }
    }
}

/// Stateful RX → DCC++ translator
pub struct CommandTranslator {
    groups: FunctionGroups,
    speed_scale: u16,
}

impl CommandTranslator {
    /// Create a translator with every function off
    #[must_use]
    pub const fn new(speed_scale: u16) -> Self {
        Self {
            groups: FunctionGroups::new(),
            speed_scale,
        }
    }

    /// Decode raw RX bytes
    pub fn decode<'a>(&mut self, bytes: &'a [u8]) -> Result<Translation<'a>, FrameError> {
        InboundFrame::parse(bytes).map(|frame| self.translate(frame))
    }

    /// Translate an already parsed frame
    pub fn translate<'a>(&mut self, frame: InboundFrame<'a>) -> Translation<'a> {
        match frame {
            InboundFrame::DisplayText(bytes) => Translation::Text(text_command(bytes)),
            InboundFrame::Action(action) => Translation::Action {
                command: self.action_command(&action),
                rows: action.rows(),
            },
        }
    }

    /// Command for an action frame; feature selectors update the accumulator
    pub fn action_command(&mut self, action: &ActionFrame<'_>) -> Option<DccCommand> {
        let address = action.address();
        if let Some(motion) = action.selector().motion() {
            let command = match motion {
                Motion::Stop => DccCommand::stop(address),
                Motion::Run(direction) => DccCommand::Throttle {
                    address,
                    speed: action.speed().scaled(self.speed_scale),
                    direction,
                },
                Motion::Accessory(active) => DccCommand::Accessory { address, active },
            };
            return Some(command);
        }

        let Some(toggle) = functions::feature_for(action.selector()) else {
            debug!("reserved selector {}", action.selector());
            return None;
        };
        let FunctionCode { code, .. } = self.groups.apply(toggle);
        Some(DccCommand::Function { address, code })
    }

    /// Encode the sensor latch into a TX frame
    pub fn encode(&self, sensors: &SensorLatch, frame: &mut OutboundFrame) {
        sensors.encode(frame);
    }

    /// Accumulated function state
    #[must_use]
    pub const fn groups(&self) -> &FunctionGroups {
        &self.groups
    }
}

impl Default for CommandTranslator {
    fn default() -> Self {
        Self::new(crate::config::SPEED_SCALE)
    }
}

/// Text up to the first NUL, non-ASCII bytes dropped
fn text_command(bytes: &[u8]) -> CommandText {
    let mut text = CommandText::new();
    for &b in bytes.iter().take_while(|&&b| b != 0) {
        if b.is_ascii() && text.push(char::from(b)).is_err() {
            break;
        }
    }
    text
}
