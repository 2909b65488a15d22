//! Shared link context
//!
//! [`Bridge`] owns the sensor latch, the translator (and with it the CAB
//! function state) and the pending command. Handlers take `&self`, so one
//! `static` instance serves every task; all access is serialized by the
//! blocking mutex and no lock is held across an await point.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use embedded_io_async::{Error as _, ErrorKind, Write};

use crate::config::{LinkConfig, CONNECTED_CHAR, DISCONNECTED_CHAR, PIXEL_OFF, PIXEL_ON};
use crate::link::gate::ForwardGate;
use crate::link::ports::{Display, Transport};
use crate::protocol::dcc::CommandText;
use crate::protocol::frame::FrameError;
use crate::protocol::sensors::{OutboundFrame, SensorLatch};
use crate::protocol::telemetry::parse_sensor_report;
use crate::translator::{CommandTranslator, Translation};
use crate::types::{Button, ConnectionEvent, FeatureGroup, SensorIndex};

/// Mutable state behind the mutex
struct LinkState {
    sensors: SensorLatch,
    translator: CommandTranslator,
    pending: Option<CommandText>,
}

/// Result of one forward attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForwardOutcome {
    /// Command written to the serial link
    Sent,
    /// Nothing pending
    Idle,
    /// Another forward held the gate; request dropped
    Contended,
    /// Serial write failed; command lost
    Failed(ErrorKind),
}

/// Result of one notifier cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// Frame notified to the peer
    Sent(OutboundFrame),
    /// No peer; frame discarded
    Disconnected,
    /// Transport error; frame discarded
    Failed(ErrorKind),
}

/// State shared by all link activities
pub struct Bridge<M: RawMutex> {
    state: Mutex<M, RefCell<LinkState>>,
    command_ready: Signal<M, ()>,
    gate: ForwardGate,
    config: LinkConfig,
}

impl<M: RawMutex> Bridge<M> {
    /// Create a bridge with cleared sensors and every function off
    #[must_use]
    pub const fn new(config: LinkConfig) -> Self {
        Self {
            state: Mutex::new(RefCell::new(LinkState {
                sensors: SensorLatch::new(),
                translator: CommandTranslator::new(config.speed_scale),
                pending: None,
            })),
            command_ready: Signal::new(),
            gate: ForwardGate::new(),
            config,
        }
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut LinkState) -> R) -> R {
        self.state.lock(|cell| f(&mut cell.borrow_mut()))
    }

    /// Link settings
    #[must_use]
    pub const fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Gate guarding the serial forward
    #[must_use]
    pub const fn gate(&self) -> &ForwardGate {
        &self.gate
    }

    // ------------------------------------------------------------------
    // Sensor latch
    // ------------------------------------------------------------------

    /// Latch a sensor flag
    pub fn latch(&self, sensor: SensorIndex) {
        self.with_state(|s| s.sensors.set(sensor));
    }

    /// Button press handler
    pub fn on_button(&self, button: Button) {
        debug!("button {}", button.sensor());
        self.latch(button.sensor());
    }

    /// Handle one terminator-stripped DCC++ response
    pub fn on_telemetry(&self, line: &[u8]) -> Option<SensorIndex> {
        let sensor = parse_sensor_report(line)?;
        trace!("sensor report {}", sensor);
        self.latch(sensor);
        Some(sensor)
    }

    /// Snapshot of the latch
    #[must_use]
    pub fn sensors(&self) -> SensorLatch {
        self.with_state(|s| s.sensors)
    }

    /// Encode the latch into a frame and clear it
    pub fn take_frame(&self) -> OutboundFrame {
        self.with_state(|s| s.sensors.take_frame())
    }

    /// One notifier cycle: encode, notify if connected, clear
    ///
    /// The latch is cleared whether or not a peer is connected.
    pub async fn notify_tick<T: Transport>(&self, transport: &mut T) -> NotifyOutcome {
        let frame = self.take_frame();
        if !transport.is_connected() {
            return NotifyOutcome::Disconnected;
        }
        match transport.notify(&frame).await {
            Ok(()) => NotifyOutcome::Sent(frame),
            Err(e) => {
                warn!("notify failed: {}", e.kind());
                NotifyOutcome::Failed(e.kind())
            }
        }
    }

    // ------------------------------------------------------------------
    // Radio events
    // ------------------------------------------------------------------

    /// Connection state change
    pub fn on_connection<D: Display>(&self, event: ConnectionEvent, display: &mut D) {
        info!("peer {}", event);
        match event {
            ConnectionEvent::Connected => display.print_char(CONNECTED_CHAR),
            ConnectionEvent::Disconnected => display.print_char(DISCONNECTED_CHAR),
        }
    }

    /// RX characteristic write
    ///
    /// Decodes the frame, publishes the resulting command and raises the
    /// command-ready signal. Display side effects run after the lock is
    /// released.
    pub fn on_rx_write<D: Display>(&self, bytes: &[u8], display: &mut D) -> Result<(), FrameError> {
        let translation = self.with_state(|s| s.translator.decode(bytes))?;

        if let Some(command) = translation.pending() {
            self.publish(command);
        }

        match &translation {
            Translation::Text(text) => display.scroll_text(text, self.config.scroll_delay_ms),
            Translation::Action { rows, .. } => {
                display.stop_animation();
                for (x, y, lit) in rows.cells() {
                    display.set_pixel(x, y, if lit { PIXEL_ON } else { PIXEL_OFF });
                }
            }
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Pending command
    // ------------------------------------------------------------------

    /// Replace the pending command and signal the forwarder
    pub fn publish(&self, command: CommandText) {
        debug!("command {}", command.as_str());
        self.with_state(|s| s.pending = Some(command));
        self.command_ready.signal(());
    }

    /// Copy of the pending command
    #[must_use]
    pub fn pending_command(&self) -> Option<CommandText> {
        self.with_state(|s| s.pending.clone())
    }

    /// Remove the pending command
    pub fn take_pending(&self) -> Option<CommandText> {
        self.with_state(|s| s.pending.take())
    }

    /// Current code of a CAB function group
    #[must_use]
    pub fn function_code(&self, group: FeatureGroup) -> u8 {
        self.with_state(|s| s.translator.groups().code(group))
    }

    /// Wait until a command has been published
    pub async fn wait_command_ready(&self) {
        self.command_ready.wait().await;
    }

    /// Write the pending command to the serial link
    ///
    /// Returns [`ForwardOutcome::Contended`] without touching the pending
    /// command if another forward is in flight.
    pub async fn forward_pending<W: Write>(&self, serial: &mut W) -> ForwardOutcome {
        let Some(_permit) = self.gate.try_acquire() else {
            warn!("forward in progress, request dropped");
            return ForwardOutcome::Contended;
        };
        let Some(command) = self.take_pending() else {
            return ForwardOutcome::Idle;
        };

        let written = match serial.write_all(command.as_bytes()).await {
            Ok(()) => serial.flush().await,
            Err(e) => Err(e),
        };
        match written {
            Ok(()) => ForwardOutcome::Sent,
            Err(e) => {
                warn!("DCC++ write failed: {}", e.kind());
                ForwardOutcome::Failed(e.kind())
            }
        }
    }
}
