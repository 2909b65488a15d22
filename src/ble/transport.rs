//! Co-processor transport
//!
//! [`CoprocessorTransport`] notifies the TX characteristic through the
//! co-processor UART. [`run_event_pump`] reads the other direction and
//! dispatches connection changes and RX writes to the [`Bridge`].

use core::sync::atomic::{AtomicBool, Ordering};

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_io_async::{Error as _, ErrorKind, Read, Write};

use crate::ble::coproc::{CoprocEvent, HostRequest, SlipDecoder};
use crate::ble::service::{Characteristic, SERVICE_UUID16};
use crate::config::TX_FRAME_LEN;
use crate::link::bridge::Bridge;
use crate::link::ports::{Display, Transport};
use crate::protocol::sensors::OutboundFrame;
use crate::types::ConnectionEvent;

/// Serial read chunk size
const READ_CHUNK: usize = 32;

/// Peer connection flag shared by the event pump and the notifier
pub struct LinkStatus {
    connected: AtomicBool,
}

impl LinkStatus {
    /// Create with no peer connected
    #[must_use]
    pub const fn new() -> Self {
        Self {
            connected: AtomicBool::new(false),
        }
    }

    /// Check if a peer is connected
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    /// Record a connection change
    pub fn apply(&self, event: ConnectionEvent) {
        let connected = matches!(event, ConnectionEvent::Connected);
        self.connected.store(connected, Ordering::Release);
    }
}

impl Default for LinkStatus {
    fn default() -> Self {
        Self::new()
    }
}

/// Transport writing host requests to the co-processor UART
pub struct CoprocessorTransport<'a, W: Write> {
    writer: W,
    status: &'a LinkStatus,
}

impl<'a, W: Write> CoprocessorTransport<'a, W> {
    /// Wrap the UART transmit half
    pub const fn new(writer: W, status: &'a LinkStatus) -> Self {
        Self { writer, status }
    }

    /// Release the UART transmit half
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Advertise the Scratch service and publish an all-zero TX value
    pub async fn start_service(&mut self) -> Result<(), ErrorKind> {
        info!("advertising service 0x{:04X}", SERVICE_UUID16);
        self.send(&HostRequest::Advertise(SERVICE_UUID16)).await?;
        let idle = [0u8; TX_FRAME_LEN];
        self.send(&HostRequest::SetValue(Characteristic::Tx, &idle))
            .await
    }

    async fn send(&mut self, request: &HostRequest<'_>) -> Result<(), ErrorKind> {
        let encoded = request.encode().ok_or(ErrorKind::InvalidInput)?;
        self.writer
            .write_all(&encoded)
            .await
            .map_err(|e| e.kind())?;
        self.writer.flush().await.map_err(|e| e.kind())
    }
}

impl<W: Write> Transport for CoprocessorTransport<'_, W> {
    type Error = ErrorKind;

    fn is_connected(&self) -> bool {
        self.status.is_connected()
    }

    async fn notify(&mut self, frame: &OutboundFrame) -> Result<(), Self::Error> {
        self.send(&HostRequest::Notify(Characteristic::Tx, frame.as_bytes()))
            .await
    }
}

/// Read co-processor events until end of stream
pub async fn run_event_pump<M: RawMutex, R: Read, D: Display>(
    bridge: &Bridge<M>,
    serial: &mut R,
    status: &LinkStatus,
    display: &mut D,
) {
    let mut decoder = SlipDecoder::new();
    let mut chunk = [0u8; READ_CHUNK];

    loop {
        let n = match serial.read(&mut chunk).await {
            Ok(0) => {
                info!("co-processor stream closed");
                return;
            }
            Ok(n) => n,
            Err(e) => {
                warn!("co-processor read error: {}", e.kind());
                continue;
            }
        };

        for &byte in &chunk[..n] {
            let Some(frame) = decoder.push(byte) else {
                continue;
            };
            match CoprocEvent::parse(frame) {
                Ok(event) => dispatch(bridge, status, display, event),
                Err(e) => debug!("co-processor frame ignored: {}", e),
            }
        }
    }
}

fn dispatch<M: RawMutex, D: Display>(
    bridge: &Bridge<M>,
    status: &LinkStatus,
    display: &mut D,
    event: CoprocEvent<'_>,
) {
    match event {
        CoprocEvent::Connected => {
            status.apply(ConnectionEvent::Connected);
            bridge.on_connection(ConnectionEvent::Connected, display);
        }
        CoprocEvent::Disconnected => {
            status.apply(ConnectionEvent::Disconnected);
            bridge.on_connection(ConnectionEvent::Disconnected, display);
        }
        CoprocEvent::Written {
            characteristic: Characteristic::Rx,
            data,
        } => {
            if let Err(e) = bridge.on_rx_write(data, display) {
                debug!("RX frame ignored: {}", e);
            }
        }
        CoprocEvent::Written { characteristic, .. } => {
            debug!("write to {} ignored", characteristic);
        }
    }
}
