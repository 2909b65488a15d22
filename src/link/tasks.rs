//! Link task bodies
//!
//! Generic loops wired into executor tasks by the firmware binary. The
//! serial reader returns on end of stream; the other loops never return.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_io_async::{Error as _, Read, Write};

use crate::link::bridge::Bridge;
#[cfg(feature = "embedded")]
use crate::link::ports::Transport;
use crate::protocol::telemetry::TelemetryReader;

/// Serial read chunk size
const READ_CHUNK: usize = 32;

/// Read DCC++ responses and latch sensor reports
pub async fn run_telemetry_reader<M: RawMutex, R: Read>(bridge: &Bridge<M>, serial: &mut R) {
    let mut reader = TelemetryReader::new();
    let mut chunk = [0u8; READ_CHUNK];

    loop {
        match serial.read(&mut chunk).await {
            Ok(0) => {
                info!("DCC++ stream closed");
                return;
            }
            Ok(n) => {
                for &byte in &chunk[..n] {
                    if let Some(line) = reader.push(byte) {
                        bridge.on_telemetry(line);
                    }
                }
            }
            Err(e) => warn!("DCC++ read error: {}", e.kind()),
        }
    }
}

/// Forward each published command to the base station
pub async fn run_command_forwarder<M: RawMutex, W: Write>(bridge: &Bridge<M>, serial: &mut W) -> ! {
    loop {
        bridge.wait_command_ready().await;
        bridge.forward_pending(serial).await;
    }
}

/// Notify the sensor frame every period
#[cfg(feature = "embedded")]
pub async fn run_notifier<M: RawMutex, T: Transport>(bridge: &Bridge<M>, transport: &mut T) -> ! {
    use embassy_time::{Duration, Ticker};

    let mut ticker = Ticker::every(Duration::from_millis(bridge.config().notify_period_ms));
    loop {
        ticker.next().await;
        bridge.notify_tick(transport).await;
    }
}
