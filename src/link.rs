//! Link Orchestrator
//!
//! Owns the state shared between the notifier, the serial reader, the
//! command forwarder and the radio/button event handlers. Every mutation
//! goes through one mutex-guarded context; tasks hand off work through
//! signals instead of relying on cooperative scheduling.

pub mod bridge;
pub mod gate;
pub mod ports;
pub mod tasks;

pub use bridge::{Bridge, ForwardOutcome, NotifyOutcome};
pub use ports::{Display, DisplayCommand, Transport};
