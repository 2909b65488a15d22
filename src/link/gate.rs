//! Forward gate
//!
//! Non-reentrant flag around the serial write of a pending command. A
//! caller that finds the gate held gets nothing back and must drop its
//! request; it never waits.

use core::sync::atomic::{AtomicBool, Ordering};

/// Single-holder, drop-on-contention gate
pub struct ForwardGate {
    busy: AtomicBool,
}

impl ForwardGate {
    /// Create an open gate
    #[must_use]
    pub const fn new() -> Self {
        Self {
            busy: AtomicBool::new(false),
        }
    }

    /// Take the gate, None if a forward is already in progress
    pub fn try_acquire(&self) -> Option<ForwardPermit<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| ForwardPermit { gate: self })
    }

    /// Check if a forward is in progress
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Default for ForwardGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Held gate, released on drop
pub struct ForwardPermit<'a> {
    gate: &'a ForwardGate,
}

impl Drop for ForwardPermit<'_> {
    fn drop(&mut self) {
        self.gate.busy.store(false, Ordering::Release);
    }
}
