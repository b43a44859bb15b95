//! Interrupt-to-poll handoff
//!
//! The keypad expander raises a hardware edge when any key level changes.
//! The interrupt handler must not touch the I2C bus, so it only raises this
//! flag; the poll loop consumes it and performs the actual scan. A single
//! slot suffices: the scan always re-reads live hardware state, so at most
//! one pending "something changed" notification needs to survive.

use core::sync::atomic::{AtomicBool, Ordering};

/// Single-slot edge notification, set by the ISR, cleared by the poll loop.
pub trait KeyChangeSignal {
    /// Producer side: mark that a key level changed. Safe from ISR context.
    fn raise(&self);

    /// Consumer side: take the pending notification, clearing it.
    fn take(&self) -> bool;
}

/// Lock-free [`KeyChangeSignal`] backed by an [`AtomicBool`].
///
/// Usable as a `static`: both sides take `&self`.
pub struct EdgeFlag {
    raised: AtomicBool,
}

impl EdgeFlag {
    /// Create a lowered flag.
    pub const fn new() -> Self {
        Self {
            raised: AtomicBool::new(false),
        }
    }
}

impl Default for EdgeFlag {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyChangeSignal for EdgeFlag {
    fn raise(&self) {
        self.raised.store(true, Ordering::Release);
    }

    fn take(&self) -> bool {
        self.raised.swap(false, Ordering::AcqRel)
    }
}
