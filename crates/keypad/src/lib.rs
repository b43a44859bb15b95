//! Keypad decoding core — matrix scan, debounce, dial buffer.
//!
//! Pure, `no_std`, allocation-free. The only I/O is the two-probe matrix
//! scan in [`MatrixScanner`], expressed through the
//! [`platform::ExpanderBus`] trait so the whole pipeline runs on the host
//! against scripted mocks.
//!
//! Pipeline, in poll-cycle order:
//!
//! ```text
//! ExpanderBus reads ──► MatrixScanner::decode ──► KeyCode
//!                        DebounceGate::admit  ──► KeyCode (Bounce-filtered)
//!                        DialBuffer::push     ──► rolling dial window
//! ```

#![cfg_attr(not(test), no_std)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod debounce;
pub mod dial;
pub mod geometry;
pub mod keymap;
pub mod scanner;

pub use debounce::DebounceGate;
pub use dial::DialBuffer;
pub use geometry::MatrixGeometry;
pub use keymap::{KeyMap, KeyMapError, KEYMAP_LEN};
pub use scanner::MatrixScanner;

/// Outcome of one decode pass: a physical key or a sentinel.
///
/// Sentinels are decoding outcomes, not keys: `NoKey` is the idle matrix,
/// `Fail` covers both transport errors and ambiguous/unrecognized scan
/// patterns, `Bounce` is a suppressed rapid repeat. Callers must never
/// conflate `NoKey` (idle) with `Fail` (error).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyCode {
    /// A decoded physical key, index in `[0, 15]`.
    Key(u8),
    /// No row is pulled low: the matrix is idle.
    NoKey,
    /// Transport error or unrecognized scan pattern (e.g. two keys at once).
    Fail,
    /// Repeat within the debounce window; the press was not forwarded.
    Bounce,
}

impl KeyCode {
    /// Key-map slot for `NoKey`.
    pub const NOKEY_INDEX: usize = 16;
    /// Key-map slot for `Fail`.
    pub const FAIL_INDEX: usize = 17;
    /// Key-map slot for `Bounce`.
    pub const BOUNCE_INDEX: usize = 18;

    /// Key-map index in `[0, 18]` — 16 keys plus the three sentinels.
    pub fn index(self) -> usize {
        match self {
            KeyCode::Key(k) => usize::from(k),
            KeyCode::NoKey => Self::NOKEY_INDEX,
            KeyCode::Fail => Self::FAIL_INDEX,
            KeyCode::Bounce => Self::BOUNCE_INDEX,
        }
    }

    /// True for a physical key, false for any sentinel.
    pub fn is_key(self) -> bool {
        matches!(self, KeyCode::Key(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_indices_follow_the_sixteen_keys() {
        assert_eq!(KeyCode::Key(0).index(), 0);
        assert_eq!(KeyCode::Key(15).index(), 15);
        assert_eq!(KeyCode::NoKey.index(), 16);
        assert_eq!(KeyCode::Fail.index(), 17);
        assert_eq!(KeyCode::Bounce.index(), 18);
    }

    #[test]
    fn only_physical_keys_report_is_key() {
        assert!(KeyCode::Key(7).is_key());
        assert!(!KeyCode::NoKey.is_key());
        assert!(!KeyCode::Fail.is_key());
        assert!(!KeyCode::Bounce.is_key());
    }
}
