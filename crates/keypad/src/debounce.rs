//! Press debouncing and hold tracking.

use crate::KeyCode;

/// Default minimum interval between admitted presses.
pub const DEFAULT_DEBOUNCE_MS: u64 = 100;

/// Suppresses rapid repeats and tracks how long the current key is held.
///
/// Releases (`NoKey`) bypass the gate entirely — only presses are debounced.
/// While the window is open the raw key is swallowed and [`KeyCode::Bounce`]
/// is returned instead; the window is *not* extended by bounces, so a run of
/// rapid repeats yields one admitted key followed by bounces until the
/// interval elapses.
pub struct DebounceGate {
    last_key: KeyCode,
    last_press_ms: u64,
    is_pressed: bool,
    debounce_ms: u64,
}

impl DebounceGate {
    /// Gate with the given minimum press interval.
    pub fn new(debounce_ms: u64) -> Self {
        Self {
            last_key: KeyCode::NoKey,
            last_press_ms: 0,
            is_pressed: false,
            debounce_ms,
        }
    }

    /// Configured minimum press interval.
    pub fn debounce_ms(&self) -> u64 {
        self.debounce_ms
    }

    /// Change the minimum press interval.
    pub fn set_debounce_ms(&mut self, debounce_ms: u64) {
        self.debounce_ms = debounce_ms;
    }

    /// Filter one raw decode result.
    ///
    /// - `NoKey` clears the pressed flag and passes through.
    /// - Anything else inside the debounce window becomes `Bounce`; the
    ///   window start is left untouched.
    /// - An admitted `Key` restarts the window and marks the key held.
    /// - `Fail` outside the window passes through without touching state:
    ///   it is an error sentinel, not a press.
    pub fn admit(&mut self, raw: KeyCode, now_ms: u64) -> KeyCode {
        if raw == KeyCode::NoKey {
            self.is_pressed = false;
            self.last_key = KeyCode::NoKey;
            return KeyCode::NoKey;
        }
        if now_ms.saturating_sub(self.last_press_ms) < self.debounce_ms {
            return KeyCode::Bounce;
        }
        if let KeyCode::Key(_) = raw {
            self.last_press_ms = now_ms;
            self.is_pressed = true;
            self.last_key = raw;
        }
        raw
    }

    /// True while a physical key is debounced-active.
    pub fn is_pressed(&self) -> bool {
        self.is_pressed
    }

    /// The key currently (or most recently) held.
    pub fn last_key(&self) -> KeyCode {
        self.last_key
    }

    /// Milliseconds since the window start, regardless of admit/bounce
    /// outcome. Long-press detection reads this, so it is insensitive to
    /// bounce filtering.
    pub fn press_length_millis(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.last_press_ms)
    }
}
