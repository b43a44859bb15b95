//! The playback dispatcher state machine.

use core::fmt::Write as _;

use keypad::DialBuffer;
use platform::{AudioSession, ControlActions, Storage};

/// Compile-time dial window capacity.
pub const DIAL_CAPACITY: usize = 16;

/// Longest sample path: `/` + dial window + `.mp3`.
type SamplePath = heapless::String<24>;

/// Dispatcher state, reconciled once per poll cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchState {
    /// Nothing dialed, nothing playing.
    Idle,
    /// Digits buffered, waiting for more (or for a match).
    Collecting,
    /// An audio session is active.
    Playing,
}

/// Tuning knobs for the dispatcher.
#[derive(Debug, Clone, Copy)]
pub struct DispatcherConfig {
    /// Dial matching starts once the buffer is strictly longer than this.
    pub min_dial_len: usize,
    /// Hold duration that turns a press into a control gesture.
    pub long_press_ms: u64,
    /// Held this long, triggers a WiFi credential reset. A tap clears the
    /// dial buffer.
    pub wifi_reset_char: char,
    /// Held this long, enters maintenance mode. A tap clears the dial buffer.
    pub maintenance_char: char,
    /// Runtime dial window (≤ [`DIAL_CAPACITY`]).
    pub dial_depth: usize,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            min_dial_len: 2,
            long_press_ms: 5_000,
            wifi_reset_char: '*',
            maintenance_char: '#',
            dial_depth: DIAL_CAPACITY,
        }
    }
}

/// Debounce-gate snapshot handed to the dispatcher each cycle.
///
/// Long-press detection runs off this snapshot every cycle — a held key
/// produces no new edges, so gestures cannot depend on fresh key events.
#[derive(Debug, Clone, Copy)]
pub struct HoldState {
    /// True while a physical key is debounced-active.
    pub is_pressed: bool,
    /// Character of the held key, when pressed.
    pub held: Option<char>,
    /// Milliseconds the key has been held.
    pub press_ms: u64,
}

impl HoldState {
    /// Snapshot with nothing held.
    pub fn released() -> Self {
        Self {
            is_pressed: false,
            held: None,
            press_ms: 0,
        }
    }
}

/// Consumes key events and buffer state; starts, restarts, and stops
/// playback under single-shot-trigger constraints.
///
/// Owns the dial buffer and all per-device dispatch state. One instance per
/// handset; every mutation happens inside [`service`](Dispatcher::service),
/// so a poll cycle sees one consistent snapshot.
pub struct Dispatcher {
    state: DispatchState,
    dial: DialBuffer<DIAL_CAPACITY>,
    /// Monotonicity guard: dial matching re-runs only when the buffer has
    /// grown past the last length it was checked at.
    last_len_checked: usize,
    /// Latch: the long-press action already fired for the current hold.
    gesture_fired: bool,
    /// Path of the running sample, while `Playing`.
    active: Option<SamplePath>,
    config: DispatcherConfig,
}

impl Dispatcher {
    /// Dispatcher in `Idle` with the given configuration.
    pub fn new(config: DispatcherConfig) -> Self {
        Self {
            state: DispatchState::Idle,
            dial: DialBuffer::with_depth(config.dial_depth),
            last_len_checked: 0,
            gesture_fired: false,
            active: None,
            config,
        }
    }

    /// Current state.
    pub fn state(&self) -> DispatchState {
        self.state
    }

    /// Digits dialed so far, oldest first.
    pub fn dialed(&self) -> heapless::String<DIAL_CAPACITY> {
        self.dial.contents()
    }

    /// Path of the active sample; `None` unless `Playing`.
    pub fn active_path(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Run one poll cycle.
    ///
    /// `event` is the key admitted by the debounce gate this cycle, if any
    /// (sentinels never reach the dispatcher). `held` is the gate's hold
    /// snapshot taken at the same instant. The dispatcher must be serviced
    /// every cycle even without an event: playback completion and long-press
    /// expiry are asynchronous and can only be observed by polling.
    pub async fn service<A, S, C>(
        &mut self,
        event: Option<char>,
        held: HoldState,
        audio: &mut A,
        store: &mut S,
        controls: &mut C,
    ) where
        A: AudioSession,
        S: Storage,
        C: ControlActions,
    {
        self.service_gesture(held, controls);
        self.service_playback(audio).await;
        if let Some(ch) = event {
            self.service_key(ch, audio, store).await;
        }
        self.service_dial_match(audio, store).await;
        self.reconcile();
    }

    /// Long-press gestures, latched to fire once per continuous hold.
    fn service_gesture<C: ControlActions>(&mut self, held: HoldState, controls: &mut C) {
        if !held.is_pressed {
            // Release re-arms the gesture; nothing else does.
            self.gesture_fired = false;
            return;
        }
        if self.gesture_fired || held.press_ms < self.config.long_press_ms {
            return;
        }
        match held.held {
            Some(ch) if ch == self.config.wifi_reset_char => {
                controls.trigger_wifi_reset();
                self.gesture_fired = true;
            }
            Some(ch) if ch == self.config.maintenance_char => {
                controls.enter_maintenance_mode();
                self.gesture_fired = true;
            }
            _ => {}
        }
    }

    /// Poll the active session; fold completion back into `Idle`.
    async fn service_playback<A: AudioSession>(&mut self, audio: &mut A) {
        if self.state != DispatchState::Playing {
            return;
        }
        if audio.is_running() {
            if !audio.poll().await {
                audio.stop().await;
                // Buffer is preserved: the user can keep dialing after a
                // per-key chime finishes.
                self.state = DispatchState::Idle;
                self.active = None;
            }
        } else {
            self.state = DispatchState::Idle;
            self.active = None;
        }
    }

    /// Handle one admitted key: clear gestures, buffer growth, per-key chime.
    async fn service_key<A, S>(&mut self, ch: char, audio: &mut A, store: &mut S)
    where
        A: AudioSession,
        S: Storage,
    {
        if ch == self.config.wifi_reset_char || ch == self.config.maintenance_char {
            // Terminator symbols clear unconditionally, whatever is playing.
            self.dial.clear();
            self.last_len_checked = 0;
            return;
        }

        self.dial.push(ch);

        // Immediate per-key feedback takes priority over multi-digit dialing.
        let Some(path) = key_path(ch) else { return };
        if !exists(store, &path).await {
            // Missing sample is not an error; stay put.
            return;
        }
        if audio.is_running() {
            audio.stop().await;
        }
        self.start(audio, &path).await;
    }

    /// Match the accumulated dial sequence against the sample store.
    async fn service_dial_match<A, S>(&mut self, audio: &mut A, store: &mut S)
    where
        A: AudioSession,
        S: Storage,
    {
        if self.state == DispatchState::Playing {
            return;
        }
        let len = self.dial.len();
        if len <= self.config.min_dial_len || len <= self.last_len_checked {
            return;
        }
        self.last_len_checked = len;

        let Some(path) = dial_path(&self.dial.contents()) else {
            return;
        };
        if !exists(store, &path).await {
            // No match yet: keep collecting, keep the buffer.
            return;
        }
        self.start(audio, &path).await;
        if self.state == DispatchState::Playing {
            self.dial.clear();
            self.last_len_checked = 0;
        }
    }

    /// Open a session; a decoder refusal is logged and treated as an
    /// immediately completed stream, never retried.
    async fn start<A: AudioSession>(&mut self, audio: &mut A, path: &SamplePath) {
        match audio.open(path.as_str()).await {
            Ok(true) => {
                self.state = DispatchState::Playing;
                self.active = Some(path.clone());
            }
            _ => {
                #[cfg(feature = "defmt")]
                defmt::warn!("sample {=str} exists but would not open", path.as_str());
                audio.stop().await;
                self.state = DispatchState::Idle;
                self.active = None;
            }
        }
    }

    fn reconcile(&mut self) {
        self.state = match self.state {
            DispatchState::Playing => DispatchState::Playing,
            _ if self.dial.is_empty() => DispatchState::Idle,
            _ => DispatchState::Collecting,
        };
    }
}

async fn exists<S: Storage>(store: &mut S, path: &SamplePath) -> bool {
    matches!(store.exists(path.as_str()).await, Ok(true))
}

/// `/<ch>.mp3`
fn key_path(ch: char) -> Option<SamplePath> {
    let mut path = SamplePath::new();
    write!(path, "/{ch}.mp3").ok()?;
    Some(path)
}

/// `/<digits>.mp3`
fn dial_path(digits: &heapless::String<DIAL_CAPACITY>) -> Option<SamplePath> {
    let mut path = SamplePath::new();
    write!(path, "/{digits}.mp3").ok()?;
    Some(path)
}
