//! The handset poll loop: scanner → debounce gate → key map → dispatcher.
//!
//! [`Handset`] is the composition root. It owns one instance of every stage
//! and threads a single time snapshot through each poll cycle, so debounce
//! and long-press decisions within a cycle can never disagree about "now".
//!
//! The keypad is scanned only when the expander's interrupt line has raised
//! the [`KeyChangeSignal`] since the last cycle; an idle handset costs no bus
//! traffic at all. Playback and gesture expiry are still serviced every
//! cycle — both complete asynchronously and can only be observed by polling.

use dialer::{DispatchState, Dispatcher, DispatcherConfig, HoldState};
use keypad::{DebounceGate, KeyCode, KeyMap, MatrixGeometry, MatrixScanner, KEYMAP_LEN};
use platform::{AudioSession, ControlActions, ExpanderBus, KeyChangeSignal, Storage};

use crate::settings::DeviceSettings;

/// Poll cadence of the handset loop.
pub const POLL_INTERVAL_MS: u64 = 10;

/// PCF8574 with all address pins grounded.
pub const DEFAULT_EXPANDER_ADDRESS: u8 = 0x20;

/// Stock 4×4 telephone layout (`key = row + 4·col`), sentinel slots last.
///
/// The sentinel characters never reach the dispatcher; they only show up in
/// scan logs.
pub const DEFAULT_KEYMAP: KeyMap = KeyMap::new(default_keymap_table());

const fn default_keymap_table() -> [char; KEYMAP_LEN] {
    [
        '1', '4', '7', '*', // column 0
        '2', '5', '8', '0', // column 1
        '3', '6', '9', '#', // column 2
        'A', 'B', 'C', 'D', // column 3
        ' ', '!', '?', // NoKey / Fail / Bounce
    ]
}

/// One assembled handset: keypad pipeline plus playback dispatch.
///
/// Generic over the platform traits so the same composition runs against the
/// board's peripherals and against the host mocks.
pub struct Handset<'a, B, A, S, C, G>
where
    B: ExpanderBus,
    A: AudioSession,
    S: Storage,
    C: ControlActions,
    G: KeyChangeSignal,
{
    scanner: MatrixScanner,
    gate: DebounceGate,
    keymap: KeyMap,
    dispatcher: Dispatcher,
    bus: B,
    audio: A,
    store: S,
    controls: C,
    signal: &'a G,
}

impl<'a, B, A, S, C, G> Handset<'a, B, A, S, C, G>
where
    B: ExpanderBus,
    A: AudioSession,
    S: Storage,
    C: ControlActions,
    G: KeyChangeSignal,
{
    /// Assemble a handset from its collaborators and the persisted settings.
    ///
    /// An unrecognized keypad mode in `settings` falls back to 4×4; the
    /// fallback is logged rather than silently absorbed.
    #[allow(clippy::too_many_arguments)] // composition root: one slot per collaborator
    pub fn new(
        settings: &DeviceSettings,
        keymap: KeyMap,
        bus: B,
        audio: A,
        store: S,
        controls: C,
        signal: &'a G,
    ) -> Self {
        let (geometry, fell_back) = MatrixGeometry::from_config(settings.keypad_mode);
        if fell_back {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "keypad mode {=u8} not recognized, falling back to 4x4",
                settings.keypad_mode
            );
        }
        let config = DispatcherConfig {
            long_press_ms: u64::from(settings.long_press_ms),
            dial_depth: usize::from(settings.dial_depth),
            ..DispatcherConfig::default()
        };
        Self {
            scanner: MatrixScanner::new(DEFAULT_EXPANDER_ADDRESS, geometry),
            gate: DebounceGate::new(u64::from(settings.debounce_ms)),
            keymap,
            dispatcher: Dispatcher::new(config),
            bus,
            audio,
            store,
            controls,
            signal,
        }
    }

    /// Prepare the expander: drive the row probe so row lines become inputs
    /// (arming the interrupt line), then check the device ACKs at all.
    ///
    /// Returns `false` when the expander is absent or the bus is dead; the
    /// caller decides whether to retry or run deaf.
    pub async fn init(&mut self) -> bool {
        let probe = self.scanner.geometry().row_probe();
        if self
            .bus
            .write_mask(self.scanner.address(), probe)
            .await
            .is_err()
        {
            return false;
        }
        self.bus.probe(self.scanner.address()).await.is_ok()
    }

    /// Run one poll cycle at the given millisecond timestamp.
    ///
    /// Scans the matrix only if the change signal was raised; always services
    /// the dispatcher so running playback and held gestures make progress.
    pub async fn poll_once(&mut self, now_ms: u64) {
        let mut event = None;
        if self.signal.take() {
            let raw = self.scanner.decode(&mut self.bus).await;
            let admitted = self.gate.admit(raw, now_ms);
            if let KeyCode::Key(_) = admitted {
                let ch = self.keymap.char_for(admitted);
                #[cfg(feature = "defmt")]
                defmt::debug!("key admitted: {}", ch);
                event = Some(ch);
            }
        }

        let held = if self.gate.is_pressed() {
            HoldState {
                is_pressed: true,
                held: match self.gate.last_key() {
                    key @ KeyCode::Key(_) => Some(self.keymap.char_for(key)),
                    _ => None,
                },
                press_ms: self.gate.press_length_millis(now_ms),
            }
        } else {
            HoldState::released()
        };

        self.dispatcher
            .service(event, held, &mut self.audio, &mut self.store, &mut self.controls)
            .await;
    }

    /// Current dispatcher state.
    pub fn state(&self) -> DispatchState {
        self.dispatcher.state()
    }

    /// The playback dispatcher (dial buffer, state).
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// The audio session collaborator.
    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// The control-actions collaborator.
    pub fn controls(&self) -> &C {
        &self.controls
    }

    /// The expander bus collaborator.
    pub fn bus(&self) -> &B {
        &self.bus
    }

    /// Active matrix layout (after any configuration fallback).
    pub fn geometry(&self) -> MatrixGeometry {
        self.scanner.geometry()
    }

    /// Drive the poll loop forever at [`POLL_INTERVAL_MS`].
    #[cfg(feature = "hardware")]
    pub async fn run(&mut self) -> ! {
        loop {
            let now_ms = embassy_time::Instant::now().as_millis();
            self.poll_once(now_ms).await;
            embassy_time::Timer::after_millis(POLL_INTERVAL_MS).await;
        }
    }
}
