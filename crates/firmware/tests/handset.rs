//! Whole-pipeline tests: scripted bus edges in, dispatcher effects out.

use firmware::handset::{Handset, DEFAULT_KEYMAP};
use firmware::settings::DeviceSettings;
use platform::mocks::{MockAudio, MockBus, MockControls, MockStorage};
use platform::signal::{EdgeFlag, KeyChangeSignal as _};

type TestHandset<'a> = Handset<'a, MockBus, MockAudio, MockStorage, MockControls, EdgeFlag>;

fn handset<'a>(bus: MockBus, store: MockStorage, flag: &'a EdgeFlag) -> TestHandset<'a> {
    Handset::new(
        &DeviceSettings::default(),
        DEFAULT_KEYMAP,
        bus,
        MockAudio::new(),
        store,
        MockControls::new(),
        flag,
    )
}

// 4×4 scan exchanges: row probe 0xF0, column probe 0x0F.
fn script_press(bus: &mut MockBus, row_reading: u8, col_reading: u8) {
    bus.on_probe(0xF0, row_reading).on_probe(0x0F, col_reading);
}

#[tokio::test]
async fn admitted_keys_flow_through_to_a_dialed_match() {
    let mut bus = MockBus::new();
    script_press(&mut bus, 0xE0, 0x0E); // key 0  -> '1'
    script_press(&mut bus, 0xE0, 0x0D); // key 4  -> '2'
    script_press(&mut bus, 0xE0, 0x0B); // key 8  -> '3'
    let flag = EdgeFlag::new();
    let mut handset = handset(bus, MockStorage::with_files(&["/123.mp3"]), &flag);

    for now_ms in [1_000, 2_000, 3_000] {
        flag.raise();
        handset.poll_once(now_ms).await;
    }

    assert!(handset.bus().done(), "all scripted exchanges consumed");
    assert_eq!(handset.audio().last_opened(), Some("/123.mp3"));
    assert_eq!(handset.dispatcher().dialed().as_str(), "");
}

#[tokio::test]
async fn no_edge_means_no_bus_traffic() {
    let mut bus = MockBus::new();
    script_press(&mut bus, 0xE0, 0x0E);
    let flag = EdgeFlag::new();
    let mut handset = handset(bus, MockStorage::new(), &flag);

    // Signal never raised: the scan must not run.
    handset.poll_once(1_000).await;
    handset.poll_once(2_000).await;

    assert!(!handset.bus().done(), "scripted exchange left untouched");
    assert_eq!(handset.dispatcher().dialed().as_str(), "");
}

#[tokio::test]
async fn bounced_repeats_do_not_dial_twice() {
    let mut bus = MockBus::new();
    script_press(&mut bus, 0xE0, 0x0E); // '1' admitted
    script_press(&mut bus, 0xE0, 0x0E); // '1' again, inside the window
    let flag = EdgeFlag::new();
    let mut handset = handset(bus, MockStorage::new(), &flag);

    flag.raise();
    handset.poll_once(1_000).await;
    flag.raise();
    handset.poll_once(1_050).await; // default window is 100 ms

    assert!(handset.bus().done());
    assert_eq!(handset.dispatcher().dialed().as_str(), "1");
}

#[tokio::test]
async fn holding_star_triggers_a_wifi_reset() {
    let mut bus = MockBus::new();
    script_press(&mut bus, 0x70, 0x0E); // key 3 -> '*'
    let flag = EdgeFlag::new();
    let mut handset = handset(bus, MockStorage::new(), &flag);

    flag.raise();
    handset.poll_once(1_000).await;
    assert_eq!(handset.controls().wifi_resets(), 0);

    // No new edges while the key is held; the gate's hold time carries it.
    handset.poll_once(4_000).await;
    assert_eq!(handset.controls().wifi_resets(), 0);
    handset.poll_once(6_100).await; // past the 5 s threshold
    assert_eq!(handset.controls().wifi_resets(), 1);
    handset.poll_once(9_000).await; // still held: latched, no re-fire
    assert_eq!(handset.controls().wifi_resets(), 1);
}

#[tokio::test]
async fn init_reports_expander_presence() {
    let mut bus = MockBus::new();
    bus.on_probe(0xF0, 0xF0);
    let flag = EdgeFlag::new();
    let mut handset = handset(bus, MockStorage::new(), &flag);
    assert!(handset.init().await);
}

#[tokio::test]
async fn init_fails_when_the_expander_is_absent() {
    let mut bus = MockBus::new();
    bus.on_probe(0xF0, 0xF0);
    bus.set_probe_acks(false);
    let flag = EdgeFlag::new();
    let mut handset = handset(bus, MockStorage::new(), &flag);
    assert!(!handset.init().await);
}

#[tokio::test]
async fn unknown_keypad_mode_falls_back_to_four_by_four() {
    let settings = DeviceSettings {
        keypad_mode: 99,
        ..DeviceSettings::default()
    };
    let flag = EdgeFlag::new();
    let handset: TestHandset = Handset::new(
        &settings,
        DEFAULT_KEYMAP,
        MockBus::new(),
        MockAudio::new(),
        MockStorage::new(),
        MockControls::new(),
        &flag,
    );
    assert_eq!(handset.geometry(), keypad::MatrixGeometry::FourByFour);
}
