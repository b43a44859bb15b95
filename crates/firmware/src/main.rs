//! Dialtone Firmware - Main Entry Point
//!
//! Keypad bring-up entry point for the STM32F411 handset board. Scans the
//! PCF8574-backed matrix and logs admitted keys over RTT; the audio and
//! storage backends are wired in by the board support build.
//!
//! | Signal      | MCU pin | Notes                              |
//! |-------------|---------|------------------------------------|
//! | I2C1 SCL    | PB6     | 100 kHz, external pull-up          |
//! | I2C1 SDA    | PB7     | 100 kHz, external pull-up          |
//! | Keypad INT  | PB0     | PCF8574 /INT, falling edge (EXTI0) |

#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_stm32::bind_interrupts;
use embassy_stm32::exti::{Channel as _, ExtiInput};
use embassy_stm32::gpio::{AnyPin, Input, Pull};
use embassy_stm32::i2c::{self, I2c};
use embassy_stm32::peripherals;
use embassy_stm32::time::Hertz;
use embassy_time::{Instant, Timer};

use keypad::{DebounceGate, KeyCode, MatrixGeometry, MatrixScanner};
use platform::signal::{EdgeFlag, KeyChangeSignal};
use platform::{ExpanderBus, Pcf8574Bus};

use firmware::settings::DeviceSettings;
use firmware::{DEFAULT_EXPANDER_ADDRESS, DEFAULT_KEYMAP, POLL_INTERVAL_MS};

use defmt_rtt as _;
use panic_probe as _;

bind_interrupts!(struct Irqs {
    I2C1_EV => i2c::EventInterruptHandler<peripherals::I2C1>;
    I2C1_ER => i2c::ErrorInterruptHandler<peripherals::I2C1>;
});

/// Edge notification shared between the EXTI task and the poll loop.
static KEY_EDGE: EdgeFlag = EdgeFlag::new();

/// Forward PCF8574 /INT falling edges into the poll loop's flag.
///
/// The ISR side never touches the I2C bus; the poll loop does the scan.
#[embassy_executor::task]
async fn key_edge_task(mut int_pin: ExtiInput<'static, AnyPin>) {
    loop {
        int_pin.wait_for_falling_edge().await;
        KEY_EDGE.raise();
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    defmt::info!("Dialtone handset firmware v{=str}", env!("CARGO_PKG_VERSION"));

    let p = embassy_stm32::init(embassy_stm32::Config::default());

    // I2C1 @ 100 kHz — PCF8574 tops out at 100 kHz.
    let i2c = I2c::new(
        p.I2C1,
        p.PB6,
        p.PB7,
        Irqs,
        p.DMA1_CH6,
        p.DMA1_CH0,
        Hertz(100_000),
        i2c::Config::default(),
    );
    let mut bus = Pcf8574Bus::new(i2c);

    // Keypad /INT: falling edge whenever any key level changes.
    let int_pin: ExtiInput<'static, AnyPin> =
        ExtiInput::new(Input::new(p.PB0, Pull::Up).degrade(), p.EXTI0.degrade());
    if spawner.spawn(key_edge_task(int_pin)).is_err() {
        defmt::error!("key edge task failed to spawn");
    }

    let settings = DeviceSettings::default();
    let (geometry, fell_back) = MatrixGeometry::from_config(settings.keypad_mode);
    if fell_back {
        defmt::warn!(
            "keypad mode {=u8} not recognized, falling back to 4x4",
            settings.keypad_mode
        );
    }
    let scanner = MatrixScanner::new(DEFAULT_EXPANDER_ADDRESS, geometry);
    let mut gate = DebounceGate::new(u64::from(settings.debounce_ms));

    // Drive the row probe so the expander's row lines become inputs and the
    // interrupt line arms, then confirm the device ACKs.
    if bus
        .write_mask(DEFAULT_EXPANDER_ADDRESS, geometry.row_probe())
        .await
        .is_err()
    {
        defmt::error!("expander did not accept the row probe");
    }
    match bus.probe(DEFAULT_EXPANDER_ADDRESS).await {
        Ok(()) => defmt::info!(
            "PCF8574 present at {=u8:#x}, layout {}",
            DEFAULT_EXPANDER_ADDRESS,
            geometry
        ),
        Err(_) => defmt::error!("no PCF8574 at {=u8:#x}", DEFAULT_EXPANDER_ADDRESS),
    }

    loop {
        if KEY_EDGE.take() {
            let now_ms = Instant::now().as_millis();
            let raw = scanner.decode(&mut bus).await;
            match gate.admit(raw, now_ms) {
                key @ KeyCode::Key(_) => {
                    defmt::info!("key: {}", DEFAULT_KEYMAP.char_for(key));
                }
                KeyCode::Fail => defmt::warn!("scan failed"),
                KeyCode::NoKey | KeyCode::Bounce => {}
            }
        }
        Timer::after_millis(POLL_INTERVAL_MS).await;
    }
}
