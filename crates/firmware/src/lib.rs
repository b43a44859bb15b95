//! Dialtone handset firmware
//!
//! Application layer for the toy-telephone handset: wires the keypad decoder
//! and the playback dispatcher to a concrete board, and owns the bits of
//! persistent state the lower crates stay agnostic about (device settings,
//! WiFi provisioning secrets).
//!
//! # Architecture
//!
//! ```text
//! Application Layer (this crate: handset loop, settings, provisioning)
//!         ↓
//! Feature Layers (keypad, dialer)
//!         ↓
//! Platform HAL (trait abstractions)
//!         ↓
//! Hardware Layer (Embassy, STM32)
//! ```
//!
//! # Features
//!
//! - `hardware` - Build for the STM32F411 target (Embassy, defmt/RTT)
//! - `std` - Host builds: platform mocks and local storage
//!
//! ```bash
//! cargo build --release --target thumbv7em-none-eabihf --features hardware
//! ```

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::await_holding_lock)] // holding a blocking Mutex across .await is a bug
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::print_stdout)] // prefer defmt over println! in lib code
#![warn(clippy::dbg_macro)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod handset;
pub mod provisioning;
pub mod settings;

pub use handset::{Handset, DEFAULT_EXPANDER_ADDRESS, DEFAULT_KEYMAP, POLL_INTERVAL_MS};
pub use provisioning::{WifiSecrets, SECRETS_PATH};
pub use settings::{DeviceSettings, SETTINGS_PATH};
