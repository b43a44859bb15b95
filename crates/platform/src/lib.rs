//! Hardware Abstraction Layer (HAL) for the Dialtone toy telephone
//!
//! This crate provides trait-based abstractions for every external
//! collaborator the keypad/playback core talks to, enabling development and
//! testing without physical hardware.
//!
//! # Architecture Layers
//!
//! ```text
//! Application Layer (firmware crate)
//!         ↓
//! Feature Layers (keypad, dialer)
//!         ↓
//! Platform HAL (this crate - trait abstractions)
//!         ↓
//! Hardware Layer (Embassy HAL + PAC)
//! ```
//!
//! # Abstractions
//!
//! - [`AudioSession`] - file-backed audio decode/output pipeline
//! - [`Storage`] / [`File`] - sample and settings file access
//! - [`ExpanderBus`] - I2C port-expander transport (keypad matrix)
//! - [`ControlActions`] - out-of-band control gestures (WiFi reset, maintenance)
//! - [`KeyChangeSignal`] - edge-interrupt-to-poll handoff flag
//!
//! # Features
//!
//! - `std`: Enable standard library support (mocks + local storage for tests)
//! - `defmt`: Enable defmt logging derives (hardware builds only)

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::must_use_candidate)] // hardware accessors — callers decide
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]
#![allow(async_fn_in_trait)] // Embassy no_std: single-threaded, Send bounds not needed

#[cfg(feature = "std")]
extern crate std;

pub mod audio;
pub mod bus;
pub mod control;
pub mod signal;
pub mod storage;

#[cfg(any(test, feature = "std"))]
pub mod mocks;
#[cfg(feature = "std")]
pub mod storage_local;

pub use audio::AudioSession;
pub use bus::{ExpanderBus, Pcf8574Bus};
pub use control::ControlActions;
pub use signal::{EdgeFlag, KeyChangeSignal};
pub use storage::{File, Storage};
