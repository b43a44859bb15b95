//! Playback dispatch — turns admitted key events and dial-buffer state into
//! start/restart/stop decisions for the audio session.
//!
//! Pure control logic, `no_std`, generic over the platform traits: the
//! dispatcher never touches hardware directly and runs unmodified on the
//! host against the platform mocks.

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

pub mod dispatcher;

pub use dispatcher::{DispatchState, Dispatcher, DispatcherConfig, HoldState, DIAL_CAPACITY};
