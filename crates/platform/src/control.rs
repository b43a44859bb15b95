//! Out-of-band control actions
//!
//! Long-press gestures escape the playback state machine entirely: they hand
//! off to the provisioning/maintenance subsystems and never report back.

/// Fire-and-forget control hooks invoked by long-press gestures.
pub trait ControlActions {
    /// Wipe stored WiFi credentials and re-enter the captive portal flow.
    fn trigger_wifi_reset(&mut self);

    /// Enter maintenance mode (sample upload, diagnostics).
    fn enter_maintenance_mode(&mut self);
}
