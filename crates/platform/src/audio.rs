//! Audio session abstraction
//!
//! The decoder/output pipeline is an external collaborator: the core only
//! opens a file-backed session, polls it forward, and stops it. Codec
//! internals never leak through this trait.

/// A file-backed audio decode/output session.
pub trait AudioSession {
    /// Error type
    type Error: core::fmt::Debug;

    /// Open the sample at `path` and start decoding.
    ///
    /// Returns `Ok(false)` when the decoder refused the file (corrupt header,
    /// codec mismatch). That is a soft failure: the caller treats it as an
    /// immediately-completed session, not a crash.
    fn open(
        &mut self,
        path: &str,
    ) -> impl core::future::Future<Output = Result<bool, Self::Error>>;

    /// True while a session is actively decoding.
    fn is_running(&self) -> bool;

    /// Advance the decoder by one slice of work.
    ///
    /// Returns `false` once the stream has ended; the caller must then
    /// [`stop`](AudioSession::stop) the session.
    fn poll(&mut self) -> impl core::future::Future<Output = bool>;

    /// Stop the session synchronously. Idempotent.
    fn stop(&mut self) -> impl core::future::Future<Output = ()>;
}
