//! Mock implementations for testing
//!
//! This module provides scripted mock implementations of all platform traits
//! for use in unit and integration tests. Everything is heapless so host
//! tests exercise the same allocation limits the device lives with.

#![cfg(any(test, feature = "std"))]

use thiserror_no_std::Error;

use crate::audio::AudioSession;
use crate::bus::ExpanderBus;
use crate::control::ControlActions;
use crate::storage::{File, Storage};

// ---------------------------------------------------------------------------
// MockBus — scripted expander exchanges
// ---------------------------------------------------------------------------

/// Error type reported by [`MockBus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BusFault {
    /// A write arrived that the script did not expect.
    #[error("unexpected write to expander")]
    UnexpectedWrite,
    /// A read arrived that the script did not expect.
    #[error("unexpected read from expander")]
    UnexpectedRead,
    /// Scripted NACK.
    #[error("expander did not acknowledge")]
    Nack,
}

enum Step {
    /// Expect `write_mask(mask)` then `read_port()` returning `value`.
    Reply { mask: u8, value: u8 },
    /// Expect `write_mask(mask)` and NACK it.
    NackWrite { mask: u8 },
    /// Expect `write_mask(mask)`, ACK it, then NACK the read.
    NackRead { mask: u8 },
}

impl Step {
    fn mask(&self) -> u8 {
        match self {
            Step::Reply { mask, .. } | Step::NackWrite { mask } | Step::NackRead { mask } => *mask,
        }
    }
}

/// Scripted [`ExpanderBus`]: expectations are consumed in FIFO order.
pub struct MockBus {
    steps: heapless::Deque<Step, 32>,
    probe_acks: bool,
}

impl MockBus {
    /// New bus with an empty script; probes ACK by default.
    pub fn new() -> Self {
        Self {
            steps: heapless::Deque::new(),
            probe_acks: true,
        }
    }

    /// Expect a `mask` probe answered with `value`.
    pub fn on_probe(&mut self, mask: u8, value: u8) -> &mut Self {
        self.steps.push_back(Step::Reply { mask, value }).ok();
        self
    }

    /// Expect a `mask` probe whose write transaction is NACKed.
    pub fn nack_write(&mut self, mask: u8) -> &mut Self {
        self.steps.push_back(Step::NackWrite { mask }).ok();
        self
    }

    /// Expect a `mask` probe whose read transaction is NACKed.
    pub fn nack_read(&mut self, mask: u8) -> &mut Self {
        self.steps.push_back(Step::NackRead { mask }).ok();
        self
    }

    /// Make address probes fail (device unplugged).
    pub fn set_probe_acks(&mut self, acks: bool) {
        self.probe_acks = acks;
    }

    /// True once the whole script has been consumed.
    pub fn done(&self) -> bool {
        self.steps.is_empty()
    }
}

impl Default for MockBus {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpanderBus for MockBus {
    type Error = BusFault;

    async fn write_mask(&mut self, _address: u8, mask: u8) -> Result<(), BusFault> {
        match self.steps.front() {
            Some(step) if step.mask() == mask => match step {
                Step::NackWrite { .. } => {
                    self.steps.pop_front();
                    Err(BusFault::Nack)
                }
                // Leave Reply/NackRead in place for the paired read.
                _ => Ok(()),
            },
            _ => Err(BusFault::UnexpectedWrite),
        }
    }

    async fn read_port(&mut self, _address: u8) -> Result<u8, BusFault> {
        match self.steps.pop_front() {
            Some(Step::Reply { value, .. }) => Ok(value),
            Some(Step::NackRead { .. }) => Err(BusFault::Nack),
            _ => Err(BusFault::UnexpectedRead),
        }
    }

    async fn probe(&mut self, _address: u8) -> Result<(), BusFault> {
        if self.probe_acks {
            Ok(())
        } else {
            Err(BusFault::Nack)
        }
    }
}

// ---------------------------------------------------------------------------
// MockAudio — records opens/stops, scripted poll outcomes
// ---------------------------------------------------------------------------

/// Scripted [`AudioSession`].
pub struct MockAudio {
    running: bool,
    polls_left: usize,
    refuse_open: bool,
    opened: heapless::Vec<heapless::String<24>, 8>,
    stop_count: usize,
}

impl MockAudio {
    /// New idle session; every open succeeds and streams end immediately.
    pub fn new() -> Self {
        Self {
            running: false,
            polls_left: 0,
            refuse_open: false,
            opened: heapless::Vec::new(),
            stop_count: 0,
        }
    }

    /// Let the next session report "still running" for `n` polls.
    pub fn set_polls_remaining(&mut self, n: usize) {
        self.polls_left = n;
    }

    /// Make `open` report the decoder refused the file.
    pub fn set_refuse_open(&mut self, refuse: bool) {
        self.refuse_open = refuse;
    }

    /// Paths opened so far, in order.
    pub fn opened(&self) -> &[heapless::String<24>] {
        &self.opened
    }

    /// Most recently opened path.
    pub fn last_opened(&self) -> Option<&str> {
        self.opened.last().map(heapless::String::as_str)
    }

    /// Number of `stop` calls observed.
    pub fn stop_count(&self) -> usize {
        self.stop_count
    }
}

impl Default for MockAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioSession for MockAudio {
    type Error = core::convert::Infallible;

    async fn open(&mut self, path: &str) -> Result<bool, Self::Error> {
        if self.refuse_open {
            return Ok(false);
        }
        self.opened
            .push(heapless::String::try_from(path).unwrap_or_default())
            .ok();
        self.running = true;
        Ok(true)
    }

    fn is_running(&self) -> bool {
        self.running
    }

    async fn poll(&mut self) -> bool {
        if self.polls_left > 0 {
            self.polls_left = self.polls_left.saturating_sub(1);
            true
        } else {
            false
        }
    }

    async fn stop(&mut self) {
        self.running = false;
        self.stop_count = self.stop_count.saturating_add(1);
    }
}

// ---------------------------------------------------------------------------
// MockStorage — in-memory file map
// ---------------------------------------------------------------------------

/// Error type reported by [`MockStorage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MockStorageError {
    /// Path not present in the mock filesystem.
    #[error("no such file")]
    NotFound,
    /// The mock's fixed capacity is exhausted.
    #[error("mock filesystem full")]
    Full,
}

type MockPath = heapless::String<32>;
type MockBytes = heapless::Vec<u8, 256>;

/// In-memory [`Storage`] with a bounded file table.
pub struct MockStorage {
    files: heapless::Vec<(MockPath, MockBytes), 8>,
}

impl MockStorage {
    /// Empty filesystem.
    pub fn new() -> Self {
        Self {
            files: heapless::Vec::new(),
        }
    }

    /// Filesystem pre-populated with empty files at `paths`.
    pub fn with_files(paths: &[&str]) -> Self {
        let mut storage = Self::new();
        for path in paths {
            storage.add_file(path, &[]);
        }
        storage
    }

    /// Add (or replace) a file.
    pub fn add_file(&mut self, path: &str, data: &[u8]) {
        let key = MockPath::try_from(path).unwrap_or_default();
        let bytes = MockBytes::from_slice(data).unwrap_or_default();
        if let Some(slot) = self.files.iter_mut().find(|(p, _)| p == &key) {
            slot.1 = bytes;
        } else {
            self.files.push((key, bytes)).ok();
        }
    }

    /// Raw contents of `path`, if present.
    pub fn contents(&self, path: &str) -> Option<&[u8]> {
        self.files
            .iter()
            .find(|(p, _)| p.as_str() == path)
            .map(|(_, data)| data.as_slice())
    }
}

impl Default for MockStorage {
    fn default() -> Self {
        Self::new()
    }
}

/// An open file handle into a [`MockStorage`] (owns a copy of the data).
pub struct MockFile {
    data: MockBytes,
    pos: usize,
}

impl File for MockFile {
    type Error = MockStorageError;

    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let remaining = self.data.get(self.pos..).unwrap_or(&[]);
        let n = remaining.len().min(buf.len());
        if let (Some(dst), Some(src)) = (buf.get_mut(..n), remaining.get(..n)) {
            dst.copy_from_slice(src);
        }
        self.pos = self.pos.saturating_add(n);
        Ok(n)
    }

    async fn seek(&mut self, pos: u64) -> Result<u64, Self::Error> {
        self.pos = usize::try_from(pos).unwrap_or(usize::MAX).min(self.data.len());
        Ok(self.pos as u64)
    }

    fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

impl Storage for MockStorage {
    type Error = MockStorageError;
    type File = MockFile;

    async fn open_file(&mut self, path: &str) -> Result<Self::File, Self::Error> {
        self.files
            .iter()
            .find(|(p, _)| p.as_str() == path)
            .map(|(_, data)| MockFile {
                data: data.clone(),
                pos: 0,
            })
            .ok_or(MockStorageError::NotFound)
    }

    async fn exists(&mut self, path: &str) -> Result<bool, Self::Error> {
        Ok(self.files.iter().any(|(p, _)| p.as_str() == path))
    }

    async fn write_file(&mut self, path: &str, data: &[u8]) -> Result<(), Self::Error> {
        if data.len() > 256 {
            return Err(MockStorageError::Full);
        }
        self.add_file(path, data);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MockControls — gesture counters
// ---------------------------------------------------------------------------

/// [`ControlActions`] that counts invocations.
#[derive(Default)]
pub struct MockControls {
    wifi_resets: usize,
    maintenance_entries: usize,
}

impl MockControls {
    /// Fresh counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of WiFi-reset triggers observed.
    pub fn wifi_resets(&self) -> usize {
        self.wifi_resets
    }

    /// Number of maintenance-mode entries observed.
    pub fn maintenance_entries(&self) -> usize {
        self.maintenance_entries
    }
}

impl ControlActions for MockControls {
    fn trigger_wifi_reset(&mut self) {
        self.wifi_resets = self.wifi_resets.saturating_add(1);
    }

    fn enter_maintenance_mode(&mut self) {
        self.maintenance_entries = self.maintenance_entries.saturating_add(1);
    }
}
