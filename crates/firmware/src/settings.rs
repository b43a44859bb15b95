//! Persistent device settings.
//!
//! Settings are a postcard-encoded struct with a little-endian CRC32 trailer
//! over the payload. The blob is small enough to rewrite atomically on every
//! change, and the CRC turns a torn write or a stale flash sector into "use
//! defaults" instead of a half-applied configuration.

use serde::{Deserialize, Serialize};
use thiserror_no_std::Error;

use platform::{File as _, Storage};

/// Where the settings blob lives on the sample filesystem.
pub const SETTINGS_PATH: &str = "/settings.bin";

/// Encoded settings plus CRC trailer never exceed this.
const BLOB_CAPACITY: usize = 64;

const CRC_LEN: usize = 4;

/// Failure persisting settings; loads never fail, they fall back to defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// The struct outgrew [`BLOB_CAPACITY`].
    #[error("settings blob too large")]
    Encode,
    /// The storage backend rejected the write.
    #[error("storage write failed")]
    Storage,
}

/// Tunables that survive a power cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSettings {
    /// Keypad layout configuration byte (44, 53, 62, or 81).
    pub keypad_mode: u8,
    /// Debounce gate interval.
    pub debounce_ms: u16,
    /// Dial buffer depth.
    pub dial_depth: u8,
    /// Hold duration that turns a press into a control gesture.
    pub long_press_ms: u16,
}

impl Default for DeviceSettings {
    fn default() -> Self {
        Self {
            keypad_mode: keypad::MatrixGeometry::CONFIG_4X4,
            debounce_ms: 100,
            dial_depth: dialer::DIAL_CAPACITY as u8,
            long_press_ms: 5_000,
        }
    }
}

/// Encode settings with the CRC32 trailer appended.
pub fn encode(settings: &DeviceSettings) -> Result<heapless::Vec<u8, BLOB_CAPACITY>, SettingsError> {
    let mut buf = [0u8; BLOB_CAPACITY];
    let payload = postcard::to_slice(settings, &mut buf).map_err(|_| SettingsError::Encode)?;
    let crc = crc32fast::hash(payload);

    let mut blob: heapless::Vec<u8, BLOB_CAPACITY> = heapless::Vec::new();
    blob.extend_from_slice(payload)
        .map_err(|_| SettingsError::Encode)?;
    blob.extend_from_slice(&crc.to_le_bytes())
        .map_err(|_| SettingsError::Encode)?;
    Ok(blob)
}

/// Decode a blob, verifying the trailer. `None` on any mismatch.
pub fn decode(blob: &[u8]) -> Option<DeviceSettings> {
    let payload_len = blob.len().checked_sub(CRC_LEN)?;
    let payload = blob.get(..payload_len)?;
    let trailer = blob.get(payload_len..)?;
    let stored = u32::from_le_bytes(trailer.try_into().ok()?);
    if crc32fast::hash(payload) != stored {
        return None;
    }
    postcard::from_bytes(payload).ok()
}

/// Load settings from [`SETTINGS_PATH`]; defaults on any failure.
pub async fn load<S: Storage>(store: &mut S) -> DeviceSettings {
    let Ok(mut file) = store.open_file(SETTINGS_PATH).await else {
        return DeviceSettings::default();
    };
    let mut buf = [0u8; BLOB_CAPACITY];
    let Ok(n) = file.read(&mut buf).await else {
        return DeviceSettings::default();
    };
    buf.get(..n)
        .and_then(decode)
        .unwrap_or_default()
}

/// Persist settings to [`SETTINGS_PATH`].
pub async fn save<S: Storage>(
    store: &mut S,
    settings: &DeviceSettings,
) -> Result<(), SettingsError> {
    let blob = encode(settings)?;
    store
        .write_file(SETTINGS_PATH, &blob)
        .await
        .map_err(|_| SettingsError::Storage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_with_a_valid_trailer() {
        let settings = DeviceSettings {
            keypad_mode: 53,
            debounce_ms: 150,
            dial_depth: 8,
            long_press_ms: 3_000,
        };
        let blob = encode(&settings).unwrap();
        assert_eq!(decode(&blob), Some(settings));
    }

    #[test]
    fn a_flipped_bit_fails_the_trailer_check() {
        let mut blob = encode(&DeviceSettings::default()).unwrap();
        if let Some(byte) = blob.first_mut() {
            *byte ^= 0x01;
        }
        assert_eq!(decode(&blob), None);
    }

    #[test]
    fn short_blobs_are_rejected() {
        assert_eq!(decode(&[]), None);
        assert_eq!(decode(&[0x00, 0x01, 0x02]), None);
    }
}
