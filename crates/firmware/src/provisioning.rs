//! WiFi provisioning secrets.
//!
//! Credentials live in a single file as `ssid NUL password NUL`. The format
//! is shared with the companion provisioning app, so it stays byte-exact:
//! no length prefixes, no trailing metadata.
//!
//! Recovery is deliberately forgiving: a missing, truncated, or garbled file
//! yields empty secrets (device unprovisioned) rather than an error the
//! caller would have to invent a policy for.

use thiserror_no_std::Error;

use platform::{File as _, Storage};

/// Where the credentials file lives on the sample filesystem.
pub const SECRETS_PATH: &str = "/WiFiSecrets.txt";

const SSID_MAX: usize = 32;
const PASS_MAX: usize = 64;
/// `ssid NUL pass NUL` at maximum field lengths.
const SECRETS_CAPACITY: usize = SSID_MAX + PASS_MAX + 2;

/// Failure writing credentials; reads never fail, they recover empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProvisioningError {
    /// SSID or password exceeds its field length.
    #[error("credential field too long")]
    TooLong,
    /// The storage backend rejected the write.
    #[error("storage write failed")]
    Storage,
}

/// A parsed credential pair. Empty SSID means "not provisioned".
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WifiSecrets {
    /// Network name, up to 32 bytes.
    pub ssid: heapless::String<SSID_MAX>,
    /// Passphrase, up to 64 bytes.
    pub pass: heapless::String<PASS_MAX>,
}

impl WifiSecrets {
    /// Build a pair, rejecting over-long fields.
    pub fn new(ssid: &str, pass: &str) -> Result<Self, ProvisioningError> {
        Ok(Self {
            ssid: heapless::String::try_from(ssid).map_err(|_| ProvisioningError::TooLong)?,
            pass: heapless::String::try_from(pass).map_err(|_| ProvisioningError::TooLong)?,
        })
    }

    /// True once a network name has been stored.
    pub fn is_provisioned(&self) -> bool {
        !self.ssid.is_empty()
    }
}

/// Serialize to the on-disk `ssid NUL pass NUL` layout.
pub fn encode(secrets: &WifiSecrets) -> heapless::Vec<u8, SECRETS_CAPACITY> {
    let mut blob = heapless::Vec::new();
    // Field lengths are bounded by the String capacities; these cannot fail.
    blob.extend_from_slice(secrets.ssid.as_bytes()).ok();
    blob.push(0).ok();
    blob.extend_from_slice(secrets.pass.as_bytes()).ok();
    blob.push(0).ok();
    blob
}

/// Parse the on-disk layout; anything malformed decodes as unprovisioned.
pub fn decode(blob: &[u8]) -> WifiSecrets {
    let mut fields = blob.split(|&b| b == 0);
    let (Some(ssid_raw), Some(pass_raw)) = (fields.next(), fields.next()) else {
        return WifiSecrets::default();
    };
    let (Ok(ssid), Ok(pass)) = (core::str::from_utf8(ssid_raw), core::str::from_utf8(pass_raw))
    else {
        return WifiSecrets::default();
    };
    WifiSecrets::new(ssid, pass).unwrap_or_default()
}

/// Persist credentials to [`SECRETS_PATH`].
pub async fn store<S: Storage>(
    store: &mut S,
    secrets: &WifiSecrets,
) -> Result<(), ProvisioningError> {
    let blob = encode(secrets);
    store
        .write_file(SECRETS_PATH, &blob)
        .await
        .map_err(|_| ProvisioningError::Storage)
}

/// Read credentials back; empty secrets on any failure.
pub async fn recover<S: Storage>(store: &mut S) -> WifiSecrets {
    let Ok(mut file) = store.open_file(SECRETS_PATH).await else {
        return WifiSecrets::default();
    };
    let mut buf = [0u8; SECRETS_CAPACITY];
    let Ok(n) = file.read(&mut buf).await else {
        return WifiSecrets::default();
    };
    decode(buf.get(..n).unwrap_or(&[]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_the_nul_layout() {
        let secrets = WifiSecrets::new("HomeNet", "hunter2!").unwrap();
        let blob = encode(&secrets);
        assert_eq!(blob.as_slice(), b"HomeNet\0hunter2!\0");
        assert_eq!(decode(&blob), secrets);
    }

    #[test]
    fn missing_separators_decode_as_unprovisioned() {
        let recovered = decode(b"HomeNet-without-any-separator");
        assert!(!recovered.is_provisioned());
    }

    #[test]
    fn empty_password_is_a_valid_open_network() {
        let secrets = WifiSecrets::new("CoffeeShop", "").unwrap();
        let recovered = decode(&encode(&secrets));
        assert!(recovered.is_provisioned());
        assert!(recovered.pass.is_empty());
    }

    #[test]
    fn invalid_utf8_decodes_as_unprovisioned() {
        assert!(!decode(b"\xFF\xFE\0x\0").is_provisioned());
    }

    #[test]
    fn over_long_fields_are_rejected_on_construction() {
        let long = core::str::from_utf8(&[b'a'; 65]).unwrap();
        assert_eq!(WifiSecrets::new("net", long), Err(ProvisioningError::TooLong));
    }
}
