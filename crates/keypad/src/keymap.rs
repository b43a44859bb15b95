//! Key-to-character translation table.

use thiserror_no_std::Error;

use crate::KeyCode;

/// Number of slots a key map must cover: 16 keys plus three sentinels.
pub const KEYMAP_LEN: usize = 19;

/// Error building a [`KeyMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum KeyMapError {
    /// Fewer than [`KEYMAP_LEN`] characters supplied: the decoder can emit
    /// indices the map would not cover.
    #[error("key map must cover all 19 decoder outcomes")]
    TooShort,
}

/// Read-only mapping from decoder outcomes to displayable characters.
///
/// Loaded once at startup. Slots 16..=18 translate the `NoKey`/`Fail`/
/// `Bounce` sentinels, so *every* [`KeyCode`] has a character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMap {
    table: [char; KEYMAP_LEN],
}

impl KeyMap {
    /// Map from a full table.
    pub const fn new(table: [char; KEYMAP_LEN]) -> Self {
        Self { table }
    }

    /// Map from the first [`KEYMAP_LEN`] characters of `chars`.
    pub fn from_chars(chars: &str) -> Result<Self, KeyMapError> {
        let mut table = ['\0'; KEYMAP_LEN];
        let mut filled = 0usize;
        for (slot, ch) in table.iter_mut().zip(chars.chars()) {
            *slot = ch;
            filled = filled.saturating_add(1);
        }
        if filled < KEYMAP_LEN {
            return Err(KeyMapError::TooShort);
        }
        Ok(Self { table })
    }

    /// Character for any decoder outcome, sentinels included.
    pub fn char_for(&self, key: KeyCode) -> char {
        self.table.get(key.index()).copied().unwrap_or('\0')
    }
}
