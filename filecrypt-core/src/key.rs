// File:    key.rs
// Author:  apezoo
// Date:    2026-10-19
//
// Description: The fixed-size AES key that every cipher and container operation is bound to.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

use crate::config::KEY_SIZE;
use crate::error::{CryptoError, Result};
use std::fmt;

/// Prefix marking a textual key as hex-encoded rather than raw UTF-8.
pub const HEX_PREFIX: &str = "hex:";

/// A 16-byte AES-128 key.
///
/// The key is copied in on construction and never mutated afterwards.
#[derive(Clone, PartialEq, Eq)]
pub struct Key([u8; KEY_SIZE]);

impl Key {
    /// Creates a key from exactly [`KEY_SIZE`] bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKeySize`] if `bytes` is not 16 bytes long.
    pub fn new(bytes: &[u8]) -> Result<Self> {
        let array: [u8; KEY_SIZE] = bytes.try_into().map_err(|_| CryptoError::InvalidKeySize {
            expected: KEY_SIZE,
            actual: bytes.len(),
        })?;
        Ok(Self(array))
    }

    /// Parses a key from text.
    ///
    /// Text starting with `hex:` is hex-decoded; anything else is used as its UTF-8 bytes,
    /// so `"D2F4A67B890CDE51"` is a valid 16-byte key.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidKeyEncoding`] for malformed hex and
    /// [`CryptoError::InvalidKeySize`] if the decoded bytes are not 16 bytes long.
    pub fn parse(text: &str) -> Result<Self> {
        match text.strip_prefix(HEX_PREFIX) {
            Some(encoded) => {
                let bytes = hex::decode(encoded.trim())
                    .map_err(|e| CryptoError::InvalidKeyEncoding(e.to_string()))?;
                Self::new(&bytes)
            }
            None => Self::new(text.as_bytes()),
        }
    }

    /// Returns the raw key bytes.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Key {
    type Error = CryptoError;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::new(bytes)
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}
