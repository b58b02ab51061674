// File:    hotp.rs
// Author:  apezoo
// Date:    2026-10-19
//
// Description: 6-digit HMAC-based one-time passwords with dynamic truncation.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! HMAC-based one-time passwords.
//!
//! This is a proprietary variant of RFC 4226 and does not interoperate with
//! standard authenticator apps:
//!
//! * the counter is serialized as 4 little-endian bytes, not 8 big-endian bytes;
//! * the serialized counter is the HMAC key and the shared secret is the HMAC
//!   message, the reverse of the RFC.
//!
//! Dynamic truncation and the modulus follow the RFC.

use crate::config::{HOTP_DIGITS, HOTP_MODULUS, SHA1_DIGEST_SIZE};
use crate::mac::hmac_sha1;

/// Serializes a counter the way [`hotp`] feeds it to HMAC.
#[must_use]
pub const fn counter_bytes(counter: i32) -> [u8; 4] {
    counter.to_le_bytes()
}

/// Extracts a 31-bit value from an HMAC-SHA1 digest.
///
/// The low nibble of the last byte selects a 4-byte window, read big-endian
/// with its top bit cleared.
#[must_use]
pub fn dynamic_truncation(digest: &[u8; SHA1_DIGEST_SIZE]) -> u32 {
    let offset = usize::from(digest[SHA1_DIGEST_SIZE - 1] & 0x0f);
    (u32::from(digest[offset] & 0x7f) << 24)
        | (u32::from(digest[offset + 1]) << 16)
        | (u32::from(digest[offset + 2]) << 8)
        | u32::from(digest[offset + 3])
}

/// Computes the one-time password for `key` at `counter`, in `0..1_000_000`.
///
/// `key` may be any length; the CLI and tests use 16-byte keys.
#[must_use]
pub fn hotp(key: &[u8], counter: i32) -> u32 {
    let digest = hmac_sha1(key, &counter_bytes(counter));
    dynamic_truncation(&digest) % HOTP_MODULUS
}

/// Formats a code as a zero-padded 6-digit string.
#[must_use]
pub fn format_otp(code: u32) -> String {
    format!("{code:0width$}", width = HOTP_DIGITS)
}

/// A key and a moving counter.
///
/// The counter lives only in memory; callers that need it across runs must store it themselves.
#[derive(Clone)]
pub struct Hotp {
    key: Vec<u8>,
    counter: i32,
}

impl Hotp {
    /// Creates a generator starting at `counter`.
    #[must_use]
    pub fn new(key: &[u8], counter: i32) -> Self {
        Self {
            key: key.to_vec(),
            counter,
        }
    }

    /// The current counter.
    #[must_use]
    pub const fn counter(&self) -> i32 {
        self.counter
    }

    /// The code for the current counter, without advancing it.
    #[must_use]
    pub fn value(&self) -> u32 {
        hotp(&self.key, self.counter)
    }
}

impl Iterator for Hotp {
    type Item = u32;

    /// Returns the code for the current counter, then advances the counter by one (wrapping).
    fn next(&mut self) -> Option<u32> {
        let code = self.value();
        self.counter = self.counter.wrapping_add(1);
        Some(code)
    }
}
