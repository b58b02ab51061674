// File:    hash.rs
// Author:  apezoo
// Date:    2026-10-19
//
// Description: SHA-1 and SHA-256 digests over byte buffers, plus the digest comparison used by the decoder.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

use crate::config::{SHA1_DIGEST_SIZE, SHA256_DIGEST_SIZE};
use sha1::Sha1;
use sha2::{Digest, Sha256};

/// Computes the SHA-1 digest of `data`.
#[must_use]
pub fn sha1(data: &[u8]) -> [u8; SHA1_DIGEST_SIZE] {
    Sha1::digest(data).into()
}

/// Computes the SHA-256 digest of `data`.
#[must_use]
pub fn sha256(data: &[u8]) -> [u8; SHA256_DIGEST_SIZE] {
    Sha256::digest(data).into()
}

/// Compares two digests for equality.
///
/// Returns `false` as soon as the lengths differ or a byte mismatches. This is a
/// plain equality check and does not run in constant time.
#[must_use]
pub fn compare_hashes(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    for (x, y) in a.iter().zip(b) {
        if x != y {
            return false;
        }
    }
    true
}

/// Renders bytes as lowercase hex.
#[must_use]
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}
