// File:    config.rs
// Author:  apezoo
// Date:    2026-10-19
//
// Description: Fixed sizes and offsets shared by the cipher, the container codec and the HOTP generator.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! Compile-time configuration.
//!
//! The container layout after decryption is:
//!
//! | offset            | field                         | size     |
//! |-------------------|-------------------------------|----------|
//! | 0                 | payload length (`i32`, LE)    | 4        |
//! | 4                 | SHA-1 digest of payload       | 20       |
//! | 24                | payload                       | `length` |
//! | 24 + `length`     | SHA-256 digest of payload     | 32       |
//! | 56 + `length`     | zero trailer                  | 16       |

/// The size of the AES-128 key in bytes.
pub const KEY_SIZE: usize = 16;

/// The AES block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// The initialization vector used for every encryption and decryption.
///
/// A constant IV means identical plaintext prefixes under the same key produce
/// identical ciphertext prefixes. It is kept so existing containers stay readable.
pub const ZERO_IV: [u8; BLOCK_SIZE] = [0; BLOCK_SIZE];

/// The size of a SHA-1 digest in bytes.
pub const SHA1_DIGEST_SIZE: usize = 20;

/// The size of a SHA-256 digest in bytes.
pub const SHA256_DIGEST_SIZE: usize = 32;

/// The size of the little-endian payload length field.
pub const LENGTH_FIELD_SIZE: usize = 4;

/// Offset of the SHA-1 digest inside a container.
pub const SHA1_OFFSET: usize = LENGTH_FIELD_SIZE;

/// Offset of the payload inside a container.
pub const PAYLOAD_OFFSET: usize = SHA1_OFFSET + SHA1_DIGEST_SIZE;

/// Zero bytes appended after the SHA-256 digest by the encoder. Decoding ignores them.
pub const CONTAINER_TRAILER_SIZE: usize = BLOCK_SIZE;

/// Number of decimal digits in a HOTP code.
pub const HOTP_DIGITS: usize = 6;

/// `10^HOTP_DIGITS`.
pub const HOTP_MODULUS: u32 = 1_000_000;

/// Environment variable the CLI reads the key from when `--key` is absent.
pub const KEY_ENV_VAR: &str = "FILECRYPT_KEY";
