// File:    lib.rs
// Author:  apezoo
// Date:    2026-10-19
//
// Description: The main library crate for filecrypt-core, exposing the sealed container codec,
//              the HOTP generator and the hash, HMAC and block cipher primitives they build on.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! # Filecrypt Core Library
//!
//! This library seals a payload into an AES-128-CBC encrypted container that
//! carries both a SHA-1 and a SHA-256 digest of the payload, and computes
//! 6-digit HMAC-based one-time passwords.
//!
//! Every operation is a plain function over caller-owned buffers and a [`Key`];
//! there is no shared state between calls.
//!
//! ```
//! use filecrypt_core::{container, Key};
//!
//! let key = Key::new(b"D2F4A67B890CDE51").unwrap();
//! let sealed = container::encode(b"Hello, World!", &key).unwrap();
//! let verification = container::decode(&sealed.ciphertext, &key).unwrap();
//! assert_eq!(verification.payload(), Some(&b"Hello, World!"[..]));
//! ```

/// AES-128-CBC encryption and decryption with the fixed zero IV.
pub mod cipher;
/// Named constants for key, block, digest and container sizes.
pub mod config;
/// The sealed container format: layout, encoding, decoding and file transforms.
pub mod container;
/// Error kinds surfaced by every fallible operation.
pub mod error;
/// SHA-1 / SHA-256 digests and digest comparison.
pub mod hash;
/// HMAC-based one-time passwords.
pub mod hotp;
/// The 16-byte key bound to every cipher operation.
pub mod key;
/// HMAC-SHA1 computation.
pub mod mac;

pub use error::{CryptoError, Result};
pub use key::Key;
