// File:    cipher.rs
// Author:  apezoo
// Date:    2026-10-19
//
// Description: AES-128 in CBC mode with PKCS#7 padding and a fixed all-zero IV.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! Block cipher used to envelope sealed containers.
//!
//! # Known limitation: fixed IV
//!
//! Every call uses [`ZERO_IV`]. Two plaintexts that share a prefix encrypt to
//! ciphertexts that share the corresponding block prefix under the same key.
//! Changing the IV would make existing containers undecodable, so it is kept.

use crate::config::{BLOCK_SIZE, ZERO_IV};
use crate::error::{CryptoError, Result};
use crate::key::Key;
use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use log::debug;

type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;
type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;

/// Whether this cipher reuses a constant IV. Always `true`; see the module docs.
pub const ZERO_IV_KNOWN_LIMITATION: bool = true;

/// Encrypts `plaintext` with AES-128-CBC and PKCS#7 padding.
///
/// The ciphertext is always a non-empty multiple of [`BLOCK_SIZE`]; an empty
/// plaintext encrypts to a single padding block.
#[must_use]
pub fn encrypt(key: &Key, plaintext: &[u8]) -> Vec<u8> {
    let encryptor = Aes128CbcEnc::new(key.as_bytes().into(), &ZERO_IV.into());
    encryptor.encrypt_padded_vec_mut::<Pkcs7>(plaintext)
}

/// Decrypts AES-128-CBC `ciphertext` and strips its PKCS#7 padding.
///
/// # Errors
///
/// Returns [`CryptoError::Padding`] if the ciphertext is empty, is not a multiple
/// of [`BLOCK_SIZE`], or its final block does not carry valid padding. A wrong
/// key usually surfaces as this error as well.
pub fn decrypt(key: &Key, ciphertext: &[u8]) -> Result<Vec<u8>> {
    if ciphertext.is_empty() || ciphertext.len() % BLOCK_SIZE != 0 {
        debug!(
            "Rejecting ciphertext of {} bytes: not a whole number of blocks",
            ciphertext.len()
        );
        return Err(CryptoError::Padding);
    }
    let decryptor = Aes128CbcDec::new(key.as_bytes().into(), &ZERO_IV.into());
    decryptor
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CryptoError::Padding)
}
