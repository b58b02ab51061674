// File:    container.rs
// Author:  apezoo
// Date:    2026-10-19
//
// Description: Builds, encrypts, decrypts and verifies sealed containers, and transforms files with them.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! The sealed container codec.
//!
//! A payload is framed as `length | SHA-1 | payload | SHA-256 | zero trailer`
//! (see [`crate::config`]) and the whole frame is encrypted with
//! [`crate::cipher::encrypt`]. Decoding decrypts, parses the frame and checks
//! both digests against the recovered payload.

use crate::cipher;
use crate::config::{
    CONTAINER_TRAILER_SIZE, LENGTH_FIELD_SIZE, PAYLOAD_OFFSET, SHA1_DIGEST_SIZE,
    SHA256_DIGEST_SIZE,
};
use crate::error::{CryptoError, Result};
use crate::hash::{compare_hashes, sha1, sha256};
use crate::key::Key;
use log::{debug, warn};
use std::fs;
use std::path::Path;

/// The direction of a file transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Decrypt and verify a container, recovering its payload.
    Decode = 0,
    /// Seal a payload into a container.
    Encode = 1,
}

impl TryFrom<i32> for Operation {
    type Error = CryptoError;

    fn try_from(mode: i32) -> Result<Self> {
        match mode {
            0 => Ok(Self::Decode),
            1 => Ok(Self::Encode),
            other => Err(CryptoError::InvalidOperation(other)),
        }
    }
}

/// The result of [`encode`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sealed {
    /// The encrypted container, ready to be stored.
    pub ciphertext: Vec<u8>,
    /// A token derived from the payload's SHA-256 digest. Not a secret.
    pub password: i32,
}

/// Borrowed fields of a decrypted container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerView<'a> {
    /// The payload length recorded in the header.
    pub length: usize,
    /// The stored SHA-1 digest.
    pub sha1: &'a [u8],
    /// The payload bytes.
    pub payload: &'a [u8],
    /// The stored SHA-256 digest.
    pub sha256: &'a [u8],
}

/// Which stored digests matched the recovered payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigestMismatch {
    /// `true` if the stored SHA-1 digest matched.
    pub sha1_matches: bool,
    /// `true` if the stored SHA-256 digest matched.
    pub sha256_matches: bool,
}

/// The outcome of decoding a well-formed container.
///
/// A container that decrypts and parses but fails its digest check is
/// `Rejected` rather than an error. The two cases a caller cannot tell apart
/// here are a tampered payload and a wrong key whose output happened to unpad.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    /// Both digests matched; the payload is intact.
    Verified(Vec<u8>),
    /// At least one digest did not match; no payload is released.
    Rejected(DigestMismatch),
}

impl Verification {
    /// Returns `true` if the payload was verified.
    #[must_use]
    pub const fn is_verified(&self) -> bool {
        matches!(self, Self::Verified(_))
    }

    /// Returns the verified payload, if any.
    #[must_use]
    pub fn payload(&self) -> Option<&[u8]> {
        match self {
            Self::Verified(payload) => Some(payload),
            Self::Rejected(_) => None,
        }
    }

    /// Consumes the verification and returns the verified payload, if any.
    #[must_use]
    pub fn into_payload(self) -> Option<Vec<u8>> {
        match self {
            Self::Verified(payload) => Some(payload),
            Self::Rejected(_) => None,
        }
    }
}

/// The outcome of [`transform_file`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transformed {
    /// The source was sealed and written to the destination.
    Encoded {
        /// See [`Sealed::password`].
        password: i32,
    },
    /// The source verified and its payload was written to the destination.
    Decoded {
        /// The number of payload bytes written.
        length: usize,
    },
    /// The source failed verification; the destination was not written.
    Rejected(DigestMismatch),
}

/// Derives the password token from the first four bytes of a SHA-256 digest,
/// read as a little-endian `i32`.
#[must_use]
pub const fn password_from_digest(digest: &[u8; SHA256_DIGEST_SIZE]) -> i32 {
    i32::from_le_bytes([digest[0], digest[1], digest[2], digest[3]])
}

/// Lays out the plaintext container for `payload` and its digests.
///
/// # Errors
///
/// Returns [`CryptoError::MalformedContainer`] if `payload` is too long for the
/// signed 32-bit length field.
pub fn build_buffer(
    payload: &[u8],
    sha1_digest: &[u8; SHA1_DIGEST_SIZE],
    sha256_digest: &[u8; SHA256_DIGEST_SIZE],
) -> Result<Vec<u8>> {
    let length = i32::try_from(payload.len()).map_err(|_| {
        CryptoError::MalformedContainer(format!(
            "payload of {} bytes does not fit the 32-bit length field",
            payload.len()
        ))
    })?;

    let total = PAYLOAD_OFFSET + payload.len() + SHA256_DIGEST_SIZE + CONTAINER_TRAILER_SIZE;
    let mut buffer = Vec::with_capacity(total);
    buffer.extend_from_slice(&length.to_le_bytes());
    buffer.extend_from_slice(sha1_digest);
    buffer.extend_from_slice(payload);
    buffer.extend_from_slice(sha256_digest);
    buffer.resize(total, 0);
    Ok(buffer)
}

/// Seals `payload` into an encrypted container.
///
/// # Errors
///
/// Returns [`CryptoError::MalformedContainer`] if `payload` is longer than `i32::MAX` bytes.
pub fn encode(payload: &[u8], key: &Key) -> Result<Sealed> {
    let sha1_digest = sha1(payload);
    let sha256_digest = sha256(payload);
    let buffer = build_buffer(payload, &sha1_digest, &sha256_digest)?;
    let ciphertext = cipher::encrypt(key, &buffer);
    debug!(
        "Sealed {} payload bytes into {} ciphertext bytes",
        payload.len(),
        ciphertext.len()
    );
    Ok(Sealed {
        ciphertext,
        password: password_from_digest(&sha256_digest),
    })
}

/// Splits a decrypted container into its fields.
///
/// Bytes after the SHA-256 digest are ignored.
///
/// # Errors
///
/// Returns [`CryptoError::MalformedContainer`] if the buffer is shorter than the
/// header, the recorded length is negative, or the payload and SHA-256 digest
/// would run past the end of the buffer.
pub fn parse(plaintext: &[u8]) -> Result<ContainerView<'_>> {
    let Some((length_field, rest)) = plaintext.split_first_chunk::<LENGTH_FIELD_SIZE>() else {
        return Err(CryptoError::MalformedContainer(format!(
            "buffer of {} bytes has no length field",
            plaintext.len()
        )));
    };
    let raw_length = i32::from_le_bytes(*length_field);
    let length = usize::try_from(raw_length).map_err(|_| {
        CryptoError::MalformedContainer(format!("negative payload length {raw_length}"))
    })?;

    let out_of_bounds = || {
        CryptoError::MalformedContainer(format!(
            "payload length {length} exceeds buffer of {} bytes",
            plaintext.len()
        ))
    };
    let (sha1_digest, rest) = rest
        .split_at_checked(SHA1_DIGEST_SIZE)
        .ok_or_else(out_of_bounds)?;
    let (payload, rest) = rest.split_at_checked(length).ok_or_else(out_of_bounds)?;
    let sha256_digest = rest.get(..SHA256_DIGEST_SIZE).ok_or_else(out_of_bounds)?;

    Ok(ContainerView {
        length,
        sha1: sha1_digest,
        payload,
        sha256: sha256_digest,
    })
}

/// Recomputes both digests over the view's payload and compares them with the stored ones.
#[must_use]
pub fn verify(view: &ContainerView<'_>) -> Verification {
    let sha1_matches = compare_hashes(view.sha1, &sha1(view.payload));
    let sha256_matches = compare_hashes(view.sha256, &sha256(view.payload));

    if sha1_matches && sha256_matches {
        Verification::Verified(view.payload.to_vec())
    } else {
        warn!(
            "Container digest check failed (sha1 ok: {sha1_matches}, sha256 ok: {sha256_matches}); withholding payload"
        );
        Verification::Rejected(DigestMismatch {
            sha1_matches,
            sha256_matches,
        })
    }
}

/// Decrypts and verifies a container.
///
/// # Errors
///
/// Returns [`CryptoError::Padding`] if decryption fails and
/// [`CryptoError::MalformedContainer`] if the plaintext does not follow the
/// layout. A digest mismatch is reported as [`Verification::Rejected`].
pub fn decode(ciphertext: &[u8], key: &Key) -> Result<Verification> {
    let plaintext = cipher::decrypt(key, ciphertext)?;
    let view = parse(&plaintext)?;
    debug!("Parsed container with {} payload bytes", view.length);
    Ok(verify(&view))
}

/// Reads `source`, applies the operation selected by `mode` and writes `dest`.
///
/// `mode` is `1` to seal `source` into `dest` and `0` to open the container in
/// `source` into `dest`. When decoding, `dest` is only written if both digests
/// verify.
///
/// # Errors
///
/// Returns [`CryptoError::InvalidOperation`] for any other `mode`, before any
/// file is touched, [`CryptoError::Io`] if reading or writing fails, and the
/// errors of [`encode`] and [`decode`].
pub fn transform_file(
    source: impl AsRef<Path>,
    dest: impl AsRef<Path>,
    mode: i32,
    key: &Key,
) -> Result<Transformed> {
    let operation = Operation::try_from(mode)?;
    let (source, dest) = (source.as_ref(), dest.as_ref());
    let input = fs::read(source)?;

    match operation {
        Operation::Encode => {
            let sealed = encode(&input, key)?;
            fs::write(dest, &sealed.ciphertext)?;
            debug!("Encoded '{}' into '{}'", source.display(), dest.display());
            Ok(Transformed::Encoded {
                password: sealed.password,
            })
        }
        Operation::Decode => match decode(&input, key)? {
            Verification::Verified(payload) => {
                fs::write(dest, &payload)?;
                debug!("Decoded '{}' into '{}'", source.display(), dest.display());
                Ok(Transformed::Decoded {
                    length: payload.len(),
                })
            }
            Verification::Rejected(mismatch) => Ok(Transformed::Rejected(mismatch)),
        },
    }
}
