//! Error types for filecrypt-core.

use thiserror::Error;

/// Errors returned by filecrypt-core operations.
///
/// A container whose digests do not match is not an error; see
/// [`crate::container::Verification`].
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The key is not exactly [`crate::config::KEY_SIZE`] bytes long.
    #[error("key size must be {expected} bytes, got {actual}")]
    InvalidKeySize {
        /// The required key length.
        expected: usize,
        /// The length that was supplied.
        actual: usize,
    },

    /// A transform mode other than `0` (decode) or `1` (encode) was requested.
    #[error("invalid operation {0}: operation must be 0 (decode) or 1 (encode)")]
    InvalidOperation(i32),

    /// The ciphertext could not be decrypted or its PKCS#7 padding is invalid.
    #[error("ciphertext could not be decrypted: invalid length or PKCS#7 padding")]
    Padding,

    /// The decrypted buffer does not follow the container layout.
    #[error("malformed container: {0}")]
    MalformedContainer(String),

    /// A textual key could not be decoded.
    #[error("invalid key encoding: {0}")]
    InvalidKeyEncoding(String),

    /// Reading the source or writing the destination file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A `Result` alias using [`CryptoError`].
pub type Result<T> = std::result::Result<T, CryptoError>;
