//! HMAC-SHA1 over byte buffers.

use crate::config::SHA1_DIGEST_SIZE;
use hmac::{Hmac, Mac};
use sha1::Sha1;

type HmacSha1 = Hmac<Sha1>;

/// Computes HMAC-SHA1 of `message` under `key`.
///
/// Keys of any length are accepted; longer-than-block keys are hashed and
/// shorter ones zero-padded as the HMAC construction prescribes.
#[must_use]
pub fn hmac_sha1(message: &[u8], key: &[u8]) -> [u8; SHA1_DIGEST_SIZE] {
    let mut mac = <HmacSha1 as Mac>::new_from_slice(key)
        .unwrap_or_else(|_| unreachable!("HMAC accepts keys of any length"));
    mac.update(message);
    mac.finalize().into_bytes().into()
}
