//! Two-stage HMAC-SHA256 signature scheme.
//!
//! The platform does not sign payloads with the root secret directly.
//! A per-context signing key is first derived by computing HMAC-SHA256 with
//! the root secret as the key over the fixed literal `WebAppData`; the
//! canonical string is then signed with that derived key. The derivation
//! binds signatures to the web-app launch context, so the same root secret
//! cannot be replayed against unrelated signature schemes.

use hmac::{Hmac, Mac};
use sha2::Sha256;

pub(crate) type HmacSha256 = Hmac<Sha256>;

/// Domain-separation literal for the signing key derivation.
pub(crate) const SIGNING_CONTEXT: &[u8] = b"WebAppData";

/// Derive the launch-payload signing key and return it as a keyed MAC.
///
/// Returns `None` only if the HMAC key schedule rejects the input, which
/// cannot happen for SHA-256 with a non-empty secret.
pub(crate) fn derive_signing_mac(secret: &[u8]) -> Option<HmacSha256> {
    let mut derive = HmacSha256::new_from_slice(secret).ok()?;
    derive.update(SIGNING_CONTEXT);
    let signing_key = derive.finalize().into_bytes();
    HmacSha256::new_from_slice(&signing_key).ok()
}

/// Sign a canonical string and return the lowercase hex digest.
pub(crate) fn hex_signature(mac: &HmacSha256, canonical: &str) -> String {
    let mut mac = mac.clone();
    mac.update(canonical.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Constant-time string comparison to prevent timing attacks.
///
/// The running time for equal-length inputs does not depend on the position
/// of the first differing byte.
pub(crate) fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}
