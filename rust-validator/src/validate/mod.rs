//! Launch payload validation.
//!
//! This module is the core of the service. It confirms that an `initData`
//! string handed to a mini app was genuinely signed by the platform:
//! - Parse the raw payload and split off the claimed signature
//! - Re-serialize the remaining fields into the canonical signed form
//! - Recompute the expected signature with the derived signing key
//! - Compare in constant time, then extract the verified user identity
//!
//! Verification is a pure function of the payload and the injected secret:
//! no I/O, no shared mutable state, safe to call concurrently.

pub mod payload;
pub mod signature;
pub mod user;

use thiserror::Error;
use tracing::warn;

use crate::secret::SecretError;
use signature::HmacSha256;

pub use user::WebAppUser;

/// Outcome of verifying one launch payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verification {
    /// The signature matched; identity claims can be trusted.
    Valid {
        /// Decoded `user` field, if the payload carried one.
        user: Option<WebAppUser>,
    },
    /// The payload was rejected.
    Rejected(RejectReason),
}

/// Why a launch payload was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectReason {
    /// The caller sent nothing to verify.
    #[error("missing payload")]
    MissingPayload,
    /// The payload was tampered with or signed with a different secret.
    #[error("invalid signature")]
    InvalidSignature,
    /// The signature was valid but the embedded user document is corrupt.
    #[error("malformed user payload")]
    MalformedUser,
}

/// Validator for signed launch payloads.
///
/// Construction derives the context signing key from the root secret once;
/// each `verify` call then costs one HMAC over the canonical string plus a
/// constant-time compare. The secret is injected explicitly so tests and
/// callers never share process-global state.
#[derive(Clone)]
pub struct InitDataValidator {
    mac: HmacSha256,
}

impl InitDataValidator {
    /// Build a validator from the provisioned root secret.
    ///
    /// An empty secret is refused: verifying against a predictable key
    /// is a configuration fault, not a per-request failure.
    pub fn new(secret: &[u8]) -> Result<Self, SecretError> {
        if secret.is_empty() {
            return Err(SecretError::Empty);
        }
        let mac = signature::derive_signing_mac(secret).ok_or(SecretError::Rejected)?;
        Ok(Self { mac })
    }

    /// Verify one raw launch payload.
    pub fn verify(&self, raw: &str) -> Verification {
        if raw.is_empty() {
            return Verification::Rejected(RejectReason::MissingPayload);
        }

        let parsed = payload::parse_init_data(raw);
        let canonical = payload::canonical_string(&parsed.fields);
        let expected = signature::hex_signature(&self.mac, &canonical);

        if !signature::constant_time_eq(&expected, &parsed.claimed_hash) {
            warn!(
                expected_length = expected.len(),
                claimed_length = parsed.claimed_hash.len(),
                "init_data_signature_mismatch"
            );
            return Verification::Rejected(RejectReason::InvalidSignature);
        }

        match parsed.field("user") {
            Some(raw_user) => match user::decode_user(raw_user) {
                Ok(user) => Verification::Valid { user: Some(user) },
                Err(e) => {
                    warn!(error = %e, "init_data_user_malformed");
                    Verification::Rejected(RejectReason::MalformedUser)
                }
            },
            None => Verification::Valid { user: None },
        }
    }
}
