//! Verified user identity extraction.
//!
//! After a payload passes signature verification, its `user` field carries
//! a JSON document describing the platform account that launched the app.
//! The document may have been percent-encoded a second time by the caller,
//! so it is decoded once more before parsing.

use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// User identity claims embedded in a verified launch payload.
///
/// Attributes absent from the source JSON stay `None` and serialize as
/// explicit nulls; `allows_write_to_pm` defaults to `false` when omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebAppUser {
    pub id: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub language_code: Option<String>,
    #[serde(default)]
    pub allows_write_to_pm: bool,
}

/// Why a `user` field could not be decoded.
#[derive(Debug, Error)]
pub(crate) enum UserDecodeError {
    #[error("user field is not valid UTF-8 after percent-decoding")]
    Encoding,
    #[error("user field is not a valid user document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decode the `user` field of a verified payload.
pub(crate) fn decode_user(raw: &str) -> Result<WebAppUser, UserDecodeError> {
    let json = percent_decode_str(raw)
        .decode_utf8()
        .map_err(|_| UserDecodeError::Encoding)?;
    Ok(serde_json::from_str(&json)?)
}
