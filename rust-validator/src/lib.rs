//! InitGate - mini-app launch payload validation service.
//!
//! This library provides the pieces behind the `initgate-web` binary:
//! - `validate`: the signature verification core (parse, canonicalize,
//!   two-stage HMAC, constant-time compare, user extraction)
//! - `web`: the thin HTTP boundary exposing the verifier
//! - `config` / `secret`: environment configuration and secret provisioning
//!
//! ## Architecture
//!
//! ```text
//! Mini app backend → POST / → InitDataValidator → {status, message, user?}
//! ```

pub mod config;
pub mod secret;
pub mod validate;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use secret::{load_secret, SecretError};
pub use validate::{InitDataValidator, RejectReason, Verification, WebAppUser};
pub use web::AppState;
