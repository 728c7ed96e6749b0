//! Web server module for the verification boundary.
//!
//! This module provides a thin web server that:
//! - Receives `{"initData": ...}` envelopes from mini-app backends
//! - Runs signature verification against the provisioned secret
//! - Maps the outcome to the `{status, message, user?}` response contract
//!
//! All verification logic lives in [`crate::validate`]; nothing here
//! touches the secret directly.

pub mod handlers;

pub use handlers::{health, verify_init_data, AppState, HealthResponse, VerifyRequest, VerifyResponse};
