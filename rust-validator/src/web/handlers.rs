//! Verification endpoint handlers.
//!
//! These handlers are a thin boundary around the validator - they only:
//! 1. Decode the request envelope
//! 2. Run signature verification
//! 3. Map the outcome to the response contract
//!
//! Every verification outcome, including a rejected payload, is reported
//! with HTTP 200 and a body `status` of `success` or `error`. Existing
//! clients distinguish failure by the body field, not the status code.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::validate::{InitDataValidator, Verification, WebAppUser};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub validator: Arc<InitDataValidator>,
}

impl AppState {
    pub fn new(validator: InitDataValidator) -> Self {
        Self {
            validator: Arc::new(validator),
        }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Payload Verification
// =============================================================================

/// Verification request envelope.
///
/// An absent `initData` key is treated the same as an empty payload.
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    #[serde(rename = "initData", default)]
    pub init_data: String,
}

/// Verification response body.
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub status: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<WebAppUser>,
}

/// Map a verification outcome to the response contract.
fn response_for(verification: Verification) -> VerifyResponse {
    match verification {
        Verification::Valid { user } => VerifyResponse {
            status: "success",
            message: "init data is authentic".to_string(),
            user,
        },
        Verification::Rejected(reason) => VerifyResponse {
            status: "error",
            message: reason.to_string(),
            user: None,
        },
    }
}

/// Payload verification endpoint.
pub async fn verify_init_data(
    State(state): State<AppState>,
    Json(request): Json<VerifyRequest>,
) -> impl IntoResponse {
    info!(
        init_data_length = request.init_data.len(),
        "verify_request_received"
    );

    let verification = state.validator.verify(&request.init_data);

    match &verification {
        Verification::Valid { user } => {
            info!(has_user = user.is_some(), "init_data_verified");
        }
        Verification::Rejected(reason) => {
            warn!(reason = %reason, "init_data_rejected");
        }
    }

    (StatusCode::OK, Json(response_for(verification)))
}
