//! InitGate Web Server - launch payload verification endpoint.
//!
//! This binary provides a thin web server that:
//! - Receives `{"initData": ...}` envelopes from mini-app backends
//! - Verifies the platform signature against the provisioned bot token
//! - Returns `{status, message, user?}` per the verification response contract
//!
//! The secret is loaded once at startup; a missing or empty secret aborts
//! the process before the listener binds.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tokio::{net::TcpListener, signal};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use initgate::web::{health, verify_init_data, AppState};
use initgate::{load_secret, Config, InitDataValidator};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("web_server_starting");

    // Load configuration
    let config = Config::from_env();
    info!(
        port = config.port,
        bot_token_inline = config.bot_token.is_some(),
        bot_token_file = %config.bot_token_file,
        cors_allow_origins = ?config.cors_allow_origins,
        "config_loaded"
    );

    // Provision the secret and build the validator; both refuse to
    // proceed without a usable secret
    let secret = load_secret(&config).context("Failed to provision signing secret")?;
    let validator =
        InitDataValidator::new(&secret).context("Failed to construct validator")?;
    info!(secret_length = secret.len(), "validator_ready");

    // Create application state
    let cors = build_cors(&config);
    let state = AppState::new(validator);

    // Build the router
    let app = Router::new()
        .route("/", post(verify_init_data))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::new())
        .layer(cors)
        .with_state(state);

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "web_server_listening");

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("web_server_shutdown_complete");

    Ok(())
}

/// Build the CORS layer: configured origins when an allow-list is set,
/// any origin otherwise.
fn build_cors(config: &Config) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    match &config.cors_allow_origins {
        Some(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();
            cors.allow_origin(AllowOrigin::list(origins))
        }
        None => cors.allow_origin(Any),
    }
}

/// Create a future that completes when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("web_server_shutting_down");
}
