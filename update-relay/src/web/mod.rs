//! Web server module for the Telegram webhook.
//!
//! Routes:
//! - `GET /health`: liveness check
//! - `GET {webhook_path}`: warmup ping
//! - `POST {webhook_path}`: Telegram updates
//! - any other method on `{webhook_path}`: 405

pub mod auth;
pub mod handlers;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

pub use auth::{configured_secret, verify_secret_token, SECRET_TOKEN_HEADER};
pub use handlers::{
    health, method_not_allowed, telegram_webhook, webhook_ping, AckResponse, AppState,
    HealthResponse, FALLBACK_REJECTION_MESSAGE,
};

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let webhook_path = state.config.webhook_path.clone();

    Router::new()
        .route("/health", get(health))
        .route(
            &webhook_path,
            get(webhook_ping)
                .post(telegram_webhook)
                .fallback(method_not_allowed),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
