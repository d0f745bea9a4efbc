//! Telegram webhook secret token verification.
//!
//! When a webhook is registered with `secret_token`, Telegram sends it back
//! in the `X-Telegram-Bot-Api-Secret-Token` header of every update.
//! Reference: https://core.telegram.org/bots/api#setwebhook

use axum::http::HeaderMap;
use tracing::warn;

/// Header Telegram uses to echo the webhook secret.
pub const SECRET_TOKEN_HEADER: &str = "x-telegram-bot-api-secret-token";

/// The secret to enforce, or `None` when verification is switched off.
pub fn configured_secret(secret: &Option<String>) -> Option<&str> {
    secret.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Verify the secret token header against the expected value.
///
/// Returns `true` when the header is present and matches exactly.
pub fn verify_secret_token(expected: &str, headers: &HeaderMap) -> bool {
    let Some(provided) = headers.get(SECRET_TOKEN_HEADER).map(|v| v.as_bytes()) else {
        warn!("webhook_secret_missing");
        return false;
    };

    let valid = tokens_match(expected.as_bytes(), provided);
    if !valid {
        warn!(provided_length = provided.len(), "webhook_secret_mismatch");
    }

    valid
}

/// Byte comparison whose running time depends only on the length.
fn tokens_match(expected: &[u8], provided: &[u8]) -> bool {
    expected.len() == provided.len()
        && expected
            .iter()
            .zip(provided)
            .fold(0u8, |diff, (a, b)| diff | (a ^ b))
            == 0
}
