//! Configuration module for environment variable parsing.
//!
//! Every setting has a default so the relay boots with an empty environment;
//! invalid values are logged and replaced by the default.

use std::env;
use std::time::Duration;

use tracing::warn;
use url::Url;

/// Base URL of the Telegram Bot API.
pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Internal handler that processes every update the relay does not answer itself.
pub const DEFAULT_DOWNSTREAM_URL: &str = "http://localhost:8000/api/webhook-handler";

/// Route the relay listens on for Telegram updates.
pub const DEFAULT_WEBHOOK_PATH: &str = "/api/webhook";

/// Invoice payloads issued by the bot start with this prefix.
pub const DEFAULT_INVOICE_PREFIX: &str = "premium_";

/// Shown to the payer when an invoice is rejected.
pub const DEFAULT_REJECTION_MESSAGE: &str =
    "Invalid invoice. Please use the \"Buy Premium\" button in the bot.";

/// Route reserved for the liveness check.
const HEALTH_PATH: &str = "/health";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Port for the web server to listen on
    pub port: u16,

    /// Path of the Telegram webhook route
    pub webhook_path: String,

    /// Telegram bot token used to answer pre-checkout queries
    pub bot_token: Option<String>,

    /// Telegram Bot API base URL (overridable for tests and local API servers)
    pub telegram_api_base: String,

    /// Endpoint every non-intercepted update is forwarded to
    pub downstream_url: String,

    /// Optional timeout for the downstream call; transport default when unset
    pub downstream_timeout_ms: Option<u64>,

    /// Timeout for answerPreCheckoutQuery (Telegram waits ~10s for the answer)
    pub approval_timeout_ms: u64,

    /// Prefix a valid invoice payload must start with
    pub invoice_payload_prefix: String,

    /// error_message sent to Telegram when an invoice is rejected
    pub invoice_rejection_message: String,

    /// Expected X-Telegram-Bot-Api-Secret-Token header, if any
    pub webhook_secret_token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            webhook_path: DEFAULT_WEBHOOK_PATH.to_string(),
            bot_token: None,
            telegram_api_base: DEFAULT_TELEGRAM_API_BASE.to_string(),
            downstream_url: DEFAULT_DOWNSTREAM_URL.to_string(),
            downstream_timeout_ms: None,
            approval_timeout_ms: 5000,
            invoice_payload_prefix: DEFAULT_INVOICE_PREFIX.to_string(),
            invoice_rejection_message: DEFAULT_REJECTION_MESSAGE.to_string(),
            webhook_secret_token: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Config::default();

        Config {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),

            webhook_path: parse_path("WEBHOOK_PATH", &defaults.webhook_path),

            bot_token: parse_secret("BOT_TOKEN"),

            telegram_api_base: parse_url("TELEGRAM_API_BASE", &defaults.telegram_api_base),

            downstream_url: parse_url("DOWNSTREAM_URL", &defaults.downstream_url),

            downstream_timeout_ms: env::var("DOWNSTREAM_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|ms| *ms > 0),

            approval_timeout_ms: env::var("APPROVAL_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.approval_timeout_ms),

            invoice_payload_prefix: parse_non_blank(
                "INVOICE_PAYLOAD_PREFIX",
                &defaults.invoice_payload_prefix,
            ),

            invoice_rejection_message: parse_non_blank(
                "INVOICE_REJECTION_MESSAGE",
                &defaults.invoice_rejection_message,
            ),

            webhook_secret_token: parse_secret("WEBHOOK_SECRET_TOKEN"),
        }
    }

    pub fn downstream_timeout(&self) -> Option<Duration> {
        self.downstream_timeout_ms.map(Duration::from_millis)
    }

    pub fn approval_timeout(&self) -> Duration {
        Duration::from_millis(self.approval_timeout_ms)
    }
}

/// Normalize a base URL: trim, drop trailing slashes, default to https.
///
/// Returns `None` when the result is empty or does not parse as a URL.
pub fn normalize_base_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return None;
    }

    let lower = trimmed.to_ascii_lowercase();
    let candidate = if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    Url::parse(&candidate).ok().map(|_| candidate)
}

/// Read a URL variable, falling back to `default` when unset or invalid.
fn parse_url(name: &str, default: &str) -> String {
    let raw = match env::var(name) {
        Ok(v) => v,
        Err(_) => return default.to_string(),
    };

    match normalize_base_url(&raw) {
        Some(url) => url,
        None => {
            warn!(env_var = name, value = %raw, "Invalid URL, using default");
            default.to_string()
        }
    }
}

/// Read a route path; it must start with `/` and not collide with the health route.
fn parse_path(name: &str, default: &str) -> String {
    let raw = match env::var(name) {
        Ok(v) => v.trim().to_string(),
        Err(_) => return default.to_string(),
    };

    if !raw.starts_with('/') || raw == HEALTH_PATH {
        warn!(env_var = name, value = %raw, "Invalid route path, using default");
        return default.to_string();
    }

    raw
}

/// Read a string that must not be blank; blank or unset falls back to `default`.
fn parse_non_blank(name: &str, default: &str) -> String {
    let raw = match env::var(name) {
        Ok(v) => v,
        Err(_) => return default.to_string(),
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        warn!(env_var = name, "Blank value, using default");
        return default.to_string();
    }

    trimmed.to_string()
}

/// Read an optional secret; blank values count as unset.
fn parse_secret(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
