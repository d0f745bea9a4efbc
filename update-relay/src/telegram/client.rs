//! Minimal Telegram Bot API client.
//!
//! The relay only ever calls `answerPreCheckoutQuery`, directly over HTTP,
//! so that a payment confirmation never waits on the downstream handler.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::TelegramError;

/// Maximum bytes of an error response body kept for logs.
const ERROR_BODY_LIMIT: usize = 200;

/// Body of an `answerPreCheckoutQuery` call.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerPreCheckoutQuery<'a> {
    pub pre_checkout_query_id: &'a str,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<&'a str>,
}

impl<'a> AnswerPreCheckoutQuery<'a> {
    pub fn approve(query_id: &'a str) -> Self {
        Self {
            pre_checkout_query_id: query_id,
            ok: true,
            error_message: None,
        }
    }

    pub fn reject(query_id: &'a str, error_message: &'a str) -> Self {
        Self {
            pre_checkout_query_id: query_id,
            ok: false,
            error_message: Some(error_message),
        }
    }
}

/// Telegram Bot API client sharing a pooled `reqwest::Client`.
#[derive(Clone)]
pub struct TelegramClient {
    inner: Arc<TelegramClientInner>,
}

struct TelegramClientInner {
    http: Client,
    api_base: String,
    bot_token: Option<String>,
    timeout: Duration,
}

impl TelegramClient {
    pub fn new(
        http: Client,
        api_base: impl Into<String>,
        bot_token: Option<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            inner: Arc::new(TelegramClientInner {
                http,
                api_base: api_base.into(),
                bot_token,
                timeout,
            }),
        }
    }

    /// Full URL of a Bot API method. Contains the token: never log it.
    fn method_url(&self, method: &str) -> Result<String, TelegramError> {
        let token = self
            .inner
            .bot_token
            .as_deref()
            .ok_or(TelegramError::MissingToken)?;

        Ok(format!("{}/bot{}/{}", self.inner.api_base, token, method))
    }

    /// Answer a pre-checkout query.
    ///
    /// Succeeds only on a 2xx response. Transport errors are returned with the
    /// request URL removed.
    pub async fn answer_pre_checkout_query(
        &self,
        answer: &AnswerPreCheckoutQuery<'_>,
    ) -> Result<(), TelegramError> {
        let url = self.method_url("answerPreCheckoutQuery")?;

        let response = self
            .inner
            .http
            .post(url)
            .timeout(self.inner.timeout)
            .json(answer)
            .send()
            .await
            .map_err(|e| TelegramError::Transport(e.without_url()))?;

        let status = response.status();
        if status.is_success() {
            info!(
                pre_checkout_query_id = answer.pre_checkout_query_id,
                ok = answer.ok,
                "pre_checkout_answered"
            );
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let body = truncate_bytes(&body, ERROR_BODY_LIMIT).to_string();

        warn!(
            pre_checkout_query_id = answer.pre_checkout_query_id,
            status_code = status.as_u16(),
            body = %body,
            "pre_checkout_answer_rejected"
        );

        Err(TelegramError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

/// Cut `s` to at most `limit` bytes without splitting a character.
fn truncate_bytes(s: &str, limit: usize) -> &str {
    if s.len() <= limit {
        return s;
    }

    let mut end = limit;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
