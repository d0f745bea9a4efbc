//! Webhook endpoint handlers.
//!
//! The update handler is the whole relay:
//! 1. Verify the secret token (if configured)
//! 2. Parse the update
//! 3. Acknowledge warmups, answer pre-checkout queries directly, and forward
//!    everything else to the downstream handler
//!
//! Every branch responds exactly once; outbound calls are awaited first.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::downstream::Downstream;
use crate::router::{route, InvoiceVerdict, Route};
use crate::telegram::{
    parse_update, truncate_chars, AnswerPreCheckoutQuery, PreCheckoutQuery, TelegramClient,
    Update,
};
use crate::web::auth::{configured_secret, verify_secret_token};
use crate::Config;

/// Sent when the approval call itself could not reach Telegram.
pub const FALLBACK_REJECTION_MESSAGE: &str = "Payment error. Please try again later.";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub telegram: TelegramClient,
    pub downstream: Downstream,
}

impl AppState {
    pub fn new(config: Config, telegram: TelegramClient, downstream: Downstream) -> Self {
        Self {
            config: Arc::new(config),
            telegram,
            downstream,
        }
    }

    /// Build both outbound clients from `config` on one shared connection pool.
    pub fn from_config(config: Config, http: reqwest::Client) -> Self {
        let telegram = TelegramClient::new(
            http.clone(),
            config.telegram_api_base.clone(),
            config.bot_token.clone(),
            config.approval_timeout(),
        );
        let downstream = Downstream::new(
            http,
            config.downstream_url.clone(),
            config.downstream_timeout(),
        );

        Self::new(config, telegram, downstream)
    }
}

/// `{"ok": bool}` body returned by every webhook branch the relay answers itself.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AckResponse {
    pub ok: bool,
}

fn ack(status: StatusCode, ok: bool) -> Response {
    (status, Json(AckResponse { ok })).into_response()
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
// Telegram Webhook
// =============================================================================

/// GET on the webhook path: warmup ping from a cron job. Body is ignored.
pub async fn webhook_ping() -> Response {
    info!("webhook_ping");
    ack(StatusCode::OK, true)
}

/// Any method other than GET or POST on the webhook path.
pub async fn method_not_allowed(method: Method) -> Response {
    warn!(method = %method, "webhook_method_not_allowed");
    ack(StatusCode::METHOD_NOT_ALLOWED, false)
}

/// POST on the webhook path: a Telegram update.
pub async fn telegram_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if let Some(expected) = configured_secret(&state.config.webhook_secret_token) {
        if !verify_secret_token(expected, &headers) {
            return ack(StatusCode::UNAUTHORIZED, false);
        }
    }

    let update = match parse_update(&body) {
        Ok(update) => update,
        Err(e) => {
            warn!(error = %e, body_length = body.len(), "webhook_invalid_update");
            return ack(StatusCode::BAD_REQUEST, false);
        }
    };

    log_received(&update);

    match route(&update, &state.config.invoice_payload_prefix) {
        Route::Warmup => {
            info!("webhook_warmup_acknowledged");
            ack(StatusCode::OK, true)
        }
        Route::PreCheckout { query, verdict } => {
            answer_pre_checkout(&state, query, verdict).await;
            ack(StatusCode::OK, true)
        }
        Route::Relay => relay_update(&state, body).await,
    }
}

fn log_received(update: &Update) {
    let update_id = update
        .update_id
        .as_ref()
        .map(|id| id.to_string())
        .unwrap_or_else(|| "N/A".to_string());

    info!(
        update_id = %update_id,
        update_type = update.kind().as_str(),
        preview = %update.preview(),
        "webhook_received"
    );
}

/// Answer a pre-checkout query via the Bot API.
///
/// Failures are logged and never reach the caller. If Telegram could not be
/// reached at all, one rejection is attempted so the payer is not left
/// waiting on a spinner.
async fn answer_pre_checkout(state: &AppState, query: &PreCheckoutQuery, verdict: InvoiceVerdict) {
    let payload = query
        .invoice_payload
        .as_deref()
        .map(|p| truncate_chars(p.trim()))
        .unwrap_or_default();

    info!(
        user_id = ?query.user_id(),
        payload = %payload,
        currency = ?query.currency(),
        total_amount = ?query.total_amount(),
        approved = verdict.is_approved(),
        "pre_checkout_query_received"
    );

    let Some(query_id) = query.id.as_deref() else {
        warn!(payload = %payload, "pre_checkout_query_missing_id");
        return;
    };

    let answer = match verdict {
        InvoiceVerdict::Approve => AnswerPreCheckoutQuery::approve(query_id),
        InvoiceVerdict::Reject => {
            warn!(payload = %payload, "pre_checkout_invoice_rejected");
            AnswerPreCheckoutQuery::reject(query_id, &state.config.invoice_rejection_message)
        }
    };

    match state.telegram.answer_pre_checkout_query(&answer).await {
        Ok(()) => {}
        Err(e) if e.is_transport() => {
            error!(error = %e, pre_checkout_query_id = query_id, "pre_checkout_answer_failed");

            let fallback = AnswerPreCheckoutQuery::reject(query_id, FALLBACK_REJECTION_MESSAGE);
            if let Err(e) = state.telegram.answer_pre_checkout_query(&fallback).await {
                error!(
                    error = %e,
                    pre_checkout_query_id = query_id,
                    "pre_checkout_fallback_failed"
                );
            }
        }
        Err(e) => {
            error!(error = %e, pre_checkout_query_id = query_id, "pre_checkout_answer_failed");
        }
    }
}

/// Forward the raw body downstream and mirror the answer.
async fn relay_update(state: &AppState, body: Bytes) -> Response {
    match state.downstream.forward(body).await {
        Ok(forwarded) => {
            let mut response = (forwarded.status, forwarded.body).into_response();
            match forwarded.content_type {
                Some(content_type) => {
                    response.headers_mut().insert(CONTENT_TYPE, content_type);
                }
                None => {
                    response.headers_mut().remove(CONTENT_TYPE);
                }
            }
            response
        }
        Err(e) => {
            error!(error = %e, downstream_url = %state.downstream.url(), "downstream_failed");
            ack(StatusCode::BAD_GATEWAY, false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_REJECTION_MESSAGE;
    use crate::web::build_router;
    use axum::{
        http::{HeaderValue, Uri},
        Router,
    };
    use serde_json::{json, Value};
    use std::net::SocketAddr;
    use std::sync::Mutex;
    use std::time::Duration;
    use tokio::net::TcpListener;

    const BOT_TOKEN: &str = "123456:test-token";
    const ANSWER_PATH: &str = "/bot123456:test-token/answerPreCheckoutQuery";
    const DOWNSTREAM_PATH: &str = "/downstream";

    #[derive(Debug, Clone)]
    struct RecordedCall {
        path: String,
        body: Vec<u8>,
    }

    impl RecordedCall {
        fn json(&self) -> Value {
            serde_json::from_slice(&self.body).unwrap()
        }
    }

    /// Stands in for both the Bot API and the downstream handler, recording every call.
    #[derive(Clone)]
    struct Stub {
        calls: Arc<Mutex<Vec<RecordedCall>>>,
        telegram_status: StatusCode,
        /// Delay before answering the first answerPreCheckoutQuery call only
        telegram_first_delay: Option<Duration>,
        downstream_status: StatusCode,
        downstream_body: &'static str,
        downstream_content_type: Option<&'static str>,
    }

    impl Stub {
        fn new() -> Self {
            Self {
                calls: Arc::new(Mutex::new(Vec::new())),
                telegram_status: StatusCode::OK,
                telegram_first_delay: None,
                downstream_status: StatusCode::OK,
                downstream_body: r#"{"ok":true}"#,
                downstream_content_type: Some("application/json"),
            }
        }

        fn calls(&self) -> Vec<RecordedCall> {
            self.calls.lock().unwrap().clone()
        }

        fn calls_to(&self, path: &str) -> Vec<RecordedCall> {
            self.calls().into_iter().filter(|c| c.path == path).collect()
        }
    }

    async fn record(State(stub): State<Stub>, uri: Uri, body: Bytes) -> Response {
        let path = uri.path().to_string();
        let is_answer = path.ends_with("/answerPreCheckoutQuery");

        let earlier_answers = {
            let mut calls = stub.calls.lock().unwrap();
            let earlier = calls.iter().filter(|c| c.path == path).count();
            calls.push(RecordedCall {
                path: path.clone(),
                body: body.to_vec(),
            });
            earlier
        };

        if is_answer {
            if let (Some(delay), 0) = (stub.telegram_first_delay, earlier_answers) {
                tokio::time::sleep(delay).await;
            }
            let ok = stub.telegram_status.is_success();
            return (stub.telegram_status, Json(json!({"ok": ok, "result": ok}))).into_response();
        }

        let mut response = (stub.downstream_status, stub.downstream_body).into_response();
        match stub.downstream_content_type {
            Some(content_type) => {
                response
                    .headers_mut()
                    .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
            }
            None => {
                response.headers_mut().remove(CONTENT_TYPE);
            }
        }
        response
    }

    async fn serve(app: Router) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    /// An address nothing listens on.
    async fn closed_addr() -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        addr
    }

    fn http_client() -> reqwest::Client {
        reqwest::Client::builder().no_proxy().build().unwrap()
    }

    fn test_config(stub_addr: SocketAddr) -> Config {
        Config {
            bot_token: Some(BOT_TOKEN.to_string()),
            telegram_api_base: format!("http://{}", stub_addr),
            downstream_url: format!("http://{}{}", stub_addr, DOWNSTREAM_PATH),
            ..Config::default()
        }
    }

    /// Start the relay and return its base URL.
    async fn spawn_relay(config: Config) -> String {
        let state = AppState::from_config(config, http_client());
        let addr = serve(build_router(state)).await;
        format!("http://{}", addr)
    }

    /// Start a stub plus a relay pointed at it; returns the webhook URL.
    async fn setup(stub: &Stub, tweak: impl FnOnce(&mut Config)) -> String {
        let stub_addr = serve(Router::new().fallback(record).with_state(stub.clone())).await;
        let mut config = test_config(stub_addr);
        tweak(&mut config);
        let path = config.webhook_path.clone();
        format!("{}{}", spawn_relay(config).await, path)
    }

    async fn post(url: &str, body: &'static str) -> reqwest::Response {
        http_client()
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .unwrap()
    }

    async fn ack_of(response: reqwest::Response) -> AckResponse {
        response.json().await.unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let base = spawn_relay(Config::default()).await;
        let response = http_client()
            .get(format!("{}/health", base))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn test_get_ping_ignores_body() {
        let stub = Stub::new();
        let url = setup(&stub, |_| {}).await;

        let response = http_client().get(&url).body("{not json").send().await.unwrap();

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(ack_of(response).await, AckResponse { ok: true });
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn test_other_methods_not_allowed() {
        let stub = Stub::new();
        let url = setup(&stub, |_| {}).await;

        for method in [reqwest::Method::PUT, reqwest::Method::DELETE, reqwest::Method::PATCH] {
            let response = http_client()
                .request(method.clone(), &url)
                .body(r#"{"update_id": 1}"#)
                .send()
                .await
                .unwrap();

            assert_eq!(response.status(), reqwest::StatusCode::METHOD_NOT_ALLOWED, "{}", method);
            assert_eq!(ack_of(response).await, AckResponse { ok: false });
        }
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn test_warmup_is_not_forwarded() {
        let stub = Stub::new();
        let url = setup(&stub, |_| {}).await;

        for body in [
            r#"{"update_id": 0}"#,
            r#"{"update_id": "0"}"#,
            r#"{"update_id": 0, "message": {"text": "ping"}}"#,
        ] {
            let response = post(&url, body).await;
            assert_eq!(response.status(), reqwest::StatusCode::OK);
            assert_eq!(ack_of(response).await, AckResponse { ok: true });
        }

        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn test_pre_checkout_approved() {
        let stub = Stub::new();
        let url = setup(&stub, |_| {}).await;

        let response = post(
            &url,
            r#"{"update_id": 11, "pre_checkout_query": {"id": "pcq-1", "from": {"id": 42},
                "currency": "USD", "total_amount": 999, "invoice_payload": "premium_123"}}"#,
        )
        .await;

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(ack_of(response).await, AckResponse { ok: true });

        let answers = stub.calls_to(ANSWER_PATH);
        assert_eq!(answers.len(), 1);
        assert_eq!(
            answers[0].json(),
            json!({"pre_checkout_query_id": "pcq-1", "ok": true})
        );
        assert!(stub.calls_to(DOWNSTREAM_PATH).is_empty());
    }

    #[tokio::test]
    async fn test_pre_checkout_rejected() {
        let stub = Stub::new();
        let url = setup(&stub, |_| {}).await;

        let response = post(
            &url,
            r#"{"update_id": 12, "pre_checkout_query": {"id": "pcq-2",
                "invoice_payload": "other"}}"#,
        )
        .await;

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(ack_of(response).await, AckResponse { ok: true });

        let answers = stub.calls_to(ANSWER_PATH);
        assert_eq!(answers.len(), 1);
        let answer = answers[0].json();
        assert_eq!(answer["pre_checkout_query_id"], "pcq-2");
        assert_eq!(answer["ok"], false);
        assert_eq!(answer["error_message"], DEFAULT_REJECTION_MESSAGE);
        assert!(stub.calls_to(DOWNSTREAM_PATH).is_empty());
    }

    #[tokio::test]
    async fn test_pre_checkout_custom_prefix() {
        let stub = Stub::new();
        let url = setup(&stub, |c| c.invoice_payload_prefix = "pro_".to_string()).await;

        post(
            &url,
            r#"{"update_id": 13, "pre_checkout_query": {"id": "pcq-3",
                "invoice_payload": "premium_1"}}"#,
        )
        .await;

        let answers = stub.calls_to(ANSWER_PATH);
        assert_eq!(answers.len(), 1);
        assert_eq!(answers[0].json()["ok"], false);
    }

    #[tokio::test]
    async fn test_pre_checkout_api_error_is_not_surfaced() {
        let mut stub = Stub::new();
        stub.telegram_status = StatusCode::BAD_REQUEST;
        let url = setup(&stub, |_| {}).await;

        let response = post(
            &url,
            r#"{"update_id": 14, "pre_checkout_query": {"id": "pcq-4",
                "invoice_payload": "premium_1"}}"#,
        )
        .await;

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(ack_of(response).await, AckResponse { ok: true });
        // An HTTP error answer is not followed by a fallback rejection
        let answers = stub.calls_to(ANSWER_PATH);
        assert_eq!(answers.len(), 1);
        assert_eq!(answers[0].json(), json!({"pre_checkout_query_id": "pcq-4", "ok": true}));
    }

    #[tokio::test]
    async fn test_pre_checkout_unreachable_api_is_not_surfaced() {
        let stub = Stub::new();
        let closed = closed_addr().await;
        let url = setup(&stub, |c| c.telegram_api_base = format!("http://{}", closed)).await;

        let response = post(
            &url,
            r#"{"update_id": 15, "pre_checkout_query": {"id": "pcq-5",
                "invoice_payload": "premium_1"}}"#,
        )
        .await;

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(ack_of(response).await, AckResponse { ok: true });
        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn test_pre_checkout_without_id_or_token() {
        let stub = Stub::new();
        let url = setup(&stub, |_| {}).await;
        let response = post(
            &url,
            r#"{"update_id": 16, "pre_checkout_query": {"invoice_payload": "premium_1"}}"#,
        )
        .await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let url = setup(&stub, |c| c.bot_token = None).await;
        let response = post(
            &url,
            r#"{"update_id": 17, "pre_checkout_query": {"id": "pcq-7",
                "invoice_payload": "premium_1"}}"#,
        )
        .await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn test_relay_forwards_raw_body() {
        let mut stub = Stub::new();
        stub.downstream_status = StatusCode::ACCEPTED;
        stub.downstream_body = r#"{"handled": true}"#;
        let url = setup(&stub, |_| {}).await;

        let body = r#"{ "update_id": 77,  "message": {"message_id": 3, "text": "hello"} }"#;
        let response = post(&url, body).await;

        assert_eq!(response.status(), reqwest::StatusCode::ACCEPTED);
        assert_eq!(response.text().await.unwrap(), r#"{"handled": true}"#);

        let forwarded = stub.calls_to(DOWNSTREAM_PATH);
        assert_eq!(forwarded.len(), 1);
        assert_eq!(forwarded[0].body, body.as_bytes());
        assert_eq!(stub.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_relay_mirrors_downstream_error() {
        let mut stub = Stub::new();
        stub.downstream_status = StatusCode::INTERNAL_SERVER_ERROR;
        stub.downstream_body = r#"{"ok":false}"#;
        let url = setup(&stub, |_| {}).await;

        let response = post(&url, r#"{"update_id": 78, "callback_query": {"data": "x"}}"#).await;

        assert_eq!(response.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.text().await.unwrap(), r#"{"ok":false}"#);
        assert_eq!(stub.calls_to(DOWNSTREAM_PATH).len(), 1);
    }

    #[tokio::test]
    async fn test_relay_unreachable_downstream() {
        let stub = Stub::new();
        let closed = closed_addr().await;
        let url = setup(&stub, |c| {
            c.downstream_url = format!("http://{}/downstream", closed);
        })
        .await;

        let response = post(&url, r#"{"update_id": 79, "message": {"text": "hi"}}"#).await;

        assert_eq!(response.status(), reqwest::StatusCode::BAD_GATEWAY);
        assert_eq!(ack_of(response).await, AckResponse { ok: false });
    }

    #[tokio::test]
    async fn test_invalid_body_is_rejected() {
        let stub = Stub::new();
        let url = setup(&stub, |_| {}).await;

        for body in ["not json", "", "[1, 2]", r#"{"pre_checkout_query": 5}"#] {
            let response = post(&url, body).await;
            assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST, "{:?}", body);
            assert_eq!(ack_of(response).await, AckResponse { ok: false });
        }

        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn test_secret_token_required_when_configured() {
        let stub = Stub::new();
        let url = setup(&stub, |c| c.webhook_secret_token = Some("s3cret".to_string())).await;

        let response = post(&url, r#"{"update_id": 80, "message": {"text": "hi"}}"#).await;
        assert_eq!(response.status(), reqwest::StatusCode::UNAUTHORIZED);
        assert_eq!(ack_of(response).await, AckResponse { ok: false });
        assert!(stub.calls().is_empty());

        let response = http_client()
            .post(&url)
            .header("X-Telegram-Bot-Api-Secret-Token", "s3cret")
            .body(r#"{"update_id": 81, "message": {"text": "hi"}}"#)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(stub.calls_to(DOWNSTREAM_PATH).len(), 1);

        // Pings stay open
        let response = http_client().get(&url).send().await.unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);
    }

    #[tokio::test]
    async fn test_pre_checkout_partial_from_is_answered() {
        let stub = Stub::new();
        let url = setup(&stub, |_| {}).await;

        for body in [
            r#"{"update_id": 18, "pre_checkout_query": {"id": "pcq-8", "from": {},
                "invoice_payload": "premium_1"}}"#,
            r#"{"update_id": 19, "pre_checkout_query": {"id": "pcq-8", "from": {"first_name": "A"},
                "total_amount": "999", "invoice_payload": "premium_1"}}"#,
        ] {
            let response = post(&url, body).await;
            assert_eq!(response.status(), reqwest::StatusCode::OK);
            assert_eq!(ack_of(response).await, AckResponse { ok: true });
        }

        let answers = stub.calls_to(ANSWER_PATH);
        assert_eq!(answers.len(), 2);
        for answer in answers {
            assert_eq!(answer.json(), json!({"pre_checkout_query_id": "pcq-8", "ok": true}));
        }
    }

    #[tokio::test]
    async fn test_pre_checkout_timeout_sends_fallback_rejection() {
        let mut stub = Stub::new();
        stub.telegram_first_delay = Some(Duration::from_millis(800));
        let url = setup(&stub, |c| c.approval_timeout_ms = 200).await;

        let response = post(
            &url,
            r#"{"update_id": 20, "pre_checkout_query": {"id": "pcq-9",
                "invoice_payload": "premium_1"}}"#,
        )
        .await;

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(ack_of(response).await, AckResponse { ok: true });

        let answers = stub.calls_to(ANSWER_PATH);
        assert_eq!(answers.len(), 2);
        assert_eq!(answers[0].json(), json!({"pre_checkout_query_id": "pcq-9", "ok": true}));
        assert_eq!(
            answers[1].json(),
            json!({
                "pre_checkout_query_id": "pcq-9",
                "ok": false,
                "error_message": FALLBACK_REJECTION_MESSAGE
            })
        );
        assert!(stub.calls_to(DOWNSTREAM_PATH).is_empty());
    }

    #[tokio::test]
    async fn test_relay_without_content_type() {
        let mut stub = Stub::new();
        stub.downstream_content_type = None;
        stub.downstream_body = "done";
        let url = setup(&stub, |_| {}).await;

        let response = post(&url, r#"{"update_id": 82, "message": {"text": "hi"}}"#).await;

        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert!(response.headers().get(CONTENT_TYPE).is_none());
        assert_eq!(response.text().await.unwrap(), "done");
    }

    #[tokio::test]
    async fn test_relay_mirrors_downstream_content_type() {
        let mut stub = Stub::new();
        stub.downstream_content_type = Some("text/plain; charset=utf-8");
        stub.downstream_body = "plain";
        let url = setup(&stub, |_| {}).await;

        let response = post(&url, r#"{"update_id": 83, "message": {"text": "hi"}}"#).await;

        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );
        assert_eq!(response.text().await.unwrap(), "plain");
    }
}
