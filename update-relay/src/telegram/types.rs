//! Telegram update types.
//!
//! Only the fields the relay decides on are typed. Everything else stays
//! opaque: the raw request body is what gets forwarded, never a
//! re-serialization of these structs.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use crate::error::ParseError;

/// Maximum characters of user-supplied text copied into log fields.
pub const LOG_PREVIEW_CHARS: usize = 50;

/// An inbound Telegram update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Update {
    /// Update identifier. Telegram sends an integer; synthetic callers may send a string.
    #[serde(default)]
    pub update_id: Option<UpdateId>,

    /// Present when a payer pressed "Pay" on an invoice
    #[serde(default)]
    pub pre_checkout_query: Option<PreCheckoutQuery>,

    /// Ordinary message, kept opaque
    #[serde(default)]
    pub message: Option<Value>,

    /// Inline keyboard callback, kept opaque
    #[serde(default)]
    pub callback_query: Option<Value>,

    /// Top-level keys of the raw object, sorted
    #[serde(skip)]
    pub keys: Vec<String>,
}

/// `update_id` as received, without coercion.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum UpdateId {
    Number(serde_json::Number),
    Text(String),
    Other(Value),
}

impl UpdateId {
    /// Zero (numeric or `"0"`) marks a synthetic warmup call; Telegram never issues it.
    pub fn is_warmup(&self) -> bool {
        match self {
            UpdateId::Number(n) => n.as_f64() == Some(0.0),
            UpdateId::Text(s) => s == "0",
            UpdateId::Other(_) => false,
        }
    }
}

impl fmt::Display for UpdateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpdateId::Number(n) => write!(f, "{}", n),
            UpdateId::Text(s) => f.write_str(s),
            UpdateId::Other(v) => write!(f, "{}", v),
        }
    }
}

/// Telegram `PreCheckoutQuery`.
///
/// `id` and `invoice_payload` drive the answer and are typed. The rest is
/// only logged, so it is kept as raw JSON and read leniently: a partial or
/// oddly typed `from` never turns a payable query into a 400.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreCheckoutQuery {
    /// Opaque query identifier, echoed back in the answer
    #[serde(default)]
    pub id: Option<String>,

    /// Bot-defined invoice payload
    #[serde(default)]
    pub invoice_payload: Option<String>,

    /// Paying user, kept opaque
    #[serde(default)]
    pub from: Option<Value>,

    /// Three-letter ISO 4217 currency code, kept opaque
    #[serde(default)]
    pub currency: Option<Value>,

    /// Price in the smallest units of the currency, kept opaque
    #[serde(default)]
    pub total_amount: Option<Value>,
}

impl PreCheckoutQuery {
    pub fn user_id(&self) -> Option<i64> {
        self.from.as_ref()?.get("id")?.as_i64()
    }

    pub fn currency(&self) -> Option<&str> {
        self.currency.as_ref()?.as_str()
    }

    /// Amount as sent; numeric strings are accepted.
    pub fn total_amount(&self) -> Option<i64> {
        match self.total_amount.as_ref()? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Which kind of update this is, for log context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateKind {
    Message,
    CallbackQuery,
    PreCheckoutQuery,
    Unknown,
}

impl UpdateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateKind::Message => "message",
            UpdateKind::CallbackQuery => "callback_query",
            UpdateKind::PreCheckoutQuery => "pre_checkout_query",
            UpdateKind::Unknown => "unknown",
        }
    }
}

impl Update {
    pub fn kind(&self) -> UpdateKind {
        if self.message.is_some() {
            UpdateKind::Message
        } else if self.callback_query.is_some() {
            UpdateKind::CallbackQuery
        } else if self.pre_checkout_query.is_some() {
            UpdateKind::PreCheckoutQuery
        } else {
            UpdateKind::Unknown
        }
    }

    /// Short text describing the update content, for logs.
    ///
    /// Message text or callback data, truncated; the key list for unknown kinds.
    pub fn preview(&self) -> String {
        let field = |value: &Option<Value>, name: &str| {
            value
                .as_ref()
                .and_then(|v| v.get(name))
                .and_then(Value::as_str)
                .map(truncate_chars)
                .unwrap_or_default()
        };

        match self.kind() {
            UpdateKind::Message => field(&self.message, "text"),
            UpdateKind::CallbackQuery => field(&self.callback_query, "data"),
            UpdateKind::PreCheckoutQuery => self
                .pre_checkout_query
                .as_ref()
                .and_then(|q| q.invoice_payload.as_deref())
                .map(truncate_chars)
                .unwrap_or_default(),
            UpdateKind::Unknown => self.keys.join(","),
        }
    }
}

/// Parse a raw request body into an [`Update`].
///
/// The body must be a JSON object; arrays and scalars are rejected even
/// though serde would happily read an array into a struct.
pub fn parse_update(body: &[u8]) -> Result<Update, ParseError> {
    let value: Value = serde_json::from_slice(body).map_err(ParseError::InvalidJson)?;

    let keys = match &value {
        Value::Object(map) => map.keys().cloned().collect(),
        Value::Array(_) => return Err(ParseError::NotAnObject("array")),
        Value::String(_) => return Err(ParseError::NotAnObject("string")),
        Value::Number(_) => return Err(ParseError::NotAnObject("number")),
        Value::Bool(_) => return Err(ParseError::NotAnObject("boolean")),
        Value::Null => return Err(ParseError::NotAnObject("null")),
    };

    let mut update: Update = serde_json::from_value(value).map_err(ParseError::InvalidShape)?;
    update.keys = keys;
    Ok(update)
}

/// Truncate to [`LOG_PREVIEW_CHARS`] characters on a char boundary.
pub fn truncate_chars(s: &str) -> String {
    s.chars().take(LOG_PREVIEW_CHARS).collect()
}
