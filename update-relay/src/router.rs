//! Update routing.
//!
//! Pure decision logic: given a parsed update, pick one of three outcomes.
//! All I/O happens in the web handlers.
//!
//! ```text
//! update_id == 0          → Warmup      (acknowledge, nothing forwarded)
//! pre_checkout_query      → PreCheckout (answer Telegram directly)
//! anything else           → Relay       (forward raw body downstream)
//! ```

use crate::telegram::{PreCheckoutQuery, Update};

/// Outcome for a single update.
#[derive(Debug, Clone, Copy)]
pub enum Route<'a> {
    Warmup,
    PreCheckout {
        query: &'a PreCheckoutQuery,
        verdict: InvoiceVerdict,
    },
    Relay,
}

/// Whether an invoice payload belongs to this bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceVerdict {
    Approve,
    Reject,
}

impl InvoiceVerdict {
    pub fn is_approved(&self) -> bool {
        matches!(self, InvoiceVerdict::Approve)
    }
}

/// Approve payloads that start with `prefix` after trimming whitespace.
pub fn check_invoice(invoice_payload: Option<&str>, prefix: &str) -> InvoiceVerdict {
    match invoice_payload {
        Some(payload) if payload.trim().starts_with(prefix) => InvoiceVerdict::Approve,
        _ => InvoiceVerdict::Reject,
    }
}

/// Decide what to do with an update.
pub fn route<'a>(update: &'a Update, invoice_prefix: &str) -> Route<'a> {
    if update.update_id.as_ref().is_some_and(|id| id.is_warmup()) {
        return Route::Warmup;
    }

    if let Some(query) = &update.pre_checkout_query {
        return Route::PreCheckout {
            query,
            verdict: check_invoice(query.invoice_payload.as_deref(), invoice_prefix),
        };
    }

    Route::Relay
}
