//! Update Relay - Telegram webhook relay.
//!
//! Sits in front of the bot's update handler and decides, per update, to:
//! - acknowledge synthetic warmup pings (`update_id` 0)
//! - answer pre-checkout queries directly against the Bot API
//! - forward everything else to the downstream handler unchanged
//!
//! ## Architecture
//!
//! ```text
//! Telegram → Relay ─┬─ warmup            → 200
//!                   ├─ pre_checkout_query → answerPreCheckoutQuery → 200
//!                   └─ other             → Downstream handler → mirrored
//! ```

pub mod config;
pub mod downstream;
pub mod error;
pub mod router;
pub mod telegram;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use downstream::{Downstream, DownstreamResponse};
pub use error::{DownstreamError, ParseError, TelegramError};
pub use router::{check_invoice, route, InvoiceVerdict, Route};
pub use telegram::{parse_update, AnswerPreCheckoutQuery, TelegramClient, Update};
pub use web::{build_router, AppState};
