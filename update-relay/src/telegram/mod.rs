//! Telegram Bot API types and client.
//!
//! - `types`: the inbound `Update` shape and body parsing
//! - `client`: outbound `answerPreCheckoutQuery`

pub mod client;
pub mod types;

pub use client::{AnswerPreCheckoutQuery, TelegramClient};
pub use types::{parse_update, truncate_chars, PreCheckoutQuery, Update, UpdateId, UpdateKind};
