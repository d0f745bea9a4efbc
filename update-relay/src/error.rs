use thiserror::Error;

/// Inbound body could not be read as an Update.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Request body is not valid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Request body is a JSON {0}, expected an object")]
    NotAnObject(&'static str),

    #[error("Update has an unexpected shape: {0}")]
    InvalidShape(#[source] serde_json::Error),
}

/// Errors from the Telegram Bot API client.
#[derive(Error, Debug)]
pub enum TelegramError {
    #[error("Bot token is not configured")]
    MissingToken,

    /// No HTTP response was received. The URL is stripped since it embeds the token.
    #[error("Telegram request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Telegram answered {status}: {body}")]
    Rejected { status: u16, body: String },
}

impl TelegramError {
    /// True when the request never produced an HTTP response.
    pub fn is_transport(&self) -> bool {
        matches!(self, TelegramError::Transport(_))
    }
}

/// Errors from forwarding an update to the downstream handler.
#[derive(Error, Debug)]
pub enum DownstreamError {
    #[error("Downstream request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read downstream response body: {0}")]
    Body(#[source] reqwest::Error),
}
