use thiserror::Error;

/// Every way a single chat exchange can fail. All variants look the same to the
/// user; the distinction only feeds diagnostics.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("invalid chat endpoint {url:?}: {reason}")]
    InvalidEndpoint { url: String, reason: String },
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Server error: {0}")]
    Status(u16),
    #[error("malformed response body: {0}")]
    Decode(String),
    #[error("chat backend unavailable: {0}")]
    Unavailable(String),
}

impl ChatError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ChatError::Status(code) => Some(*code),
            _ => None,
        }
    }
}
