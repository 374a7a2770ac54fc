use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::{ChatRequest, ChatResponse, CHAT_ENDPOINT_PATH};
use tracing::debug;
use url::Url;

use crate::error::ChatError;

#[async_trait]
pub trait ChatTransport: Send + Sync {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ChatError>;
}

/// Posts the whole conversation as JSON to `<server>/api/chat`.
///
/// No timeout and no retry: a call waits for the connection to settle and a
/// failure is reported exactly once.
pub struct HttpChatTransport {
    http: Client,
    endpoint: Url,
}

impl HttpChatTransport {
    pub fn new(server_url: &str) -> Result<Self, ChatError> {
        Ok(Self {
            http: Client::new(),
            endpoint: chat_endpoint(server_url)?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

pub fn chat_endpoint(server_url: &str) -> Result<Url, ChatError> {
    let invalid = |reason: String| ChatError::InvalidEndpoint {
        url: server_url.to_string(),
        reason,
    };
    let base = Url::parse(server_url.trim()).map_err(|e| invalid(e.to_string()))?;
    if base.cannot_be_a_base() {
        return Err(invalid("url cannot carry a path".to_string()));
    }
    base.join(CHAT_ENDPOINT_PATH)
        .map_err(|e| invalid(e.to_string()))
}

#[async_trait]
impl ChatTransport for HttpChatTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ChatError> {
        debug!(
            endpoint = %self.endpoint,
            turns = request.conversation.len(),
            "posting conversation"
        );
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        serde_json::from_slice::<ChatResponse>(&body).map_err(|e| ChatError::Decode(e.to_string()))
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
