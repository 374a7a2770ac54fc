use serde::{Deserialize, Serialize};

use crate::domain::Conversation;

pub const CHAT_ENDPOINT_PATH: &str = "/api/chat";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub conversation: Conversation,
}

impl ChatRequest {
    pub fn new(conversation: Conversation) -> Self {
        Self { conversation }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

impl ChatResponse {
    pub fn with_result(result: impl Into<String>) -> Self {
        Self {
            result: Some(result.into()),
        }
    }

    /// The reply text, if the server produced a non-empty one.
    pub fn reply(&self) -> Option<&str> {
        self.result.as_deref().filter(|text| !text.is_empty())
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
