//! UI/backend events and error modeling for desktop GUI controller.

use client_core::{ChatError, ExchangeId};
use shared::protocol::ChatResponse;

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    ChatCompleted {
        exchange: ExchangeId,
        outcome: Result<ChatResponse, ChatError>,
    },
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Configuration,
    Transport,
    Server,
    Protocol,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    SendMessage,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_chat_error(context: UiErrorContext, err: &ChatError) -> Self {
        let category = match err {
            ChatError::InvalidEndpoint { .. } => UiErrorCategory::Configuration,
            ChatError::Transport(_) | ChatError::Unavailable(_) => UiErrorCategory::Transport,
            ChatError::Status(_) => UiErrorCategory::Server,
            ChatError::Decode(_) => UiErrorCategory::Protocol,
        };
        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("invalid chat endpoint")
            || message_lower.contains("relative url")
        {
            UiErrorCategory::Configuration
        } else if message_lower.contains("server error") {
            UiErrorCategory::Server
        } else if message_lower.contains("malformed") || message_lower.contains("expected value") {
            UiErrorCategory::Protocol
        } else if message_lower.contains("timeout")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("transport")
            || message_lower.contains("unavailable")
            || message_lower.contains("disconnect")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub fn err_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Configuration => "Configuration",
        UiErrorCategory::Transport => "Transport",
        UiErrorCategory::Server => "Server",
        UiErrorCategory::Protocol => "Protocol",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

#[cfg(test)]
#[path = "tests/events_tests.rs"]
mod tests;
