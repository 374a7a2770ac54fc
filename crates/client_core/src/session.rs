//! Conversation controller: owns the turn history and drives one
//! request/response exchange at a time.

use shared::{
    domain::{Conversation, Turn},
    protocol::{ChatRequest, ChatResponse},
};
use tracing::{debug, error, warn};

use crate::{
    error::ChatError,
    transcript::{EntryHandle, EntryKind, Transcript},
    transport::ChatTransport,
};

pub const THINKING_PLACEHOLDER: &str = "Thinking...";
pub const NO_RESPONSE_MESSAGE: &str = "Sorry, no response received.";
pub const FAILURE_MESSAGE: &str = "Failed to get response from server.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExchangeId(u64);

impl ExchangeId {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// A send that has been committed to the transcript and conversation but whose
/// reply has not arrived yet. Owns the placeholder handle, so completing the
/// exchange removes the placeholder exactly once.
#[derive(Debug)]
pub struct PendingExchange {
    id: ExchangeId,
    placeholder: EntryHandle,
    request: ChatRequest,
}

impl PendingExchange {
    pub fn id(&self) -> ExchangeId {
        self.id
    }

    pub fn request(&self) -> &ChatRequest {
        &self.request
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendReport {
    /// Empty input, or another exchange was still in flight.
    Skipped,
    Replied(String),
    NoResponse,
    Failed,
}

#[derive(Debug, Default)]
pub struct ChatSession {
    conversation: Conversation,
    in_flight: Option<ExchangeId>,
    next_exchange: u64,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Commits the current input as a user turn and shows the placeholder.
    ///
    /// Returns `None` and leaves everything untouched when the trimmed input is
    /// empty or an exchange is already in flight.
    pub fn begin_send<T>(&mut self, input: &mut String, transcript: &mut T) -> Option<PendingExchange>
    where
        T: Transcript + ?Sized,
    {
        let text = input.trim();
        if text.is_empty() {
            return None;
        }
        if let Some(current) = self.in_flight {
            debug!(exchange = current.0, "send ignored while an exchange is in flight");
            return None;
        }
        let text = text.to_string();

        transcript.add_message(&text, EntryKind::User);
        input.clear();
        self.conversation.push(Turn::user(text));
        let placeholder = transcript.add_placeholder(THINKING_PLACEHOLDER);

        let id = ExchangeId(self.next_exchange);
        self.next_exchange += 1;
        self.in_flight = Some(id);

        Some(PendingExchange {
            id,
            placeholder,
            request: ChatRequest::new(self.conversation.clone()),
        })
    }

    /// Resolves a pending exchange with the transport outcome.
    pub fn complete_exchange<T>(
        &mut self,
        pending: PendingExchange,
        outcome: Result<ChatResponse, ChatError>,
        transcript: &mut T,
    ) -> SendReport
    where
        T: Transcript + ?Sized,
    {
        let PendingExchange {
            id, placeholder, ..
        } = pending;
        if self.in_flight == Some(id) {
            self.in_flight = None;
        } else {
            warn!(exchange = id.0, "completing an exchange that is not in flight");
        }
        transcript.remove(placeholder);

        match outcome {
            Ok(response) => match response.reply() {
                Some(reply) => {
                    let reply = reply.to_string();
                    transcript.add_message(&reply, EntryKind::Bot);
                    self.conversation.push(Turn::model(reply.clone()));
                    SendReport::Replied(reply)
                }
                None => {
                    transcript.add_message(NO_RESPONSE_MESSAGE, EntryKind::BotError);
                    SendReport::NoResponse
                }
            },
            Err(err) => {
                error!(exchange = id.0, status = ?err.status(), "error fetching response: {err}");
                transcript.add_message(FAILURE_MESSAGE, EntryKind::BotError);
                SendReport::Failed
            }
        }
    }

    /// Runs a full exchange: commit the input, await the transport, render the reply.
    pub async fn send_message<T>(
        &mut self,
        transport: &dyn ChatTransport,
        input: &mut String,
        transcript: &mut T,
    ) -> SendReport
    where
        T: Transcript + ?Sized,
    {
        let Some(pending) = self.begin_send(input, transcript) else {
            return SendReport::Skipped;
        };
        let outcome = transport.send(pending.request()).await;
        self.complete_exchange(pending, outcome, transcript)
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
