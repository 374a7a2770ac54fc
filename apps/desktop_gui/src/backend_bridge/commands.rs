//! Backend commands queued from UI to backend worker.

use client_core::ExchangeId;
use shared::protocol::ChatRequest;

#[derive(Debug)]
pub enum BackendCommand {
    SendChat {
        exchange: ExchangeId,
        request: ChatRequest,
    },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::SendChat { .. } => "send_chat",
        }
    }
}
