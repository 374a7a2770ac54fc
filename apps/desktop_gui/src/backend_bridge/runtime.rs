//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::{ChatTransport, HttpChatTransport};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(server_url: String, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    thread::spawn(move || {
        let transport: Arc<dyn ChatTransport> = match HttpChatTransport::new(&server_url) {
            Ok(transport) => {
                tracing::info!(endpoint = %transport.endpoint(), "chat backend ready");
                let _ = ui_tx.try_send(UiEvent::Info(format!(
                    "Chat endpoint: {}",
                    transport.endpoint()
                )));
                Arc::new(transport)
            }
            Err(err) => {
                tracing::error!("backend worker startup failure: {err}");
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_chat_error(
                    UiErrorContext::BackendStartup,
                    &err,
                )));
                return;
            }
        };
        serve(transport, cmd_rx, ui_tx);
    });
}

/// Runs commands until the UI side drops its sender.
pub fn serve(
    transport: Arc<dyn ChatTransport>,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
) {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                UiErrorContext::BackendStartup,
                format!("backend worker startup failure: failed to build runtime: {err}"),
            )));
            tracing::error!("failed to build backend runtime: {err}");
            return;
        }
    };

    runtime.block_on(async move {
        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                BackendCommand::SendChat { exchange, request } => {
                    let transport = Arc::clone(&transport);
                    let ui_tx = ui_tx.clone();
                    tokio::spawn(async move {
                        let outcome = transport.send(&request).await;
                        if ui_tx
                            .send(UiEvent::ChatCompleted { exchange, outcome })
                            .is_err()
                        {
                            tracing::debug!(
                                exchange = exchange.value(),
                                "ui closed before chat reply arrived"
                            );
                        }
                    });
                }
            }
        }
        tracing::debug!("ui command queue closed; backend worker stopping");
    });
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
