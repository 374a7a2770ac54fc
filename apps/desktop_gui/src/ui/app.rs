use client_core::{
    ChatError, ChatSession, ExchangeId, MemoryTranscript, PendingExchange, PreferenceStore,
    SendReport, ThemeController,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::{domain::ThemePreference, protocol::ChatResponse};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{err_label, UiError, UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::theme::{palette_for, visuals_for_theme, ChatPalette};

const COMPOSER_HINT: &str = "Type your message... (Enter to send)";

pub struct ChatApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,

    server_url: String,
    session: ChatSession,
    transcript: MemoryTranscript,
    pending: Option<PendingExchange>,
    composer: String,
    focus_composer: bool,

    theme: ThemeController<Box<dyn PreferenceStore>>,
    applied_theme: Option<ThemePreference>,

    status: String,
}

impl ChatApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        server_url: impl Into<String>,
        preferences: Box<dyn PreferenceStore>,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            server_url: server_url.into(),
            session: ChatSession::new(),
            transcript: MemoryTranscript::new(),
            pending: None,
            composer: String::new(),
            focus_composer: true,
            theme: ThemeController::load(preferences),
            applied_theme: None,
            status: String::new(),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.session.is_busy()
    }

    pub fn theme(&self) -> ThemePreference {
        self.theme.current()
    }

    pub fn toggle_theme(&mut self) -> ThemePreference {
        self.theme.toggle()
    }

    /// Commits the composer text and hands the request to the backend worker.
    pub fn try_send_current_composer(&mut self) -> bool {
        let Some(pending) = self.session.begin_send(&mut self.composer, &mut self.transcript)
        else {
            return false;
        };

        let exchange = pending.id();
        let cmd = BackendCommand::SendChat {
            exchange,
            request: pending.request().clone(),
        };
        self.pending = Some(pending);
        if let Err(err) = dispatch_backend_command(&self.cmd_tx, cmd, &mut self.status) {
            self.finish_exchange(exchange, Err(err));
        }
        true
    }

    pub fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::ChatCompleted { exchange, outcome } => {
                    self.finish_exchange(exchange, outcome);
                }
                UiEvent::Error(err) => {
                    tracing::warn!(context = ?err.context(), "backend reported: {}", err.message());
                    self.status = format!("{} error: {}", err_label(err.category()), err.message());
                }
            }
        }
    }

    /// Draws one frame and handles its input.
    pub fn show(&mut self, ctx: &egui::Context) {
        self.process_ui_events();
        self.apply_theme_if_needed(ctx);

        let palette = palette_for(self.theme());
        self.show_header(ctx, palette);
        self.show_composer(ctx, palette);
        self.show_transcript(ctx, palette);

        if self.is_busy() {
            ctx.request_repaint_after(std::time::Duration::from_millis(50));
        } else {
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        }
    }

    fn finish_exchange(&mut self, exchange: ExchangeId, outcome: Result<ChatResponse, ChatError>) {
        let Some(pending) = self.pending.take_if(|p| p.id() == exchange) else {
            tracing::warn!(
                exchange = exchange.value(),
                "dropping reply for an exchange that is not pending"
            );
            return;
        };

        let diagnostic = outcome
            .as_ref()
            .err()
            .map(|err| UiError::from_chat_error(UiErrorContext::SendMessage, err));
        let report = self
            .session
            .complete_exchange(pending, outcome, &mut self.transcript);

        self.status = match (report, diagnostic) {
            (SendReport::Failed, Some(err)) => {
                format!("{} error: {}", err_label(err.category()), err.message())
            }
            (SendReport::NoResponse, _) => "Server returned no result".to_string(),
            _ => String::new(),
        };
        self.focus_composer = true;
    }

    fn apply_theme_if_needed(&mut self, ctx: &egui::Context) {
        let current = self.theme.current();
        if self.applied_theme == Some(current) {
            return;
        }
        ctx.set_visuals(visuals_for_theme(current));
        self.applied_theme = Some(current);
    }

    fn show_header(&mut self, ctx: &egui::Context, palette: ChatPalette) {
        egui::TopBottomPanel::top("chat_header")
            .frame(
                egui::Frame::new()
                    .fill(palette.header_background)
                    .inner_margin(egui::Margin::symmetric(12, 8)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("Chat").strong().size(18.0));
                    ui.label(
                        egui::RichText::new(&self.server_url)
                            .small()
                            .color(palette.hint_text),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let toggle = ui
                            .button(egui::RichText::new(self.theme.icon()).size(18.0))
                            .on_hover_text("Toggle dark mode");
                        if toggle.clicked() {
                            let theme = self.toggle_theme();
                            tracing::debug!(%theme, "theme toggled");
                        }
                    });
                });
            });
    }

    fn show_composer(&mut self, ctx: &egui::Context, palette: ChatPalette) {
        egui::TopBottomPanel::bottom("composer")
            .frame(
                egui::Frame::new()
                    .fill(palette.header_background)
                    .inner_margin(egui::Margin::symmetric(12, 10)),
            )
            .show(ctx, |ui| {
                let busy = self.is_busy();
                ui.horizontal(|ui| {
                    let send_width = 72.0;
                    let text_w = (ui.available_width() - send_width - ui.spacing().item_spacing.x)
                        .max(64.0);
                    let response = ui.add_enabled(
                        !busy,
                        egui::TextEdit::singleline(&mut self.composer)
                            .id_salt("composer_text")
                            .desired_width(text_w)
                            .hint_text(
                                egui::RichText::new(COMPOSER_HINT).color(palette.hint_text),
                            ),
                    );
                    if self.focus_composer && !busy {
                        response.request_focus();
                        self.focus_composer = false;
                    }

                    // A single-line edit gives up focus on Enter instead of inserting a newline.
                    let send_shortcut =
                        response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    let clicked_send = ui
                        .add_enabled(!busy, egui::Button::new("Send").min_size(egui::vec2(send_width, 0.0)))
                        .clicked();

                    let sent = (send_shortcut || clicked_send) && self.try_send_current_composer();
                    // Enter drops focus even when nothing was sent.
                    if sent || send_shortcut {
                        self.focus_composer = true;
                    }
                });
                if !self.status.is_empty() {
                    ui.small(egui::RichText::new(&self.status).color(palette.hint_text));
                }
            });
    }

    fn show_transcript(&mut self, ctx: &egui::Context, palette: ChatPalette) {
        let scroll_to_latest = self.transcript.take_scroll_request();
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("chat_history")
                .auto_shrink([false, false])
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    if self.transcript.is_empty() {
                        ui.add_space(10.0);
                        ui.colored_label(palette.hint_text, "Say hello to start the conversation.");
                    }

                    let last_index = self.transcript.len().saturating_sub(1);
                    for (index, entry) in self.transcript.entries().iter().enumerate() {
                        let (fill, text_color) = palette.entry_colors(entry.kind());
                        let mut text = egui::RichText::new(entry.text()).color(text_color);
                        if entry.is_placeholder() {
                            text = text.italics();
                        }
                        let layout = match entry.kind() {
                            client_core::EntryKind::User => {
                                egui::Layout::right_to_left(egui::Align::TOP)
                            }
                            _ => egui::Layout::left_to_right(egui::Align::TOP),
                        };

                        let row = ui.with_layout(layout, |ui| {
                            egui::Frame::new()
                                .fill(fill)
                                .corner_radius(12.0)
                                .inner_margin(egui::Margin::symmetric(12, 8))
                                .show(ui, |ui| {
                                    ui.set_max_width(ui.available_width() * 0.75);
                                    ui.add(egui::Label::new(text).wrap());
                                });
                        });
                        if scroll_to_latest && index == last_index {
                            row.response.scroll_to_me(Some(egui::Align::BOTTOM));
                        }
                        ui.add_space(6.0);
                    }
                });
        });
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show(ctx);
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
