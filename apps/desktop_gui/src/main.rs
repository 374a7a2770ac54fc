use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::{load_settings, FilePreferenceStore, PreferenceStore};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::ChatApp;

const APP_TITLE: &str = "Chat";

#[derive(Parser, Debug)]
#[command(about = "Desktop chat client")]
struct Args {
    /// Base URL of the chat server; the client posts to <url>/api/chat.
    #[arg(long)]
    server_url: Option<String>,
    /// Preferences file holding the light/dark setting.
    #[arg(long)]
    preferences: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    let settings = load_settings()
        .with_server_url(args.server_url)
        .with_preferences_path(args.preferences);
    let preferences_path = settings.resolve_preferences_path()?;
    tracing::info!(
        server_url = %settings.server_url,
        preferences = %preferences_path.display(),
        "starting desktop chat client"
    );
    let preferences: Box<dyn PreferenceStore> = Box::new(FilePreferenceStore::new(preferences_path));

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(64);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(settings.server_url.clone(), cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([720.0, 760.0])
            .with_min_inner_size([420.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |_cc| {
            Ok(Box::new(ChatApp::new(
                cmd_tx,
                ui_rx,
                settings.server_url,
                preferences,
            )))
        }),
    )
    .map_err(|err| anyhow::anyhow!("failed to run desktop chat client: {err}"))
}
