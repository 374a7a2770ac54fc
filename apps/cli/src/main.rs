use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{load_settings, ChatSession, FilePreferenceStore, HttpChatTransport, ThemeController};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

mod console;

use console::{parse_line, ConsoleInput, ConsoleTranscript};

#[derive(Parser, Debug)]
#[command(about = "Terminal chat client")]
struct Args {
    /// Base URL of the chat server; the client posts to <url>/api/chat.
    #[arg(long)]
    server_url: Option<String>,
    /// Preferences file holding the light/dark setting.
    #[arg(long)]
    preferences: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let settings = load_settings()
        .with_server_url(args.server_url)
        .with_preferences_path(args.preferences);
    let transport = HttpChatTransport::new(&settings.server_url)
        .with_context(|| format!("cannot talk to {}", settings.server_url))?;
    let mut theme = ThemeController::load(FilePreferenceStore::new(
        settings.resolve_preferences_path()?,
    ));
    tracing::info!(endpoint = %transport.endpoint(), "terminal chat client ready");

    println!(
        "Chatting with {} {} (/theme toggles dark mode, /quit exits)",
        transport.endpoint(),
        theme.icon()
    );

    let mut session = ChatSession::new();
    let mut transcript = ConsoleTranscript::new(io::stdout());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        match parse_line(&line) {
            ConsoleInput::Quit => break,
            ConsoleInput::ToggleTheme => {
                let current = theme.toggle();
                println!("{} {current} mode", theme.icon());
            }
            ConsoleInput::Message(mut input) => {
                session
                    .send_message(&transport, &mut input, &mut transcript)
                    .await;
            }
        }
    }

    Ok(())
}
