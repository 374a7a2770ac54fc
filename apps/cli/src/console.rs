//! Line-oriented transcript and input handling for the terminal client.

use std::io::Write;

use client_core::{EntryHandle, EntryKind, Transcript};

const CLEAR_LINE: &str = "\r\x1b[2K";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleInput {
    Message(String),
    ToggleTheme,
    Quit,
}

pub fn parse_line(line: &str) -> ConsoleInput {
    match line.trim() {
        "/quit" | "/exit" => ConsoleInput::Quit,
        "/theme" => ConsoleInput::ToggleTheme,
        _ => ConsoleInput::Message(line.to_string()),
    }
}

/// Prints entries as they are appended. The placeholder is left on an open line
/// so it can be erased in place when the reply arrives.
pub struct ConsoleTranscript<W: Write> {
    out: W,
    next_id: u64,
    open_placeholder: Option<u64>,
}

impl<W: Write> ConsoleTranscript<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            next_id: 0,
            open_placeholder: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn next_handle(&mut self) -> EntryHandle {
        let handle = EntryHandle::new(self.next_id);
        self.next_id += 1;
        handle
    }

    fn write(&mut self, text: &str) {
        if let Err(err) = self.out.write_all(text.as_bytes()).and_then(|()| self.out.flush()) {
            tracing::warn!("failed to write transcript output: {err}");
        }
    }
}

fn prefix(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::User => "you",
        EntryKind::Bot => "bot",
        EntryKind::BotError => "bot!",
    }
}

impl<W: Write> Transcript for ConsoleTranscript<W> {
    fn add_message(&mut self, text: &str, kind: EntryKind) -> EntryHandle {
        if self.open_placeholder.take().is_some() {
            self.write("\n");
        }
        self.write(&format!("[{}] {text}\n", prefix(kind)));
        self.next_handle()
    }

    fn add_placeholder(&mut self, text: &str) -> EntryHandle {
        let handle = self.next_handle();
        self.write(&format!("[{}] {text}", prefix(EntryKind::Bot)));
        self.open_placeholder = Some(handle.id());
        handle
    }

    fn remove(&mut self, handle: EntryHandle) {
        if self.open_placeholder == Some(handle.id()) {
            self.open_placeholder = None;
            self.write(CLEAR_LINE);
        } else {
            tracing::debug!(entry = handle.id(), "printed entries cannot be removed");
        }
    }
}

#[cfg(test)]
#[path = "tests/console_tests.rs"]
mod tests;
