//! The visible transcript as seen by the conversation logic.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    User,
    Bot,
    BotError,
}

/// Identifies one transcript entry for later removal. Not `Clone`: removing an
/// entry consumes its handle, so an entry can be removed at most once.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct EntryHandle(u64);

impl EntryHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

pub trait Transcript {
    /// Appends one entry, brings it into view and returns its handle.
    fn add_message(&mut self, text: &str, kind: EntryKind) -> EntryHandle;

    /// Appends the transient entry shown while a reply is pending.
    fn add_placeholder(&mut self, text: &str) -> EntryHandle {
        self.add_message(text, EntryKind::Bot)
    }

    fn remove(&mut self, handle: EntryHandle);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    id: u64,
    text: String,
    kind: EntryKind,
    placeholder: bool,
}

impl TranscriptEntry {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    pub fn is_placeholder(&self) -> bool {
        self.placeholder
    }
}

#[derive(Debug, Default)]
pub struct MemoryTranscript {
    entries: Vec<TranscriptEntry>,
    next_id: u64,
    scroll_to_latest: bool,
}

impl MemoryTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }

    pub fn placeholder_count(&self) -> usize {
        self.entries.iter().filter(|e| e.placeholder).count()
    }

    /// Returns whether an entry was appended since the last call.
    pub fn take_scroll_request(&mut self) -> bool {
        std::mem::take(&mut self.scroll_to_latest)
    }

    fn push(&mut self, text: &str, kind: EntryKind, placeholder: bool) -> EntryHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(TranscriptEntry {
            id,
            text: text.to_string(),
            kind,
            placeholder,
        });
        self.scroll_to_latest = true;
        EntryHandle::new(id)
    }
}

impl Transcript for MemoryTranscript {
    fn add_message(&mut self, text: &str, kind: EntryKind) -> EntryHandle {
        self.push(text, kind, false)
    }

    fn add_placeholder(&mut self, text: &str) -> EntryHandle {
        self.push(text, EntryKind::Bot, true)
    }

    fn remove(&mut self, handle: EntryHandle) {
        self.entries.retain(|entry| entry.id != handle.id());
    }
}

#[cfg(test)]
#[path = "tests/transcript_tests.rs"]
mod tests;
