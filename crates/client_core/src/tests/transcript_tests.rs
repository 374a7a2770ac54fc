use super::*;

#[test]
fn entries_keep_append_order_and_kind() {
    let mut transcript = MemoryTranscript::new();
    transcript.add_message("hi", EntryKind::User);
    transcript.add_message("hello", EntryKind::Bot);
    transcript.add_message("oops", EntryKind::BotError);

    let kinds: Vec<EntryKind> = transcript.entries().iter().map(TranscriptEntry::kind).collect();
    assert_eq!(kinds, [EntryKind::User, EntryKind::Bot, EntryKind::BotError]);
    assert_eq!(transcript.last().map(TranscriptEntry::text), Some("oops"));
}

#[test]
fn remove_only_drops_the_addressed_entry() {
    let mut transcript = MemoryTranscript::new();
    transcript.add_message("keep", EntryKind::User);
    let placeholder = transcript.add_placeholder("Thinking...");
    transcript.add_message("also keep", EntryKind::Bot);
    assert_eq!(transcript.placeholder_count(), 1);

    transcript.remove(placeholder);

    let texts: Vec<&str> = transcript.entries().iter().map(TranscriptEntry::text).collect();
    assert_eq!(texts, ["keep", "also keep"]);
    assert_eq!(transcript.placeholder_count(), 0);
}

#[test]
fn handles_stay_unique_after_removal() {
    let mut transcript = MemoryTranscript::new();
    let first = transcript.add_message("a", EntryKind::User);
    let first_id = first.id();
    transcript.remove(first);
    let second = transcript.add_message("b", EntryKind::User);
    assert_ne!(second.id(), first_id);
}

#[test]
fn appending_requests_scroll_to_newest_entry() {
    let mut transcript = MemoryTranscript::new();
    assert!(!transcript.take_scroll_request());

    transcript.add_message("a", EntryKind::User);
    assert!(transcript.take_scroll_request());
    assert!(!transcript.take_scroll_request());

    let placeholder = transcript.add_placeholder("Thinking...");
    assert!(transcript.take_scroll_request());
    transcript.remove(placeholder);
    assert!(!transcript.take_scroll_request());
}
