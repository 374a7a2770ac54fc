//! UI-agnostic core of the chat client: conversation state, the request/response
//! exchange with the chat endpoint, transcript rendering seam, and the persisted
//! display preference.

pub mod config;
pub mod error;
pub mod session;
pub mod theme;
pub mod transcript;
pub mod transport;

pub use config::{load_settings, ClientSettings};
pub use error::ChatError;
pub use session::{
    ChatSession, ExchangeId, PendingExchange, SendReport, FAILURE_MESSAGE, NO_RESPONSE_MESSAGE,
    THINKING_PLACEHOLDER,
};
pub use theme::{
    FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, ThemeController,
    THEME_PREFERENCE_KEY,
};
pub use transcript::{EntryHandle, EntryKind, MemoryTranscript, Transcript, TranscriptEntry};
pub use transport::{ChatTransport, HttpChatTransport};
