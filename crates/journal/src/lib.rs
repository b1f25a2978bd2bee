//! # MHS Journal
//!
//! Support for the requests journal recorded by the mock message-handling service (MHS).
//!
//! The mock records every outbound message it receives. Its admin endpoint
//! (`/__admin/requests`) returns the journal as JSON in one of two shapes:
//!
//! ```text
//! ["{\"payload\": \"<RCMR_IN030000UK06 ...>\"}", ...]          plain journal
//! {"<conversation id>": ["{\"payload\": \"...\"}", ...], ...}   conversation-keyed journal
//! ```
//!
//! Each entry is itself a JSON document encoded as a string, so extraction decodes twice:
//! once for the journal and once for the chosen entry.
//!
//! Fetching the journal over HTTP is left to the operator; this crate only works on text.

mod extract;
mod message;

pub use extract::{
    extract_last_payload, extract_last_payload_for_conversation, read_outbound_messages,
};
pub use message::{Attachment, ExternalAttachment, OutboundMessage};

/// Errors returned while reading the MHS mock journal.
#[derive(Debug, thiserror::Error)]
pub enum JournalError {
    #[error("invalid journal JSON: {0}")]
    InvalidJournal(serde_json::Error),

    #[error("journal contains no entries")]
    EmptyJournal,

    #[error("last journal entry is not a JSON-encoded string")]
    EntryNotText,

    #[error("invalid journal entry JSON: {0}")]
    InvalidEntry(serde_json::Error),

    #[error("journal entry has no 'payload' field")]
    MissingPayload,

    #[error("journal entry 'payload' is not a string")]
    PayloadNotText,

    #[error("conversation not found in journal: {0}")]
    ConversationNotFound(String),

    #[error("journal entry {index} schema mismatch at {path}: {reason}")]
    EntrySchema {
        index: usize,
        path: String,
        reason: String,
    },
}

/// Type alias for Results that can fail with a [`JournalError`].
pub type JournalResult<T> = Result<T, JournalError>;
