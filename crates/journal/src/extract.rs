//! Payload extraction from the MHS mock journal.

use crate::{JournalError, JournalResult, OutboundMessage};
use serde_json::Value;
use std::collections::HashMap;

/// Returns the `payload` of the last entry in a plain journal.
///
/// The payload is returned exactly as the entry holds it after one JSON-string decode: no
/// re-serialisation, no whitespace changes, no newline added.
///
/// # Arguments
///
/// * `raw_input` - A JSON array of strings, each string a JSON object with a `payload` field.
///   Only the last element is read, so earlier elements are not checked.
///
/// # Errors
///
/// Returns a [`JournalError`] if:
/// - the input is not a JSON array,
/// - the array is empty,
/// - the last entry is not a string holding valid JSON,
/// - the last entry has no `payload`, or its `payload` is not a string.
pub fn extract_last_payload(raw_input: &str) -> JournalResult<String> {
    let entries: Vec<Value> =
        serde_json::from_str(raw_input).map_err(JournalError::InvalidJournal)?;
    last_payload(entries)
}

/// Returns the `payload` of the last entry recorded for one conversation.
///
/// Same as [`extract_last_payload`], but `raw_input` is the conversation-keyed form of the
/// journal: a JSON object mapping conversation id to a plain journal.
///
/// # Errors
///
/// Returns [`JournalError::ConversationNotFound`] when the journal holds nothing for
/// `conversation_id`, and otherwise the same errors as [`extract_last_payload`].
pub fn extract_last_payload_for_conversation(
    raw_input: &str,
    conversation_id: &str,
) -> JournalResult<String> {
    let mut journal: HashMap<String, Vec<Value>> =
        serde_json::from_str(raw_input).map_err(JournalError::InvalidJournal)?;

    let entries = journal
        .remove(conversation_id)
        .ok_or_else(|| JournalError::ConversationNotFound(conversation_id.to_string()))?;

    last_payload(entries)
}

/// Decodes every entry of a plain journal into an [`OutboundMessage`], in journal order.
///
/// # Errors
///
/// Returns [`JournalError::InvalidJournal`] if the input is not a JSON array of strings, and
/// [`JournalError::EntrySchema`] naming the first entry that does not match the schema.
pub fn read_outbound_messages(raw_input: &str) -> JournalResult<Vec<OutboundMessage>> {
    let entries: Vec<String> =
        serde_json::from_str(raw_input).map_err(JournalError::InvalidJournal)?;

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| OutboundMessage::parse(index, entry))
        .collect()
}

fn last_payload(mut entries: Vec<Value>) -> JournalResult<String> {
    let total = entries.len();
    let Value::String(last) = entries.pop().ok_or(JournalError::EmptyJournal)? else {
        return Err(JournalError::EntryNotText);
    };
    tracing::debug!("reading payload from the last of {} journal entries", total);

    let entry: Value = serde_json::from_str(&last).map_err(JournalError::InvalidEntry)?;

    // A non-object entry has no fields at all, so it is reported as a missing payload.
    let Value::Object(mut fields) = entry else {
        return Err(JournalError::MissingPayload);
    };

    match fields.remove("payload") {
        Some(Value::String(payload)) => Ok(payload),
        Some(_) => Err(JournalError::PayloadNotText),
        None => Err(JournalError::MissingPayload),
    }
}
