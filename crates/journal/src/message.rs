//! Typed view of an outbound message recorded by the MHS mock.
//!
//! Extraction of the last payload never goes through these types: it only needs `payload`
//! and must not fail on attachment shapes it does not care about. The typed model is used
//! when a caller wants to inspect every recorded message.

use crate::{JournalError, JournalResult};
use serde::{Deserialize, Deserializer};

/// An outbound message as the MHS mock recorded it.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct OutboundMessage {
    /// The ebXML/HL7 document sent to the MHS, as text.
    pub payload: String,

    #[serde(default)]
    pub attachments: Option<Vec<Attachment>>,

    #[serde(default)]
    pub external_attachments: Option<Vec<ExternalAttachment>>,
}

/// An attachment carried inline with the outbound message.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Attachment {
    pub content_type: String,

    /// The mock records this either as a JSON boolean or as the text `"true"`/`"false"`.
    #[serde(deserialize_with = "deserialize_flag")]
    pub is_base64: bool,

    #[serde(default)]
    pub description: Option<String>,

    pub payload: String,
}

/// A reference to a document sent separately from the outbound message.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ExternalAttachment {
    pub document_id: String,
    pub message_id: String,

    #[serde(default)]
    pub description: Option<String>,
}

impl OutboundMessage {
    /// Decode one JSON-encoded journal entry.
    ///
    /// This uses `serde_path_to_error` to surface a best-effort "path" (e.g.
    /// `attachments[0].content_type`) to the failing field when the entry does not match the
    /// wire schema.
    ///
    /// # Arguments
    ///
    /// * `index` - Position of the entry in the journal, used in error reports.
    /// * `entry` - The entry text, itself a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`JournalError::EntrySchema`] if the entry is not valid JSON or does not match
    /// the outbound message schema.
    pub fn parse(index: usize, entry: &str) -> JournalResult<Self> {
        let mut deserializer = serde_json::Deserializer::from_str(entry);

        match serde_path_to_error::deserialize::<_, OutboundMessage>(&mut deserializer) {
            Ok(message) => Ok(message),
            Err(err) => {
                let path = err.path().to_string();
                let path = if path.is_empty() || path == "." {
                    "<root>".to_string()
                } else {
                    path
                };
                Err(JournalError::EntrySchema {
                    index,
                    path,
                    reason: err.into_inner().to_string(),
                })
            }
        }
    }

    pub fn attachment_count(&self) -> usize {
        self.attachments.as_ref().map_or(0, Vec::len)
    }

    pub fn external_attachment_count(&self) -> usize {
        self.external_attachments.as_ref().map_or(0, Vec::len)
    }
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => Ok(value),
        Flag::Text(text) => match text.to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(serde::de::Error::custom(format!(
                "expected true or false, got '{text}'"
            ))),
        },
    }
}
