//! Meta Messenger JSON export records.
//!
//! The "Download your information" export stores each conversation as one or
//! more `message_N.json` documents:
//!
//! ```json
//! {
//!   "participants": [{"name": "Alice Smith"}, {"name": "Bob Jones"}],
//!   "messages": [
//!     {"sender_name": "Bob Jones", "timestamp_ms": 1600000000000,
//!      "content": "hi", "type": "Generic"}
//!   ],
//!   "title": "Alice Smith",
//!   "thread_path": "inbox/alicesmith_a1b2c3"
//! }
//! ```
//!
//! Records are kept as [`serde_json::Value`] until conversion, so one bad
//! record never poisons the rest of the document.

use serde::Deserialize;
use serde_json::Value;

use crate::config::{RecordPolicy, TimestampUnit};
use crate::error::{ChatstatsError, Result};
use crate::message::{Attachment, AttachmentKind, Conversation, MessageType, RawMessage, Reaction, Share};

/// One export document (a whole file, or one part of a multi-part export).
#[derive(Debug, Deserialize)]
pub struct MessengerExport {
    #[serde(default)]
    pub participants: Vec<MessengerParticipant>,
    pub messages: Vec<Value>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub thread_path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MessengerParticipant {
    pub name: String,
}

/// Media reference inside a record.
#[derive(Debug, Deserialize)]
pub struct MessengerMedia {
    pub uri: Option<String>,
}

/// Raw message record. Every field is optional here; required fields are
/// checked by [`record_to_raw`].
#[derive(Debug, Default, Deserialize)]
pub struct MessengerRecord {
    pub sender_name: Option<String>,
    pub timestamp_ms: Option<Value>,
    pub timestamp: Option<Value>,
    pub content: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<MessageType>,
    pub sticker: Option<MessengerMedia>,
    pub photos: Option<Vec<MessengerMedia>>,
    pub gifs: Option<Vec<MessengerMedia>>,
    pub videos: Option<Vec<MessengerMedia>>,
    pub audio_files: Option<Vec<MessengerMedia>>,
    pub files: Option<Vec<MessengerMedia>>,
    pub share: Option<Share>,
    pub reactions: Option<Vec<Reaction>>,
    pub call_duration: Option<u64>,
    pub missed: Option<bool>,
}

impl MessengerRecord {
    /// The first media field present decides the attachment kind.
    fn attachment(&self) -> Option<Attachment> {
        if let Some(uri) = self.sticker.as_ref().and_then(|s| s.uri.clone()) {
            return Some(Attachment::sticker(uri));
        }

        let lists = [
            (AttachmentKind::Photo, &self.photos),
            (AttachmentKind::Gif, &self.gifs),
            (AttachmentKind::Video, &self.videos),
            (AttachmentKind::Audio, &self.audio_files),
            (AttachmentKind::File, &self.files),
        ];

        lists.into_iter().find_map(|(kind, media)| {
            let uris: Vec<String> = media
                .as_ref()?
                .iter()
                .filter_map(|m| m.uri.clone())
                .collect();
            (!uris.is_empty()).then(|| Attachment::new(kind, uris))
        })
    }

    fn epoch(&self) -> Option<(i64, TimestampUnit)> {
        if let Some(ms) = self.timestamp_ms.as_ref().and_then(Value::as_i64) {
            return Some((ms, TimestampUnit::Milliseconds));
        }
        self.timestamp
            .as_ref()
            .and_then(Value::as_i64)
            .map(|s| (s, TimestampUnit::Seconds))
    }
}

/// Parses one export document.
///
/// `path` is only used to annotate errors.
pub fn parse_export(content: &str, path: Option<&std::path::Path>) -> Result<MessengerExport> {
    serde_json::from_str(content)
        .map_err(|e| ChatstatsError::messenger_parse(e, path.map(std::path::Path::to_path_buf)))
}

/// Merges the parts of a multi-part export.
///
/// Metadata comes from the first part; messages are concatenated in part order.
/// Returns `None` for an empty list.
pub fn merge_parts(parts: Vec<MessengerExport>) -> Option<MessengerExport> {
    let mut parts = parts.into_iter();
    let mut merged = parts.next()?;
    for part in parts {
        merged.messages.extend(part.messages);
    }
    Some(merged)
}

/// Converts record number `index` into a [`RawMessage`].
///
/// # Errors
///
/// Returns [`ChatstatsError::MalformedRecord`] if the record is not an object,
/// has no `sender_name` string, or has no integer `timestamp_ms`/`timestamp`.
pub fn record_to_raw(index: usize, value: Value) -> Result<RawMessage> {
    if !value.is_object() {
        return Err(ChatstatsError::malformed_record(
            index,
            "record",
            "is not a JSON object",
        ));
    }

    let record: MessengerRecord = serde_json::from_value(value)
        .map_err(|e| ChatstatsError::malformed_record(index, "record", e.to_string()))?;

    let attachment = record.attachment();

    let (timestamp, unit) = record.epoch().ok_or_else(|| {
        ChatstatsError::malformed_record(index, "timestamp", "is missing or not an integer")
    })?;

    let Some(sender_name) = record.sender_name else {
        return Err(ChatstatsError::malformed_record(
            index,
            "sender_name",
            "is missing",
        ));
    };

    Ok(RawMessage {
        sender_name,
        timestamp,
        timestamp_unit: Some(unit),
        content: record.content,
        kind: record.kind.unwrap_or_default(),
        attachment,
        share: record.share,
        reactions: record.reactions.unwrap_or_default(),
        call_duration: record.call_duration,
        missed: record.missed,
    })
}

/// Converts every record of an export, applying the malformed record policy.
pub fn into_conversation(export: MessengerExport, policy: RecordPolicy) -> Result<Conversation> {
    let mut messages = Vec::with_capacity(export.messages.len());
    let mut skipped = 0usize;

    for (index, value) in export.messages.into_iter().enumerate() {
        match record_to_raw(index, value) {
            Ok(msg) => messages.push(msg),
            Err(err) if policy == RecordPolicy::Skip => {
                tracing::warn!(index, error = %err, "skipping malformed record");
                skipped += 1;
            }
            Err(err) => return Err(err),
        }
    }

    if skipped > 0 {
        tracing::info!(skipped, kept = messages.len(), "malformed records dropped");
    }

    Ok(Conversation {
        title: export.title,
        thread_path: export.thread_path,
        participants: export.participants.into_iter().map(|p| p.name).collect(),
        messages,
    })
}
