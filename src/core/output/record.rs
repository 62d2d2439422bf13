//! Flat message rows for tabular output.

use serde::Serialize;

use crate::message::{MessageType, NormalizedMessage};

/// Separator between joined list values in a [`MessageRecord`] cell.
pub const LIST_SEPARATOR: &str = " | ";

/// One [`NormalizedMessage`] flattened to scalar columns.
///
/// Attachment URIs are joined with [`LIST_SEPARATOR`]; reactions become
/// `"{actor}: {reaction}"` items joined the same way.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageRecord {
    pub sender_name: String,
    pub sender_first_name: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp_ms: i64,
    /// Local time, RFC 3339 with the offset in force.
    pub datetime: String,
    pub date: String,
    pub weekday: String,
    pub hour: u32,
    pub term: String,
    pub term_number: u32,
    #[serde(rename = "type")]
    pub kind: MessageType,
    pub declared_type: MessageType,
    pub content: String,
    pub sticker: String,
    pub attachment_kind: String,
    pub attachment_uris: String,
    pub share_link: String,
    pub share_text: String,
    pub reactions: String,
    pub call_duration: Option<u64>,
    pub missed: Option<bool>,
}

impl From<&NormalizedMessage> for MessageRecord {
    fn from(msg: &NormalizedMessage) -> Self {
        use chrono::Timelike;

        let (attachment_kind, attachment_uris) = msg
            .attachment
            .as_ref()
            .map(|a| (a.kind.as_str().to_string(), a.uris.join(LIST_SEPARATOR)))
            .unwrap_or_default();

        let share = msg.share.as_ref();

        Self {
            sender_name: msg.sender_name.clone(),
            sender_first_name: msg.sender_first_name.clone(),
            timestamp_ms: msg.timestamp.timestamp_millis(),
            datetime: msg.datetime.to_rfc3339(),
            date: msg.date.format("%Y-%m-%d").to_string(),
            weekday: msg.datetime.format("%A").to_string(),
            hour: msg.datetime.hour(),
            term: msg.term.clone(),
            term_number: msg.term_number,
            kind: msg.kind,
            declared_type: msg.declared_kind,
            content: msg.content.clone().unwrap_or_default(),
            sticker: msg.sticker.clone().unwrap_or_default(),
            attachment_kind,
            attachment_uris,
            share_link: share.and_then(|s| s.link.clone()).unwrap_or_default(),
            share_text: share.and_then(|s| s.share_text.clone()).unwrap_or_default(),
            reactions: msg
                .reactions
                .iter()
                .map(|r| format!("{}: {}", r.actor, r.reaction))
                .collect::<Vec<_>>()
                .join(LIST_SEPARATOR),
            call_duration: msg.call_duration,
            missed: msg.missed,
        }
    }
}

/// Flattens messages in order.
pub fn message_records(messages: &[NormalizedMessage]) -> Vec<MessageRecord> {
    messages.iter().map(MessageRecord::from).collect()
}
