//! Message records at the two ends of normalization.
//!
//! - [`RawMessage`] is one record exactly as an export describes it. Parsers
//!   produce it; nothing mutates it afterwards.
//! - [`NormalizedMessage`] is the same record with every derived field the
//!   statistics need: localized date and time, term label, canonical sticker,
//!   subtype and sender first name.
//!
//! # Examples
//!
//! ```
//! use chatstats::message::{MessageType, RawMessage};
//!
//! let msg = RawMessage::new("Alice Smith", 1_600_000_000_000)
//!     .with_content("hello world");
//!
//! assert_eq!(msg.sender_name, "Alice Smith");
//! assert_eq!(msg.kind, MessageType::Generic);
//! assert_eq!(msg.content.as_deref(), Some("hello world"));
//! ```

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{SenderLabel, TimestampUnit};

/// Type of a message, as declared by the export or as reclassified from its text.
///
/// Exports declare `Generic`, `Share`, `Call`, `Subscribe` and `Unsubscribe`.
/// `Game`, `PlanUpdate` and `ChatUpdate` are only produced by subtype
/// classification, which can also turn a declared `Generic` into `Call`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MessageType {
    /// Plain user-written message
    #[default]
    Generic,
    /// Shared link or post
    Share,
    /// Call event
    Call,
    /// Someone was added to the thread
    Subscribe,
    /// Someone left or was removed from the thread
    Unsubscribe,
    /// Game invitation or score
    Game,
    /// Event plan created, changed or answered
    PlanUpdate,
    /// Thread name, colour, emoji or nickname change
    ChatUpdate,
    /// Any type this crate does not know
    #[serde(other)]
    Unknown,
}

impl MessageType {
    /// Returns the name used in exports and output tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Generic => "Generic",
            MessageType::Share => "Share",
            MessageType::Call => "Call",
            MessageType::Subscribe => "Subscribe",
            MessageType::Unsubscribe => "Unsubscribe",
            MessageType::Game => "Game",
            MessageType::PlanUpdate => "PlanUpdate",
            MessageType::ChatUpdate => "ChatUpdate",
            MessageType::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of media attached to a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Sticker,
    Photo,
    Gif,
    Video,
    Audio,
    File,
}

impl AttachmentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttachmentKind::Sticker => "sticker",
            AttachmentKind::Photo => "photo",
            AttachmentKind::Gif => "gif",
            AttachmentKind::Video => "video",
            AttachmentKind::Audio => "audio",
            AttachmentKind::File => "file",
        }
    }
}

impl fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Media descriptor: one kind plus the archive-relative URIs of its files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub kind: AttachmentKind,
    pub uris: Vec<String>,
}

impl Attachment {
    pub fn new(kind: AttachmentKind, uris: Vec<String>) -> Self {
        Self { kind, uris }
    }

    /// A sticker attachment with a single asset.
    pub fn sticker(uri: impl Into<String>) -> Self {
        Self::new(AttachmentKind::Sticker, vec![uri.into()])
    }
}

/// Shared link payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Share {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub share_text: Option<String>,
}

/// A reaction left on a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reaction {
    pub reaction: String,
    pub actor: String,
}

/// One message record as read from an export.
///
/// `timestamp` is an epoch value whose unit is given by `timestamp_unit`
/// when the export says so (`timestamp_ms` vs `timestamp` field), or left
/// to [`TimestampUnit::Auto`] detection otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMessage {
    /// Sender display name, e.g. "Alice Smith".
    pub sender_name: String,

    /// Epoch value in seconds or milliseconds.
    pub timestamp: i64,

    /// Unit implied by the record itself, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub timestamp_unit: Option<TimestampUnit>,

    /// Free text. `None` for pure media messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub content: Option<String>,

    /// Declared type.
    #[serde(rename = "type")]
    #[serde(default)]
    pub kind: MessageType,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub attachment: Option<Attachment>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub share: Option<Share>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub reactions: Vec<Reaction>,

    /// Call length in seconds, for call records.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub call_duration: Option<u64>,

    /// Whether the call was missed, for call records.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub missed: Option<bool>,
}

impl RawMessage {
    /// Creates a `Generic` message with no content or payloads.
    pub fn new(sender_name: impl Into<String>, timestamp: i64) -> Self {
        Self {
            sender_name: sender_name.into(),
            timestamp,
            timestamp_unit: None,
            content: None,
            kind: MessageType::Generic,
            attachment: None,
            share: None,
            reactions: Vec::new(),
            call_duration: None,
            missed: None,
        }
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: MessageType) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_timestamp_unit(mut self, unit: TimestampUnit) -> Self {
        self.timestamp_unit = Some(unit);
        self
    }

    #[must_use]
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    #[must_use]
    pub fn with_share(mut self, share: Share) -> Self {
        self.share = Some(share);
        self
    }

    #[must_use]
    pub fn with_reaction(mut self, reaction: impl Into<String>, actor: impl Into<String>) -> Self {
        self.reactions.push(Reaction {
            reaction: reaction.into(),
            actor: actor.into(),
        });
        self
    }

    #[must_use]
    pub fn with_call(mut self, duration: u64, missed: bool) -> Self {
        self.call_duration = Some(duration);
        self.missed = Some(missed);
        self
    }

    /// Returns the sticker asset URI, if the attachment is a sticker.
    pub fn sticker_uri(&self) -> Option<&str> {
        self.attachment
            .as_ref()
            .filter(|a| a.kind == AttachmentKind::Sticker)
            .and_then(|a| a.uris.first())
            .map(String::as_str)
    }
}

/// A message with all derived fields populated.
///
/// Produced only by [`Normalizer`](crate::normalize::Normalizer); one per
/// [`RawMessage`], in archive order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedMessage {
    /// Sender display name (encoding repaired).
    pub sender_name: String,

    /// First whitespace-delimited token of `sender_name`.
    pub sender_first_name: String,

    /// The instant the message was sent.
    pub timestamp: DateTime<Utc>,

    /// `timestamp` in the configured timezone. All bucketing uses this.
    pub datetime: DateTime<FixedOffset>,

    /// Calendar date of `datetime`.
    pub date: NaiveDate,

    /// Term label, e.g. "2021 Fall".
    pub term: String,

    /// 1-based term index within the year.
    pub term_number: u32,

    /// Text content (encoding repaired).
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub content: Option<String>,

    /// Classified subtype.
    #[serde(rename = "type")]
    pub kind: MessageType,

    /// Type as declared by the export.
    pub declared_kind: MessageType,

    /// Canonical sticker asset URI.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub sticker: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub attachment: Option<Attachment>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub share: Option<Share>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub reactions: Vec<Reaction>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub call_duration: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub missed: Option<bool>,
}

impl NormalizedMessage {
    /// Returns the sender column selected by `label`.
    pub fn sender_label(&self, label: SenderLabel) -> &str {
        match label {
            SenderLabel::FullName => &self.sender_name,
            SenderLabel::FirstName => &self.sender_first_name,
        }
    }

    /// Returns `true` if the message is user-written text.
    pub fn is_generic(&self) -> bool {
        self.kind == MessageType::Generic
    }

    /// Returns the content, or `""` if there is none.
    pub fn text(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }
}

/// One conversation thread: metadata plus its messages in archive order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub title: Option<String>,

    /// Archive-relative thread folder, e.g. "inbox/alicesmith_a1b2c3".
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub thread_path: Option<String>,

    /// Participant display names.
    #[serde(default)]
    pub participants: Vec<String>,

    pub messages: Vec<RawMessage>,
}

impl Conversation {
    pub fn new(messages: Vec<RawMessage>) -> Self {
        Self {
            messages,
            ..Self::default()
        }
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_message_new() {
        let msg = RawMessage::new("Alice Smith", 1_600_000_000);
        assert_eq!(msg.sender_name, "Alice Smith");
        assert_eq!(msg.timestamp, 1_600_000_000);
        assert!(msg.content.is_none());
        assert_eq!(msg.kind, MessageType::Generic);
        assert!(msg.timestamp_unit.is_none());
    }

    #[test]
    fn test_raw_message_builder() {
        let msg = RawMessage::new("Bob", 0)
            .with_content("hi")
            .with_kind(MessageType::Call)
            .with_timestamp_unit(TimestampUnit::Seconds)
            .with_reaction("😍", "Alice")
            .with_call(60, false);

        assert_eq!(msg.content.as_deref(), Some("hi"));
        assert_eq!(msg.kind, MessageType::Call);
        assert_eq!(msg.timestamp_unit, Some(TimestampUnit::Seconds));
        assert_eq!(msg.reactions.len(), 1);
        assert_eq!(msg.call_duration, Some(60));
        assert_eq!(msg.missed, Some(false));
    }

    #[test]
    fn test_sticker_uri() {
        let msg = RawMessage::new("Bob", 0).with_attachment(Attachment::sticker("a.png"));
        assert_eq!(msg.sticker_uri(), Some("a.png"));

        let photo = RawMessage::new("Bob", 0)
            .with_attachment(Attachment::new(AttachmentKind::Photo, vec!["p.jpg".into()]));
        assert_eq!(photo.sticker_uri(), None);
    }

    #[test]
    fn test_message_type_serde() {
        let json = serde_json::to_string(&MessageType::PlanUpdate).unwrap();
        assert_eq!(json, "\"PlanUpdate\"");

        let kind: MessageType = serde_json::from_str("\"Share\"").unwrap();
        assert_eq!(kind, MessageType::Share);

        let kind: MessageType = serde_json::from_str("\"SomethingNew\"").unwrap();
        assert_eq!(kind, MessageType::Unknown);
    }

    #[test]
    fn test_raw_message_serialization_skips_empty() {
        let msg = RawMessage::new("Alice", 1).with_content("Hello");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"Generic\""));
        assert!(!json.contains("attachment"));
        assert!(!json.contains("reactions"));
    }

    #[test]
    fn test_conversation_len() {
        let conv = Conversation::new(vec![RawMessage::new("A", 1), RawMessage::new("B", 2)]);
        assert_eq!(conv.len(), 2);
        assert!(!conv.is_empty());
        assert!(Conversation::default().is_empty());
    }
}
