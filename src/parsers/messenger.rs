//! Messenger JSON export parser.
//!
//! Accepts either a single export file or a conversation folder. Large
//! conversations are split by Meta into `message_1.json`, `message_2.json`, …
//! which are merged here in part order.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::MessengerConfig;
use crate::error::{ChatstatsError, Result};
use crate::message::Conversation;
use crate::parser::Parser;
use crate::parsing::messenger::{MessengerExport, into_conversation, merge_parts, parse_export};

const FORMAT: &str = "Messenger JSON";

/// Parser for Meta Messenger JSON exports.
///
/// # Example
///
/// ```rust,no_run
/// use chatstats::parsers::MessengerParser;
/// use chatstats::parser::Parser;
///
/// let parser = MessengerParser::new();
/// let conversation = parser.parse("inbox/alicesmith_a1b2c3/message_1.json".as_ref())?;
/// # Ok::<(), chatstats::ChatstatsError>(())
/// ```
pub struct MessengerParser {
    config: MessengerConfig,
}

impl MessengerParser {
    /// Creates a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: MessengerConfig::default(),
        }
    }

    /// Creates a parser with custom configuration.
    pub fn with_config(config: MessengerConfig) -> Self {
        Self { config }
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &MessengerConfig {
        &self.config
    }

    fn read_part(path: &Path) -> Result<MessengerExport> {
        let content = fs::read_to_string(path)?;
        parse_export(&content, Some(path))
    }

    fn parse_folder(&self, dir: &Path) -> Result<Conversation> {
        let parts = find_parts(dir)?;
        tracing::debug!(dir = %dir.display(), parts = parts.len(), "reading export parts");

        let exports = parts
            .iter()
            .map(|p| Self::read_part(p))
            .collect::<Result<Vec<_>>>()?;

        let merged = merge_parts(exports).ok_or_else(|| {
            ChatstatsError::invalid_format(FORMAT, format!("no export parts in {}", dir.display()))
        })?;
        into_conversation(merged, self.config.record_policy)
    }
}

impl Default for MessengerParser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser for MessengerParser {
    fn name(&self) -> &'static str {
        "Messenger"
    }

    fn parse(&self, path: &Path) -> Result<Conversation> {
        let conversation = if path.is_dir() {
            self.parse_folder(path)?
        } else {
            into_conversation(Self::read_part(path)?, self.config.record_policy)?
        };
        tracing::info!(
            path = %path.display(),
            messages = conversation.len(),
            "parsed Messenger export"
        );
        Ok(conversation)
    }

    fn parse_str(&self, content: &str) -> Result<Conversation> {
        into_conversation(parse_export(content, None)?, self.config.record_policy)
    }
}

/// Lists the export documents of a conversation folder.
///
/// Numbered `message_N.json` parts are returned ordered by `N`; without them
/// a single `message.json` is used.
///
/// # Errors
///
/// Returns [`ChatstatsError::InvalidFormat`] if the folder has neither.
pub fn find_parts(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut numbered: Vec<(u32, PathBuf)> = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let number = name
            .strip_prefix("message_")
            .and_then(|rest| rest.strip_suffix(".json"))
            .and_then(|n| n.parse::<u32>().ok());
        if let Some(n) = number {
            numbered.push((n, path));
        }
    }

    if !numbered.is_empty() {
        numbered.sort_by_key(|(n, _)| *n);
        return Ok(numbered.into_iter().map(|(_, p)| p).collect());
    }

    let single = dir.join("message.json");
    if single.is_file() {
        return Ok(vec![single]);
    }

    Err(ChatstatsError::invalid_format(
        FORMAT,
        format!("no message_N.json or message.json in {}", dir.display()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RecordPolicy;
    use tempfile::tempdir;

    // =========================================================================
    // MessengerParser construction tests
    // =========================================================================

    #[test]
    fn test_parser_new() {
        let parser = MessengerParser::new();
        assert_eq!(parser.config().record_policy, RecordPolicy::Skip);
        assert_eq!(Parser::name(&parser), "Messenger");
    }

    #[test]
    fn test_parser_with_config() {
        let parser = MessengerParser::with_config(MessengerConfig::strict());
        assert_eq!(parser.config().record_policy, RecordPolicy::Strict);
    }

    // =========================================================================
    // parse_str tests
    // =========================================================================

    #[test]
    fn test_parse_str_simple() {
        let parser = MessengerParser::new();
        let json = r#"{
            "participants": [{"name": "Alice Smith"}, {"name": "Bob Jones"}],
            "title": "Bob Jones",
            "thread_path": "inbox/bobjones_abc",
            "messages": [{"sender_name": "Alice Smith", "content": "Hello", "timestamp_ms": 1234567890000}]
        }"#;
        let conv = parser.parse_str(json).expect("parse failed");
        assert_eq!(conv.len(), 1);
        assert_eq!(conv.messages[0].sender_name, "Alice Smith");
        assert_eq!(conv.participants, vec!["Alice Smith", "Bob Jones"]);
        assert_eq!(conv.thread_path.as_deref(), Some("inbox/bobjones_abc"));
    }

    #[test]
    fn test_parse_str_keeps_archive_order() {
        let parser = MessengerParser::new();
        let json = r#"{"messages": [
            {"sender_name": "Third", "content": "3", "timestamp_ms": 1234567892000},
            {"sender_name": "Second", "content": "2", "timestamp_ms": 1234567891000},
            {"sender_name": "First", "content": "1", "timestamp_ms": 1234567890000}
        ]}"#;
        let conv = parser.parse_str(json).expect("parse failed");
        let senders: Vec<_> = conv.messages.iter().map(|m| m.sender_name.as_str()).collect();
        assert_eq!(senders, vec!["Third", "Second", "First"]);
    }

    #[test]
    fn test_parse_str_keeps_contentless_messages() {
        let parser = MessengerParser::new();
        let json = r#"{"messages": [
            {"sender_name": "Alice", "content": "Hello", "timestamp_ms": 1},
            {"sender_name": "Bob", "timestamp_ms": 2, "photos": [{"uri": "p.jpg"}]}
        ]}"#;
        let conv = parser.parse_str(json).expect("parse failed");
        assert_eq!(conv.len(), 2);
        assert!(conv.messages[1].content.is_none());
    }

    #[test]
    fn test_parse_str_invalid_json() {
        let parser = MessengerParser::new();
        let err = parser.parse_str("not json").unwrap_err();
        assert!(err.is_parse());
    }

    #[test]
    fn test_parse_str_strict_rejects_malformed() {
        let parser = MessengerParser::with_config(MessengerConfig::strict());
        let json = r#"{"messages": [{"content": "orphan", "timestamp_ms": 1}]}"#;
        assert!(parser.parse_str(json).unwrap_err().is_malformed_record());

        let lenient = MessengerParser::new();
        assert!(lenient.parse_str(json).unwrap().is_empty());
    }

    // =========================================================================
    // File and folder tests
    // =========================================================================

    #[test]
    fn test_parse_folder_merges_parts_in_numeric_order() {
        let dir = tempdir().unwrap();
        let part = |n: u32, sender: &str| {
            format!(
                r#"{{"title": "part {n}", "messages": [{{"sender_name": "{sender}", "timestamp_ms": {n}}}]}}"#
            )
        };
        fs::write(dir.path().join("message_10.json"), part(10, "Ten")).unwrap();
        fs::write(dir.path().join("message_2.json"), part(2, "Two")).unwrap();
        fs::write(dir.path().join("message_1.json"), part(1, "One")).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let conv = MessengerParser::new().parse(dir.path()).unwrap();
        let senders: Vec<_> = conv.messages.iter().map(|m| m.sender_name.as_str()).collect();
        assert_eq!(senders, vec!["One", "Two", "Ten"]);
        assert_eq!(conv.title.as_deref(), Some("part 1"));
    }

    #[test]
    fn test_parse_folder_single_message_json() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join("message.json"),
            r#"{"messages": [{"sender_name": "A", "timestamp": 1400000000}]}"#,
        )
        .unwrap();
        let conv = MessengerParser::new().parse(dir.path()).unwrap();
        assert_eq!(conv.len(), 1);
    }

    #[test]
    fn test_parse_folder_empty() {
        let dir = tempdir().unwrap();
        let err = MessengerParser::new().parse(dir.path()).unwrap_err();
        assert!(err.is_invalid_format());
    }

    #[test]
    fn test_parse_file_error_names_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("message_1.json");
        fs::write(&path, "{ broken").unwrap();
        let err = MessengerParser::new().parse(&path).unwrap_err();
        assert!(err.is_parse());
        assert!(err.to_string().contains("message_1.json"));
    }
}
