//! Ingestion trait for chat exports.
//!
//! A [`Parser`] turns an export on disk (or already in memory) into a
//! [`Conversation`]: thread metadata plus [`RawMessage`](crate::message::RawMessage)
//! records in archive order. Everything after that point is format-agnostic.
//!
//! # Example
//!
//! ```rust,no_run
//! # fn main() -> chatstats::Result<()> {
//! use chatstats::parser::Parser;
//! use chatstats::parsers::MessengerParser;
//! use std::path::Path;
//!
//! let parser = MessengerParser::new();
//!
//! // A single JSON file or a conversation folder with message_N.json parts
//! let conversation = parser.parse(Path::new("inbox/alicesmith_a1b2c3"))?;
//! println!("{} messages", conversation.len());
//! # Ok(())
//! # }
//! ```

use std::path::Path;

use crate::error::Result;
use crate::message::Conversation;

/// Unified trait for reading chat exports.
///
/// # Implementation Notes
///
/// Parsers must implement:
/// - [`name`](Parser::name) - Parser identifier, used in logs and errors
/// - [`parse`](Parser::parse) - Read a file or folder from disk
/// - [`parse_str`](Parser::parse_str) - Parse a single export document from a string
///
/// Implementations must keep records in the order the export lists them.
///
/// # Example Implementation
///
/// ```rust,ignore
/// impl Parser for MyParser {
///     fn name(&self) -> &'static str { "MyParser" }
///
///     fn parse(&self, path: &Path) -> Result<Conversation> {
///         let content = std::fs::read_to_string(path)?;
///         self.parse_str(&content)
///     }
///
///     fn parse_str(&self, content: &str) -> Result<Conversation> {
///         // Parse logic here
///         Ok(Conversation::default())
///     }
/// }
/// ```
pub trait Parser: Send + Sync {
    /// Returns the human-readable name of this parser.
    fn name(&self) -> &'static str;

    /// Reads an export from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatsError`](crate::ChatstatsError) if:
    /// - The path cannot be read ([`Io`](crate::ChatstatsError::Io))
    /// - The content cannot be parsed ([`Parse`](crate::ChatstatsError::Parse))
    /// - A record is malformed and the parser is strict
    ///   ([`MalformedRecord`](crate::ChatstatsError::MalformedRecord))
    fn parse(&self, path: &Path) -> Result<Conversation>;

    /// Parses one export document from a string.
    ///
    /// Useful for tests with inline data and for content already in memory.
    fn parse_str(&self, content: &str) -> Result<Conversation>;

    /// Reads an export (convenience method accepting &str path).
    fn parse_file(&self, path: &str) -> Result<Conversation> {
        self.parse(Path::new(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::RawMessage;

    struct LineParser;

    impl Parser for LineParser {
        fn name(&self) -> &'static str {
            "Lines"
        }

        fn parse(&self, path: &Path) -> Result<Conversation> {
            let content = std::fs::read_to_string(path)?;
            self.parse_str(&content)
        }

        fn parse_str(&self, content: &str) -> Result<Conversation> {
            let messages = content
                .lines()
                .enumerate()
                .map(|(i, line)| RawMessage::new("Alice", i as i64).with_content(line))
                .collect();
            Ok(Conversation::new(messages))
        }
    }

    #[test]
    fn test_parser_trait_object() {
        let parser: Box<dyn Parser> = Box::new(LineParser);
        assert_eq!(parser.name(), "Lines");

        let conv = parser.parse_str("one\ntwo").unwrap();
        assert_eq!(conv.len(), 2);
        assert_eq!(conv.messages[1].content.as_deref(), Some("two"));
    }

    #[test]
    fn test_parse_file_missing() {
        let err = LineParser.parse_file("/definitely/not/here.txt").unwrap_err();
        assert!(err.is_io());
    }
}
