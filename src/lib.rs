//! # Chatstats
//!
//! A Rust library for turning Meta Messenger conversation exports into
//! normalized message tables, word/emoji/hashtag statistics, TF-IDF rankings
//! and chart data.
//!
//! ## Overview
//!
//! Processing runs in four stages:
//! - **Parse**: read `message_N.json` parts into a
//!   [`Conversation`](message::Conversation) of raw records
//! - **Normalize**: repair Mojibake, convert timestamps to local time,
//!   assign academic terms, classify message types
//! - **Tokenize**: split text into words, emoji and hashtags, plus word
//!   bigrams and trigrams
//! - **Aggregate**: count tokens and score TF-IDF per sender and per term
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chatstats::prelude::*;
//! use std::path::Path;
//!
//! fn main() -> Result<()> {
//!     let conversation = MessengerParser::new().parse(Path::new("inbox/alice_x1"))?;
//!
//!     let config = AnalysisConfig::new().with_terms_per_year(3);
//!     let tables = Pipeline::new(config)?.run(&conversation.messages)?;
//!
//!     write_tables(&tables, Path::new("output/alice_x1"), OutputFormat::Csv)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Working in Memory
//!
//! ```rust
//! use chatstats::prelude::*;
//!
//! let raw = vec![
//!     RawMessage::new("Alice Smith", 1_633_046_400).with_content("Hello #team 😀"),
//!     RawMessage::new("Bob Jones", 1_633_046_460).with_content("hi alice"),
//! ];
//!
//! let tables = Pipeline::new(AnalysisConfig::default())?.run(&raw)?;
//! assert_eq!(tables.messages.len(), 2);
//! assert!(tables.sender_counts.iter().any(|r| r.token == "#team"));
//! # Ok::<(), chatstats::ChatstatsError>(())
//! ```
//!
//! ## Module Structure
//!
//! - [`parser`] - [`Parser`](parser::Parser) trait for reading exports
//! - [`parsers`] - [`MessengerParser`](parsers::MessengerParser)
//! - [`parsing`] - Export record types and record-to-message conversion
//! - [`config`] - [`AnalysisConfig`](config::AnalysisConfig) and
//!   [`MessengerConfig`](config::MessengerConfig)
//! - [`message`] - Raw and normalized message types
//! - [`normalize`] - The [`Normalizer`](normalize::Normalizer)
//! - [`tokenize`] - The [`Tokenizer`](tokenize::Tokenizer)
//! - [`aggregate`] - Counts and TF-IDF per sender or term
//! - [`core`] - Pipeline, filters and table writers
//! - [`charts`] - Chart registry and renderers
//! - [`format`] - [`OutputFormat`](format::OutputFormat)
//! - [`error`] - Unified error types ([`ChatstatsError`], [`Result`])
//! - [`prelude`] - Convenient re-exports

pub mod aggregate;
pub mod charts;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
#[cfg(feature = "cli")]
pub mod logging;
pub mod message;
pub mod normalize;
pub mod parser;
pub mod parsers;
pub mod parsing;
pub mod tokenize;

// Re-export the main types at the crate root for convenience
pub use error::{ChatstatsError, Result};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatstats::prelude::*;
/// ```
pub mod prelude {
    // Error types
    pub use crate::error::{ChatstatsError, Result};

    // Messages
    pub use crate::message::{Conversation, MessageType, NormalizedMessage, RawMessage};

    // Parsing
    pub use crate::parser::Parser;
    pub use crate::parsers::MessengerParser;

    // Configuration
    pub use crate::config::{AnalysisConfig, MessengerConfig, RecordPolicy, SenderLabel, TimestampUnit};

    // Stages
    pub use crate::aggregate::{AggregateRow, Aggregator, TfIdfRow};
    pub use crate::normalize::Normalizer;
    pub use crate::tokenize::{Token, TokenKind, TokenTable, Tokenizer};

    // Pipeline and filtering
    pub use crate::core::filter::{FilterConfig, apply_filters};
    pub use crate::core::pipeline::{Pipeline, PipelineStats, ResultTables};

    // Output
    pub use crate::core::output::write_tables;
    pub use crate::format::OutputFormat;

    // Charts
    pub use crate::charts::{ChartData, ChartOptions, ChartRenderer, render_charts};
}
