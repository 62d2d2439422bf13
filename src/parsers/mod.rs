//! Chat export parsers.
//!
//! Each parser implements the [`Parser`](crate::parser::Parser) trait and
//! yields a [`Conversation`](crate::message::Conversation).
//!
//! # Available Parsers
//!
//! - [`MessengerParser`] - Parses Meta Messenger JSON exports (single file or multi-part folder)

mod messenger;

pub use messenger::{MessengerParser, find_parts};
