//! Export record types and record-to-message conversion.
//!
//! Kept apart from the [`parsers`](crate::parsers) so the conversion rules can
//! be tested without touching the filesystem.

pub mod messenger;

pub use messenger::{MessengerExport, MessengerRecord, into_conversation, merge_parts, record_to_raw};
