//! Filter normalized messages by local date range and sender.
//!
//! This module provides [`FilterConfig`] for defining filter criteria and
//! [`apply_filters`] for filtering message collections. Filtering happens
//! after normalization, so dates are calendar dates in the analysis timezone.
//!
//! # Filter Types
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Date from | [`with_date_from`](FilterConfig::with_date_from) | Messages on or after date |
//! | Date to | [`with_date_to`](FilterConfig::with_date_to) | Messages on or before date |
//! | Sender | [`with_sender`](FilterConfig::with_sender) | Messages from one sender, by full or first name |
//!
//! # Examples
//!
//! ```
//! use chatstats::config::AnalysisConfig;
//! use chatstats::core::filter::{FilterConfig, apply_filters};
//! use chatstats::message::RawMessage;
//! use chatstats::normalize::Normalizer;
//!
//! # fn main() -> chatstats::Result<()> {
//! let raw = vec![
//!     RawMessage::new("Alice Smith", 1_704_110_400).with_content("Old"),   // 2024-01-01
//!     RawMessage::new("Bob Jones", 1_718_452_800).with_content("New"),     // 2024-06-15
//!     RawMessage::new("Alice Smith", 1_718_452_800).with_content("Newer"), // 2024-06-15
//! ];
//! let messages = Normalizer::new(AnalysisConfig::default())?.normalize(&raw)?;
//!
//! let config = FilterConfig::new()
//!     .with_date_from("2024-06-01")?
//!     .with_sender("alice");
//!
//! let filtered = apply_filters(messages, &config);
//! assert_eq!(filtered.len(), 1);
//! assert_eq!(filtered[0].content.as_deref(), Some("Newer"));
//! # Ok(())
//! # }
//! ```
//!
//! # Behavior Notes
//!
//! - Date bounds are inclusive and compare the message's local date
//! - Sender matching is case-insensitive and accepts the full or the first name
//! - Multiple filters are combined with AND logic

use chrono::NaiveDate;

use crate::error::{ChatstatsError, Result};
use crate::message::NormalizedMessage;

/// Configuration for filtering messages by date and sender.
///
/// Filters are combined with AND logic: a message must match all active
/// filters to be included in the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    /// Include only messages on or after this local date.
    pub after: Option<NaiveDate>,

    /// Include only messages on or before this local date.
    pub before: Option<NaiveDate>,

    /// Include only messages from this sender (case-insensitive).
    pub from: Option<String>,
}

impl FilterConfig {
    /// Creates a new empty filter configuration.
    ///
    /// No filters are active by default; all messages pass through.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatsError::InvalidDate`] if the format is invalid.
    pub fn with_date_from(mut self, date_str: &str) -> Result<Self> {
        self.after = Some(parse_date(date_str)?);
        Ok(self)
    }

    /// Sets the end date filter (inclusive). Date format: `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatsError::InvalidDate`] if the format is invalid.
    pub fn with_date_to(mut self, date_str: &str) -> Result<Self> {
        self.before = Some(parse_date(date_str)?);
        Ok(self)
    }

    /// Sets the sender filter.
    ///
    /// Matches `"Alice Smith"` as well as `"alice"`.
    #[must_use]
    pub fn with_sender(mut self, sender: impl Into<String>) -> Self {
        self.from = Some(sender.into());
        self
    }

    /// Sets the start date directly.
    #[must_use]
    pub fn with_after(mut self, date: NaiveDate) -> Self {
        self.after = Some(date);
        self
    }

    /// Sets the end date directly.
    #[must_use]
    pub fn with_before(mut self, date: NaiveDate) -> Self {
        self.before = Some(date);
        self
    }

    /// Returns `true` if any filter is active.
    pub fn is_active(&self) -> bool {
        self.after.is_some() || self.before.is_some() || self.from.is_some()
    }

    /// Returns `true` if date filters are active.
    pub fn has_date_filter(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }

    /// Returns `true` if the message passes every active filter.
    pub fn matches(&self, msg: &NormalizedMessage) -> bool {
        if let Some(ref from) = self.from {
            let from = from.to_lowercase();
            if msg.sender_name.to_lowercase() != from
                && msg.sender_first_name.to_lowercase() != from
            {
                return false;
            }
        }
        if self.after.is_some_and(|after| msg.date < after) {
            return false;
        }
        if self.before.is_some_and(|before| msg.date > before) {
            return false;
        }
        true
    }
}

/// Parses a `YYYY-MM-DD` date.
pub fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| ChatstatsError::invalid_date(date_str))
}

/// Keeps the messages that match all active filters, in order.
///
/// If no filters are active, returns the original messages unchanged.
pub fn apply_filters(messages: Vec<NormalizedMessage>, config: &FilterConfig) -> Vec<NormalizedMessage> {
    if !config.is_active() {
        return messages;
    }
    messages.into_iter().filter(|m| config.matches(m)).collect()
}
