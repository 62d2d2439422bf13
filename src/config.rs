//! Configuration types for ingestion and analysis.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies. Everything that used to be
//! global state in a charting script (timezone, term scheme, which sender
//! column to label with) is an explicit value threaded through
//! [`Normalizer`](crate::normalize::Normalizer) and
//! [`Aggregator`](crate::aggregate::Aggregator) construction.
//!
//! - [`AnalysisConfig`] - timezone, terms, sender labels, timestamp unit, encoding repair
//! - [`MessengerConfig`] - how the export parser treats malformed records
//!
//! # Example
//!
//! ```rust
//! use chatstats::config::{AnalysisConfig, SenderLabel};
//!
//! # fn main() -> chatstats::Result<()> {
//! let config = AnalysisConfig::new()
//!     .with_timezone_name("Europe/Berlin")?
//!     .with_terms_per_year(4)
//!     .with_sender_label(SenderLabel::FullName);
//!
//! config.validate()?;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{ChatstatsError, Result};
use crate::normalize::TermScheme;

/// Unit of the epoch values found in an export.
///
/// Older Messenger exports store `timestamp` in seconds, newer ones
/// `timestamp_ms` in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampUnit {
    /// Use the unit implied by the record's field name, else guess from magnitude.
    #[default]
    Auto,
    /// Seconds since the Unix epoch
    Seconds,
    /// Milliseconds since the Unix epoch
    Milliseconds,
}

impl TimestampUnit {
    /// Returns all accepted names.
    pub fn all_names() -> &'static [&'static str] {
        &["auto", "seconds", "s", "milliseconds", "ms"]
    }
}

impl fmt::Display for TimestampUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimestampUnit::Auto => write!(f, "auto"),
            TimestampUnit::Seconds => write!(f, "seconds"),
            TimestampUnit::Milliseconds => write!(f, "milliseconds"),
        }
    }
}

impl FromStr for TimestampUnit {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(TimestampUnit::Auto),
            "seconds" | "s" => Ok(TimestampUnit::Seconds),
            "milliseconds" | "ms" => Ok(TimestampUnit::Milliseconds),
            _ => Err(format!(
                "Unknown timestamp unit: '{}'. Expected one of: {}",
                s,
                TimestampUnit::all_names().join(", ")
            )),
        }
    }
}

/// Which sender column labels senders in aggregates and charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SenderLabel {
    /// The full display name, e.g. "Alice Smith"
    FullName,
    /// The first whitespace-delimited token, e.g. "Alice"
    #[default]
    FirstName,
}

/// What the export parser does with a record it cannot turn into a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordPolicy {
    /// Drop the record and log a warning naming it (default)
    #[default]
    Skip,
    /// Fail the whole parse with [`ChatstatsError::MalformedRecord`]
    Strict,
}

/// Default human-readable term names for a given term count.
///
/// Only the three-term academic calendar has names; other schemes fall
/// back to numbered labels.
pub fn default_term_suffixes(terms_per_year: u32) -> Vec<String> {
    match terms_per_year {
        3 => vec!["Winter".into(), "Spring".into(), "Fall".into()],
        _ => Vec::new(),
    }
}

/// Configuration for the normalization and aggregation stages.
///
/// # Example
///
/// ```rust
/// use chatstats::config::AnalysisConfig;
///
/// let config = AnalysisConfig::default();
/// assert_eq!(config.terms_per_year, 3);
/// assert_eq!(config.term_suffixes, vec!["Winter", "Spring", "Fall"]);
/// assert!(config.fix_encoding);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Timezone used for every derived date/time field (default: US/Eastern)
    pub timezone: Tz,

    /// Number of equal-length terms per calendar year (default: 3)
    pub terms_per_year: u32,

    /// Optional names for each term, in calendar order (default: Winter, Spring, Fall)
    pub term_suffixes: Vec<String>,

    /// Sender column used for labelling (default: first name)
    pub sender_label: SenderLabel,

    /// Unit of the epoch timestamps (default: auto)
    pub timestamp_unit: TimestampUnit,

    /// Repair Meta's double-encoded UTF-8 (Mojibake) (default: true)
    pub fix_encoding: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::US::Eastern,
            terms_per_year: 3,
            term_suffixes: default_term_suffixes(3),
            sender_label: SenderLabel::default(),
            timestamp_unit: TimestampUnit::default(),
            fix_encoding: true,
        }
    }
}

impl AnalysisConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a configuration from a JSON string. Missing fields take defaults.
    ///
    /// Without `term_suffixes`, the term names follow `terms_per_year` the
    /// same way [`with_terms_per_year`](Self::with_terms_per_year) does.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(content)?;
        let names_given = value.get("term_suffixes").is_some();
        let mut config: Self = serde_json::from_value(value)?;
        if !names_given {
            config.term_suffixes = default_term_suffixes(config.terms_per_year);
        }
        Ok(config)
    }

    /// Reads a configuration from a JSON file. Missing fields take defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Sets the target timezone.
    #[must_use]
    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    /// Sets the target timezone from an IANA identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatsError::InvalidTimezone`] for unknown identifiers.
    pub fn with_timezone_name(mut self, name: &str) -> Result<Self> {
        self.timezone = name
            .parse::<Tz>()
            .map_err(|_| ChatstatsError::invalid_timezone(name))?;
        Ok(self)
    }

    /// Sets the number of terms per year and resets the term names to the
    /// defaults for that count.
    #[must_use]
    pub fn with_terms_per_year(mut self, terms: u32) -> Self {
        self.terms_per_year = terms;
        self.term_suffixes = default_term_suffixes(terms);
        self
    }

    /// Sets the term names. An empty list means numbered labels.
    #[must_use]
    pub fn with_term_suffixes<I, S>(mut self, suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.term_suffixes = suffixes.into_iter().map(Into::into).collect();
        self
    }

    /// Sets which sender column labels senders.
    #[must_use]
    pub fn with_sender_label(mut self, label: SenderLabel) -> Self {
        self.sender_label = label;
        self
    }

    /// Sets the epoch unit.
    #[must_use]
    pub fn with_timestamp_unit(mut self, unit: TimestampUnit) -> Self {
        self.timestamp_unit = unit;
        self
    }

    /// Enables or disables encoding repair.
    #[must_use]
    pub fn with_fix_encoding(mut self, fix: bool) -> Self {
        self.fix_encoding = fix;
        self
    }

    /// Checks the configuration before any processing happens.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatsError::Configuration`] when `terms_per_year` is zero
    /// or does not divide 12, or when term names are given but their count
    /// differs from `terms_per_year`.
    pub fn validate(&self) -> Result<()> {
        TermScheme::new(self.terms_per_year, self.term_suffixes.clone()).map(|_| ())
    }
}

/// Configuration for Messenger export parsing.
///
/// # Example
///
/// ```rust
/// use chatstats::config::{MessengerConfig, RecordPolicy};
///
/// let config = MessengerConfig::new().with_record_policy(RecordPolicy::Strict);
/// assert_eq!(config.record_policy, RecordPolicy::Strict);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessengerConfig {
    /// Skip or reject malformed records (default: skip)
    pub record_policy: RecordPolicy,
}

impl MessengerConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration that rejects malformed records.
    pub fn strict() -> Self {
        Self {
            record_policy: RecordPolicy::Strict,
        }
    }

    /// Sets the malformed record policy.
    #[must_use]
    pub fn with_record_policy(mut self, policy: RecordPolicy) -> Self {
        self.record_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_config_default() {
        let config = AnalysisConfig::default();
        assert_eq!(config.timezone, chrono_tz::US::Eastern);
        assert_eq!(config.terms_per_year, 3);
        assert_eq!(config.sender_label, SenderLabel::FirstName);
        assert_eq!(config.timestamp_unit, TimestampUnit::Auto);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_analysis_config_builder() {
        let config = AnalysisConfig::new()
            .with_timezone(chrono_tz::UTC)
            .with_terms_per_year(4)
            .with_sender_label(SenderLabel::FullName)
            .with_timestamp_unit(TimestampUnit::Seconds)
            .with_fix_encoding(false);

        assert_eq!(config.timezone, chrono_tz::UTC);
        assert_eq!(config.terms_per_year, 4);
        assert!(config.term_suffixes.is_empty());
        assert_eq!(config.sender_label, SenderLabel::FullName);
        assert!(!config.fix_encoding);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_timezone_name() {
        let config = AnalysisConfig::new()
            .with_timezone_name("Europe/Berlin")
            .unwrap();
        assert_eq!(config.timezone, chrono_tz::Europe::Berlin);

        let err = AnalysisConfig::new().with_timezone_name("Mars/Olympus");
        assert!(err.unwrap_err().is_configuration());
    }

    #[test]
    fn test_validate_rejects_non_divisor() {
        for terms in [0, 5, 7, 8, 13] {
            let config = AnalysisConfig::new().with_terms_per_year(terms);
            let err = config.validate().unwrap_err();
            assert!(err.is_configuration(), "terms = {terms}");
        }
        for terms in [1, 2, 3, 4, 6, 12] {
            assert!(AnalysisConfig::new().with_terms_per_year(terms).validate().is_ok());
        }
    }

    #[test]
    fn test_validate_rejects_suffix_count_mismatch() {
        let config = AnalysisConfig::new().with_term_suffixes(["Spring", "Fall"]);
        assert!(config.validate().is_err());

        let config = AnalysisConfig::new()
            .with_terms_per_year(2)
            .with_term_suffixes(["Spring", "Fall"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_json_partial() {
        let config =
            AnalysisConfig::from_json_str(r#"{"timezone": "UTC", "sender_label": "full_name"}"#)
                .unwrap();
        assert_eq!(config.timezone, chrono_tz::UTC);
        assert_eq!(config.sender_label, SenderLabel::FullName);
        assert_eq!(config.terms_per_year, 3);
    }

    #[test]
    fn test_config_from_json_terms_without_names() {
        let config = AnalysisConfig::from_json_str(r#"{"terms_per_year": 4}"#).unwrap();
        assert!(config.term_suffixes.is_empty());
        assert!(config.validate().is_ok());

        let named = AnalysisConfig::from_json_str(r#"{"terms_per_year": 2, "term_suffixes": ["A", "B"]}"#)
            .unwrap();
        assert_eq!(named.term_suffixes, vec!["A", "B"]);
    }

    #[test]
    fn test_timestamp_unit_from_str() {
        assert_eq!("ms".parse::<TimestampUnit>().unwrap(), TimestampUnit::Milliseconds);
        assert_eq!("Seconds".parse::<TimestampUnit>().unwrap(), TimestampUnit::Seconds);
        assert_eq!("auto".parse::<TimestampUnit>().unwrap(), TimestampUnit::Auto);
        assert!("hours".parse::<TimestampUnit>().is_err());
    }

    #[test]
    fn test_messenger_config() {
        assert_eq!(MessengerConfig::default().record_policy, RecordPolicy::Skip);
        assert_eq!(MessengerConfig::strict().record_policy, RecordPolicy::Strict);
    }
}
