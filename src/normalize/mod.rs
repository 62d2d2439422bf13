//! Raw record to normalized message.
//!
//! [`Normalizer`] derives every field the statistics need from a
//! [`RawMessage`]: the instant in the configured timezone, calendar date,
//! term, canonical sticker, subtype and sender first name. Text is repaired
//! first so classification and tokenization see clean strings.
//!
//! The transformation is pure: no I/O, and the same records with the same
//! [`AnalysisConfig`] always give the same output. Exactly one
//! [`NormalizedMessage`] is produced per input record, in input order.
//!
//! # Example
//!
//! ```rust
//! use chatstats::config::AnalysisConfig;
//! use chatstats::message::RawMessage;
//! use chatstats::normalize::Normalizer;
//!
//! # fn main() -> chatstats::Result<()> {
//! let normalizer = Normalizer::new(AnalysisConfig::new().with_timezone(chrono_tz::UTC))?;
//! let raw = vec![RawMessage::new("Alice Smith", 1_633_046_400_000).with_content("hi")];
//!
//! let messages = normalizer.normalize(&raw)?;
//! assert_eq!(messages[0].sender_first_name, "Alice");
//! assert_eq!(messages[0].term, "2021 Fall");
//! # Ok(())
//! # }
//! ```

mod classify;
mod encoding;
mod sticker;
mod term;

pub use classify::{SubtypeMatches, classify};
pub use encoding::{ascii_quote, fix_text, repair_mojibake};
pub use sticker::{CANONICAL_LIKE, DUPLICATE_LIKES, canonical_sticker};
pub use term::TermScheme;

use chrono::{DateTime, Datelike, FixedOffset, Utc};

use crate::config::{AnalysisConfig, TimestampUnit};
use crate::error::{ChatstatsError, Result};
use crate::message::{AttachmentKind, NormalizedMessage, RawMessage, Reaction, Share};

/// Epoch values at or above this magnitude are read as milliseconds when
/// the unit is not known. 10^11 seconds is the year 5138; 10^11 ms is 1973.
const AUTO_MILLIS_THRESHOLD: i64 = 100_000_000_000;

/// Returns the first whitespace-delimited token of a display name.
pub fn first_name(name: &str) -> Option<&str> {
    name.split_whitespace().next()
}

/// Resolves the unit of an epoch value.
///
/// An explicit configured unit wins; `Auto` uses the record's own hint and
/// then the value's magnitude.
pub fn resolve_unit(configured: TimestampUnit, hint: Option<TimestampUnit>, value: i64) -> TimestampUnit {
    match (configured, hint) {
        (TimestampUnit::Auto, Some(unit)) if unit != TimestampUnit::Auto => unit,
        (TimestampUnit::Auto, _) => {
            if value.unsigned_abs() >= AUTO_MILLIS_THRESHOLD.unsigned_abs() {
                TimestampUnit::Milliseconds
            } else {
                TimestampUnit::Seconds
            }
        }
        (explicit, _) => explicit,
    }
}

/// Derives normalized messages from raw records.
#[derive(Debug, Clone)]
pub struct Normalizer {
    config: AnalysisConfig,
    terms: TermScheme,
}

impl Normalizer {
    /// Creates a normalizer.
    ///
    /// # Errors
    ///
    /// Returns [`ChatstatsError::Configuration`] for an unusable term scheme,
    /// before any record is processed.
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        let terms = TermScheme::from_config(&config)?;
        Ok(Self { config, terms })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn terms(&self) -> &TermScheme {
        &self.terms
    }

    /// Normalizes every record, in order.
    ///
    /// # Errors
    ///
    /// Fails on the first record whose sender has no first name
    /// ([`ChatstatsError::InvalidSender`]) or whose timestamp is out of range
    /// ([`ChatstatsError::MalformedRecord`]).
    #[tracing::instrument(skip_all, fields(records = raw.len()))]
    pub fn normalize(&self, raw: &[RawMessage]) -> Result<Vec<NormalizedMessage>> {
        let messages = raw
            .iter()
            .enumerate()
            .map(|(index, msg)| self.normalize_one(index, msg))
            .collect::<Result<Vec<_>>>()?;
        tracing::info!(messages = messages.len(), "normalized messages");
        Ok(messages)
    }

    /// Normalizes record number `index`.
    pub fn normalize_one(&self, index: usize, raw: &RawMessage) -> Result<NormalizedMessage> {
        let sender_name = self.repair(&raw.sender_name);
        let sender_first_name = first_name(&sender_name)
            .ok_or_else(|| ChatstatsError::invalid_sender(index, raw.sender_name.as_str()))?
            .to_string();

        let (timestamp, datetime) = self.localize(index, raw)?;
        let (term_number, term) = self.terms.classify(datetime.year(), datetime.month());

        let content = raw.content.as_deref().map(|c| self.repair(c));
        let kind = classify(content.as_deref(), raw.kind);

        let mut attachment = raw.attachment.clone();
        if let Some(a) = attachment.as_mut().filter(|a| a.kind == AttachmentKind::Sticker) {
            for uri in &mut a.uris {
                *uri = canonical_sticker(uri).to_string();
            }
        }
        let sticker = raw.sticker_uri().map(|uri| canonical_sticker(uri).to_string());

        let share = raw.share.as_ref().map(|s| Share {
            link: s.link.clone(),
            share_text: s.share_text.as_deref().map(|t| self.repair(t)),
        });
        let reactions = raw
            .reactions
            .iter()
            .map(|r| Reaction {
                reaction: self.repair(&r.reaction),
                actor: self.repair(&r.actor),
            })
            .collect();

        Ok(NormalizedMessage {
            sender_name,
            sender_first_name,
            timestamp,
            datetime,
            date: datetime.date_naive(),
            term,
            term_number,
            content,
            kind,
            declared_kind: raw.kind,
            sticker,
            attachment,
            share,
            reactions,
            call_duration: raw.call_duration,
            missed: raw.missed,
        })
    }

    fn repair(&self, text: &str) -> String {
        if self.config.fix_encoding {
            fix_text(text)
        } else {
            text.to_string()
        }
    }

    fn localize(&self, index: usize, raw: &RawMessage) -> Result<(DateTime<Utc>, DateTime<FixedOffset>)> {
        let unit = resolve_unit(self.config.timestamp_unit, raw.timestamp_unit, raw.timestamp);
        let utc = match unit {
            TimestampUnit::Milliseconds => DateTime::from_timestamp_millis(raw.timestamp),
            _ => DateTime::from_timestamp(raw.timestamp, 0),
        }
        .ok_or_else(|| {
            ChatstatsError::malformed_record(
                index,
                "timestamp",
                format!("{} ({unit}) is out of range", raw.timestamp),
            )
        })?;

        let local = utc.with_timezone(&self.config.timezone).fixed_offset();
        Ok((utc, local))
    }
}
