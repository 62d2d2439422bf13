//! Per-entity token statistics.
//!
//! An [`Aggregator`] groups token rows by `(entity, kind, token)` where the
//! entity is either the sender or the term, depending on its [`Dimension`].
//! The two dimensions run the same code and are never mixed in one table.
//!
//! - [`Aggregator::counts`] sums occurrences
//! - [`Aggregator::tf_idf`] scores how distinctive each token is for its entity
//!
//! # Example
//!
//! ```rust
//! use chatstats::aggregate::Aggregator;
//! use chatstats::config::{AnalysisConfig, SenderLabel};
//! use chatstats::message::RawMessage;
//! use chatstats::normalize::Normalizer;
//! use chatstats::tokenize::Tokenizer;
//!
//! # fn main() -> chatstats::Result<()> {
//! let raw = vec![
//!     RawMessage::new("Alice Smith", 1_600_000_000).with_content("I love #cats"),
//!     RawMessage::new("Bob Jones", 1_600_000_060).with_content("cats are great #cats"),
//! ];
//! let messages = Normalizer::new(AnalysisConfig::default())?.normalize(&raw)?;
//! let tokens = Tokenizer::new().tokenize(&messages);
//!
//! let counts = Aggregator::by_sender(SenderLabel::FirstName).counts(&tokens.words);
//! let alice_cats = counts
//!     .iter()
//!     .find(|r| r.entity == "Alice" && r.token == "#cats")
//!     .unwrap();
//! assert_eq!(alice_cats.count, 1);
//! # Ok(())
//! # }
//! ```

mod tfidf;

pub use tfidf::{TfIdfRow, tf_idf_from_counts};

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::SenderLabel;
use crate::tokenize::{Token, TokenKind};

/// What a token is grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Sender,
    Term,
}

impl Dimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Sender => "sender",
            Dimension::Term => "term",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summed occurrences of one token for one entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateRow {
    pub entity: String,
    pub kind: TokenKind,
    pub token: String,
    pub count: u64,
}

/// Groups tokens along one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aggregator {
    dimension: Dimension,
    sender_label: SenderLabel,
}

impl Aggregator {
    pub fn new(dimension: Dimension, sender_label: SenderLabel) -> Self {
        Self {
            dimension,
            sender_label,
        }
    }

    /// Groups by sender, labelled with the given name column.
    pub fn by_sender(label: SenderLabel) -> Self {
        Self::new(Dimension::Sender, label)
    }

    /// Groups by term label.
    pub fn by_term() -> Self {
        Self::new(Dimension::Term, SenderLabel::default())
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// The entity a token belongs to along this dimension.
    pub fn entity<'a>(&self, token: &'a Token) -> &'a str {
        match self.dimension {
            Dimension::Sender => token.sender_label(self.sender_label),
            Dimension::Term => &token.term,
        }
    }

    /// Sums token counts per `(entity, kind, token)`.
    ///
    /// Rows come out in the order their key first occurs in `tokens`.
    pub fn counts(&self, tokens: &[Token]) -> Vec<AggregateRow> {
        let mut index: HashMap<(&str, TokenKind, &str), usize> = HashMap::new();
        let mut rows: Vec<AggregateRow> = Vec::new();

        for token in tokens {
            let key = (self.entity(token), token.kind, token.text.as_str());
            match index.get(&key) {
                Some(&i) => rows[i].count += u64::from(token.count),
                None => {
                    index.insert(key, rows.len());
                    rows.push(AggregateRow {
                        entity: key.0.to_string(),
                        kind: token.kind,
                        token: key.2.to_string(),
                        count: u64::from(token.count),
                    });
                }
            }
        }

        rows
    }

    /// TF-IDF rows sorted by score, highest first.
    ///
    /// See [`tf_idf_from_counts`] for the formula and tie order.
    pub fn tf_idf(&self, tokens: &[Token]) -> Vec<TfIdfRow> {
        let rows = tf_idf_from_counts(&self.counts(tokens));
        tracing::debug!(
            dimension = %self.dimension,
            rows = rows.len(),
            "computed tf-idf"
        );
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::message::RawMessage;
    use crate::normalize::Normalizer;
    use crate::tokenize::{TokenTable, Tokenizer};

    fn tokens(raw: &[RawMessage]) -> TokenTable {
        let messages = Normalizer::new(AnalysisConfig::new().with_timezone(chrono_tz::UTC))
            .unwrap()
            .normalize(raw)
            .unwrap();
        Tokenizer::new().tokenize(&messages)
    }

    fn alice_bob() -> TokenTable {
        tokens(&[
            RawMessage::new("Alice Smith", 1_600_000_000).with_content("I love #cats"),
            RawMessage::new("Bob Jones", 1_600_000_060).with_content("cats are great #cats"),
        ])
    }

    fn find<'a>(rows: &'a [AggregateRow], entity: &str, kind: TokenKind, token: &str) -> Option<&'a AggregateRow> {
        rows.iter()
            .find(|r| r.entity == entity && r.kind == kind && r.token == token)
    }

    #[test]
    fn test_sender_counts_scenario() {
        let table = alice_bob();
        let words: Vec<_> = table
            .words
            .iter()
            .filter(|t| t.kind == TokenKind::Word)
            .map(|t| t.text.as_str())
            .collect();
        for w in ["i", "love", "cats", "are", "great"] {
            assert!(words.contains(&w), "missing {w}");
        }

        let counts = Aggregator::by_sender(SenderLabel::FirstName).counts(&table.words);
        assert_eq!(find(&counts, "Alice", TokenKind::Hashtag, "#cats").unwrap().count, 1);
        assert_eq!(find(&counts, "Bob", TokenKind::Hashtag, "#cats").unwrap().count, 1);
        assert_eq!(find(&counts, "Bob", TokenKind::Word, "cats").unwrap().count, 1);
    }

    #[test]
    fn test_full_name_label() {
        let counts = Aggregator::by_sender(SenderLabel::FullName).counts(&alice_bob().words);
        assert!(find(&counts, "Alice Smith", TokenKind::Hashtag, "#cats").is_some());
        assert!(find(&counts, "Alice", TokenKind::Hashtag, "#cats").is_none());
    }

    #[test]
    fn test_counts_sum_and_order() {
        let table = tokens(&[
            RawMessage::new("Alice", 1).with_content("b a b"),
            RawMessage::new("Alice", 2).with_content("a c"),
        ]);
        let counts = Aggregator::by_sender(SenderLabel::FirstName).counts(&table.words);
        let order: Vec<_> = counts.iter().map(|r| (r.token.as_str(), r.count)).collect();
        assert_eq!(order, vec![("b", 2), ("a", 2), ("c", 1)]);
    }

    #[test]
    fn test_kind_is_part_of_key() {
        let table = tokens(&[RawMessage::new("Alice", 1).with_content("cats #cats")]);
        let counts = Aggregator::by_sender(SenderLabel::FirstName).counts(&table.words);
        assert_eq!(counts.len(), 2);
    }

    #[test]
    fn test_term_dimension() {
        // 2021-02-01 (Winter) and 2021-10-01 (Fall)
        let table = tokens(&[
            RawMessage::new("Alice", 1_612_137_600).with_content("snow"),
            RawMessage::new("Bob", 1_633_046_400).with_content("snow leaves"),
        ]);
        let counts = Aggregator::by_term().counts(&table.words);
        assert_eq!(find(&counts, "2021 Winter", TokenKind::Word, "snow").unwrap().count, 1);
        assert_eq!(find(&counts, "2021 Fall", TokenKind::Word, "leaves").unwrap().count, 1);
        assert_eq!(Aggregator::by_term().dimension(), Dimension::Term);
    }

    #[test]
    fn test_empty_input() {
        let agg = Aggregator::by_sender(SenderLabel::FirstName);
        assert!(agg.counts(&[]).is_empty());
        assert!(agg.tf_idf(&[]).is_empty());
    }
}
