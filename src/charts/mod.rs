//! Chart registry.
//!
//! A chart is a named recipe that turns [`ResultTables`] into a long-form
//! [`ChartData`] table of `(category, series, value)` rows. The series is
//! usually the sender, so one chart compares everyone in the conversation.
//! Drawing is left to a [`ChartRenderer`]; [`CsvChartRenderer`] writes the
//! data itself.
//!
//! # Example
//!
//! ```rust
//! use chatstats::charts::{ChartOptions, find_chart};
//! use chatstats::config::AnalysisConfig;
//! use chatstats::core::pipeline::Pipeline;
//! use chatstats::message::RawMessage;
//!
//! # fn main() -> chatstats::Result<()> {
//! let raw = vec![
//!     RawMessage::new("Alice Smith", 1_600_000_000).with_content("hi"),
//!     RawMessage::new("Bob Jones", 1_600_000_060).with_content("hey"),
//!     RawMessage::new("Bob Jones", 1_600_000_120).with_content("you there?"),
//! ];
//! let tables = Pipeline::new(AnalysisConfig::default())?.run(&raw)?;
//!
//! let chart = find_chart("sender_messages").unwrap();
//! let data = (chart.build)(&tables, &ChartOptions::default());
//! assert_eq!(data.rows[0].category, "Bob");
//! assert_eq!(data.rows[0].value, 2.0);
//! # Ok(())
//! # }
//! ```

mod activity;
mod render;
mod text;

pub use render::{ChartRenderer, render_charts};
#[cfg(feature = "csv-output")]
pub use render::CsvChartRenderer;

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::pipeline::ResultTables;
use crate::error::Result;

/// A table a chart reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    Messages,
    Words,
    SenderCounts,
    TermCounts,
    SenderTfIdf,
    TermTfIdf,
}

impl TableKind {
    /// Returns `true` if `tables` has rows in this table.
    pub fn is_populated(&self, tables: &ResultTables) -> bool {
        match self {
            TableKind::Messages => !tables.messages.is_empty(),
            TableKind::Words => !tables.tokens.words.is_empty(),
            TableKind::SenderCounts => !tables.sender_counts.is_empty(),
            TableKind::TermCounts => !tables.term_counts.is_empty(),
            TableKind::SenderTfIdf => !tables.sender_tf_idf.is_empty(),
            TableKind::TermTfIdf => !tables.term_tf_idf.is_empty(),
        }
    }
}

/// One data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRow {
    /// Position on the category axis, e.g. a weekday or a word.
    pub category: String,
    /// Group within the category, usually the sender.
    pub series: String,
    pub value: f64,
}

/// Long-form chart table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub rows: Vec<ChartRow>,
}

impl ChartData {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct categories in row order.
    pub fn categories(&self) -> Vec<&str> {
        distinct(self.rows.iter().map(|r| r.category.as_str()))
    }

    /// Distinct series in row order.
    pub fn series(&self) -> Vec<&str> {
        distinct(self.rows.iter().map(|r| r.series.as_str()))
    }

    /// Value at `(category, series)`, if present.
    pub fn value(&self, category: &str, series: &str) -> Option<f64> {
        self.rows
            .iter()
            .find(|r| r.category == category && r.series == series)
            .map(|r| r.value)
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    values.filter(|v| seen.insert(*v)).collect()
}

/// Tuning knobs shared by the charts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartOptions {
    /// Categories kept by the word, emoji and hashtag charts (default: 15)
    pub top_n: usize,
    /// Days kept by `top_days_messages` (default: 5)
    pub top_days: usize,
    /// Stickers kept by `top_stickers` (default: 10)
    pub top_stickers: usize,
    /// Tokens kept per entity by the distinctive charts (default: 5)
    pub top_distinctive: usize,
    /// `long_words` keeps words strictly longer than this (default: 6)
    pub long_word_len: usize,
    /// Lowercase words left out of `word_count`.
    pub common_words: HashSet<String>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            top_n: 15,
            top_days: 5,
            top_stickers: 10,
            top_distinctive: 5,
            long_word_len: 6,
            common_words: HashSet::new(),
        }
    }
}

impl ChartOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_top_n(mut self, n: usize) -> Self {
        self.top_n = n;
        self
    }

    #[must_use]
    pub fn with_long_word_len(mut self, len: usize) -> Self {
        self.long_word_len = len;
        self
    }

    /// Adds words to the common-word list (lowercased, trimmed).
    #[must_use]
    pub fn with_common_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.common_words.extend(
            words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty()),
        );
        self
    }

    /// Loads a common-word list, one word per line.
    pub fn with_common_words_file(self, path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(self.with_common_words(content.lines()))
    }
}

/// A registered chart.
#[derive(Debug, Clone, Copy)]
pub struct ChartDef {
    /// File stem and lookup key.
    pub name: &'static str,
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    /// Tables that must be non-empty for the chart to be drawn.
    pub requires: &'static [TableKind],
    pub build: fn(&ResultTables, &ChartOptions) -> ChartData,
}

impl ChartDef {
    /// Returns `true` if every required table has rows.
    pub fn is_available(&self, tables: &ResultTables) -> bool {
        self.requires.iter().all(|t| t.is_populated(tables))
    }
}

const MESSAGES: &[TableKind] = &[TableKind::Messages];
const SENDER_COUNTS: &[TableKind] = &[TableKind::SenderCounts];
const SENDER_TFIDF: &[TableKind] = &[TableKind::SenderTfIdf];
const TERM_TFIDF: &[TableKind] = &[TableKind::TermTfIdf];

static CHARTS: &[ChartDef] = &[
    ChartDef {
        name: "sender_messages",
        title: "Messages per sender",
        x_label: "Sender",
        y_label: "Messages sent",
        requires: MESSAGES,
        build: activity::sender_messages,
    },
    ChartDef {
        name: "weekday_messages",
        title: "Messages per day of the week",
        x_label: "Day of the week",
        y_label: "Messages sent",
        requires: MESSAGES,
        build: activity::weekday_messages,
    },
    ChartDef {
        name: "top_days_messages",
        title: "Days with the most messages",
        x_label: "Top days with most messages",
        y_label: "Messages sent",
        requires: MESSAGES,
        build: activity::top_days_messages,
    },
    ChartDef {
        name: "time_in_day_messages",
        title: "Messages per hour of the day",
        x_label: "Time in a day",
        y_label: "Messages sent",
        requires: MESSAGES,
        build: activity::time_in_day_messages,
    },
    ChartDef {
        name: "per_month_messages",
        title: "Messages per month",
        x_label: "Months",
        y_label: "Messages sent",
        requires: MESSAGES,
        build: activity::per_month_messages,
    },
    ChartDef {
        name: "term_messages",
        title: "Messages per term",
        x_label: "Term",
        y_label: "Messages sent",
        requires: MESSAGES,
        build: activity::term_messages,
    },
    ChartDef {
        name: "message_types",
        title: "Messages per type",
        x_label: "Message type",
        y_label: "Messages",
        requires: MESSAGES,
        build: activity::message_types,
    },
    ChartDef {
        name: "top_stickers",
        title: "Most used stickers",
        x_label: "Top stickers used",
        y_label: "Occurrences",
        requires: MESSAGES,
        build: activity::top_stickers,
    },
    ChartDef {
        name: "word_count",
        title: "Most common words",
        x_label: "Most common words (common words filtered out)",
        y_label: "Occurrences",
        requires: SENDER_COUNTS,
        build: text::word_count,
    },
    ChartDef {
        name: "long_words",
        title: "Most common long words",
        x_label: "Most common long words",
        y_label: "Occurrences",
        requires: SENDER_COUNTS,
        build: text::long_words,
    },
    ChartDef {
        name: "names",
        title: "Who says whose name",
        x_label: "Name said in chat",
        y_label: "Occurrences",
        requires: SENDER_COUNTS,
        build: text::names,
    },
    ChartDef {
        name: "emoji_count",
        title: "Most common emoji",
        x_label: "Most common emoji",
        y_label: "Occurrences",
        requires: SENDER_COUNTS,
        build: text::emoji_count,
    },
    ChartDef {
        name: "hashtag_count",
        title: "Most common hashtags",
        x_label: "Most common hashtags",
        y_label: "Occurrences",
        requires: SENDER_COUNTS,
        build: text::hashtag_count,
    },
    ChartDef {
        name: "distinctive_words_by_sender",
        title: "Most distinctive words per sender",
        x_label: "Word",
        y_label: "TF-IDF",
        requires: SENDER_TFIDF,
        build: text::distinctive_words_by_sender,
    },
    ChartDef {
        name: "distinctive_bigrams_by_sender",
        title: "Most distinctive bigrams per sender",
        x_label: "Bigram",
        y_label: "TF-IDF",
        requires: SENDER_TFIDF,
        build: text::distinctive_bigrams_by_sender,
    },
    ChartDef {
        name: "distinctive_trigrams_by_sender",
        title: "Most distinctive trigrams per sender",
        x_label: "Trigram",
        y_label: "TF-IDF",
        requires: SENDER_TFIDF,
        build: text::distinctive_trigrams_by_sender,
    },
    ChartDef {
        name: "distinctive_words_by_term",
        title: "Most distinctive words per term",
        x_label: "Word",
        y_label: "TF-IDF",
        requires: TERM_TFIDF,
        build: text::distinctive_words_by_term,
    },
    ChartDef {
        name: "distinctive_bigrams_by_term",
        title: "Most distinctive bigrams per term",
        x_label: "Bigram",
        y_label: "TF-IDF",
        requires: TERM_TFIDF,
        build: text::distinctive_bigrams_by_term,
    },
    ChartDef {
        name: "distinctive_trigrams_by_term",
        title: "Most distinctive trigrams per term",
        x_label: "Trigram",
        y_label: "TF-IDF",
        requires: TERM_TFIDF,
        build: text::distinctive_trigrams_by_term,
    },
];

/// Every registered chart, in drawing order.
pub fn all_charts() -> &'static [ChartDef] {
    CHARTS
}

/// Looks up a chart by name.
pub fn find_chart(name: &str) -> Option<&'static ChartDef> {
    CHARTS.iter().find(|c| c.name == name)
}

/// Accumulates `(category, series)` cells, summing repeated cells.
///
/// Cells keep first-occurrence order; `K` is an optional sort key for
/// categories with a natural order (weekdays, months).
struct Tally<K = ()> {
    cells: Vec<(K, ChartRow)>,
    index: HashMap<(String, String), usize>,
}

impl<K> Default for Tally<K> {
    fn default() -> Self {
        Self {
            cells: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K: Ord> Tally<K> {
    fn add_keyed(&mut self, key: K, category: &str, series: &str, value: f64) {
        let lookup = (category.to_string(), series.to_string());
        match self.index.get(&lookup) {
            Some(&i) => self.cells[i].1.value += value,
            None => {
                self.index.insert(lookup, self.cells.len());
                self.cells.push((
                    key,
                    ChartRow {
                        category: category.to_string(),
                        series: series.to_string(),
                        value,
                    },
                ));
            }
        }
    }

    /// Rows ordered by the category key; ties keep insertion order.
    fn into_sorted(mut self) -> ChartData {
        self.cells.sort_by(|a, b| a.0.cmp(&b.0));
        ChartData {
            rows: self.cells.into_iter().map(|(_, row)| row).collect(),
        }
    }

    /// The `limit` categories with the highest totals, highest first.
    ///
    /// Rows of one category stay together in insertion order; equal totals
    /// keep first-occurrence order.
    fn into_top(self, limit: usize) -> ChartData {
        let mut totals: Vec<(String, f64)> = Vec::new();
        let mut position: HashMap<String, usize> = HashMap::new();
        for (_, row) in &self.cells {
            match position.get(&row.category) {
                Some(&i) => totals[i].1 += row.value,
                None => {
                    position.insert(row.category.clone(), totals.len());
                    totals.push((row.category.clone(), row.value));
                }
            }
        }
        totals.sort_by(|a, b| b.1.total_cmp(&a.1));

        let rank: HashMap<&str, usize> = totals
            .iter()
            .take(limit)
            .enumerate()
            .map(|(i, (category, _))| (category.as_str(), i))
            .collect();

        let mut kept: Vec<(usize, ChartRow)> = self
            .cells
            .into_iter()
            .filter_map(|(_, row)| rank.get(row.category.as_str()).map(|&r| (r, row)))
            .collect();
        kept.sort_by_key(|(r, _)| *r);

        ChartData {
            rows: kept.into_iter().map(|(_, row)| row).collect(),
        }
    }
}

impl Tally<()> {
    fn add(&mut self, category: &str, series: &str, value: f64) {
        self.add_keyed((), category, series, value);
    }
}
