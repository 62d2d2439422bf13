//! End-to-end run: normalize, filter, tokenize, aggregate.
//!
//! ```rust
//! use chatstats::config::AnalysisConfig;
//! use chatstats::core::pipeline::Pipeline;
//! use chatstats::message::RawMessage;
//!
//! # fn main() -> chatstats::Result<()> {
//! let raw = vec![
//!     RawMessage::new("Alice Smith", 1_600_000_000).with_content("I love #cats"),
//!     RawMessage::new("Bob Jones", 1_600_000_060).with_content("cats are great #cats"),
//! ];
//!
//! let tables = Pipeline::new(AnalysisConfig::default())?.run(&raw)?;
//! assert_eq!(tables.messages.len(), 2);
//! assert_eq!(tables.stats.raw, 2);
//! assert!(!tables.sender_tf_idf.words.is_empty());
//! # Ok(())
//! # }
//! ```

use serde::Serialize;

use crate::aggregate::{AggregateRow, Aggregator, TfIdfRow};
use crate::config::{AnalysisConfig, SenderLabel};
use crate::core::filter::{FilterConfig, apply_filters};
use crate::error::Result;
use crate::message::{NormalizedMessage, RawMessage};
use crate::normalize::Normalizer;
use crate::tokenize::{Ngrams, TokenTable, Tokenizer};

/// Row counts after each stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PipelineStats {
    /// Records handed to the pipeline.
    pub raw: usize,
    /// Messages out of the normalizer (always equal to `raw`).
    pub normalized: usize,
    /// Messages left after filtering.
    pub filtered: usize,
    /// Token rows across words, bigrams and trigrams.
    pub tokens: usize,
}

impl PipelineStats {
    /// Percentage of messages removed by the filter.
    pub fn filtered_out_ratio(&self) -> f64 {
        if self.normalized == 0 {
            return 0.0;
        }
        (1.0 - (self.filtered as f64 / self.normalized as f64)) * 100.0
    }
}

/// Every table a run produces.
#[derive(Debug, Clone, Default)]
pub struct ResultTables {
    pub messages: Vec<NormalizedMessage>,
    pub tokens: TokenTable,
    /// Unigram counts per sender.
    pub sender_counts: Vec<AggregateRow>,
    /// Unigram counts per term.
    pub term_counts: Vec<AggregateRow>,
    pub sender_tf_idf: Ngrams<TfIdfRow>,
    pub term_tf_idf: Ngrams<TfIdfRow>,
    /// Sender column used for the per-sender tables.
    pub sender_label: SenderLabel,
    pub stats: PipelineStats,
}

/// Runs the analysis stages in order.
#[derive(Debug, Clone)]
pub struct Pipeline {
    normalizer: Normalizer,
    tokenizer: Tokenizer,
    filter: FilterConfig,
}

impl Pipeline {
    /// Validates `config` and builds the stages.
    pub fn new(config: AnalysisConfig) -> Result<Self> {
        Ok(Self {
            normalizer: Normalizer::new(config)?,
            tokenizer: Tokenizer::new(),
            filter: FilterConfig::new(),
        })
    }

    #[must_use]
    pub fn with_filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }

    #[must_use]
    pub fn with_tokenizer(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        self.normalizer.config()
    }

    pub fn filter(&self) -> &FilterConfig {
        &self.filter
    }

    /// Runs every stage over `raw`.
    ///
    /// Fails only if normalization fails; see [`Normalizer::normalize`].
    #[tracing::instrument(skip_all, fields(records = raw.len()))]
    pub fn run(&self, raw: &[RawMessage]) -> Result<ResultTables> {
        let normalized = self.normalizer.normalize(raw)?;
        let normalized_count = normalized.len();

        let messages = apply_filters(normalized, &self.filter);
        if self.filter.is_active() {
            tracing::info!(kept = messages.len(), of = normalized_count, "filtered messages");
        }

        let tokens = self.tokenizer.tokenize(&messages);

        let sender_label = self.config().sender_label;
        let by_sender = Aggregator::by_sender(sender_label);
        let by_term = Aggregator::by_term();

        let stats = PipelineStats {
            raw: raw.len(),
            normalized: normalized_count,
            filtered: messages.len(),
            tokens: tokens.len(),
        };

        let tables = ResultTables {
            sender_counts: by_sender.counts(&tokens.words),
            term_counts: by_term.counts(&tokens.words),
            sender_tf_idf: tokens.map(|t| by_sender.tf_idf(t)),
            term_tf_idf: tokens.map(|t| by_term.tf_idf(t)),
            messages,
            tokens,
            sender_label,
            stats,
        };

        tracing::info!(
            messages = tables.stats.filtered,
            tokens = tables.stats.tokens,
            "pipeline finished"
        );
        Ok(tables)
    }
}
