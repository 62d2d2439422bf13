//! Core processing logic for chatstats.
//!
//! This module contains:
//! - [`pipeline`] - Normalize, filter, tokenize and aggregate in one pass
//! - [`filter`] - Message filtering by date and sender
//! - [`output`] - Table writers (CSV, JSON, JSONL)
//!
//! # Quick Start
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() {
//! use chatstats::core::{
//!     FilterConfig, Pipeline, ResultTables,
//!     apply_filters, write_tables,
//!     write_csv, write_json, write_jsonl,
//! };
//! # }
//! ```

pub mod filter;
pub mod output;
pub mod pipeline;

// Re-export main types for convenience
pub use filter::{FilterConfig, apply_filters};
pub use pipeline::{Pipeline, PipelineStats, ResultTables};

pub use output::{MessageRecord, TABLE_NAMES, write_tables};

// Conditionally re-export output writers
#[cfg(feature = "csv-output")]
pub use output::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use output::{to_json, to_jsonl, write_json, write_jsonl};
