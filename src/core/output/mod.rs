//! Output format writers.
//!
//! This module provides writers for different output formats. All of them
//! are generic over the row type, so every result table goes through the
//! same three functions:
//! - [`write_csv`] / [`to_csv`] - CSV with semicolon delimiter - requires `csv-output` feature
//! - [`write_json`] / [`to_json`] - JSON array - requires `json-output` feature
//! - [`write_jsonl`] / [`to_jsonl`] - JSON Lines - requires `json-output` feature
//!
//! [`write_tables`] writes a whole [`ResultTables`] into one folder, one file
//! per table:
//!
//! | File | Rows |
//! |------|------|
//! | `messages` | [`MessageRecord`] |
//! | `words`, `bigrams`, `trigrams` | [`Token`](crate::tokenize::Token) |
//! | `sender_counts`, `term_counts` | [`AggregateRow`](crate::aggregate::AggregateRow) |
//! | `sender_tfidf_*`, `term_tfidf_*` | [`TfIdfRow`](crate::aggregate::TfIdfRow) |

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;
mod record;

#[cfg(feature = "csv-output")]
pub use csv_writer::{to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};
pub use record::{LIST_SEPARATOR, MessageRecord, message_records};

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::core::pipeline::ResultTables;
use crate::error::Result;
use crate::format::{OutputFormat, write_table};
use crate::tokenize::Ngrams;

/// Names of the files [`write_tables`] produces, without extension, in
/// writing order.
pub const TABLE_NAMES: [&str; 12] = [
    "messages",
    "words",
    "bigrams",
    "trigrams",
    "sender_counts",
    "term_counts",
    "sender_tfidf_words",
    "sender_tfidf_bigrams",
    "sender_tfidf_trigrams",
    "term_tfidf_words",
    "term_tfidf_bigrams",
    "term_tfidf_trigrams",
];

/// Writes every table of `tables` into `dir`, creating it if missing.
///
/// Returns the written paths in [`TABLE_NAMES`] order.
pub fn write_tables(tables: &ResultTables, dir: &Path, format: OutputFormat) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut out = TableWriter {
        dir,
        format,
        written: Vec::with_capacity(TABLE_NAMES.len()),
    };

    out.write("messages", &message_records(&tables.messages))?;
    for (name, rows) in tables.tokens.named() {
        out.write(name, rows)?;
    }
    out.write("sender_counts", &tables.sender_counts)?;
    out.write("term_counts", &tables.term_counts)?;
    out.write_ngrams("sender_tfidf", &tables.sender_tf_idf)?;
    out.write_ngrams("term_tfidf", &tables.term_tf_idf)?;

    Ok(out.written)
}

struct TableWriter<'a> {
    dir: &'a Path,
    format: OutputFormat,
    written: Vec<PathBuf>,
}

impl TableWriter<'_> {
    fn write<T: Serialize>(&mut self, name: &str, rows: &[T]) -> Result<()> {
        let path = self.dir.join(format!("{name}.{}", self.format.extension()));
        write_table(rows, &path, self.format)?;
        tracing::debug!(path = %path.display(), rows = rows.len(), "wrote table");
        self.written.push(path);
        Ok(())
    }

    fn write_ngrams<T: Serialize>(&mut self, prefix: &str, tables: &Ngrams<T>) -> Result<()> {
        for (name, rows) in tables.named() {
            self.write(&format!("{prefix}_{name}"), rows)?;
        }
        Ok(())
    }
}
