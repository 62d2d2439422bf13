//! TF-IDF distinctiveness scores.
//!
//! For a token `t` and entity `e`:
//!
//! - `tf = count(e, t) / total(e)`, where `total(e)` sums every token of `e`
//! - `idf = ln(N / df(t))`, with `N` the number of entities and `df(t)` the
//!   number of entities in which `t` occurs
//! - `tf_idf = tf * idf`
//!
//! A token used by every entity scores zero, however often it is used.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::AggregateRow;
use crate::tokenize::TokenKind;

/// An [`AggregateRow`] with its TF-IDF terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfIdfRow {
    pub entity: String,
    pub kind: TokenKind,
    pub token: String,
    pub count: u64,
    pub tf: f64,
    pub idf: f64,
    pub tf_idf: f64,
}

/// Scores count rows.
///
/// `rows` must hold at most one row per `(entity, kind, token)`, as produced
/// by [`Aggregator::counts`](super::Aggregator::counts). Document frequency is
/// keyed by `(kind, token)`.
///
/// The result is sorted by `tf_idf` descending. The sort is stable, so equal
/// scores keep the order of `rows`.
pub fn tf_idf_from_counts(rows: &[AggregateRow]) -> Vec<TfIdfRow> {
    let mut totals: HashMap<&str, u64> = HashMap::new();
    let mut df: HashMap<(TokenKind, &str), u64> = HashMap::new();

    for row in rows {
        *totals.entry(row.entity.as_str()).or_insert(0) += row.count;
        *df.entry((row.kind, row.token.as_str())).or_insert(0) += 1;
    }

    let entities = totals.len() as f64;

    let mut scored: Vec<TfIdfRow> = rows
        .iter()
        .map(|row| {
            let total = totals[row.entity.as_str()] as f64;
            let containing = df[&(row.kind, row.token.as_str())] as f64;
            let tf = row.count as f64 / total;
            let idf = (entities / containing).ln();
            TfIdfRow {
                entity: row.entity.clone(),
                kind: row.kind,
                token: row.token.clone(),
                count: row.count,
                tf,
                idf,
                tf_idf: tf * idf,
            }
        })
        .collect();

    scored.sort_by(|a, b| b.tf_idf.total_cmp(&a.tf_idf));
    scored
}
