//! Charts over the token statistics.

use std::collections::HashMap;

use super::{ChartData, ChartOptions, ChartRow, Tally};
use crate::aggregate::{AggregateRow, TfIdfRow};
use crate::core::pipeline::ResultTables;
use crate::tokenize::TokenKind;

fn of_kind(tables: &ResultTables, kind: TokenKind) -> impl Iterator<Item = &AggregateRow> {
    tables.sender_counts.iter().filter(move |r| r.kind == kind)
}

/// Returns `false` for contractions and bare numbers.
fn is_plain_word(word: &str) -> bool {
    !word.contains('\'') && !word.chars().all(|c| c.is_ascii_digit())
}

fn top_tokens<'a>(rows: impl Iterator<Item = &'a AggregateRow>, limit: usize) -> ChartData {
    let mut tally: Tally = Tally::default();
    for row in rows {
        tally.add(&row.token, &row.entity, row.count as f64);
    }
    tally.into_top(limit)
}

pub(super) fn word_count(tables: &ResultTables, options: &ChartOptions) -> ChartData {
    let rows = of_kind(tables, TokenKind::Word)
        .filter(|r| is_plain_word(&r.token) && !options.common_words.contains(&r.token));
    top_tokens(rows, options.top_n)
}

pub(super) fn long_words(tables: &ResultTables, options: &ChartOptions) -> ChartData {
    let rows = of_kind(tables, TokenKind::Word)
        .filter(|r| is_plain_word(&r.token) && r.token.chars().count() > options.long_word_len);
    top_tokens(rows, options.top_n)
}

pub(super) fn emoji_count(tables: &ResultTables, options: &ChartOptions) -> ChartData {
    top_tokens(of_kind(tables, TokenKind::Emoji), options.top_n)
}

pub(super) fn hashtag_count(tables: &ResultTables, options: &ChartOptions) -> ChartData {
    top_tokens(of_kind(tables, TokenKind::Hashtag), options.top_n)
}

/// How often each sender says each sender's first name.
///
/// Names come from the senders present in the data, lowercased to match
/// word tokens, and keep the order senders first appear in.
pub(super) fn names(tables: &ResultTables, _: &ChartOptions) -> ChartData {
    let mut order: HashMap<String, usize> = HashMap::new();
    for msg in &tables.messages {
        let name = msg.sender_first_name.to_lowercase();
        let next = order.len();
        order.entry(name).or_insert(next);
    }

    let mut tally = Tally::default();
    for row in of_kind(tables, TokenKind::Word) {
        if let Some(&position) = order.get(&row.token) {
            tally.add_keyed(position, &row.token, &row.entity, row.count as f64);
        }
    }
    tally.into_sorted()
}

/// The `limit` best-scoring tokens of each entity.
///
/// Entities keep the order they first appear in `rows`; tokens with a zero
/// score are never distinctive and are left out.
fn distinctive(rows: &[TfIdfRow], limit: usize) -> ChartData {
    let mut per_entity: Vec<(&str, Vec<&TfIdfRow>)> = Vec::new();
    let mut position: HashMap<&str, usize> = HashMap::new();

    for row in rows.iter().filter(|r| r.tf_idf > 0.0) {
        let i = *position.entry(row.entity.as_str()).or_insert_with(|| {
            per_entity.push((row.entity.as_str(), Vec::new()));
            per_entity.len() - 1
        });
        if per_entity[i].1.len() < limit {
            per_entity[i].1.push(row);
        }
    }

    ChartData {
        rows: per_entity
            .into_iter()
            .flat_map(|(_, top)| top)
            .map(|r| ChartRow {
                category: r.token.clone(),
                series: r.entity.clone(),
                value: r.tf_idf,
            })
            .collect(),
    }
}

pub(super) fn distinctive_words_by_sender(tables: &ResultTables, options: &ChartOptions) -> ChartData {
    distinctive(&tables.sender_tf_idf.words, options.top_distinctive)
}

pub(super) fn distinctive_bigrams_by_sender(tables: &ResultTables, options: &ChartOptions) -> ChartData {
    distinctive(&tables.sender_tf_idf.bigrams, options.top_distinctive)
}

pub(super) fn distinctive_trigrams_by_sender(tables: &ResultTables, options: &ChartOptions) -> ChartData {
    distinctive(&tables.sender_tf_idf.trigrams, options.top_distinctive)
}

pub(super) fn distinctive_words_by_term(tables: &ResultTables, options: &ChartOptions) -> ChartData {
    distinctive(&tables.term_tf_idf.words, options.top_distinctive)
}

pub(super) fn distinctive_bigrams_by_term(tables: &ResultTables, options: &ChartOptions) -> ChartData {
    distinctive(&tables.term_tf_idf.bigrams, options.top_distinctive)
}

pub(super) fn distinctive_trigrams_by_term(tables: &ResultTables, options: &ChartOptions) -> ChartData {
    distinctive(&tables.term_tf_idf.trigrams, options.top_distinctive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::core::pipeline::Pipeline;
    use crate::message::RawMessage;

    const T0: i64 = 1_633_046_400;

    fn run(lines: &[(&str, &str)]) -> ResultTables {
        let raw: Vec<_> = lines
            .iter()
            .enumerate()
            .map(|(i, (sender, text))| RawMessage::new(*sender, T0 + i as i64).with_content(*text))
            .collect();
        Pipeline::new(AnalysisConfig::new().with_timezone(chrono_tz::UTC))
            .unwrap()
            .run(&raw)
            .unwrap()
    }

    fn opts() -> ChartOptions {
        ChartOptions::default()
    }

    // =========================================================================
    // Count charts
    // =========================================================================

    #[test]
    fn test_word_count_filters() {
        let tables = run(&[
            ("Alice", "pizza pizza don't 7 the"),
            ("Bob", "pizza tacos the the"),
        ]);
        let options = opts().with_common_words(["the"]);
        let data = word_count(&tables, &options);

        assert_eq!(data.categories(), vec!["pizza", "tacos"]);
        assert_eq!(data.value("pizza", "Alice"), Some(2.0));
        assert_eq!(data.value("pizza", "Bob"), Some(1.0));
    }

    #[test]
    fn test_word_count_top_n() {
        let tables = run(&[("Alice", "a b b c c c")]);
        let data = word_count(&tables, &opts().with_top_n(2));
        assert_eq!(data.categories(), vec!["c", "b"]);
    }

    #[test]
    fn test_long_words() {
        let tables = run(&[("Alice", "wonderful short seven77 sixsix élégant")]);
        let data = long_words(&tables, &opts());
        assert_eq!(data.categories(), vec!["wonderful", "seven77", "élégant"]);
    }

    #[test]
    fn test_emoji_and_hashtag_counts() {
        let tables = run(&[("Alice", "😀 😀 #fun :)"), ("Bob", "#fun #Fun 😀")]);

        let emoji = emoji_count(&tables, &opts());
        assert_eq!(emoji.categories(), vec!["😀", "🙂"]);
        assert_eq!(emoji.value("😀", "Alice"), Some(2.0));

        let tags = hashtag_count(&tables, &opts());
        assert_eq!(tags.categories(), vec!["#fun", "#Fun"]);
        assert_eq!(tags.value("#fun", "Bob"), Some(1.0));
    }

    #[test]
    fn test_names_from_senders() {
        let tables = run(&[
            ("Alice Smith", "hey Bob"),
            ("Bob Jones", "hi alice, alice!"),
            ("Bob Jones", "carol is not here"),
        ]);
        let data = names(&tables, &opts());

        assert_eq!(data.categories(), vec!["alice", "bob"]);
        assert_eq!(data.value("alice", "Bob"), Some(2.0));
        assert_eq!(data.value("bob", "Alice"), Some(1.0));
        assert_eq!(data.value("carol", "Bob"), None);
    }

    // =========================================================================
    // Distinctive charts
    // =========================================================================

    #[test]
    fn test_distinctive_per_sender() {
        let tables = run(&[
            ("Alice", "cats cats cats shared"),
            ("Bob", "dogs shared"),
        ]);
        let data = distinctive_words_by_sender(&tables, &opts());

        assert_eq!(data.value("cats", "Alice").map(|v| v > 0.0), Some(true));
        assert_eq!(data.value("dogs", "Bob").map(|v| v > 0.0), Some(true));
        assert_eq!(data.value("shared", "Alice"), None);
        assert_eq!(data.series(), vec!["Alice", "Bob"]);
    }

    #[test]
    fn test_distinctive_limit_per_entity() {
        let rows: Vec<TfIdfRow> = (0..8)
            .map(|i| TfIdfRow {
                entity: if i % 2 == 0 { "A" } else { "B" }.into(),
                kind: TokenKind::Word,
                token: format!("t{i}"),
                count: 1,
                tf: 1.0,
                idf: 1.0,
                tf_idf: 10.0 - f64::from(i),
            })
            .collect();
        let data = distinctive(&rows, 2);
        let tokens: Vec<_> = data.rows.iter().map(|r| r.category.as_str()).collect();
        assert_eq!(tokens, vec!["t0", "t2", "t1", "t3"]);
    }

    #[test]
    fn test_distinctive_single_entity_is_empty() {
        let tables = run(&[("Alice", "only me talking")]);
        assert!(distinctive_words_by_sender(&tables, &opts()).is_empty());
        assert!(distinctive_words_by_term(&tables, &opts()).is_empty());
    }
}
