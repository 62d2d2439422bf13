//! Edge case tests for chatstats
//!
//! These tests cover boundary conditions across stages that the unit tests
//! of a single module do not reach.

use chatstats::config::TimestampUnit;
use chatstats::prelude::*;
use chrono::{NaiveDate, Timelike};

fn run(raw: &[RawMessage]) -> ResultTables {
    Pipeline::new(AnalysisConfig::default()).unwrap().run(raw).unwrap()
}

fn texts(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(|t| t.text.as_str()).collect()
}

// =========================================================================
// Time and term boundaries
// =========================================================================

#[test]
fn test_dst_switch_changes_offset() {
    // US/Eastern moved to daylight saving time at 07:00 UTC on 2021-03-14.
    let before = RawMessage::new("Alice", 1_615_705_140).with_content("a");
    let after = RawMessage::new("Alice", 1_615_705_200).with_content("b");
    let tables = run(&[before, after]);

    assert_eq!(tables.messages[0].datetime.to_rfc3339(), "2021-03-14T01:59:00-05:00");
    assert_eq!(tables.messages[1].datetime.to_rfc3339(), "2021-03-14T03:00:00-04:00");
}

#[test]
fn test_local_date_decides_year_and_term() {
    // 03:00 UTC on New Year's Day is still December 31st in New York.
    let tables = run(&[RawMessage::new("Alice", 1_609_470_000).with_content("late night")]);
    let msg = &tables.messages[0];

    assert_eq!(msg.date, NaiveDate::from_ymd_opt(2020, 12, 31).unwrap());
    assert_eq!(msg.datetime.hour(), 22);
    assert_eq!(msg.term, "2020 Fall");
    assert_eq!(msg.term_number, 3);
    assert!(tables.tokens.words.iter().all(|t| t.term == "2020 Fall"));
}

#[test]
fn test_same_instant_other_timezone() {
    let raw = [RawMessage::new("Alice", 1_609_470_000).with_content("hi")];
    let config = AnalysisConfig::new().with_timezone(chrono_tz::Asia::Tokyo);
    let tables = Pipeline::new(config).unwrap().run(&raw).unwrap();

    assert_eq!(tables.messages[0].datetime.to_rfc3339(), "2021-01-01T12:00:00+09:00");
    assert_eq!(tables.messages[0].term, "2021 Winter");
}

#[test]
fn test_auto_unit_detects_milliseconds() {
    let seconds = RawMessage::new("Alice", 1_633_089_600).with_content("x");
    let millis = RawMessage::new("Alice", 1_633_089_600_000).with_content("x");
    let tables = run(&[seconds, millis]);
    assert_eq!(tables.messages[0].timestamp, tables.messages[1].timestamp);
}

#[test]
fn test_configured_unit_overrides_magnitude() {
    let raw = [RawMessage::new("Alice", 1_633_089_600).with_content("x")];
    let config = AnalysisConfig::new().with_timestamp_unit(TimestampUnit::Milliseconds);
    let tables = Pipeline::new(config).unwrap().run(&raw).unwrap();
    // Read as milliseconds this lands in January 1970.
    assert_eq!(tables.messages[0].timestamp.timestamp(), 1_633_089);
}

#[test]
fn test_out_of_range_timestamp_names_record() {
    let raw = [
        RawMessage::new("Alice", 1_633_089_600),
        RawMessage::new("Bob", i64::MAX).with_timestamp_unit(TimestampUnit::Seconds),
    ];
    let err = Pipeline::new(AnalysisConfig::default()).unwrap().run(&raw).unwrap_err();
    assert!(err.is_malformed_record());
    assert!(err.to_string().contains("#1"));
}

#[test]
fn test_twelve_terms_are_months() {
    let config = AnalysisConfig::new().with_terms_per_year(12);
    let raw = [RawMessage::new("Alice", 1_633_089_600).with_content("x")];
    let tables = Pipeline::new(config).unwrap().run(&raw).unwrap();
    assert_eq!(tables.messages[0].term, "2021 T10");
    assert_eq!(tables.messages[0].term_number, 10);
}

#[test]
fn test_bad_terms_fail_before_processing() {
    for terms in [0, 5, 7, 24] {
        let err = Pipeline::new(AnalysisConfig::new().with_terms_per_year(terms)).unwrap_err();
        assert!(err.is_configuration(), "terms = {terms}");
    }
}

// =========================================================================
// Senders
// =========================================================================

#[test]
fn test_unicode_sender_names() {
    let raw = [
        RawMessage::new("Иван Петров", 1_633_089_600).with_content("привет"),
        RawMessage::new("田中 太郎", 1_633_089_660).with_content("こんにちは"),
        RawMessage::new("  Zoë   Quinn ", 1_633_089_720).with_content("hey"),
    ];
    let tables = run(&raw);
    let firsts: Vec<_> = tables.messages.iter().map(|m| m.sender_first_name.as_str()).collect();
    assert_eq!(firsts, vec!["Иван", "田中", "Zoë"]);
}

#[test]
fn test_whitespace_only_sender_is_invalid() {
    for name in ["", "   ", "\t\n"] {
        let err = Pipeline::new(AnalysisConfig::default())
            .unwrap()
            .run(&[RawMessage::new(name, 1_633_089_600)])
            .unwrap_err();
        assert!(err.is_invalid_sender(), "{name:?}");
    }
}

#[test]
fn test_mojibake_sender_repaired() {
    let tables = run(&[RawMessage::new("ZoÃ« Quinn", 1_633_089_600).with_content("hi")]);
    assert_eq!(tables.messages[0].sender_name, "Zoë Quinn");
    assert_eq!(tables.messages[0].sender_first_name, "Zoë");
}

// =========================================================================
// Token edge cases
// =========================================================================

#[test]
fn test_empty_input() {
    let tables = run(&[]);
    assert!(tables.messages.is_empty());
    assert!(tables.tokens.is_empty());
    assert!(tables.sender_counts.is_empty());
    assert!(tables.sender_tf_idf.is_empty());
    assert_eq!(tables.stats, PipelineStats::default());
}

#[test]
fn test_messages_without_text() {
    let raw = [
        RawMessage::new("Alice", 1_633_089_600),
        RawMessage::new("Alice", 1_633_089_660).with_content(""),
        RawMessage::new("Alice", 1_633_089_720).with_content("   \n\t "),
        RawMessage::new("Alice", 1_633_089_780).with_content("?!... ---"),
    ];
    let tables = run(&raw);
    assert_eq!(tables.messages.len(), 4);
    assert!(tables.tokens.is_empty());
}

#[test]
fn test_emoji_sequences_stay_whole() {
    let tables = run(&[RawMessage::new("Alice", 1_633_089_600).with_content("👨‍👩‍👧 🇫🇷 👍🏽")]);
    assert_eq!(texts(&tables.tokens.words), vec!["👨‍👩‍👧", "🇫🇷", "👍🏽"]);
    assert!(tables.tokens.words.iter().all(|t| t.kind == TokenKind::Emoji));
    assert_eq!(texts(&tables.tokens.trigrams), vec!["👨‍👩‍👧 🇫🇷 👍🏽"]);
}

#[test]
fn test_emoji_run_glued_to_word() {
    let tables = run(&[RawMessage::new("Alice", 1_633_089_600).with_content("wow!!!😀😀")]);
    assert_eq!(texts(&tables.tokens.words), vec!["😀", "😀", "wow"]);
    assert!(tables.tokens.bigrams.is_empty());
}

#[test]
fn test_repeated_shortcuts() {
    let tables = run(&[RawMessage::new("Alice", 1_633_089_600).with_content(":) :) <3")]);
    assert_eq!(texts(&tables.tokens.words), vec!["🙂", "🙂", "❤"]);
    assert_eq!(texts(&tables.tokens.bigrams), vec!["🙂 🙂", "🙂 ❤"]);
}

#[test]
fn test_hashtag_shapes() {
    let tables = run(&[RawMessage::new("Alice", 1_633_089_600).with_content("#Rust #2021 #😀cats # #!")]);
    let kinds: Vec<_> = tables
        .tokens
        .words
        .iter()
        .map(|t| (t.text.as_str(), t.kind))
        .collect();
    assert_eq!(
        kinds,
        vec![
            ("#Rust", TokenKind::Hashtag),
            ("2021", TokenKind::Word),
            ("#😀cats", TokenKind::Hashtag),
        ]
    );
}

#[test]
fn test_unicode_words_lowercased() {
    let tables = run(&[RawMessage::new("Alice", 1_633_089_600).with_content("ПРИВЕТ «Straße» ÉTÉ")]);
    assert_eq!(texts(&tables.tokens.words), vec!["привет", "«straße»", "été"]);
}

// =========================================================================
// Filters
// =========================================================================

#[test]
fn test_inverted_date_range_keeps_nothing() {
    let filter = FilterConfig::new()
        .with_after(NaiveDate::from_ymd_opt(2022, 1, 1).unwrap())
        .with_before(NaiveDate::from_ymd_opt(2021, 1, 1).unwrap());
    let tables = Pipeline::new(AnalysisConfig::default())
        .unwrap()
        .with_filter(filter)
        .run(&[RawMessage::new("Alice", 1_633_089_600).with_content("hi")])
        .unwrap();

    assert_eq!(tables.stats.normalized, 1);
    assert_eq!(tables.stats.filtered, 0);
    assert!(tables.tokens.is_empty());
}

#[test]
fn test_date_filter_uses_local_date() {
    // 2020-12-31 in New York, 2021-01-01 in UTC.
    let raw = [RawMessage::new("Alice", 1_609_470_000).with_content("hi")];
    let filter = FilterConfig::new().with_after(NaiveDate::from_ymd_opt(2021, 1, 1).unwrap());
    let tables = Pipeline::new(AnalysisConfig::default())
        .unwrap()
        .with_filter(filter)
        .run(&raw)
        .unwrap();
    assert!(tables.messages.is_empty());
}
