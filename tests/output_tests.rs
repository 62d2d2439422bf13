//! Tests for table writers (CSV, JSON, JSONL)

use chatstats::core::TABLE_NAMES;
use chatstats::core::output::{MessageRecord, message_records};
use chatstats::message::{Attachment, AttachmentKind, Share};
use chatstats::prelude::*;
use std::fs;
use tempfile::tempdir;

const T0: i64 = 1_633_089_600;

fn sample_tables() -> ResultTables {
    let raw = vec![
        RawMessage::new("Alice Smith", T0)
            .with_content("I love #cats and a;b \"quoted\"\nline")
            .with_reaction("😍", "Bob Jones"),
        RawMessage::new("Bob Jones", T0 + 60).with_content("cats are great #cats"),
        RawMessage::new("Bob Jones", T0 + 120).with_attachment(Attachment::new(
            AttachmentKind::Photo,
            vec!["photos/a.jpg".into(), "photos/b.jpg".into()],
        )),
        RawMessage::new("Alice Smith", T0 + 180)
            .with_kind(MessageType::Share)
            .with_share(Share {
                link: Some("https://example.com".into()),
                share_text: None,
            }),
        RawMessage::new("Bob Jones", T0 + 240)
            .with_kind(MessageType::Call)
            .with_call(95, false),
    ];
    Pipeline::new(AnalysisConfig::new().with_timezone(chrono_tz::UTC))
        .unwrap()
        .run(&raw)
        .unwrap()
}

// ============================================================================
// Message records
// ============================================================================

mod record_tests {
    use super::*;

    #[test]
    fn test_records_flatten_lists() {
        let tables = sample_tables();
        let records = message_records(&tables.messages);
        assert_eq!(records.len(), 5);

        let first = &records[0];
        assert_eq!(first.sender_first_name, "Alice");
        assert_eq!(first.timestamp_ms, T0 * 1000);
        assert_eq!(first.datetime, "2021-10-01T12:00:00+00:00");
        assert_eq!(first.weekday, "Friday");
        assert_eq!(first.hour, 12);
        assert_eq!(first.reactions, "Bob Jones: 😍");

        let photo = &records[2];
        assert_eq!(photo.attachment_kind, AttachmentKind::Photo.as_str());
        assert_eq!(photo.attachment_uris, "photos/a.jpg | photos/b.jpg");
        assert_eq!(photo.content, "");

        assert_eq!(records[3].share_link, "https://example.com");
        assert_eq!(records[4].call_duration, Some(95));
        assert_eq!(records[4].missed, Some(false));
    }

    #[test]
    fn test_record_from_message() {
        let tables = sample_tables();
        let record = MessageRecord::from(&tables.messages[1]);
        assert_eq!(record.kind, MessageType::Generic);
        assert_eq!(record.term, "2021 Fall");
        assert_eq!(record.date, "2021-10-01");
    }
}

// ============================================================================
// CSV Writer Tests
// ============================================================================

#[cfg(feature = "csv-output")]
mod csv_writer_tests {
    use super::*;
    use chatstats::core::output::{to_csv, write_csv};

    #[test]
    fn test_csv_round_trips_special_characters() {
        let tables = sample_tables();
        let records = message_records(&tables.messages);
        let csv = to_csv(&records).unwrap();

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .from_reader(csv.as_bytes());
        let headers = reader.headers().unwrap().clone();
        let content = headers.iter().position(|h| h == "content").unwrap();
        assert!(headers.iter().any(|h| h == "type"));

        let rows: Vec<_> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 5);
        assert_eq!(&rows[0][content], "I love #cats and a;b \"quoted\"\nline");
    }

    #[test]
    fn test_csv_counts_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("sender_counts.csv");
        write_csv(&sample_tables().sender_counts, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("entity;kind;token;count"));
        assert!(content.contains("Alice;hashtag;#cats;1"));
        assert!(content.contains("Bob;hashtag;#cats;1"));
    }

    #[test]
    fn test_csv_empty_table_creates_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        let rows: Vec<MessageRecord> = Vec::new();
        write_csv(&rows, &path).unwrap();
        assert!(path.exists());
    }
}

// ============================================================================
// JSON / JSONL Writer Tests
// ============================================================================

#[cfg(feature = "json-output")]
mod json_writer_tests {
    use super::*;
    use chatstats::core::output::{to_json, to_jsonl, write_json, write_jsonl};

    #[test]
    fn test_json_array_of_objects() {
        let tables = sample_tables();
        let json = to_json(&tables.sender_tf_idf.words).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), tables.sender_tf_idf.words.len());
        for key in ["entity", "kind", "token", "count", "tf", "idf", "tf_idf"] {
            assert!(rows[0].get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn test_jsonl_one_object_per_line() {
        let tables = sample_tables();
        let jsonl = to_jsonl(&tables.tokens.words).unwrap();

        let lines: Vec<_> = jsonl.lines().collect();
        assert_eq!(lines.len(), tables.tokens.words.len());
        for line in lines {
            let value: serde_json::Value = serde_json::from_str(line).unwrap();
            assert_eq!(value["n"], 1);
            assert_eq!(value["count"], 1);
        }
    }

    #[test]
    fn test_json_files() {
        let dir = tempdir().unwrap();
        let tables = sample_tables();
        let records = message_records(&tables.messages);

        write_json(&records, &dir.path().join("messages.json")).unwrap();
        write_jsonl(&records, &dir.path().join("messages.jsonl")).unwrap();

        let json = fs::read_to_string(dir.path().join("messages.json")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[4]["type"], "Call");
        assert_eq!(parsed[4]["call_duration"], 95);

        let jsonl = fs::read_to_string(dir.path().join("messages.jsonl")).unwrap();
        assert_eq!(jsonl.lines().count(), 5);
    }
}

// ============================================================================
// Whole result sets
// ============================================================================

#[cfg(all(feature = "csv-output", feature = "json-output"))]
mod table_set_tests {
    use super::*;

    #[test]
    fn test_every_format_writes_every_table() {
        let tables = sample_tables();
        for &format in OutputFormat::all() {
            let dir = tempdir().unwrap();
            let written = write_tables(&tables, dir.path(), format).unwrap();

            assert_eq!(written.len(), TABLE_NAMES.len());
            for name in TABLE_NAMES {
                let path = dir.path().join(format!("{name}.{}", format.extension()));
                assert!(path.exists(), "{}", path.display());
            }
        }
    }

    #[test]
    fn test_write_tables_creates_nested_dir() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("inbox").join("alicesmith_a1b2c3");
        write_tables(&sample_tables(), &out, OutputFormat::Jsonl).unwrap();
        assert!(out.join("messages.jsonl").exists());
    }
}
