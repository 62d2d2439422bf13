//! JSON Lines (JSONL) output writer.
//!
//! One object per line, so large token tables can be processed a record at
//! a time by downstream tools.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::Result;

/// Writes rows to JSONL (JSON Lines) format.
///
/// Each line is a valid JSON object:
/// ```jsonl
/// {"entity":"Alice","kind":"word","token":"cats","count":1}
/// {"entity":"Bob","kind":"hashtag","token":"#cats","count":1}
/// ```
pub fn write_jsonl<T: Serialize>(rows: &[T], output_path: &Path) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    write_lines(rows, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Converts rows to a JSONL string.
pub fn to_jsonl<T: Serialize>(rows: &[T]) -> Result<String> {
    let mut buffer = Vec::new();
    write_lines(rows, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_lines<T: Serialize, W: Write>(rows: &[T], writer: &mut W) -> Result<()> {
    for row in rows {
        let line = serde_json::to_string(row)?;
        writeln!(writer, "{line}")?;
    }
    Ok(())
}
