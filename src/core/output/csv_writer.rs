//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::{ChatstatsError, Result};

/// Writes rows to CSV with semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Header: the field names of `T`, written before the first row
/// - Encoding: UTF-8
///
/// `T` must serialize to a flat record; nested sequences are rejected by
/// the `csv` serializer.
pub fn write_csv<T: Serialize>(rows: &[T], output_path: &Path) -> Result<()> {
    let file = File::create(output_path)?;
    write_rows(rows, file)
}

/// Converts rows to a CSV string.
///
/// Same format as [`write_csv`], but returns a String instead of writing to file.
pub fn to_csv<T: Serialize>(rows: &[T]) -> Result<String> {
    let mut buffer = Vec::new();
    write_rows(rows, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_rows<T: Serialize, W: Write>(rows: &[T], sink: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(sink);

    for row in rows {
        writer.serialize(row)?;
    }

    writer.flush().map_err(ChatstatsError::Io)?;
    Ok(())
}
