//! JSON output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::error::Result;

/// Writes rows to a JSON file as a pretty-printed array.
///
/// # Format
/// ```json
/// [
///   {"entity": "Alice", "kind": "word", "token": "cats", "count": 1},
///   {"entity": "Bob", "kind": "hashtag", "token": "#cats", "count": 1}
/// ]
/// ```
pub fn write_json<T: Serialize>(rows: &[T], output_path: &Path) -> Result<()> {
    let json = to_json(rows)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts rows to a JSON array string.
pub fn to_json<T: Serialize>(rows: &[T]) -> Result<String> {
    Ok(serde_json::to_string_pretty(rows)?)
}
