//! Best-effort repair of garbled export text.
//!
//! Meta exports UTF-8 text encoded as if it were ISO-8859-1: every UTF-8 byte
//! becomes its own codepoint, so "Привет" arrives as "ÐŸÑ€Ð¸Ð²ÐµÑ‚". Some tools
//! in between re-save such files as Windows-1252, which moves bytes 0x80-0x9F
//! to other codepoints (0x99 becomes '™'). Both are undone here.

use unicode_normalization::UnicodeNormalization;

/// Windows-1252 codepoints for the bytes 0x80-0x9F that differ from Latin-1.
const CP1252_HIGH: [(char, u8); 27] = [
    ('€', 0x80),
    ('‚', 0x82),
    ('ƒ', 0x83),
    ('„', 0x84),
    ('…', 0x85),
    ('†', 0x86),
    ('‡', 0x87),
    ('ˆ', 0x88),
    ('‰', 0x89),
    ('Š', 0x8A),
    ('‹', 0x8B),
    ('Œ', 0x8C),
    ('Ž', 0x8E),
    ('‘', 0x91),
    ('’', 0x92),
    ('“', 0x93),
    ('”', 0x94),
    ('•', 0x95),
    ('–', 0x96),
    ('—', 0x97),
    ('˜', 0x98),
    ('™', 0x99),
    ('š', 0x9A),
    ('›', 0x9B),
    ('œ', 0x9C),
    ('ž', 0x9E),
    ('Ÿ', 0x9F),
];

fn byte_value(c: char) -> Option<u8> {
    u8::try_from(u32::from(c)).ok().or_else(|| {
        CP1252_HIGH
            .iter()
            .find(|(cp, _)| *cp == c)
            .map(|(_, b)| *b)
    })
}

/// Maps typographic quotation marks to their ASCII forms.
///
/// ```rust
/// use chatstats::normalize::ascii_quote;
///
/// assert_eq!(ascii_quote('\u{201C}'), '"');
/// assert_eq!(ascii_quote('\u{2018}'), '\'');
/// assert_eq!(ascii_quote('a'), 'a');
/// ```
pub fn ascii_quote(c: char) -> char {
    match c {
        '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' => '\'',
        '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' => '"',
        _ => c,
    }
}

/// Reinterprets the text's codepoints as bytes and decodes them as UTF-8.
///
/// Returns `None` when the text is pure ASCII, contains a codepoint with no
/// single-byte value, or the bytes are not valid UTF-8.
pub fn repair_mojibake(text: &str) -> Option<String> {
    if text.is_ascii() {
        return None;
    }
    let bytes = text.chars().map(byte_value).collect::<Option<Vec<u8>>>()?;
    String::from_utf8(bytes).ok()
}

/// Repairs double-encoded text and normalizes it.
///
/// Steps: undo Latin-1/Windows-1252 mojibake when the result is valid UTF-8,
/// apply Unicode NFC, map curly quotation marks to `'` and `"`.
/// Text that cannot be repaired keeps its characters; only NFC and quote
/// mapping apply.
///
/// # Example
///
/// ```rust
/// use chatstats::normalize::fix_text;
///
/// assert_eq!(fix_text("caf\u{c3}\u{a9}"), "café");
/// assert_eq!(fix_text("don\u{e2}\u{80}\u{99}t"), "don't");
/// assert_eq!(fix_text("plain"), "plain");
/// ```
pub fn fix_text(text: &str) -> String {
    if text.is_ascii() {
        return text.to_string();
    }

    let repaired = match repair_mojibake(text) {
        Some(fixed) => fixed,
        None => {
            tracing::debug!(len = text.len(), "text left as-is, not reversible mojibake");
            text.to_string()
        }
    };

    repaired.nfc().map(ascii_quote).collect()
}
