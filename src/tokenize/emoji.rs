//! Emoji recognition and textual emoticon shortcuts.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

/// A whole candidate that is exactly one emoji: a pictographic sequence with
/// optional presentation selector, skin tone and ZWJ continuations, a flag
/// (regional indicator pair) or a keycap.
static EMOJI_SEQUENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:[\x{1F1E6}-\x{1F1FF}]{2}|[0-9#*]\x{FE0F}?\x{20E3}|[\p{Extended_Pictographic}\p{Emoji_Presentation}][\x{FE0E}\x{FE0F}]?\p{Emoji_Modifier}?(?:\x{200D}[\p{Extended_Pictographic}\p{Emoji_Presentation}][\x{FE0E}\x{FE0F}]?\p{Emoji_Modifier}?)*)$",
    )
    .expect("valid emoji sequence pattern")
});

/// A single character that counts as an emoji on its own.
static EMOJI_CHAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{Extended_Pictographic}\p{Emoji_Presentation}--\p{Emoji_Modifier}]$")
        .expect("valid emoji char pattern")
});

/// Characters that belong to an emoji sequence and are dropped from words.
static EMOJI_PART: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{Extended_Pictographic}\p{Emoji_Presentation}\p{Emoji_Modifier}\x{FE0E}\x{FE0F}\x{200D}\x{20E3}]")
        .expect("valid emoji part pattern")
});

/// Default emoticon aliases and the glyph each one stands for.
pub const DEFAULT_SHORTCUTS: &[(&str, &str)] = &[
    (":)", "🙂"),
    (":-)", "🙂"),
    (":(", "😞"),
    (":-(", "😞"),
    (":D", "😃"),
    (":-D", "😃"),
    (";)", "😉"),
    (";-)", "😉"),
    (":P", "😛"),
    (":p", "😛"),
    (":-P", "😛"),
    (":-p", "😛"),
    (":'(", "😢"),
    (":O", "😮"),
    (":o", "😮"),
    (":/", "😕"),
    (":-/", "😕"),
    (":*", "😗"),
    (">:(", "😠"),
    ("<3", "❤"),
    ("(y)", "👍"),
];

/// Builds the default shortcut table.
pub fn default_shortcuts() -> HashMap<String, String> {
    DEFAULT_SHORTCUTS
        .iter()
        .map(|(alias, glyph)| ((*alias).to_string(), (*glyph).to_string()))
        .collect()
}

/// Returns `true` if the whole string is one emoji.
pub fn is_emoji(candidate: &str) -> bool {
    !candidate.is_ascii() && EMOJI_SEQUENCE.is_match(candidate)
}

/// Returns `true` if a single character is an emoji on its own.
pub fn is_emoji_char(c: char) -> bool {
    if c.is_ascii() {
        return false;
    }
    let mut buf = [0u8; 4];
    EMOJI_CHAR.is_match(c.encode_utf8(&mut buf))
}

/// Drops the emoji presentation selector so `❤️` and `❤` count as one glyph.
pub fn canonical_emoji(glyph: &str) -> String {
    glyph.replace('\u{FE0F}', "")
}

/// Returns `true` for a Fitzpatrick skin tone modifier.
pub fn is_skin_tone(c: char) -> bool {
    ('\u{1F3FB}'..='\u{1F3FF}').contains(&c)
}

/// Removes every emoji character and sequence part from `text`.
pub fn strip_emoji(text: &str) -> String {
    EMOJI_PART.replace_all(text, "").into_owned()
}
