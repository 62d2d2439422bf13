//! Word-level text helpers.

use crate::normalize::ascii_quote;

/// Strips ASCII punctuation from both ends.
///
/// The set is exactly ``!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~``.
pub fn strip_punctuation(word: &str) -> &str {
    word.trim_matches(|c: char| c.is_ascii_punctuation())
}

/// Returns `true` for a hashtag candidate: `#` followed by something that is
/// neither empty nor all digits once punctuation is stripped.
///
/// ```rust
/// use chatstats::tokenize::is_hashtag;
///
/// assert!(is_hashtag("#cats"));
/// assert!(is_hashtag("#2020vision"));
/// assert!(!is_hashtag("#2020"));
/// assert!(!is_hashtag("#!!"));
/// assert!(!is_hashtag("cats"));
/// ```
pub fn is_hashtag(candidate: &str) -> bool {
    let Some(rest) = candidate.strip_prefix('#') else {
        return false;
    };
    let rest = strip_punctuation(rest);
    !rest.is_empty() && !rest.chars().all(|c| c.is_ascii_digit())
}

/// Lowercases a word, folds curly quotes to ASCII and strips surrounding
/// punctuation.
pub fn normalize_word(word: &str) -> String {
    let folded: String = word.chars().map(ascii_quote).collect();
    strip_punctuation(&folded.to_lowercase()).to_string()
}
