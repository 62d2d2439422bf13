//! Message text to typed tokens.
//!
//! Each whitespace-delimited candidate of a `Generic` message becomes at most
//! one word, emoji or hashtag token, decided in this order:
//!
//! 1. an emoticon shortcut such as `:)` becomes its glyph (emoji)
//! 2. a candidate that is exactly one emoji stays as-is (emoji)
//! 3. a hashtag keeps its original text and case (hashtag)
//! 4. otherwise every emoji character inside is emitted separately and the
//!    rest, lowercased and stripped of punctuation, is a word
//!
//! The value chosen for each candidate also feeds a per-message sliding
//! window that yields bigrams and trigrams. Messages of any other subtype
//! produce no tokens.
//!
//! # Example
//!
//! ```rust
//! use chatstats::tokenize::{TokenKind, Tokenizer};
//!
//! let tokenizer = Tokenizer::new();
//! let pieces = tokenizer.split("ok :) #cats");
//!
//! let unigrams: Vec<_> = pieces.unigrams.iter().map(|p| (p.kind, p.text.as_str())).collect();
//! assert_eq!(
//!     unigrams,
//!     vec![(TokenKind::Word, "ok"), (TokenKind::Emoji, "🙂"), (TokenKind::Hashtag, "#cats")]
//! );
//! assert_eq!(pieces.bigrams(), vec!["ok 🙂", "🙂 #cats"]);
//! assert_eq!(pieces.trigrams(), vec!["ok 🙂 #cats"]);
//! ```

mod emoji;
mod text;

pub use emoji::{
    DEFAULT_SHORTCUTS, canonical_emoji, default_shortcuts, is_emoji, is_emoji_char, is_skin_tone,
    strip_emoji,
};
pub use text::{is_hashtag, normalize_word, strip_punctuation};

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::config::SenderLabel;
use crate::message::NormalizedMessage;

/// Type tag of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Word,
    Emoji,
    Hashtag,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Word => "word",
            TokenKind::Emoji => "emoji",
            TokenKind::Hashtag => "hashtag",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three parallel tables, one per n-gram length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ngrams<T> {
    pub words: Vec<T>,
    pub bigrams: Vec<T>,
    pub trigrams: Vec<T>,
}

impl<T> Default for Ngrams<T> {
    fn default() -> Self {
        Self {
            words: Vec::new(),
            bigrams: Vec::new(),
            trigrams: Vec::new(),
        }
    }
}

impl<T> Ngrams<T> {
    /// Total rows across all three tables.
    pub fn len(&self) -> usize {
        self.words.len() + self.bigrams.len() + self.trigrams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Applies `f` to each table.
    pub fn map<U>(&self, mut f: impl FnMut(&[T]) -> Vec<U>) -> Ngrams<U> {
        Ngrams {
            words: f(&self.words),
            bigrams: f(&self.bigrams),
            trigrams: f(&self.trigrams),
        }
    }

    /// Tables with their names: `words`, `bigrams`, `trigrams`.
    pub fn named(&self) -> [(&'static str, &[T]); 3] {
        [
            ("words", &self.words),
            ("bigrams", &self.bigrams),
            ("trigrams", &self.trigrams),
        ]
    }
}

/// One token occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub sender_name: String,
    pub sender_first_name: String,
    pub datetime: DateTime<FixedOffset>,
    pub date: NaiveDate,
    pub term: String,
    pub term_number: u32,
    /// Token text: a word, glyph, hashtag, or space-joined n-gram.
    pub text: String,
    /// Kind of a unigram; n-grams are always `Word`.
    pub kind: TokenKind,
    /// 1, 2 or 3.
    pub n: u8,
    /// Always 1; summed by aggregation.
    pub count: u32,
}

impl Token {
    fn from_message(msg: &NormalizedMessage, text: String, kind: TokenKind, n: u8) -> Self {
        Self {
            sender_name: msg.sender_name.clone(),
            sender_first_name: msg.sender_first_name.clone(),
            datetime: msg.datetime,
            date: msg.date,
            term: msg.term.clone(),
            term_number: msg.term_number,
            text,
            kind,
            n,
            count: 1,
        }
    }

    /// Returns the sender column selected by `label`.
    pub fn sender_label(&self, label: SenderLabel) -> &str {
        match label {
            SenderLabel::FullName => &self.sender_name,
            SenderLabel::FirstName => &self.sender_first_name,
        }
    }
}

/// Token rows for words, bigrams and trigrams.
pub type TokenTable = Ngrams<Token>;

/// A unigram before it is attached to a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub kind: TokenKind,
    pub text: String,
}

impl Piece {
    fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Result of splitting one text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextPieces {
    /// Word, emoji and hashtag tokens in text order.
    pub unigrams: Vec<Piece>,
    /// One value per candidate that entered the n-gram window.
    pub window: Vec<String>,
}

impl TextPieces {
    /// Adds a unigram that also enters the n-gram window.
    fn push(&mut self, kind: TokenKind, text: String) {
        self.unigrams.push(Piece::new(kind, text.as_str()));
        self.window.push(text);
    }

    pub fn bigrams(&self) -> Vec<String> {
        self.window.windows(2).map(|w| w.join(" ")).collect()
    }

    pub fn trigrams(&self) -> Vec<String> {
        self.window.windows(3).map(|w| w.join(" ")).collect()
    }
}

/// Splits message text into tokens.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    shortcuts: HashMap<String, String>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    /// Creates a tokenizer with the default emoticon table.
    pub fn new() -> Self {
        Self {
            shortcuts: default_shortcuts(),
        }
    }

    /// Adds or replaces an emoticon shortcut.
    #[must_use]
    pub fn with_shortcut(mut self, alias: impl Into<String>, glyph: impl Into<String>) -> Self {
        self.shortcuts.insert(alias.into(), glyph.into());
        self
    }

    /// Splits one text into unigrams and n-gram window values.
    pub fn split(&self, text: &str) -> TextPieces {
        let mut pieces = TextPieces::default();

        for candidate in text.split_whitespace() {
            if let Some(glyph) = self.shortcuts.get(candidate) {
                pieces.push(TokenKind::Emoji, canonical_emoji(glyph));
            } else if is_emoji(candidate) {
                pieces.push(TokenKind::Emoji, canonical_emoji(candidate));
            } else if is_hashtag(candidate) {
                pieces.push(TokenKind::Hashtag, candidate.to_string());
            } else {
                let mut found_emoji = false;
                for c in candidate.chars().filter(|c| is_emoji_char(*c)) {
                    pieces.unigrams.push(Piece::new(TokenKind::Emoji, c.to_string()));
                    found_emoji = true;
                }

                let word = if found_emoji || candidate.chars().any(is_skin_tone) {
                    normalize_word(&strip_emoji(candidate))
                } else {
                    normalize_word(candidate)
                };
                if !word.is_empty() {
                    pieces.push(TokenKind::Word, word);
                }
            }
        }

        pieces
    }

    /// Tokenizes every `Generic` message, in order.
    #[tracing::instrument(skip_all, fields(messages = messages.len()))]
    pub fn tokenize(&self, messages: &[NormalizedMessage]) -> TokenTable {
        let mut table = TokenTable::default();

        for msg in messages.iter().filter(|m| m.is_generic()) {
            let Some(content) = msg.content.as_deref() else {
                continue;
            };
            let pieces = self.split(content);

            for piece in &pieces.unigrams {
                table
                    .words
                    .push(Token::from_message(msg, piece.text.clone(), piece.kind, 1));
            }
            for bigram in pieces.bigrams() {
                table
                    .bigrams
                    .push(Token::from_message(msg, bigram, TokenKind::Word, 2));
            }
            for trigram in pieces.trigrams() {
                table
                    .trigrams
                    .push(Token::from_message(msg, trigram, TokenKind::Word, 3));
            }
        }

        tracing::info!(
            words = table.words.len(),
            bigrams = table.bigrams.len(),
            trigrams = table.trigrams.len(),
            "tokenized messages"
        );
        table
    }
}
