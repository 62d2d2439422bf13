//! Message subtype classification from text.
//!
//! Exports label system notices ("Bob named the group Roomies.", "Alice
//! missed a call.") as ordinary `Generic` messages. Four independent pattern
//! tests recover what they really are; the first match in the order
//! Game, PlanUpdate, ChatUpdate, Call wins.
//!
//! Notices have a fixed whole-message shape: a capitalized sender name or
//! "You", the notice wording, then at most a terminal period. Patterns are
//! anchored to that shape so typed chat that merely mentions a call or a
//! plan stays `Generic`.

use std::sync::LazyLock;

use regex::Regex;

use crate::message::MessageType;

/// A display name of up to four capitalized words, or "You".
const WHO: &str = r"(?P<who>\p{Lu}[\p{L}\p{M}'’.-]+(?: \p{Lu}[\p{L}\p{M}'’.-]*){0,3})";
const END: &str = r"[.!]?$";

/// Capitalized words that start typed sentences and never name a sender.
const PRONOUNS: [&str; 6] = ["i", "we", "he", "she", "they", "it"];

fn notices(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| {
            let p = format!("^{}", p.replace("<who>", WHO).replace("<end>", END));
            Regex::new(&p).expect("valid notice pattern")
        })
        .collect()
}

static GAME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    notices(&[
        r"<who> (?i:scored) \d+ (?i:points?)(?: (?i:in|playing) .+)?<end>",
        r"<who> (?i:challenged) .+ (?i:to (?:a game|play|beat))(?: .+)?<end>",
        r"<who> (?i:invited) .+ (?i:to play) .+<end>",
        r"<who> (?i:started (?:a|playing a) game)(?: .+)?<end>",
        r"<who> (?i:got a new high score)(?: .+)?<end>",
    ])
});

static PLAN_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    notices(&[
        r"<who> (?i:(?:created|updated|deleted|named|renamed|changed) (?:a|the) plan)(?: .+)?<end>",
        r"<who> (?i:responded (?:going|can['’]t go|not going|interested) to) .+<end>",
    ])
});

static CHAT_UPDATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    notices(&[
        r"<who> (?i:named the (?:conversation|group)) .+<end>",
        r"<who> (?i:changed the (?:chat colou?rs|theme|emoji|group photo|conversation picture))(?: .+)?<end>",
        r"<who> (?i:set (?:the nickname for .+|your nickname|(?:his|her|their) own nickname) to) .+<end>",
        r"<who> (?i:set the emoji to) .+<end>",
        r"<who> (?i:cleared (?:the nickname(?: for .+)?|your nickname|(?:his|her|their) own nickname))<end>",
    ])
});

static CALL_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    notices(&[
        r"<who> (?i:missed (?:a|your) (?:video )?(?:call|chat))(?: (?i:from|with) .+)?<end>",
        r"<who> (?i:called you)<end>",
        r"(?i:you called) <who><end>",
        r"(?i:the (?:video chat|call) ended)<end>",
        r"<who> (?i:started a (?:video )?call)<end>",
        r"<who> (?i:joined the (?:video )?call)<end>",
    ])
});

/// True if some pattern matches and no word of its subject is a pronoun.
fn is_notice(patterns: &[Regex], content: &str) -> bool {
    patterns.iter().any(|pattern| {
        pattern.captures(content).is_some_and(|caps| {
            caps.name("who").is_none_or(|who| {
                !who
                    .as_str()
                    .split(' ')
                    .any(|word| PRONOUNS.contains(&word.to_lowercase().as_str()))
            })
        })
    })
}

/// Outcome of the four pattern tests, before priority resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubtypeMatches {
    pub game: bool,
    pub plan_update: bool,
    pub chat_update: bool,
    pub call_update: bool,
}

impl SubtypeMatches {
    /// Runs all four tests against `content`.
    pub fn test(content: &str) -> Self {
        let content = content.trim();
        Self {
            game: is_notice(&GAME_PATTERNS, content),
            plan_update: is_notice(&PLAN_PATTERNS, content),
            chat_update: is_notice(&CHAT_UPDATE_PATTERNS, content),
            call_update: is_notice(&CALL_PATTERNS, content),
        }
    }

    /// Picks one subtype by priority, falling back to `declared`.
    pub fn resolve(self, declared: MessageType) -> MessageType {
        if self.game {
            MessageType::Game
        } else if self.plan_update {
            MessageType::PlanUpdate
        } else if self.chat_update {
            MessageType::ChatUpdate
        } else if self.call_update {
            MessageType::Call
        } else {
            declared
        }
    }
}

/// Classifies a message. Messages without content keep their declared type.
pub fn classify(content: Option<&str>, declared: MessageType) -> MessageType {
    match content {
        Some(text) => SubtypeMatches::test(text).resolve(declared),
        None => declared,
    }
}
