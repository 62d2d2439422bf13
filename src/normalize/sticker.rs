//! Sticker identity.
//!
//! The "like" thumb shipped as three different asset files over the years.
//! They are one sticker for counting purposes.

/// The asset every legacy "like" sticker is counted as.
pub const CANONICAL_LIKE: &str =
    "messages/stickers_used/851557_369239266556155_759568595_n_369239263222822.png";

/// Legacy duplicates of [`CANONICAL_LIKE`].
pub const DUPLICATE_LIKES: [&str; 2] = [
    "messages/stickers_used/851582_369239386556143_1497813874_n_369239383222810.png",
    "messages/stickers_used/851587_369239346556147_162929011_n_369239343222814.png",
];

/// Maps a sticker asset path to its canonical identity.
///
/// ```rust
/// use chatstats::normalize::{CANONICAL_LIKE, DUPLICATE_LIKES, canonical_sticker};
///
/// assert_eq!(canonical_sticker(DUPLICATE_LIKES[0]), CANONICAL_LIKE);
/// assert_eq!(canonical_sticker("messages/stickers_used/cat.png"), "messages/stickers_used/cat.png");
/// ```
pub fn canonical_sticker(uri: &str) -> &str {
    if DUPLICATE_LIKES.contains(&uri) {
        CANONICAL_LIKE
    } else {
        uri
    }
}
