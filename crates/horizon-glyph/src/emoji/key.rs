//! Emoji cache keys.

use std::fmt;

/// Separator between code points in a key.
pub const KEY_SEPARATOR: char = '-';

/// Identifies an emoji image by its code-point sequence.
///
/// The key is the lowercase hex form of each code point joined by `-`,
/// e.g. `1f468-200d-1f4bb`. This is also the file stem on the image endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EmojiKey(String);

impl EmojiKey {
    /// Build a key from a code-point sequence.
    ///
    /// Returns `None` for an empty sequence.
    pub fn from_code_points(code_points: &[u32]) -> Option<Self> {
        if code_points.is_empty() {
            return None;
        }
        let key = code_points
            .iter()
            .map(|cp| format!("{cp:x}"))
            .collect::<Vec<_>>()
            .join(&KEY_SEPARATOR.to_string());
        Some(Self(key))
    }

    /// The key as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmojiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
