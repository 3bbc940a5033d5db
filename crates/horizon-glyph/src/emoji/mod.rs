//! Emoji bitmaps: keys, decoding, sources and the session cache.

mod bitmap;
mod cache;
mod key;
mod source;

pub use bitmap::EmojiBitmap;
pub use cache::{EmojiCache, EmojiCacheConfig, EmojiEntry};
pub use key::{EmojiKey, KEY_SEPARATOR};
#[cfg(feature = "networking")]
pub use source::HttpEmojiSource;
pub use source::EmojiSource;
