//! Emoji bitmaps.

use tracing::trace;

use crate::emoji::{EmojiCache, EmojiKey};
use crate::logging::targets;
use crate::resolve::GlyphRun;
use crate::surface::DrawSurface;

/// Draw the cached bitmap of every emoji glyph among the first `len`.
///
/// Bitmaps that are not cached yet start a fetch; the cache draws them at
/// the requested box when the fetch completes.
pub fn paint_emoji<S>(surface: &mut S, cache: &mut EmojiCache, run: &GlyphRun<'_>, len: usize) -> usize
where
    S: DrawSurface + ?Sized,
{
    let mut emitted = 0;
    for painted in run.prefix(len) {
        let glyph = painted.glyph;
        let Some(key) = EmojiKey::from_code_points(&glyph.emoji_code_points) else {
            continue;
        };
        let rect = glyph
            .emoji_rect
            .map(|edges| edges.to_rect())
            .filter(|rect| !rect.is_empty());

        match (cache.ensure(&key, rect), rect) {
            (Some(bitmap), Some(rect)) => {
                surface.draw_image(rect, &bitmap);
                emitted += 1;
            }
            _ => trace!(target: targets::EMOJI, key = %key, "emoji not drawn"),
        }
    }
    emitted
}
