//! Vector glyph bodies.

use crate::resolve::GlyphRun;
use crate::surface::DrawSurface;
use crate::truncation::Ellipsis;
use crate::types::Color;

/// Glyphs from `start` on are drawn once in `color` instead of their paints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GhostRange {
    /// First ghost glyph.
    pub start: usize,
    /// Ghost outline color.
    pub color: Color,
}

/// Draw the outlines of the first `len` glyphs of `run`.
///
/// Commands are emitted glyph-major, paint-minor. Glyphs without a drawable
/// outline (whitespace, emoji) produce nothing, ghosts included.
pub fn paint_glyphs<S>(
    surface: &mut S,
    run: &GlyphRun<'_>,
    len: usize,
    ghost: Option<GhostRange>,
) -> usize
where
    S: DrawSurface + ?Sized,
{
    let mut emitted = 0;
    for (index, painted) in run.prefix(len).iter().enumerate() {
        let Some(outline) = painted.glyph.drawable_outline() else {
            continue;
        };
        let position = painted.glyph.position;

        match ghost {
            Some(ghost) if index >= ghost.start => {
                surface.fill_path(position, outline, ghost.color);
                emitted += 1;
            }
            _ => {
                for paint in painted.visible_paints() {
                    surface.fill_path(position, outline, paint.fill_color());
                    emitted += 1;
                }
            }
        }
    }
    emitted
}

/// Draw every copy of a synthesized ellipsis.
pub fn paint_ellipsis<S>(surface: &mut S, ellipsis: &Ellipsis<'_>) -> usize
where
    S: DrawSurface + ?Sized,
{
    let Some(outline) = ellipsis.outline else {
        return 0;
    };

    let mut emitted = 0;
    for origin in ellipsis.origins {
        for paint in ellipsis.paints.iter().filter(|paint| paint.visible) {
            surface.fill_path(origin, outline, paint.fill_color());
            emitted += 1;
        }
    }
    emitted
}
