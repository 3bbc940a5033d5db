//! Decoration bands (underline, strikethrough).

use crate::layout::TextLayout;
use crate::resolve::GlyphRun;
use crate::surface::DrawSurface;

/// Fill the decoration band of each of the first `len` glyphs once per
/// visible paint.
///
/// Glyphs without a band, or with a zero-width one, are skipped. The paint
/// opacity is used as the fill alpha as is.
pub fn paint_decorations<S, L>(surface: &mut S, layout: &L, run: &GlyphRun<'_>, len: usize) -> usize
where
    S: DrawSurface + ?Sized,
    L: TextLayout + ?Sized,
{
    let mut emitted = 0;
    for (index, painted) in run.prefix(len).iter().enumerate() {
        let Some(rect) = layout.decoration_rect(index) else {
            continue;
        };
        if rect.width() == 0.0 {
            continue;
        }
        for paint in painted.visible_paints() {
            surface.fill_rect(rect, paint.fill_color());
            emitted += 1;
        }
    }
    emitted
}
