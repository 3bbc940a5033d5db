//! Selection highlight and caret.

use crate::config::CompositorConfig;
use crate::surface::DrawSurface;
use crate::types::Rect;

/// Fill the selection rectangles.
///
/// An expanded selection is tinted with the accent color at the configured
/// selection alpha; a collapsed one is the caret bar in the caret color.
pub fn paint_selection<S>(surface: &mut S, rects: &[Rect], collapsed: bool, config: &CompositorConfig) -> usize
where
    S: DrawSurface + ?Sized,
{
    let color = if collapsed {
        config.caret_color
    } else {
        config.accent_color.with_alpha(config.selection_alpha)
    };
    for rect in rects {
        surface.fill_rect(*rect, color);
    }
    rects.len()
}
