//! Component border, resize handles and baseline guides.

use crate::config::CompositorConfig;
use crate::layout::Baseline;
use crate::paint::Stroke;
use crate::surface::DrawSurface;
use crate::types::{Rect, Size};

/// Height of a baseline guide.
pub const BASELINE_THICKNESS: f32 = 1.0;

/// The four corner handle boxes for a component of `size`.
///
/// With half-size `s`, handles sit at `(-s, -s)`, `(w - 2s, -s)`,
/// `(-s, h - 2s)` and `(w - 2s, h - 2s)` and are `3s` square.
pub fn handle_rects(size: Size, s: f32) -> [Rect; 4] {
    let side = 3.0 * s;
    let right = size.width - 2.0 * s;
    let bottom = size.height - 2.0 * s;
    [
        Rect::new(-s, -s, side, side),
        Rect::new(right, -s, side, side),
        Rect::new(-s, bottom, side, side),
        Rect::new(right, bottom, side, side),
    ]
}

/// Outline the component bounds. Outside the editor role the corner
/// handles are drawn as well.
pub fn paint_border<S>(surface: &mut S, size: Size, is_editor: bool, config: &CompositorConfig) -> usize
where
    S: DrawSurface + ?Sized,
{
    let stroke = Stroke::new(config.accent_color, 1.0);
    surface.stroke_rect(Rect::new(0.0, 0.0, size.width, size.height), stroke);
    if is_editor {
        return 1;
    }

    let handles = handle_rects(size, config.handle_size);
    for handle in handles {
        surface.fill_stroke_rect(handle, config.handle_fill, stroke);
    }
    1 + handles.len()
}

/// Draw one thin accent line per baseline.
pub fn paint_baselines<S>(surface: &mut S, baselines: &[Baseline], config: &CompositorConfig) -> usize
where
    S: DrawSurface + ?Sized,
{
    for baseline in baselines {
        let rect = Rect::new(
            baseline.position.x,
            baseline.position.y,
            baseline.width,
            BASELINE_THICKNESS,
        );
        surface.fill_rect(rect, config.accent_color);
    }
    baselines.len()
}
