//! Stage painters.
//!
//! Each painter appends the commands for one stage of a render pass to a
//! [`DrawSurface`](crate::DrawSurface) and returns how many it emitted.
//! Painters never fail: missing data draws nothing.

mod decoration;
mod emoji;
mod glyph;
mod overlay;
mod selection;

pub use decoration::paint_decorations;
pub use emoji::paint_emoji;
pub use glyph::{GhostRange, paint_ellipsis, paint_glyphs};
pub use overlay::{BASELINE_THICKNESS, handle_rects, paint_baselines, paint_border};
pub use selection::paint_selection;
