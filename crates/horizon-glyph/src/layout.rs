//! The layout snapshot consumed by the compositor.
//!
//! Layout engines implement [`TextLayout`] to expose a computed layout.
//! [`LayoutSnapshot`] is an owned implementation that can also be
//! deserialized, which is how recorded layouts are replayed in tests.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::paint::FillPaint;
use crate::truncation::TruncationState;
use crate::types::{EdgeRect, Point, Rect, Size};

/// An opaque vector outline for one glyph, as SVG path data.
///
/// The compositor never interprets the outline; it hands it to the surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GlyphOutline(Arc<str>);

impl GlyphOutline {
    /// Wrap outline path data.
    pub fn new(data: impl Into<Arc<str>>) -> Self {
        Self(data.into())
    }

    /// The raw path data.
    pub fn data(&self) -> &str {
        &self.0
    }

    /// Whether the outline has no path data.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

/// One positioned, paintable unit of rendered text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Glyph {
    /// Origin the outline is drawn at.
    pub position: Point,
    /// Vector outline; absent for whitespace.
    #[serde(default)]
    pub outline: Option<GlyphOutline>,
    /// Horizontal advance to the next glyph.
    #[serde(default)]
    pub x_advance: f32,
    /// Code points of an emoji glyph, empty otherwise.
    #[serde(default)]
    pub emoji_code_points: Vec<u32>,
    /// Box the emoji bitmap is drawn into.
    #[serde(default)]
    pub emoji_rect: Option<EdgeRect>,
}

impl Glyph {
    /// Create a glyph with an outline.
    pub fn new(position: Point, outline: impl Into<Arc<str>>, x_advance: f32) -> Self {
        Self {
            position,
            outline: Some(GlyphOutline::new(outline)),
            x_advance,
            ..Default::default()
        }
    }

    /// Create a glyph without an outline, such as a space.
    pub fn whitespace(position: Point, x_advance: f32) -> Self {
        Self {
            position,
            x_advance,
            ..Default::default()
        }
    }

    /// Turn this glyph into an emoji glyph.
    #[must_use]
    pub fn with_emoji(mut self, code_points: Vec<u32>, rect: EdgeRect) -> Self {
        self.emoji_code_points = code_points;
        self.emoji_rect = Some(rect);
        self
    }

    /// The outline, if present and non-empty.
    pub fn drawable_outline(&self) -> Option<&GlyphOutline> {
        self.outline.as_ref().filter(|outline| !outline.is_empty())
    }

    /// Whether this glyph is drawn as an emoji bitmap.
    pub fn is_emoji(&self) -> bool {
        !self.emoji_code_points.is_empty()
    }
}

/// A horizontal debug guide.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Baseline {
    /// Left end of the line.
    pub position: Point,
    /// Line length.
    pub width: f32,
}

/// Read access to a computed text layout.
///
/// Glyph-indexed queries (`fill_paints`, `decoration_rect`) are parallel to
/// [`glyphs`](Self::glyphs). Indices past the end are an upstream bug;
/// implementations should answer them with empty data rather than panic.
pub trait TextLayout {
    /// The laid-out glyphs, or `None` if layout has not run.
    fn glyphs(&self) -> Option<&[Glyph]>;

    /// Baseline guides, or `None` if unavailable.
    fn baselines(&self) -> Option<&[Baseline]>;

    /// Ordered fill paints of the glyph at `index`.
    fn fill_paints(&self, index: usize) -> &[FillPaint];

    /// Decoration band of the glyph at `index`, if it has one.
    fn decoration_rect(&self, index: usize) -> Option<Rect>;

    /// Selection rectangles, or the caret bar when the selection is collapsed.
    fn selection_rects(&self) -> &[Rect];

    /// Component bounds.
    fn size(&self) -> Size;

    /// Whether the component is shown in the editor role.
    fn is_editor(&self) -> bool;

    /// Whether the text is currently being edited or selected.
    fn has_selection(&self) -> bool;

    /// Whether the selection is collapsed to a caret.
    fn is_collapsed(&self) -> bool;

    /// Truncation style of the text.
    fn truncation(&self) -> TruncationState;
}

/// An owned layout snapshot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSnapshot {
    pub glyphs: Option<Vec<Glyph>>,
    pub baselines: Option<Vec<Baseline>>,
    /// Paint lists, parallel to `glyphs`.
    pub fill_paints: Vec<Vec<FillPaint>>,
    /// Decoration rectangles, parallel to `glyphs`.
    pub decoration_rects: Vec<Option<Rect>>,
    pub selection_rects: Vec<Rect>,
    pub size: Size,
    pub is_editor: bool,
    pub has_selection: bool,
    pub is_collapsed: bool,
    pub truncation: TruncationState,
}

impl LayoutSnapshot {
    /// Create a snapshot of the given size with no content.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    /// Append a glyph together with its paints and decoration.
    pub fn push_glyph(&mut self, glyph: Glyph, paints: Vec<FillPaint>, decoration: Option<Rect>) {
        self.glyphs.get_or_insert_with(Vec::new).push(glyph);
        self.fill_paints.push(paints);
        self.decoration_rects.push(decoration);
    }
}

impl TextLayout for LayoutSnapshot {
    fn glyphs(&self) -> Option<&[Glyph]> {
        self.glyphs.as_deref()
    }

    fn baselines(&self) -> Option<&[Baseline]> {
        self.baselines.as_deref()
    }

    fn fill_paints(&self, index: usize) -> &[FillPaint] {
        self.fill_paints.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    fn decoration_rect(&self, index: usize) -> Option<Rect> {
        self.decoration_rects.get(index).copied().flatten()
    }

    fn selection_rects(&self) -> &[Rect] {
        &self.selection_rects
    }

    fn size(&self) -> Size {
        self.size
    }

    fn is_editor(&self) -> bool {
        self.is_editor
    }

    fn has_selection(&self) -> bool {
        self.has_selection
    }

    fn is_collapsed(&self) -> bool {
        self.is_collapsed
    }

    fn truncation(&self) -> TruncationState {
        self.truncation
    }
}
