//! Per-glyph paint resolution.
//!
//! The layout engine reports glyphs and paint lists as parallel arrays.
//! [`GlyphRun::resolve`] pairs them up once per render pass so painters
//! work on one record per glyph and never index two arrays in lockstep.

use crate::layout::{Glyph, TextLayout};
use crate::paint::FillPaint;

/// A glyph together with its resolved fill paints.
#[derive(Debug, Clone, Copy)]
pub struct PaintedGlyph<'a> {
    /// The glyph.
    pub glyph: &'a Glyph,
    /// Paints in composite order.
    pub paints: &'a [FillPaint],
}

impl<'a> PaintedGlyph<'a> {
    /// The paints that produce draw commands.
    pub fn visible_paints(&self) -> impl Iterator<Item = &'a FillPaint> + 'a {
        let paints: &'a [FillPaint] = self.paints;
        paints.iter().filter(|paint| paint.visible)
    }
}

/// All glyphs of one layout snapshot with their paints.
#[derive(Debug, Clone, Default)]
pub struct GlyphRun<'a> {
    glyphs: Vec<PaintedGlyph<'a>>,
}

impl<'a> GlyphRun<'a> {
    /// Resolve every glyph of `layout` against its paint list.
    ///
    /// Returns `None` when the layout has no glyph list at all.
    pub fn resolve<L: TextLayout + ?Sized>(layout: &'a L) -> Option<Self> {
        let glyphs = layout.glyphs()?;
        let glyphs = glyphs
            .iter()
            .enumerate()
            .map(|(index, glyph)| PaintedGlyph {
                glyph,
                paints: layout.fill_paints(index),
            })
            .collect();
        Some(Self { glyphs })
    }

    /// Number of glyphs.
    #[inline]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Whether the run has no glyphs.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// The record at `index`, if any.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&PaintedGlyph<'a>> {
        self.glyphs.get(index)
    }

    /// The first `len` records, clamped to the run length.
    #[inline]
    pub fn prefix(&self, len: usize) -> &[PaintedGlyph<'a>] {
        &self.glyphs[..len.min(self.glyphs.len())]
    }
}
