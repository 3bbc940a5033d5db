//! One render pass over a text layout.
//!
//! [`SceneCompositor::render`] draws a layout snapshot in a fixed order:
//!
//! 1. baseline guides (when enabled)
//! 2. component border and handles (when enabled)
//! 3. the ellipsis, then glyph bodies including ghost glyphs
//! 4. emoji bitmaps that are already cached
//! 5. decoration bands
//! 6. selection highlight or caret
//!
//! Emoji bitmaps that are still being fetched are drawn later by
//! [`EmojiCache::process_completed`](crate::EmojiCache::process_completed).

use tracing::{trace, warn};

use crate::config::CompositorConfig;
use crate::emoji::EmojiCache;
use crate::layout::TextLayout;
use crate::logging::{RenderPassSpan, targets};
use crate::painter::{
    GhostRange, paint_baselines, paint_border, paint_decorations, paint_ellipsis, paint_emoji,
    paint_glyphs, paint_selection,
};
use crate::resolve::GlyphRun;
use crate::surface::DrawSurface;
use crate::truncation::{RenderMode, TruncationPlan};

/// Commands emitted by one render pass, per stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Baseline guides.
    pub baselines: usize,
    /// Border outline and handles.
    pub border: usize,
    /// Glyph body paths, ghosts included.
    pub glyphs: usize,
    /// Ellipsis paths.
    pub ellipsis: usize,
    /// Emoji images drawn from the cache.
    pub emoji: usize,
    /// Decoration bands.
    pub decorations: usize,
    /// Selection or caret rectangles.
    pub selection: usize,
    /// The ellipsis could not be built and the glyph body was skipped.
    pub truncation_aborted: bool,
}

impl PassStats {
    /// Total number of commands emitted.
    pub fn total(&self) -> usize {
        self.baselines
            + self.border
            + self.glyphs
            + self.ellipsis
            + self.emoji
            + self.decorations
            + self.selection
    }
}

/// Draws text layouts onto a [`DrawSurface`].
#[derive(Debug, Clone, Default)]
pub struct SceneCompositor {
    config: CompositorConfig,
}

impl SceneCompositor {
    /// Create a compositor with the given settings.
    pub fn new(config: CompositorConfig) -> Self {
        Self { config }
    }

    /// The settings in use.
    pub fn config(&self) -> &CompositorConfig {
        &self.config
    }

    /// Draw `layout` onto `surface`.
    ///
    /// Never fails. Missing data is skipped and a truncation that cannot
    /// build its ellipsis drops the glyph body for this pass while every
    /// other stage still draws.
    pub fn render<L, S>(&self, layout: &L, surface: &mut S, cache: &mut EmojiCache) -> PassStats
    where
        L: TextLayout + ?Sized,
        S: DrawSurface + ?Sized,
    {
        let mode = RenderMode::from_selection(layout.has_selection());
        let run = GlyphRun::resolve(layout);
        let glyph_count = run.as_ref().map_or(0, GlyphRun::len);
        let _span = RenderPassSpan::new(glyph_count, mode == RenderMode::Editing);

        let mut stats = PassStats::default();

        if self.config.show_baselines
            && let Some(baselines) = layout.baselines()
        {
            stats.baselines = paint_baselines(surface, baselines, &self.config);
        }

        if self.config.show_border {
            stats.border = paint_border(surface, layout.size(), layout.is_editor(), &self.config);
        }

        if let Some(run) = &run {
            let plan = TruncationPlan::new(mode, layout.truncation());
            let glyph_len = plan.glyph_len(run.len());

            match plan.ellipsis(run) {
                Ok(ellipsis) => {
                    // The ellipsis sits under the glyphs it overlaps.
                    if let Some(ellipsis) = ellipsis {
                        stats.ellipsis = paint_ellipsis(surface, &ellipsis);
                    }
                    let ghost = plan.ghost_start().map(|start| GhostRange {
                        start,
                        color: self.config.ghost_color,
                    });
                    stats.glyphs = paint_glyphs(surface, run, glyph_len, ghost);
                }
                Err(err) => {
                    warn!(target: targets::TRUNCATION, error = %err, "skipping glyph body");
                    stats.truncation_aborted = true;
                }
            }

            stats.emoji = paint_emoji(surface, cache, run, glyph_len);
            stats.decorations =
                paint_decorations(surface, layout, run, plan.decoration_len(run.len()));
        }

        stats.selection = paint_selection(
            surface,
            layout.selection_rects(),
            layout.is_collapsed(),
            &self.config,
        );

        trace!(
            target: targets::COMPOSITOR,
            glyphs = stats.glyphs,
            ellipsis = stats.ellipsis,
            emoji = stats.emoji,
            decorations = stats.decorations,
            selection = stats.selection,
            total = stats.total(),
            "render pass complete"
        );
        stats
    }
}
