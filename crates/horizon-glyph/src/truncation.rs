//! Truncation policy.
//!
//! Truncated text is handled differently depending on whether the text is
//! being edited:
//!
//! - **Editing**: every glyph is still drawn. Glyphs past the cutoff are drawn
//!   once as muted "ghost" outlines so the hidden content stays visible while
//!   editing. Decorations stop at the cutoff.
//! - **Static**: glyphs past the cutoff are suppressed and an ellipsis is
//!   synthesized by repeating the last visible glyph's outline three times.
//!
//! [`TruncationPlan`] captures the outcome for one render pass.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{RenderError, RenderResult};
use crate::layout::GlyphOutline;
use crate::logging::targets;
use crate::paint::FillPaint;
use crate::resolve::GlyphRun;
use crate::types::Point;

/// Truncation style of a text block.
///
/// `start_index` is the first glyph that is truncated away; any value of
/// `-1` or below disables truncation regardless of `enabled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TruncationState {
    pub enabled: bool,
    pub start_index: i64,
}

impl Default for TruncationState {
    fn default() -> Self {
        Self::DISABLED
    }
}

impl TruncationState {
    /// Truncation off.
    pub const DISABLED: Self = Self {
        enabled: false,
        start_index: -1,
    };

    /// Truncation on, cutting at `start_index`.
    pub const fn at(start_index: i64) -> Self {
        Self {
            enabled: true,
            start_index,
        }
    }

    /// Whether truncation applies.
    pub fn is_active(&self) -> bool {
        self.enabled && self.start_index > -1
    }

    /// The cutoff index, if truncation applies.
    pub fn cutoff(&self) -> Option<usize> {
        if self.is_active() {
            usize::try_from(self.start_index).ok()
        } else {
            None
        }
    }
}

/// Whether the text is being edited or displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderMode {
    /// The text has an active selection or caret.
    Editing,
    /// The text is displayed without interaction.
    Static,
}

impl RenderMode {
    /// Editing when a selection exists, static otherwise.
    pub fn from_selection(has_selection: bool) -> Self {
        if has_selection {
            Self::Editing
        } else {
            Self::Static
        }
    }
}

/// How truncation shapes one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TruncationPlan {
    /// No truncation; everything is drawn.
    Normal,
    /// Editing with a cutoff: glyphs from `start` on are drawn as ghosts.
    EditingTruncated { start: usize },
    /// Static display with a cutoff: glyphs from `start` on are replaced by an
    /// ellipsis.
    StaticTruncated { start: usize },
}

impl TruncationPlan {
    /// Decide the plan for a pass.
    pub fn new(mode: RenderMode, truncation: TruncationState) -> Self {
        let plan = match (mode, truncation.cutoff()) {
            (_, None) => Self::Normal,
            (RenderMode::Editing, Some(start)) => Self::EditingTruncated { start },
            (RenderMode::Static, Some(start)) => Self::StaticTruncated { start },
        };
        trace!(target: targets::TRUNCATION, ?mode, ?truncation, ?plan, "truncation plan");
        plan
    }

    /// Number of glyphs handed to the glyph and emoji painters.
    pub fn glyph_len(&self, glyph_count: usize) -> usize {
        match *self {
            Self::Normal | Self::EditingTruncated { .. } => glyph_count,
            Self::StaticTruncated { start } => start.min(glyph_count),
        }
    }

    /// Number of glyphs handed to the decoration painter.
    pub fn decoration_len(&self, glyph_count: usize) -> usize {
        match *self {
            Self::Normal => glyph_count,
            Self::EditingTruncated { start } | Self::StaticTruncated { start } => {
                start.min(glyph_count)
            }
        }
    }

    /// First glyph drawn as a ghost, if any.
    pub fn ghost_start(&self) -> Option<usize> {
        match *self {
            Self::EditingTruncated { start } => Some(start),
            _ => None,
        }
    }

    /// Build the ellipsis for a static truncation.
    ///
    /// Returns `Ok(None)` for plans without an ellipsis.
    pub fn ellipsis<'a>(&self, run: &GlyphRun<'a>) -> RenderResult<Option<Ellipsis<'a>>> {
        match *self {
            Self::StaticTruncated { start } => Ellipsis::build(run, start).map(Some),
            _ => Ok(None),
        }
    }
}

/// Number of outline copies an ellipsis is made of.
pub const ELLIPSIS_COPIES: usize = 3;

/// A synthesized ellipsis: one outline drawn at several origins.
#[derive(Debug, Clone)]
pub struct Ellipsis<'a> {
    /// Outline of the last visible glyph.
    pub outline: Option<&'a GlyphOutline>,
    /// Where each copy is drawn.
    pub origins: [Point; ELLIPSIS_COPIES],
    /// Paints applied to every copy.
    pub paints: &'a [FillPaint],
}

impl<'a> Ellipsis<'a> {
    /// Repeat glyph `start - 1`, advancing by its `x_advance`, painted with
    /// the paints of glyph `start - 2`.
    fn build(run: &GlyphRun<'a>, start: usize) -> RenderResult<Self> {
        let precondition = || RenderError::TruncationPrecondition {
            start_index: start as i64,
            glyph_count: run.len(),
        };
        let last = start
            .checked_sub(1)
            .and_then(|index| run.get(index))
            .ok_or_else(precondition)?;
        let before = start
            .checked_sub(2)
            .and_then(|index| run.get(index))
            .ok_or_else(precondition)?;

        let glyph = last.glyph;
        let origins = std::array::from_fn(|copy| {
            glyph.position.offset_x(glyph.x_advance * copy as f32)
        });

        Ok(Self {
            outline: glyph.drawable_outline(),
            origins,
            paints: before.paints,
        })
    }
}
