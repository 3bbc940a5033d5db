//! Text layout compositing for Horizon.
//!
//! This crate draws a pre-computed text layout onto a 2D drawing surface.
//! It handles glyph outlines with stacked fill paints, emoji bitmaps loaded
//! in the background, truncation with ghost glyphs or an ellipsis, decoration
//! bands and selection/caret highlights, all in one fixed draw order.
//!
//! The layout engine and the drawing backend stay outside the crate: layouts
//! come in through the [`TextLayout`] trait and draw commands go out through
//! the [`DrawSurface`] trait.
//!
//! # Rendering a Layout
//!
//! ```no_run
//! use horizon_glyph::{
//!     DrawList, EmojiCache, EmojiCacheConfig, Glyph, FillPaint, LayoutSnapshot,
//!     PaintColor, Point, SceneCompositor, Size,
//! };
//!
//! # fn example() -> horizon_glyph::RenderResult<()> {
//! let mut layout = LayoutSnapshot::new(Size::new(120.0, 24.0));
//! layout.push_glyph(
//!     Glyph::new(Point::new(0.0, 18.0), "M0 0L8 0L8 -12L0 -12Z", 9.0),
//!     vec![FillPaint::solid(PaintColor::new(0.0, 0.0, 0.0))],
//!     None,
//! );
//!
//! // One cache per editing session, shared by every pass.
//! let mut cache = EmojiCache::with_http(EmojiCacheConfig::default())?;
//! let compositor = SceneCompositor::default();
//!
//! let mut surface = DrawList::new();
//! compositor.render(&layout, &mut surface, &mut cache);
//!
//! // Once per frame: draw emoji whose downloads have finished.
//! cache.process_completed(&mut surface);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! [`GlyphConfig`] bundles the compositor and emoji cache settings and can be
//! loaded from TOML. See the [`config`] module.
//!
//! # Logging
//!
//! Diagnostics go through `tracing` under the targets in
//! [`logging::targets`].

pub mod compositor;
pub mod config;
pub mod emoji;
mod error;
pub mod layout;
pub mod logging;
pub mod paint;
pub mod painter;
pub mod resolve;
pub mod surface;
pub mod truncation;
mod types;

pub use compositor::{PassStats, SceneCompositor};
pub use config::{CompositorConfig, GlyphConfig};
#[cfg(feature = "networking")]
pub use emoji::HttpEmojiSource;
pub use emoji::{EmojiBitmap, EmojiCache, EmojiCacheConfig, EmojiEntry, EmojiKey, EmojiSource};
pub use error::{RenderError, RenderResult};
pub use layout::{Baseline, Glyph, GlyphOutline, LayoutSnapshot, TextLayout};
pub use paint::{FillPaint, PaintColor, Stroke};
pub use resolve::{GlyphRun, PaintedGlyph};
pub use surface::{DrawCommand, DrawList, DrawStats, DrawSurface};
pub use truncation::{RenderMode, TruncationPlan, TruncationState};
pub use types::{Color, EdgeRect, Point, Rect, Size};
