//! Tracing targets and spans.
//!
//! Horizon Glyph uses the `tracing` crate for instrumentation. To see logs,
//! install a subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_glyph::emoji=debug")
//!     .init();
//! ```

/// Target names for log filtering.
pub mod targets {
    /// Render pass orchestration.
    pub const COMPOSITOR: &str = "horizon_glyph::compositor";
    /// Emoji fetches and cache state.
    pub const EMOJI: &str = "horizon_glyph::emoji";
    /// Truncation decisions.
    pub const TRUNCATION: &str = "horizon_glyph::truncation";
}

/// A guard that keeps a render-pass span entered until dropped.
#[derive(Debug)]
pub struct RenderPassSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl RenderPassSpan {
    /// Enter a span describing one render pass.
    pub fn new(glyphs: usize, editing: bool) -> Self {
        let span = tracing::info_span!(
            target: targets::COMPOSITOR,
            "render_pass",
            glyphs,
            editing
        );
        Self {
            span: span.entered(),
        }
    }
}
