//! Compositor configuration.
//!
//! Every setting has a default matching the stock Horizon theme, so an empty
//! TOML document is a valid configuration:
//!
//! ```
//! use horizon_glyph::GlyphConfig;
//!
//! let config = GlyphConfig::from_toml_str(r##"
//!     [compositor]
//!     accent_color = "#FF5500"
//!     show_baselines = true
//!
//!     [emoji]
//!     worker_threads = 2
//! "##).unwrap();
//!
//! assert!(config.compositor.show_baselines);
//! assert_eq!(config.emoji.worker_threads, 2);
//! ```

use serde::Deserialize;

use crate::emoji::EmojiCacheConfig;
use crate::error::RenderResult;
use crate::types::Color;

/// The theme accent color (rgb 11, 153, 255).
pub const THEME_ACCENT: Color = Color::new(11.0 / 255.0, 153.0 / 255.0, 1.0, 1.0);

/// The muted color truncated glyphs are drawn in while editing (rgb 153, 153, 153).
pub const GHOST_COLOR: Color = Color::new(153.0 / 255.0, 153.0 / 255.0, 153.0 / 255.0, 1.0);

/// Alpha of highlighted selection ranges.
pub const SELECTION_ALPHA: f32 = 0.3;

/// Half-size of the corner resize handles.
pub const HANDLE_SIZE: f32 = 2.0;

/// Visual settings for the scene compositor.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CompositorConfig {
    /// Color of selections, baselines and borders.
    pub accent_color: Color,
    /// Color of ghost glyphs past the truncation cutoff while editing.
    pub ghost_color: Color,
    /// Color of the caret.
    pub caret_color: Color,
    /// Fill of the corner resize handles.
    pub handle_fill: Color,
    /// Alpha of expanded selection highlights.
    pub selection_alpha: f32,
    /// Half-size of the corner resize handles.
    pub handle_size: f32,
    /// Draw baseline guides.
    pub show_baselines: bool,
    /// Draw the component border and handles.
    pub show_border: bool,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            accent_color: THEME_ACCENT,
            ghost_color: GHOST_COLOR,
            caret_color: Color::BLACK,
            handle_fill: Color::WHITE,
            selection_alpha: SELECTION_ALPHA,
            handle_size: HANDLE_SIZE,
            show_baselines: false,
            show_border: true,
        }
    }
}

impl CompositorConfig {
    /// Set the accent color.
    #[must_use]
    pub fn with_accent_color(mut self, color: Color) -> Self {
        self.accent_color = color;
        self
    }

    /// Set the ghost glyph color.
    #[must_use]
    pub fn with_ghost_color(mut self, color: Color) -> Self {
        self.ghost_color = color;
        self
    }

    /// Enable or disable baseline guides.
    #[must_use]
    pub fn with_baselines(mut self, show: bool) -> Self {
        self.show_baselines = show;
        self
    }

    /// Enable or disable the border overlay.
    #[must_use]
    pub fn with_border(mut self, show: bool) -> Self {
        self.show_border = show;
        self
    }

    /// Set the corner handle half-size.
    #[must_use]
    pub fn with_handle_size(mut self, size: f32) -> Self {
        self.handle_size = size;
        self
    }
}

/// Top-level configuration, as loaded from TOML.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct GlyphConfig {
    /// Compositor settings.
    pub compositor: CompositorConfig,
    /// Emoji cache settings.
    pub emoji: EmojiCacheConfig,
}

impl GlyphConfig {
    /// Parse a configuration from a TOML document.
    pub fn from_toml_str(source: &str) -> RenderResult<Self> {
        Ok(toml::from_str(source)?)
    }
}
