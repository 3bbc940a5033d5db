//! Fill paints and stroke styles.
//!
//! [`FillPaint`] is what the layout engine attaches to each glyph; [`Stroke`]
//! is what overlays use to outline rectangles.

use serde::{Deserialize, Serialize};

use crate::types::{Color, quantize};

/// A normalized RGB triple as reported by the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PaintColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl PaintColor {
    /// Create a new paint color from normalized components.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
}

/// One paint layer applied to a glyph or its decoration.
///
/// A glyph may carry several paints; they composite in list order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FillPaint {
    /// Normalized RGB color.
    pub color: PaintColor,
    /// Alpha in `[0, 1]`.
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    /// Invisible paints emit no draw commands.
    #[serde(default = "default_visible")]
    pub visible: bool,
}

fn default_opacity() -> f32 {
    1.0
}

fn default_visible() -> bool {
    true
}

impl FillPaint {
    /// Create a visible paint.
    #[inline]
    pub const fn new(color: PaintColor, opacity: f32) -> Self {
        Self {
            color,
            opacity,
            visible: true,
        }
    }

    /// Create a visible, fully opaque paint.
    #[inline]
    pub const fn solid(color: PaintColor) -> Self {
        Self::new(color, 1.0)
    }

    /// Return this paint with visibility set.
    #[inline]
    #[must_use]
    pub const fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// The fill color this paint produces on a surface.
    ///
    /// Channels are scaled to 0-255 integers; the opacity becomes the alpha
    /// as-is.
    pub fn fill_color(&self) -> Color {
        Color::from_rgb8(
            quantize(self.color.r),
            quantize(self.color.g),
            quantize(self.color.b),
        )
        .with_alpha(self.opacity)
    }
}

/// Stroke style for outlined rectangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in surface units.
    pub width: f32,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

impl Stroke {
    /// Create a new stroke with the given color and width.
    #[inline]
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_color_scales_channels() {
        let paint = FillPaint::new(PaintColor::new(1.0, 0.5, 0.0), 0.25);
        let color = paint.fill_color();
        assert_eq!(color.to_rgb8(), [255, 128, 0]);
        assert_eq!(color.a, 0.25);
    }

    #[test]
    fn test_serde_defaults() {
        let paint: FillPaint =
            serde_json::from_str(r#"{"color":{"r":0.0,"g":0.0,"b":1.0}}"#).unwrap();
        assert!(paint.visible);
        assert_eq!(paint.opacity, 1.0);
    }

    #[test]
    fn test_with_visible() {
        let paint = FillPaint::solid(PaintColor::default()).with_visible(false);
        assert!(!paint.visible);
    }
}
