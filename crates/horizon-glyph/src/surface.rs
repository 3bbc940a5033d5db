//! Drawing surface interface and a recording implementation.
//!
//! The compositor never rasterizes. It appends draw commands to a
//! [`DrawSurface`]; the backend behind it owns pixel compositing and
//! presents commands in the order they were appended.
//!
//! [`DrawList`] records commands in memory, which is what headless tools and
//! tests use.
//!
//! # Example
//!
//! ```
//! use horizon_glyph::{Color, DrawList, DrawSurface, Rect};
//!
//! let mut list = DrawList::new();
//! list.fill_rect(Rect::new(0.0, 0.0, 10.0, 1.0), Color::BLACK);
//! assert_eq!(list.stats().rects, 1);
//! ```

use crate::emoji::EmojiBitmap;
use crate::layout::GlyphOutline;
use crate::paint::Stroke;
use crate::types::{Color, Point, Rect};

/// Append-only target for draw commands.
pub trait DrawSurface {
    /// Fill a rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Stroke the outline of a rectangle.
    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke);

    /// Fill a rectangle and stroke its outline as one shape.
    fn fill_stroke_rect(&mut self, rect: Rect, fill: Color, stroke: Stroke);

    /// Fill a vector outline drawn at `origin`.
    fn fill_path(&mut self, origin: Point, outline: &GlyphOutline, color: Color);

    /// Draw a bitmap scaled into `rect`.
    fn draw_image(&mut self, rect: Rect, image: &EmojiBitmap);
}

/// A recorded draw command.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// A filled and/or stroked rectangle.
    Rect {
        rect: Rect,
        fill: Option<Color>,
        stroke: Option<Stroke>,
    },
    /// A filled vector outline.
    Path {
        origin: Point,
        outline: GlyphOutline,
        color: Color,
    },
    /// A bitmap image.
    Image { rect: Rect, image: EmojiBitmap },
}

impl DrawCommand {
    /// Whether this command is a filled path.
    #[inline]
    pub fn is_path(&self) -> bool {
        matches!(self, Self::Path { .. })
    }

    /// Whether this command is a rectangle.
    #[inline]
    pub fn is_rect(&self) -> bool {
        matches!(self, Self::Rect { .. })
    }

    /// Whether this command is an image.
    #[inline]
    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image { .. })
    }
}

/// Counts of recorded commands by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    /// Number of rectangle commands.
    pub rects: usize,
    /// Number of path commands.
    pub paths: usize,
    /// Number of image commands.
    pub images: usize,
}

/// A [`DrawSurface`] that records commands in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    /// Create an empty draw list.
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded commands, in append order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Number of recorded commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Drop all recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Take the recorded commands, leaving the list empty.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Count recorded commands by kind.
    pub fn stats(&self) -> DrawStats {
        self.commands
            .iter()
            .fold(DrawStats::default(), |mut stats, command| {
                match command {
                    DrawCommand::Rect { .. } => stats.rects += 1,
                    DrawCommand::Path { .. } => stats.paths += 1,
                    DrawCommand::Image { .. } => stats.images += 1,
                }
                stats
            })
    }
}

impl DrawSurface for DrawList {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::Rect {
            rect,
            fill: Some(color),
            stroke: None,
        });
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke) {
        self.commands.push(DrawCommand::Rect {
            rect,
            fill: None,
            stroke: Some(stroke),
        });
    }

    fn fill_stroke_rect(&mut self, rect: Rect, fill: Color, stroke: Stroke) {
        self.commands.push(DrawCommand::Rect {
            rect,
            fill: Some(fill),
            stroke: Some(stroke),
        });
    }

    fn fill_path(&mut self, origin: Point, outline: &GlyphOutline, color: Color) {
        self.commands.push(DrawCommand::Path {
            origin,
            outline: outline.clone(),
            color,
        });
    }

    fn draw_image(&mut self, rect: Rect, image: &EmojiBitmap) {
        self.commands.push(DrawCommand::Image {
            rect,
            image: image.clone(),
        });
    }
}
