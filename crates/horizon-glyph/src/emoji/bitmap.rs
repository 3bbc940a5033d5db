//! Decoded emoji bitmaps.

use std::sync::Arc;

use crate::error::RenderResult;
use crate::types::Size;

/// A decoded RGBA8 bitmap.
///
/// Cheap to clone; clones share the pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiBitmap {
    data: Arc<[u8]>,
    width: u32,
    height: u32,
}

impl EmojiBitmap {
    /// Decode an encoded image (PNG, etc.) into RGBA8.
    pub fn decode(bytes: &[u8]) -> RenderResult<Self> {
        let img = image::load_from_memory(bytes)?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            data: rgba.into_raw().into(),
            width,
            height,
        })
    }

    /// Wrap raw RGBA8 pixels.
    ///
    /// Returns `None` if `data` is not `width * height * 4` bytes long.
    pub fn from_rgba(data: Vec<u8>, width: u32, height: u32) -> Option<Self> {
        if data.len() != (width as usize) * (height as usize) * 4 {
            return None;
        }
        Some(Self {
            data: data.into(),
            width,
            height,
        })
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Size in pixels.
    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }

    /// Raw RGBA8 pixels, row-major.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.data
    }
}
