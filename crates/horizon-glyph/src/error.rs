//! Error types for the glyph compositing crate.

use thiserror::Error;

/// Errors that can occur while compositing a text layout.
#[derive(Error, Debug)]
pub enum RenderError {
    /// An ellipsis was requested but the glyphs it is built from are missing.
    ///
    /// The ellipsis repeats glyph `start_index - 1` using the paints of glyph
    /// `start_index - 2`; both must exist.
    #[error(
        "ellipsis needs two glyphs before truncation index {start_index} but the layout has {glyph_count}"
    )]
    TruncationPrecondition {
        /// First truncated glyph index.
        start_index: i64,
        /// Number of glyphs in the layout.
        glyph_count: usize,
    },

    /// Fetching an emoji bitmap failed.
    #[error("failed to fetch emoji {key}: {reason}")]
    EmojiFetch {
        /// The emoji cache key.
        key: String,
        /// Why the fetch failed.
        reason: String,
    },

    /// Decoding a fetched image failed.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// Failed to spawn an emoji worker thread.
    #[error("failed to spawn emoji worker: {0}")]
    WorkerSpawn(#[source] std::io::Error),

    /// The emoji workers have shut down and can no longer accept requests.
    #[error("emoji workers have shut down")]
    WorkersShutDown,

    /// Too many emoji fetches are in flight.
    #[error("too many pending emoji fetches (max {max})")]
    TooManyPending {
        /// The configured limit.
        max: usize,
    },

    /// Configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// A configured color string is not a valid hex color.
    #[error("invalid color: {0:?}")]
    InvalidColor(String),

    /// Networking error from the emoji downloader.
    #[cfg(feature = "networking")]
    #[error("network error: {0}")]
    Network(#[from] horizon_glyph_net::NetworkError),
}

/// Result type for compositing operations.
pub type RenderResult<T> = Result<T, RenderError>;
