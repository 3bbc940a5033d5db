//! Networking for Horizon Glyph.
//!
//! This crate provides the HTTP transport used to download emoji bitmaps:
//!
//! - **HTTP Client**: a thin, cloneable wrapper over `reqwest`
//! - **Emoji Endpoint**: a validated URL template keyed by code-point sequence
//!
//! # Example
//!
//! ```ignore
//! use horizon_glyph_net::{EmojiDownloader, EmojiEndpoint, HttpClient};
//!
//! let client = HttpClient::builder().build()?;
//! let downloader = EmojiDownloader::new(client, EmojiEndpoint::default());
//!
//! let png = downloader.download("1f600").await?;
//! ```

pub mod emoji;
pub mod error;
pub mod http;

pub use emoji::{DEFAULT_EMOJI_ENDPOINT, EmojiDownloader, EmojiEndpoint};
pub use error::{NetworkError, Result};
pub use http::{HttpClient, HttpClientBuilder, HttpClientConfig, HttpResponse};
