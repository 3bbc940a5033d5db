//! Emoji image endpoint and downloader.

use bytes::Bytes;
use tracing::debug;

use crate::error::{NetworkError, Result};
use crate::http::HttpClient;

/// The endpoint emoji images are downloaded from by default.
pub const DEFAULT_EMOJI_ENDPOINT: &str = "https://static.figma.com/emoji/5/apple/medium/{key}.png";

const KEY_PLACEHOLDER: &str = "{key}";

/// A URL template for emoji images.
///
/// The template must contain a `{key}` placeholder, which is replaced by the
/// dash-joined hex code points of the emoji (for example `1f468-200d-1f4bb`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiEndpoint {
    template: String,
}

impl EmojiEndpoint {
    /// Create an endpoint from a URL template.
    ///
    /// Fails if the template lacks the `{key}` placeholder or does not form a
    /// valid absolute URL once a key is substituted.
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        if !template.contains(KEY_PLACEHOLDER) {
            return Err(NetworkError::InvalidTemplate(template));
        }
        url::Url::parse(&template.replace(KEY_PLACEHOLDER, "0"))?;
        Ok(Self { template })
    }

    /// The raw template string.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Build the download URL for an emoji key.
    pub fn url_for(&self, key: &str) -> String {
        self.template.replace(KEY_PLACEHOLDER, key)
    }
}

impl Default for EmojiEndpoint {
    fn default() -> Self {
        Self {
            template: DEFAULT_EMOJI_ENDPOINT.to_string(),
        }
    }
}

/// Downloads emoji image bytes from an [`EmojiEndpoint`].
#[derive(Debug, Clone)]
pub struct EmojiDownloader {
    client: HttpClient,
    endpoint: EmojiEndpoint,
}

impl EmojiDownloader {
    /// Create a downloader with the given client and endpoint.
    pub fn new(client: HttpClient, endpoint: EmojiEndpoint) -> Self {
        Self { client, endpoint }
    }

    /// The endpoint this downloader targets.
    pub fn endpoint(&self) -> &EmojiEndpoint {
        &self.endpoint
    }

    /// The client used for downloads.
    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    /// Download the encoded image for `key`.
    ///
    /// Any non-2xx status is reported as [`NetworkError::HttpStatus`].
    pub async fn download(&self, key: &str) -> Result<Bytes> {
        let url = self.endpoint.url_for(key);
        let response = self.client.get(&url).await?.error_for_status()?;
        let bytes = response.bytes().await?;
        debug!(target: "horizon_glyph_net::emoji", key, len = bytes.len(), "emoji downloaded");
        Ok(bytes)
    }
}
