//! Where emoji image bytes come from.

use crate::emoji::EmojiKey;
use crate::error::RenderResult;

/// Fetches the encoded image for an emoji key.
///
/// Called on emoji worker threads, so implementations may block.
pub trait EmojiSource: Send + Sync + 'static {
    /// Fetch the encoded image bytes for `key`.
    fn fetch(&self, key: &EmojiKey) -> RenderResult<Vec<u8>>;
}

#[cfg(feature = "networking")]
pub use http::HttpEmojiSource;

#[cfg(feature = "networking")]
mod http {
    use std::time::Duration;

    use horizon_glyph_net::{
        EmojiDownloader, EmojiEndpoint, HttpClient, HttpClientBuilder, HttpClientConfig,
    };

    use super::EmojiSource;
    use crate::emoji::{EmojiCacheConfig, EmojiKey};
    use crate::error::{RenderError, RenderResult};

    /// Downloads emoji images over HTTP.
    #[derive(Debug, Clone)]
    pub struct HttpEmojiSource {
        downloader: EmojiDownloader,
    }

    impl HttpEmojiSource {
        /// Create a source for the given endpoint template.
        pub fn new(endpoint: &str, timeout: Duration) -> RenderResult<Self> {
            Self::with_client(endpoint, HttpClient::builder().timeout(timeout))
        }

        /// Create a source from the emoji cache configuration.
        pub fn from_config(config: &EmojiCacheConfig) -> RenderResult<Self> {
            let mut builder = HttpClient::builder()
                .timeout(config.fetch_timeout())
                .connect_timeout(config.connect_timeout());
            if let Some(user_agent) = &config.user_agent {
                builder = builder.user_agent(user_agent.as_str());
            }
            Self::with_client(&config.endpoint, builder)
        }

        fn with_client(endpoint: &str, builder: HttpClientBuilder) -> RenderResult<Self> {
            let endpoint = EmojiEndpoint::new(endpoint)?;
            let client = builder.build()?;
            Ok(Self {
                downloader: EmojiDownloader::new(client, endpoint),
            })
        }

        /// The endpoint template in use.
        pub fn endpoint(&self) -> &str {
            self.downloader.endpoint().template()
        }

        /// Settings of the underlying HTTP client.
        pub fn client_config(&self) -> &HttpClientConfig {
            self.downloader.client().config()
        }
    }

    impl EmojiSource for HttpEmojiSource {
        fn fetch(&self, key: &EmojiKey) -> RenderResult<Vec<u8>> {
            // Each worker blocks on its own runtime for the duration of one download
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(|e| RenderError::EmojiFetch {
                    key: key.to_string(),
                    reason: format!("failed to create runtime: {e}"),
                })?;

            let bytes = rt.block_on(self.downloader.download(key.as_str()))?;
            Ok(bytes.to_vec())
        }
    }

}
