//! HTTP client used for image downloads.

mod client;
mod response;

pub use client::{HttpClient, HttpClientBuilder, HttpClientConfig};
pub use response::HttpResponse;
