//! Error types for the networking crate.

use std::fmt;

/// Network-specific errors.
#[derive(Debug, Clone)]
pub enum NetworkError {
    /// HTTP request failed.
    Request(String),
    /// Invalid URL provided.
    InvalidUrl(String),
    /// The emoji endpoint template has no `{key}` placeholder.
    InvalidTemplate(String),
    /// Request timed out.
    Timeout,
    /// Connection refused or failed.
    Connection(String),
    /// Invalid response body.
    InvalidBody(String),
    /// HTTP error status (anything outside 2xx).
    HttpStatus {
        /// The HTTP status code.
        status: u16,
        /// The URL that produced the status.
        url: String,
    },
    /// Redirect limit exceeded.
    TooManyRedirects,
    /// Client configuration is unusable.
    InvalidConfig(String),
}

impl NetworkError {
    /// Returns the HTTP status code if this error came from a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request(msg) => write!(f, "HTTP request error: {msg}"),
            Self::InvalidUrl(msg) => write!(f, "Invalid URL: {msg}"),
            Self::InvalidTemplate(template) => {
                write!(f, "Endpoint template has no {{key}} placeholder: {template}")
            }
            Self::Timeout => write!(f, "Request timed out"),
            Self::Connection(msg) => write!(f, "Connection error: {msg}"),
            Self::InvalidBody(msg) => write!(f, "Invalid response body: {msg}"),
            Self::HttpStatus { status, url } => write!(f, "HTTP {status} for {url}"),
            Self::TooManyRedirects => write!(f, "Too many redirects"),
            Self::InvalidConfig(msg) => write!(f, "Invalid client configuration: {msg}"),
        }
    }
}

impl std::error::Error for NetworkError {}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connection(err.to_string())
        } else if err.is_redirect() {
            Self::TooManyRedirects
        } else if err.is_body() || err.is_decode() {
            Self::InvalidBody(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}

impl From<url::ParseError> for NetworkError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

/// A specialized Result type for network operations.
pub type Result<T> = std::result::Result<T, NetworkError>;
