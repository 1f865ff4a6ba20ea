use std::fmt;

use thiserror::Error;

/// Why a playability check did not complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckFailure {
    /// The record carried an empty or whitespace-only URL.
    EmptyUrl,
    /// The URL did not parse.
    InvalidUrl,
    /// The page answered with a non-success status.
    HttpStatus(u16),
    /// The request timed out.
    Timeout,
    /// The page redirected more times than allowed.
    RedirectLimitExceeded,
    /// The body exceeded the configured size cap.
    TooLarge {
        /// Configured cap in bytes.
        max_bytes: u64,
        /// Observed size, when known.
        actual: Option<u64>,
    },
    /// The response was not an HTML document.
    UnsupportedContentType {
        /// The Content-Type the server reported.
        content_type: String,
    },
    /// The body could not be decoded into text.
    DecodeFailure,
    /// Transport-level failure.
    Network,
}

impl fmt::Display for CheckFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckFailure::EmptyUrl => write!(f, "empty url"),
            CheckFailure::InvalidUrl => write!(f, "invalid url"),
            CheckFailure::HttpStatus(code) => write!(f, "http status {code}"),
            CheckFailure::Timeout => write!(f, "timeout"),
            CheckFailure::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            CheckFailure::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            CheckFailure::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            CheckFailure::DecodeFailure => write!(f, "undecodable body"),
            CheckFailure::Network => write!(f, "network error"),
        }
    }
}

/// A failed playability check: the failure kind plus the underlying detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckError {
    /// Classified failure cause.
    pub kind: CheckFailure,
    /// Human-readable detail from the layer that failed.
    pub message: String,
}

impl CheckError {
    /// Builds an error from a kind and detail message.
    pub fn new(kind: CheckFailure, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for CheckError {}

/// A failed record store operation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The request never produced a usable response.
    #[error("record store request failed: {0}")]
    Transport(String),
    /// The store answered with a non-success status.
    #[error("record store returned http status {0}")]
    HttpStatus(u16),
    /// The response body did not match the expected record payload.
    #[error("record store payload malformed: {0}")]
    Payload(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError::Transport(err.to_string())
    }
}
