//! Failure types for fetching a forecast.

use reqwest::StatusCode;
use thiserror::Error;

/// Why a single route attempt failed. Every variant is recoverable by moving
/// on to the next route.
#[derive(Error, Debug)]
pub enum RouteError {
    #[error("could not build relay URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("relay returned HTTP {0}")]
    Status(StatusCode),

    #[error("malformed response body: {0}")]
    Envelope(#[from] serde_json::Error),

    #[error("wrapped response has no contents field")]
    MissingContents,

    #[error("forecast service rejected the request ({code}): {message}")]
    Rejected { code: String, message: String },

    #[error("response has no forecast items")]
    MissingItems,
}

impl RouteError {
    /// Whether the relay delivered a well-formed upstream answer that the
    /// forecast service itself refused.
    pub fn is_upstream_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }
}

/// One failed route and its cause.
#[derive(Debug)]
pub struct RouteFailure {
    pub route: String,
    pub error: RouteError,
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("all {} transport routes failed", .failures.len())]
    AllRoutesExhausted { failures: Vec<RouteFailure> },

    #[error("invalid forecast endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

impl FetchError {
    /// Failures collected while walking the route list, if any.
    pub fn route_failures(&self) -> &[RouteFailure] {
        match self {
            Self::AllRoutesExhausted { failures } => failures.as_slice(),
            _ => &[],
        }
    }
}
