//! Error types for the request client and the table view.
//!
//! # Design
//! `RequestClient` raises exactly one error of its own, `HttpError`, for a
//! response with a non-2xx status. Everything the transport reports is passed
//! through as `TransportError` without inspection. `LoadError` is what the
//! table view records when a load does not produce a list.

use thiserror::Error;

use crate::http::HttpResponse;

/// A response whose status indicates failure.
///
/// Always wraps the concrete response so callers can read the status, the
/// headers and the body.
#[derive(Debug, Clone, Error)]
#[error("HTTP {} {}", .response.status, .response.status_text)]
pub struct HttpError {
    response: HttpResponse,
}

impl HttpError {
    pub fn new(response: HttpResponse) -> Self {
        Self { response }
    }

    pub fn status(&self) -> u16 {
        self.response.status
    }

    pub fn response(&self) -> &HttpResponse {
        &self.response
    }

    pub fn into_response(self) -> HttpResponse {
        self.response
    }
}

/// A failure below HTTP: name resolution, refused connection, timeout and the
/// like. Not categorized further.
#[derive(Debug, Error)]
#[error("transport error: {message}")]
pub struct TransportError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "request timed out".to_string()
        } else if err.is_connect() {
            "connection failed".to_string()
        } else {
            err.to_string()
        };
        Self::with_source(message, err)
    }
}

/// Errors returned by `RequestClient`.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a non-2xx status.
    #[error(transparent)]
    Http(#[from] HttpError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Rejected before any I/O.
    #[error("request url must not be empty")]
    EmptyUrl,

    #[error("request body could not be serialized: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Why a table view load ended in the failed state.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no resource address configured")]
    MissingResources,

    #[error("request failed: {0}")]
    Request(#[from] ClientError),

    /// Body was not JSON, not an array, or an element lacked a required field.
    #[error("response body is not a list of media entries: {0}")]
    Parse(#[source] serde_json::Error),
}

impl LoadError {
    /// The HTTP failure behind this error, if any.
    pub fn http_error(&self) -> Option<&HttpError> {
        match self {
            LoadError::Request(ClientError::Http(err)) => Some(err),
            _ => None,
        }
    }
}
