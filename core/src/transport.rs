//! The network seam of the request client.
//!
//! `RequestClient` never opens a connection itself; it hands a finished
//! `HttpRequest` to a `Transport` and gets an `HttpResponse` back. Production
//! code uses `ReqwestTransport`; tests use `testing::ScriptedTransport`.

use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::error::TransportError;
use crate::http::{Credentials, Headers, HttpMethod, HttpRequest, HttpResponse};

/// Sends one request and returns whatever response came back.
///
/// Implementations report non-2xx statuses as ordinary responses; only
/// failures below HTTP are errors.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

/// `Transport` backed by `reqwest`.
///
/// Keeps two clients: one with a cookie store for requests asking for
/// `Credentials::Include`, one without for everything else.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    anonymous: reqwest::Client,
    credentialed: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(None)
    }

    /// Build a transport whose requests fail after `timeout`. `None` waits
    /// indefinitely.
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self, TransportError> {
        let build = |cookies: bool| {
            let mut builder = reqwest::Client::builder().cookie_store(cookies);
            if let Some(timeout) = timeout {
                builder = builder.timeout(timeout);
            }
            builder.build()
        };
        Ok(Self {
            anonymous: build(false)?,
            credentialed: build(true)?,
        })
    }
}

impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let client = match request.credentials {
            Some(Credentials::Include) => &self.credentialed,
            _ => &self.anonymous,
        };
        if let Some(mode) = request.mode {
            debug!(?mode, "request mode has no effect outside a browser");
        }

        let mut builder = client.request(to_reqwest_method(request.method), &request.url);
        for (name, value) in request.headers.iter() {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers: Headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| Some((name.as_str(), value.to_str().ok()?)))
            .collect();
        let body = response.text().await?;

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
        })
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Head => reqwest::Method::HEAD,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}
