//! Request client with uniform JSON defaults.
//!
//! # Design
//! `RequestClient` holds a transport and an immutable `ClientConfig`, and no
//! mutable state between calls. Every verb goes through `request`, which
//! builds the `HttpRequest` with `build_request` (pure, no I/O), sends it once,
//! and turns a non-2xx response into `HttpError`.
//!
//! Precedence when building a request, lowest first:
//! 1. `content-type: application/json`, forced over the caller's headers;
//! 2. `credentials` / `mode` from `ClientConfig`;
//! 3. every field set in the per-call `RequestOptions`.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ClientError, HttpError};
use crate::http::{
    Credentials, Headers, HttpMethod, HttpRequest, HttpResponse, RequestMode, CONTENT_TYPE,
    JSON_CONTENT_TYPE,
};
use crate::transport::Transport;

/// Settings applied to every request a client sends. Fixed at construction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Send `credentials: include`.
    pub include_credentials: bool,
    /// Send `mode: cors`.
    pub use_cors_mode: bool,
}

/// Per-call overrides. Each field that is set replaces the value the client
/// computed; `headers` replaces the whole header set, forced content-type
/// included.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RequestOptions {
    pub method: Option<HttpMethod>,
    pub headers: Option<Headers>,
    pub credentials: Option<Credentials>,
    pub mode: Option<RequestMode>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
        self
    }

    pub fn headers(mut self, headers: Headers) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn mode(mut self, mode: RequestMode) -> Self {
        self.mode = Some(mode);
        self
    }

    fn apply(self, request: &mut HttpRequest) {
        if let Some(method) = self.method {
            request.method = method;
        }
        if let Some(headers) = self.headers {
            request.headers = headers;
        }
        if let Some(credentials) = self.credentials {
            request.credentials = Some(credentials);
        }
        if let Some(mode) = self.mode {
            request.mode = Some(mode);
        }
    }
}

/// HTTP client offering one method per verb over a shared request routine.
///
/// Returns the raw response on success; parsing the body is up to the caller.
#[derive(Debug, Clone)]
pub struct RequestClient<T> {
    transport: T,
    config: ClientConfig,
}

impl<T: Transport> RequestClient<T> {
    pub fn new(transport: T) -> Self {
        Self::with_config(transport, ClientConfig::default())
    }

    pub fn with_config(transport: T, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> ClientConfig {
        self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn get(
        &self,
        url: &str,
        headers: Headers,
        options: RequestOptions,
    ) -> Result<HttpResponse, ClientError> {
        self.request(HttpMethod::Get, url, headers, None, options).await
    }

    pub async fn post(
        &self,
        url: &str,
        headers: Headers,
        body: Option<&Value>,
        options: RequestOptions,
    ) -> Result<HttpResponse, ClientError> {
        self.request(HttpMethod::Post, url, headers, body, options).await
    }

    pub async fn put(
        &self,
        url: &str,
        headers: Headers,
        body: Option<&Value>,
        options: RequestOptions,
    ) -> Result<HttpResponse, ClientError> {
        self.request(HttpMethod::Put, url, headers, body, options).await
    }

    pub async fn patch(
        &self,
        url: &str,
        headers: Headers,
        body: Option<&Value>,
        options: RequestOptions,
    ) -> Result<HttpResponse, ClientError> {
        self.request(HttpMethod::Patch, url, headers, body, options).await
    }

    pub async fn head(
        &self,
        url: &str,
        headers: Headers,
        options: RequestOptions,
    ) -> Result<HttpResponse, ClientError> {
        self.request(HttpMethod::Head, url, headers, None, options).await
    }

    pub async fn delete(
        &self,
        url: &str,
        headers: Headers,
        body: Option<&Value>,
        options: RequestOptions,
    ) -> Result<HttpResponse, ClientError> {
        self.request(HttpMethod::Delete, url, headers, body, options).await
    }

    /// Build, send and classify one request.
    pub async fn request(
        &self,
        method: HttpMethod,
        url: &str,
        headers: Headers,
        body: Option<&Value>,
        options: RequestOptions,
    ) -> Result<HttpResponse, ClientError> {
        let request = self.build_request(method, url, headers, body, options)?;
        let method = request.method;
        debug!(%method, url = %request.url, "sending request");

        let response = self.transport.send(request).await?;
        if !response.is_success() {
            warn!(%method, url, status = response.status, "request failed");
            return Err(HttpError::new(response).into());
        }
        debug!(%method, url, status = response.status, "request succeeded");
        Ok(response)
    }

    /// Produce the request `request` would send, without sending it.
    ///
    /// The body is serialized only when the final method, after overrides,
    /// carries a payload.
    pub fn build_request(
        &self,
        method: HttpMethod,
        url: &str,
        headers: Headers,
        body: Option<&Value>,
        options: RequestOptions,
    ) -> Result<HttpRequest, ClientError> {
        if url.trim().is_empty() {
            return Err(ClientError::EmptyUrl);
        }

        let mut headers = headers;
        headers.insert(CONTENT_TYPE, JSON_CONTENT_TYPE);

        let mut request = HttpRequest {
            method,
            url: url.to_string(),
            headers,
            body: None,
            credentials: self.config.include_credentials.then_some(Credentials::Include),
            mode: self.config.use_cors_mode.then_some(RequestMode::Cors),
        };
        options.apply(&mut request);

        if request.method.carries_body() {
            if let Some(body) = body {
                request.body = Some(serde_json::to_string(body)?);
            }
        }
        Ok(request)
    }
}
