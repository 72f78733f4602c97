//! HTTP transport: one JSON call per request, bearer token attached, endpoint resolved at call time.

use crate::error::{QoreError, Result};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::sync::{Arc, RwLock};
use std::time::Instant;
use tracing::{debug, warn};
use url::Url;

/// Production endpoint used when neither an override nor `QORE_SERVER` is set.
pub const DEFAULT_ENDPOINT: &str = "https://p-qore-dot-pti-feedloop.et.r.appspot.com";
/// Environment variable read on every call to select the backend.
pub const ENDPOINT_ENV: &str = "QORE_SERVER";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(m: Method) -> Self {
        match m {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One API call. `token` is sent verbatim as the `Authorization` header.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
    pub query: Vec<(String, String)>,
    pub token: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        ApiRequest {
            method,
            path: path.into(),
            body: None,
            query: Vec::new(),
            token: None,
        }
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Append `limit`/`offset` only when set.
    pub fn page(mut self, limit: Option<u32>, offset: Option<u32>) -> Self {
        if let Some(limit) = limit {
            self = self.query("limit", limit);
        }
        if let Some(offset) = offset {
            self = self.query("offset", offset);
        }
        self
    }

    pub fn token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }
}

/// Sends API requests. The HTTP implementation is [`HttpTransport`]; tests substitute recorders.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn call(&self, request: ApiRequest) -> Result<Value>;

    /// Base URL the next call would use.
    fn endpoint(&self) -> String;
}

/// Base URL resolution. An explicit override wins, then `QORE_SERVER`, then [`DEFAULT_ENDPOINT`].
/// Read on every call, so changes apply to the next request of every clone.
#[derive(Clone, Debug, Default)]
pub struct Endpoint {
    override_url: Arc<RwLock<Option<String>>>,
}

impl Endpoint {
    pub fn from_env() -> Self {
        Endpoint::default()
    }

    pub fn fixed(url: impl Into<String>) -> Self {
        let endpoint = Endpoint::default();
        endpoint.set(url);
        endpoint
    }

    pub fn set(&self, url: impl Into<String>) {
        if let Ok(mut guard) = self.override_url.write() {
            *guard = Some(url.into());
        }
    }

    pub fn clear(&self) {
        if let Ok(mut guard) = self.override_url.write() {
            *guard = None;
        }
    }

    pub fn resolve(&self) -> String {
        if let Some(url) = self.override_url.read().ok().and_then(|g| g.clone()) {
            return url;
        }
        match std::env::var(ENDPOINT_ENV) {
            Ok(url) if !url.is_empty() => url,
            _ => DEFAULT_ENDPOINT.to_string(),
        }
    }
}

#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Endpoint,
}

impl HttpTransport {
    pub fn new(endpoint: Endpoint) -> Self {
        HttpTransport {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    pub fn with_client(client: reqwest::Client, endpoint: Endpoint) -> Self {
        HttpTransport { client, endpoint }
    }

    pub fn endpoint_handle(&self) -> &Endpoint {
        &self.endpoint
    }

    fn build_url(&self, request: &ApiRequest) -> Result<Url> {
        let base = self.endpoint.resolve();
        let raw = format!("{}{}", base.trim_end_matches('/'), request.path);
        let mut url = Url::parse(&raw).map_err(|e| QoreError::Endpoint(format!("{}: {}", raw, e)))?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }
        Ok(url)
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        HttpTransport::new(Endpoint::from_env())
    }
}

/// Message for a non-2xx response: the body's `message` when it is JSON carrying one.
fn error_message(status: u16, body: &[u8]) -> String {
    serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| format!("Request failed with status code {}", status))
}

#[async_trait]
impl Transport for HttpTransport {
    async fn call(&self, request: ApiRequest) -> Result<Value> {
        let url = self.build_url(&request)?;
        let mut builder = self.client.request(request.method.into(), url);
        if let Some(token) = &request.token {
            builder = builder.header(reqwest::header::AUTHORIZATION, token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let started = Instant::now();
        let response = builder.send().await.map_err(|e| {
            warn!(method = request.method.as_str(), path = %request.path, error = %e, "request failed");
            QoreError::transport(None, e.to_string())
        })?;
        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| QoreError::transport(Some(status.as_u16()), e.to_string()))?;
        debug!(
            method = request.method.as_str(),
            path = %request.path,
            status = status.as_u16(),
            duration_ms = started.elapsed().as_millis() as u64,
            "api call"
        );

        if !status.is_success() {
            let message = error_message(status.as_u16(), &bytes);
            warn!(method = request.method.as_str(), path = %request.path, status = status.as_u16(), message = %message, "api error");
            return Err(QoreError::transport(Some(status.as_u16()), message));
        }
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn endpoint(&self) -> String {
        self.endpoint.resolve()
    }
}
