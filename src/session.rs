//! Session shared by every accessor of a project: transport plus the bearer token.

use crate::error::{QoreError, Result};
use crate::transport::{ApiRequest, HttpTransport, Method, Transport};
use serde::Serialize;
use serde_json::Value;
use std::sync::{Arc, RwLock};

/// Transport and token for one signed-in (or anonymous) client.
/// Clones share the token: signing in or out affects every accessor built from this session.
#[derive(Clone)]
pub struct Session {
    transport: Arc<dyn Transport>,
    token: Arc<RwLock<Option<String>>>,
}

impl Session {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Session {
            transport,
            token: Arc::new(RwLock::new(None)),
        }
    }

    /// Session over the default HTTP transport (endpoint from `QORE_SERVER` or the production default).
    pub fn http() -> Self {
        Session::new(Arc::new(HttpTransport::default()))
    }

    pub fn with_token(self, token: impl Into<String>) -> Self {
        self.set_token(Some(token.into()));
        self
    }

    /// Current `Authorization` header value, read at call time.
    pub fn token(&self) -> Option<String> {
        self.token.read().ok().and_then(|g| g.clone())
    }

    pub fn set_token(&self, token: Option<String>) {
        if let Ok(mut guard) = self.token.write() {
            *guard = token;
        }
    }

    pub fn endpoint(&self) -> String {
        self.transport.endpoint()
    }

    /// Send a request with the current token attached.
    pub async fn send(&self, request: ApiRequest) -> Result<Value> {
        let request = request.token(self.token());
        self.transport.call(request).await
    }

    /// Send a request without any `Authorization` header, e.g. to sign in.
    pub async fn send_anonymous(&self, request: ApiRequest) -> Result<Value> {
        self.transport.call(request.token(None)).await
    }

    pub async fn get(&self, path: String) -> Result<Value> {
        self.send(ApiRequest::new(Method::Get, path)).await
    }

    pub async fn delete(&self, path: String) -> Result<Value> {
        self.send(ApiRequest::new(Method::Delete, path)).await
    }

    pub async fn post<B: Serialize>(&self, path: String, body: &B) -> Result<Value> {
        self.send(ApiRequest::new(Method::Post, path).body(to_body(body)?)).await
    }

    pub async fn patch<B: Serialize>(&self, path: String, body: &B) -> Result<Value> {
        self.send(ApiRequest::new(Method::Patch, path).body(to_body(body)?)).await
    }
}

pub(crate) fn to_body<B: Serialize>(body: &B) -> Result<Value> {
    serde_json::to_value(body).map_err(|e| QoreError::Decode(e.to_string()))
}
