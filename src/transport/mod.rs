//! Remote caller boundary.
//!
//! The executor and services depend on [`RemoteCaller`], not on a concrete
//! HTTP client: given a path, an optional bearer token, and an optional JSON
//! body, it yields a [`RemoteResponse`] whose status classifies as success,
//! unauthorized, or other-failure. [`http::HttpCaller`] is the production
//! implementation.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub mod http;

pub use http::HttpCaller;

use async_trait::async_trait;

/// Fallback when the error body is absent or carries no usable detail.
const GENERIC_ERROR_DETAIL: &str = "unknown server error";

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
    #[error("body decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type TransportResult<T> = Result<T, TransportError>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

/// A deferred remote call, bound to a token only at execution time.
#[derive(Clone, Debug)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub bearer: Option<String>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            bearer: None,
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Status plus raw body of a completed remote call.
#[derive(Clone, Debug)]
pub struct RemoteResponse {
    status: u16,
    body: Bytes,
}

impl RemoteResponse {
    pub fn new(status: u16, body: Bytes) -> Self {
        Self { status, body }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Only a literal 401 triggers the refresh-and-retry path.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    pub fn bytes(&self) -> &Bytes {
        &self.body
    }

    pub fn json<T: DeserializeOwned>(&self) -> TransportResult<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Best-effort human-readable message from a failure body.
    ///
    /// The backend reports errors as `{"detail": "..."}`; a missing or
    /// malformed body falls back to a generic description.
    pub fn error_detail(&self) -> String {
        let parsed: Option<serde_json::Value> = serde_json::from_slice(&self.body).ok();
        match parsed.as_ref().and_then(|v| v.get("detail")) {
            Some(serde_json::Value::String(detail)) => detail.clone(),
            Some(other) => other.to_string(),
            None => GENERIC_ERROR_DETAIL.to_string(),
        }
    }
}

/// Abstract remote call capability used by the executor and services.
#[async_trait]
pub trait RemoteCaller: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> TransportResult<RemoteResponse>;

    /// Multipart file upload; `method` is POST for new files and PUT for
    /// replacements.
    async fn upload(
        &self,
        method: HttpMethod,
        path: &str,
        file_name: &str,
        data: Vec<u8>,
    ) -> TransportResult<RemoteResponse>;
}
