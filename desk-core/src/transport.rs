use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::{DeskError, DeskResult};

/// HTTP verbs the console issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// Per-request extras for `post`/`put`. Headers here are added on top of
/// the client's fixed defaults.
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    pub headers: Vec<(String, String)>,
}

impl RequestConfig {
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// A successful (2xx) response. Empty bodies decode to `Value::Null`.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: Value,
}

impl Response {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// The payload of the backend's `{ message, data }` envelope, or the
    /// whole body when it is not enveloped.
    pub fn data(&self) -> &Value {
        match &self.body {
            Value::Object(map) if map.contains_key("data") => &map["data"],
            other => other,
        }
    }

    /// Decode the payload into `T`.
    pub fn into_data<T: DeserializeOwned>(self) -> DeskResult<T> {
        let data = self.data().clone();
        serde_json::from_value(data).map_err(|e| {
            DeskError::general_error(format!("Unexpected response shape: {e}"))
                .with_source(e.into())
                .into_anyhow()
        })
    }
}

/// The request surface every resource hook talks to.
///
/// `HttpClient` in `desk-http` is the production implementation; tests
/// swap in scripted fakes. Implementations must reject any non-2xx
/// response with a [`DeskError`] built by [`DeskError::from_response`] and
/// any failure without a response with [`DeskError::network`].
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// GET `path` with query `params`.
    async fn get(&self, path: &str, params: &[(String, String)]) -> DeskResult<Response>;

    /// POST `body` to `path`.
    async fn post(&self, path: &str, body: &Value, config: &RequestConfig) -> DeskResult<Response>;

    /// PUT `body` to `path`.
    async fn put(&self, path: &str, body: &Value, config: &RequestConfig) -> DeskResult<Response>;

    /// DELETE `path`.
    async fn delete(&self, path: &str) -> DeskResult<Response>;
}
