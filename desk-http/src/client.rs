use async_trait::async_trait;
use desk_core::errors::{DeskError, DeskResult};
use desk_core::transport::{ApiTransport, Method, RequestConfig, Response};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{RequestBuilder, Url};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;

/// Thin wrapper over a `reqwest::Client` with a fixed base URL and a fixed
/// `Content-Type: application/json` header.
///
/// Immutable after construction; clone the surrounding `Arc` to share it.
#[derive(Debug, Clone)]
pub struct HttpClient {
    api: reqwest::Client,
    base_url: Url,
}

impl HttpClient {
    pub fn new(config: ClientConfig) -> DeskResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let api = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            api,
            base_url: config.base_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve `path` under the base URL. A leading `/` does not escape it.
    pub fn url(&self, path: &str) -> DeskResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| DeskError::bad_request(format!("invalid request path {path:?}: {e}")).into_anyhow())
    }

    fn request(&self, method: Method, path: &str) -> DeskResult<RequestBuilder> {
        let url = self.url(path)?;
        let builder = match method {
            Method::Get => self.api.get(url),
            Method::Post => self.api.post(url),
            Method::Put => self.api.put(url),
            Method::Delete => self.api.delete(url),
        };
        Ok(builder)
    }

    fn with_config(builder: RequestBuilder, config: &RequestConfig) -> RequestBuilder {
        config
            .headers
            .iter()
            .fold(builder, |b, (name, value)| b.header(name.as_str(), value.as_str()))
    }

    async fn dispatch(&self, method: Method, path: &str, builder: RequestBuilder) -> DeskResult<Response> {
        debug!(method = method.as_str(), path, "request");

        let res = builder.send().await.map_err(|e| {
            warn!(method = method.as_str(), path, error = %e, "request failed without response");
            let err = if e.is_builder() {
                DeskError::bad_request(format!("invalid request: {e}"))
            } else {
                DeskError::network(format!("Network error: {e}"))
            };
            err.with_source(e.into()).into_anyhow()
        })?;

        let status = res.status();
        let bytes = res.bytes().await.map_err(|e| {
            DeskError::network(format!("Network error while reading response: {e}"))
                .with_source(e.into())
                .into_anyhow()
        })?;

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            match serde_json::from_slice::<Value>(&bytes) {
                Ok(v) => v,
                Err(_) if !status.is_success() => {
                    Value::String(String::from_utf8_lossy(&bytes).into_owned())
                }
                Err(e) => {
                    desk_core::bail_desk!(
                        general_error,
                        "Invalid JSON in response to {} {}: {}",
                        method.as_str(),
                        path,
                        e
                    );
                }
            }
        };

        if !status.is_success() {
            let err = DeskError::from_response(status.as_u16(), &body);
            warn!(
                method = method.as_str(),
                path,
                status = status.as_u16(),
                class = err.class_name(),
                "request rejected"
            );
            return Err(err.into_anyhow());
        }

        debug!(method = method.as_str(), path, status = status.as_u16(), "response");
        Ok(Response::new(status.as_u16(), body))
    }
}

#[async_trait]
impl ApiTransport for HttpClient {
    async fn get(&self, path: &str, params: &[(String, String)]) -> DeskResult<Response> {
        let builder = self.request(Method::Get, path)?.query(params);
        self.dispatch(Method::Get, path, builder).await
    }

    async fn post(&self, path: &str, body: &Value, config: &RequestConfig) -> DeskResult<Response> {
        let builder = Self::with_config(self.request(Method::Post, path)?.json(body), config);
        self.dispatch(Method::Post, path, builder).await
    }

    async fn put(&self, path: &str, body: &Value, config: &RequestConfig) -> DeskResult<Response> {
        let builder = Self::with_config(self.request(Method::Put, path)?.json(body), config);
        self.dispatch(Method::Put, path, builder).await
    }

    async fn delete(&self, path: &str) -> DeskResult<Response> {
        let builder = self.request(Method::Delete, path)?;
        self.dispatch(Method::Delete, path, builder).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_resolve_under_base_path() {
        let client = HttpClient::new(ClientConfig::new("http://localhost:8080/api").unwrap()).unwrap();
        assert_eq!(
            client.url("organizations/42").unwrap().as_str(),
            "http://localhost:8080/api/organizations/42"
        );
        assert_eq!(
            client.url("/teams").unwrap().as_str(),
            "http://localhost:8080/api/teams"
        );
    }
}
