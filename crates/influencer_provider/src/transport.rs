use std::time::Duration;

use anyhow::Context as _;
use reqwest::header::HeaderMap;
use reqwest::{Method, StatusCode, Url};
use serde_json::Value;

use crate::utils::format_http_context;

/// An outbound call, fully resolved by the client.
#[derive(Clone, Debug)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

#[derive(Clone, Debug)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Moves a request over the wire. Implementations report only transport
/// failures; any HTTP status, including errors, is a successful exchange.
#[async_trait::async_trait]
pub trait Transport: Send + Sync + 'static {
    async fn send(&self, request: HttpRequest) -> anyhow::Result<HttpResponse>;
}

/// Whether a transport failure was reqwest giving up on its own timeout.
pub(crate) fn is_timeout(error: &anyhow::Error) -> bool {
    error.chain().any(|cause| {
        cause
            .downcast_ref::<reqwest::Error>()
            .is_some_and(reqwest::Error::is_timeout)
    })
}

#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport that owns its own connection pool.
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(5)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }
}

impl From<reqwest::Client> for ReqwestTransport {
    fn from(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> anyhow::Result<HttpResponse> {
        let HttpRequest { method, url, headers, body } = request;
        let context = format_http_context(None, method.as_str(), &url);

        let mut builder = self.client.request(method.clone(), url.clone()).headers(headers);
        if let Some(body) = &body {
            builder = builder.json(body);
        }

        let response = builder.send().await.with_context(|| context)?;
        let status = response.status();
        let body = response
            .text()
            .await
            .with_context(|| format_http_context(Some(status), method.as_str(), &url))
            .context("Failed to read response body")?;

        Ok(HttpResponse { status, body })
    }
}
