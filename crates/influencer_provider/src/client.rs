use std::sync::Arc;

use influencer_domain::{
    summarize_models, ImageRequest, ModelDescriptor, ModelId, ModelSummary, VideoRequest,
};
use reqwest::header::HeaderMap;
use reqwest::{Method, Url};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::cache::ModelCache;
use crate::clock::{Clock, SystemClock};
use crate::config::GatewayConfig;
use crate::error::{Error, Result};
use crate::headers::build_headers;
use crate::request::ChatRequest;
use crate::response::{completion_text, model_list};
use crate::transport::{is_timeout, HttpRequest, ReqwestTransport, Transport};
use crate::utils::format_http_context;

/// Async client for the upstream generative API.
///
/// Each instance owns its model catalog cache; separate instances never share
/// cached state. Share one instance behind an `Arc` to share the cache.
pub struct Client {
    config: GatewayConfig,
    base_url: Url,
    headers: HeaderMap,
    transport: Arc<dyn Transport>,
    cache: ModelCache,
}

impl Client {
    /// Creates a client backed by its own reqwest connection pool and the
    /// system clock.
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config.timeout).map_err(Error::Transport)?;
        Self::with_parts(config, Arc::new(transport), Arc::new(SystemClock))
    }

    /// Creates a client over a caller-supplied transport and clock.
    pub fn with_parts(
        config: GatewayConfig,
        transport: Arc<dyn Transport>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let base_url = parse_base_url(&config.base_url)?;
        let headers = build_headers(&config)?;
        let cache = ModelCache::new(config.models_ttl, clock);
        Ok(Self { config, base_url, headers, transport, cache })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Returns the upstream model catalog, served from cache while it is
    /// younger than the configured TTL.
    pub async fn list_models(&self) -> Result<Arc<Vec<ModelDescriptor>>> {
        self.cache.get_or_refresh(|| self.fetch_models()).await
    }

    /// Returns the catalog condensed and sorted for display.
    pub async fn catalog(&self) -> Result<Vec<ModelSummary>> {
        let models = self.list_models().await?;
        Ok(summarize_models(&models))
    }

    /// Sends `prompt` to a chat model and returns the text of the first choice.
    pub async fn generate_text(&self, model: &ModelId, prompt: &str) -> Result<String> {
        let request = ChatRequest::new(model.clone(), prompt);
        let body = self.post("chat/completions", &request).await?;
        completion_text(&body)
    }

    /// Returns the upstream image response as-is.
    pub async fn generate_image(&self, request: &ImageRequest) -> Result<Value> {
        self.post("images", request).await
    }

    /// Returns the upstream video response as-is.
    pub async fn generate_video(&self, request: &VideoRequest) -> Result<Value> {
        self.post("videos", request).await
    }

    async fn fetch_models(&self) -> Result<Vec<ModelDescriptor>> {
        let body = self.execute(Method::GET, "models", None).await?;
        Ok(model_list(body))
    }

    async fn post(&self, path: &str, payload: &impl Serialize) -> Result<Value> {
        let body = serde_json::to_value(payload).map_err(Error::Encode)?;
        self.execute(Method::POST, path, Some(body)).await
    }

    async fn execute(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
        let url = self.url(path)?;
        debug!(method = %method, url = %url, "Sending upstream request");

        let request = HttpRequest {
            method: method.clone(),
            url: url.clone(),
            headers: self.headers.clone(),
            body,
        };
        let timeout = self.config.timeout;
        let response = tokio::time::timeout(timeout, self.transport.send(request))
            .await
            .map_err(|_| Error::Timeout(timeout))?
            .map_err(|error| {
                if is_timeout(&error) {
                    Error::Timeout(timeout)
                } else {
                    Error::Transport(error)
                }
            })?;

        if !response.status.is_success() {
            debug!(
                context = %format_http_context(Some(response.status), method.as_str(), &url),
                "Upstream request failed"
            );
            return Err(Error::Upstream { status: response.status.as_u16(), body: response.body });
        }

        serde_json::from_str(&response.body).map_err(Error::Decode)
    }

    fn url(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|error| Error::InvalidUrl(format!("{}{path}: {error}", self.base_url)))
    }
}

/// Parses the base URL, ensuring a trailing slash so relative joins keep
/// every path segment.
fn parse_base_url(base_url: &str) -> Result<Url> {
    let mut url = Url::parse(base_url)
        .map_err(|error| Error::InvalidUrl(format!("{base_url}: {error}")))?;
    if url.cannot_be_a_base() {
        return Err(Error::InvalidUrl(format!("{base_url}: not a base URL")));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
