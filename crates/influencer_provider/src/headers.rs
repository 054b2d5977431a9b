use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};

use crate::config::GatewayConfig;
use crate::error::{Error, Result};

const JSON: &str = "application/json";
const X_TITLE: &str = "x-title";
const HTTP_REFERER: &str = "http-referer";

/// Builds the headers sent with every upstream request. `Authorization` is
/// only present when an API key is configured.
pub fn build_headers(config: &GatewayConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
    headers.insert(ACCEPT, HeaderValue::from_static(JSON));
    headers.insert(
        HeaderName::from_static(HTTP_REFERER),
        header_value("HTTP-Referer", &config.app_url)?,
    );
    headers.insert(
        HeaderName::from_static(X_TITLE),
        header_value("X-Title", &config.app_title)?,
    );

    if let Some(api_key) = config.api_key.as_deref().filter(|key| !key.is_empty()) {
        let mut value = header_value("Authorization", &format!("Bearer {api_key}"))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    Ok(headers)
}

fn header_value(name: &'static str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|source| Error::InvalidHeader { name, source })
}
