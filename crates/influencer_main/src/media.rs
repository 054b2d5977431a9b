use anyhow::{bail, Context as _, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::{Map, Value};

/// Where generated media lives: inline as base64, or at a remote URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaReference {
    Inline(String),
    Remote(String),
}

impl MediaReference {
    /// Reads the first image entry, preferring inline data over a URL. Inline
    /// data must be valid base64.
    pub fn from_image_payload(payload: &Value) -> Result<Self> {
        let entry = first_entry(payload).context("Unexpected image payload")?;
        if let Some(data) = non_empty(entry, "b64_json") {
            STANDARD.decode(data).context("Invalid image encoding")?;
            return Ok(Self::Inline(data.to_string()));
        }
        match non_empty(entry, "url") {
            Some(url) => Ok(Self::Remote(url.to_string())),
            None => bail!("Unexpected image payload"),
        }
    }

    /// Reads the first video entry, preferring a URL over inline data.
    pub fn from_video_payload(payload: &Value) -> Result<Self> {
        let entry = first_entry(payload).context("Unexpected video payload")?;
        if let Some(url) = non_empty(entry, "url") {
            return Ok(Self::Remote(url.to_string()));
        }
        match non_empty(entry, "b64_json") {
            Some(data) => Ok(Self::Inline(data.to_string())),
            None => bail!("Unsupported video payload"),
        }
    }

    /// Decoded bytes of inline media.
    pub fn decode(&self) -> Result<Vec<u8>> {
        match self {
            Self::Inline(data) => STANDARD.decode(data).context("Invalid media encoding"),
            Self::Remote(url) => bail!("Media is hosted remotely at {url}"),
        }
    }
}

fn first_entry(payload: &Value) -> Option<&Map<String, Value>> {
    payload.get("data")?.as_array()?.first()?.as_object()
}

fn non_empty<'a>(entry: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    entry
        .get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
}
