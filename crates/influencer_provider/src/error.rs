use std::time::Duration;

use thiserror::Error;

/// Number of body characters shown when an upstream error is displayed.
const BODY_EXCERPT_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum Error {
    /// The transport failed to complete the exchange.
    #[error(transparent)]
    Transport(anyhow::Error),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The upstream API answered with a non-success status.
    #[error("Upstream returned {status}: {}", excerpt(.body))]
    Upstream { status: u16, body: String },

    /// The status was successful but the payload broke the response contract.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Failed to decode response body as JSON")]
    Decode(#[source] serde_json::Error),

    #[error("Failed to encode request body")]
    Encode(#[source] serde_json::Error),

    #[error("Invalid value for header {name}")]
    InvalidHeader {
        name: &'static str,
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Upstream HTTP status, if the error came from a non-success response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<A> = std::result::Result<A, Error>;

fn excerpt(body: &str) -> &str {
    match body.char_indices().nth(BODY_EXCERPT_CHARS) {
        Some((index, _)) => &body[..index],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_upstream_display_truncates_body() {
        let fixture = Error::Upstream { status: 500, body: "x".repeat(500) };
        let actual = fixture.to_string();
        let expected = format!("Upstream returned 500: {}", "x".repeat(200));
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_upstream_keeps_full_body() {
        let fixture = Error::Upstream { status: 429, body: "é".repeat(300) };
        match fixture {
            Error::Upstream { body, .. } => assert_eq!(body.chars().count(), 300),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_status_only_for_upstream_errors() {
        let upstream = Error::Upstream { status: 404, body: String::new() };
        assert_eq!(upstream.status(), Some(404));
        assert_eq!(Error::MalformedResponse("x".to_string()).status(), None);
    }
}
