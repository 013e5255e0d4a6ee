use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by a [`WeatherProvider`](crate::WeatherProvider).
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The provider answered with its own error envelope.
    #[error("API error reason {reason}")]
    Api { reason: String },

    /// The request never produced a usable envelope.
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl WeatherError {
    pub fn api(reason: impl Into<String>) -> Self {
        Self::Api { reason: reason.into() }
    }

    pub fn is_api(&self) -> bool {
        matches!(self, Self::Api { .. })
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

/// Network or decoding failure.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Response contained neither a payload nor an error flag")]
    MissingPayload,
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(TransportError::Http(err))
    }
}

impl From<serde_json::Error> for WeatherError {
    fn from(err: serde_json::Error) -> Self {
        Self::Transport(TransportError::Decode(err))
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
