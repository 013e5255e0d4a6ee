use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::{
    config::ClientConfig,
    error::{TransportError, WeatherError, truncate_body},
    model::{Coordinates, LocationCandidate, SearchResponse, WeatherResponse, WeatherSnapshot},
};

use super::WeatherProvider;

/// Client for the Open-Meteo geocoding and forecast APIs. No API key required.
#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    config: ClientConfig,
    http: Client,
}

impl Default for OpenMeteoProvider {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl OpenMeteoProvider {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// GET `url` and decode the provider envelope.
    ///
    /// Open-Meteo reports bad requests as HTTP 400 with an error envelope, so the
    /// body is decoded regardless of status. A non-2xx answer that is not an
    /// error envelope becomes [`TransportError::Status`].
    async fn fetch_envelope<T>(&self, url: Url) -> Result<T, WeatherError>
    where
        T: DeserializeOwned + Envelope,
    {
        debug!(%url, "sending request");

        let res = self.http.get(url).send().await?;
        let status = res.status();
        let body = res.text().await?;

        match serde_json::from_str::<T>(&body) {
            Ok(envelope) if status.is_success() || envelope.is_error() => Ok(envelope),
            Ok(_) => Err(TransportError::Status {
                status,
                body: truncate_body(&body),
            }
            .into()),
            Err(_) if !status.is_success() => Err(TransportError::Status {
                status,
                body: truncate_body(&body),
            }
            .into()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Response shapes that carry the provider's error flag.
trait Envelope {
    fn is_error(&self) -> bool;
}

impl Envelope for SearchResponse {
    fn is_error(&self) -> bool {
        self.error
    }
}

impl Envelope for WeatherResponse {
    fn is_error(&self) -> bool {
        self.error
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    #[instrument(skip(self), level = "debug")]
    async fn search_locations(&self, query: &str) -> Result<Vec<LocationCandidate>, WeatherError> {
        let url = self.config.search_url(query)?;
        let envelope: SearchResponse = self.fetch_envelope(url).await?;

        let candidates = envelope.into_candidates().inspect_err(|err| {
            warn!(%err, "geocoding search rejected");
        })?;
        debug!(count = candidates.len(), "geocoding search finished");
        Ok(candidates)
    }

    #[instrument(skip(self), level = "debug")]
    async fn current_weather(&self, coords: Coordinates) -> Result<WeatherSnapshot, WeatherError> {
        let url = self.config.forecast_url(coords)?;
        let envelope: WeatherResponse = self.fetch_envelope(url).await?;

        envelope.into_snapshot().inspect_err(|err| {
            warn!(%err, "current weather request rejected");
        })
    }
}
