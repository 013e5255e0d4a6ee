use url::Url;

use crate::{error::WeatherError, model::Coordinates};

pub const DEFAULT_GEOCODING_BASE_URL: &str = "https://geocoding-api.open-meteo.com/v1/";
pub const DEFAULT_FORECAST_BASE_URL: &str = "https://api.open-meteo.com/v1/";

/// Endpoints used by the Open-Meteo provider.
///
/// Defaults point at the public Open-Meteo services; tests and self-hosted
/// instances can override either base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub geocoding_base_url: String,
    pub forecast_base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            geocoding_base_url: DEFAULT_GEOCODING_BASE_URL.to_string(),
            forecast_base_url: DEFAULT_FORECAST_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    pub fn new(geocoding_base_url: impl Into<String>, forecast_base_url: impl Into<String>) -> Self {
        Self {
            geocoding_base_url: geocoding_base_url.into(),
            forecast_base_url: forecast_base_url.into(),
        }
    }

    /// `{geocoding}/search?name=<query>`
    pub fn search_url(&self, query: &str) -> Result<Url, WeatherError> {
        let mut url = endpoint(&self.geocoding_base_url, "search")?;
        url.query_pairs_mut().append_pair("name", query);
        Ok(url)
    }

    /// `{forecast}/forecast?latitude=<lat>&longitude=<lon>&current_weather=true`
    pub fn forecast_url(&self, coords: Coordinates) -> Result<Url, WeatherError> {
        let mut url = endpoint(&self.forecast_base_url, "forecast")?;
        url.query_pairs_mut()
            .append_pair("latitude", &coords.latitude.to_string())
            .append_pair("longitude", &coords.longitude.to_string())
            .append_pair("current_weather", "true");
        Ok(url)
    }
}

fn endpoint(base: &str, path: &str) -> Result<Url, WeatherError> {
    let joined = format!("{}/{}", base.trim_end_matches('/'), path);
    Url::parse(&joined).map_err(|source| WeatherError::InvalidBaseUrl {
        url: base.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query_value(url: &Url, key: &str) -> Option<String> {
        url.query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    #[test]
    fn default_points_at_open_meteo() {
        let cfg = ClientConfig::default();
        let url = cfg.search_url("Berlin").expect("default url is valid");
        assert_eq!(
            url.as_str(),
            "https://geocoding-api.open-meteo.com/v1/search?name=Berlin"
        );
    }

    #[test]
    fn search_query_survives_escaping() {
        let cfg = ClientConfig::default();
        let query = "São Paulo & Rio/Niterói?x=1#frag 100%";

        let url = cfg.search_url(query).expect("url builds");

        assert!(!url.as_str().contains(' '));
        assert_eq!(url.fragment(), None);
        assert_eq!(query_value(&url, "name").as_deref(), Some(query));
    }

    #[test]
    fn trailing_slash_does_not_matter() {
        let with = ClientConfig::new("http://localhost:8080/v1/", "http://localhost:8080/v1/");
        let without = ClientConfig::new("http://localhost:8080/v1", "http://localhost:8080/v1");

        assert_eq!(with.search_url("a").unwrap(), without.search_url("a").unwrap());
        assert_eq!(
            without.search_url("a").unwrap().path(),
            "/v1/search"
        );
    }

    #[test]
    fn forecast_url_uses_full_precision_decimals() {
        let cfg = ClientConfig::default();
        let url = cfg
            .forecast_url(Coordinates { latitude: 52.52437, longitude: -0.0000001 })
            .expect("url builds");

        assert_eq!(url.path(), "/v1/forecast");
        assert_eq!(query_value(&url, "latitude").as_deref(), Some("52.52437"));
        assert_eq!(query_value(&url, "longitude").as_deref(), Some("-0.0000001"));
        assert_eq!(query_value(&url, "current_weather").as_deref(), Some("true"));
    }

    #[test]
    fn invalid_base_url_is_reported() {
        let cfg = ClientConfig::new("not a url", DEFAULT_FORECAST_BASE_URL);
        let err = cfg.search_url("x").unwrap_err();
        assert!(matches!(err, WeatherError::InvalidBaseUrl { .. }));
        assert!(err.to_string().contains("not a url"));
    }
}
