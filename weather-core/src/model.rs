use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{TransportError, WeatherError};

/// One match returned by the geocoding search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationCandidate {
    pub id: i64,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub elevation: Option<f64>,
    #[serde(default)]
    pub feature_code: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub country_id: Option<i64>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub population: Option<u64>,
}

impl LocationCandidate {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    /// Country name, or an empty string when the provider did not send one.
    pub fn country_name(&self) -> &str {
        self.country.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// A single current-weather reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Air temperature in °C.
    pub temperature: f64,
    /// Wind speed in km/h.
    pub windspeed: f64,
    /// Wind direction in degrees.
    pub winddirection: f64,
    pub weathercode: i32,
    pub is_day: u8,
    /// Reading time as sent by the provider, usually `2024-03-01T14:00`.
    pub time: String,
}

impl WeatherSnapshot {
    pub fn is_day(&self) -> bool {
        self.is_day != 0
    }

    pub fn condition(&self) -> WeatherCode {
        WeatherCode::from_wmo_code(self.weathercode)
    }

    /// `time` as a local timestamp, if it is in one of the ISO 8601 forms Open-Meteo uses.
    pub fn local_time(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.time, "%Y-%m-%dT%H:%M")
            .or_else(|_| NaiveDateTime::parse_from_str(&self.time, "%Y-%m-%dT%H:%M:%S"))
            .ok()
    }
}

/// WMO weather interpretation codes, grouped the way Open-Meteo documents them.
/// See: https://open-meteo.com/en/docs#weathervariables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherCode {
    ClearSky,
    PartlyCloudy,
    Overcast,
    Fog,
    Drizzle,
    FreezingDrizzle,
    Rain,
    FreezingRain,
    Snow,
    RainShowers,
    SnowShowers,
    Thunderstorm,
    Unknown(i32),
}

impl WeatherCode {
    pub fn from_wmo_code(code: i32) -> Self {
        match code {
            0 => Self::ClearSky,
            1 | 2 => Self::PartlyCloudy,
            3 => Self::Overcast,
            45 | 48 => Self::Fog,
            51 | 53 | 55 => Self::Drizzle,
            56 | 57 => Self::FreezingDrizzle,
            61 | 63 | 65 => Self::Rain,
            66 | 67 => Self::FreezingRain,
            71 | 73 | 75 | 77 => Self::Snow,
            80..=82 => Self::RainShowers,
            85 | 86 => Self::SnowShowers,
            95 | 96 | 99 => Self::Thunderstorm,
            other => Self::Unknown(other),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::ClearSky => "Clear sky",
            Self::PartlyCloudy => "Partly cloudy",
            Self::Overcast => "Overcast",
            Self::Fog => "Fog",
            Self::Drizzle => "Drizzle",
            Self::FreezingDrizzle => "Freezing drizzle",
            Self::Rain => "Rain",
            Self::FreezingRain => "Freezing rain",
            Self::Snow => "Snow",
            Self::RainShowers => "Rain showers",
            Self::SnowShowers => "Snow showers",
            Self::Thunderstorm => "Thunderstorm",
            Self::Unknown(_) => "Unknown",
        }
    }
}

impl std::fmt::Display for WeatherCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// Envelope of `GET /search`.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    /// Absent when nothing matched.
    #[serde(default)]
    pub results: Vec<LocationCandidate>,
    #[serde(default)]
    pub generationtime_ms: Option<f64>,
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

impl SearchResponse {
    pub fn into_candidates(self) -> Result<Vec<LocationCandidate>, WeatherError> {
        if self.error {
            return Err(WeatherError::api(self.reason.unwrap_or_default()));
        }
        Ok(self.results)
    }
}

/// Envelope of `GET /forecast?current_weather=true`.
#[derive(Debug, Deserialize)]
pub struct WeatherResponse {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub generationtime_ms: Option<f64>,
    #[serde(default)]
    pub utc_offset_seconds: Option<i32>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub elevation: Option<f64>,
    #[serde(default)]
    pub current_weather: Option<WeatherSnapshot>,
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

impl WeatherResponse {
    pub fn into_snapshot(self) -> Result<WeatherSnapshot, WeatherError> {
        if self.error {
            return Err(WeatherError::api(self.reason.unwrap_or_default()));
        }
        self.current_weather
            .ok_or(WeatherError::Transport(TransportError::MissingPayload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn search_response_without_results_is_empty() {
        let parsed: SearchResponse =
            serde_json::from_str(r#"{"generationtime_ms": 0.4}"#).expect("valid envelope");
        let candidates = parsed.into_candidates().expect("no error flag");
        assert!(candidates.is_empty());
    }

    #[test]
    fn search_response_error_flag_hides_payload() {
        let parsed: SearchResponse = serde_json::from_str(
            r#"{"error": true, "reason": "Parameter count must be between 1 and 100", "results": [
                {"id": 1, "name": "Ghost", "latitude": 0.0, "longitude": 0.0}
            ]}"#,
        )
        .expect("valid envelope");

        let err = parsed.into_candidates().unwrap_err();
        assert!(err.is_api());
        assert!(err.to_string().contains("Parameter count must be between 1 and 100"));
    }

    #[test]
    fn candidate_tolerates_missing_optional_fields() {
        let candidate: LocationCandidate = serde_json::from_str(
            r#"{"id": 2988507, "name": "Paris", "latitude": 48.85341, "longitude": 2.3488}"#,
        )
        .expect("minimal candidate");

        assert_eq!(candidate.country_name(), "");
        assert_eq!(candidate.population, None);
        assert_eq!(
            candidate.coordinates(),
            Coordinates { latitude: 48.85341, longitude: 2.3488 }
        );
    }

    #[test]
    fn weather_response_decodes_current_weather() {
        let parsed: WeatherResponse = serde_json::from_str(
            r#"{
                "latitude": 48.86, "longitude": 2.35, "generationtime_ms": 0.1,
                "utc_offset_seconds": 0, "timezone": "GMT", "elevation": 43.0,
                "current_weather": {
                    "temperature": 12.3, "windspeed": 9.4, "winddirection": 250.0,
                    "weathercode": 3, "is_day": 1, "time": "2024-03-01T14:00"
                }
            }"#,
        )
        .expect("valid envelope");

        let snapshot = parsed.into_snapshot().expect("payload present");
        assert_eq!(snapshot.temperature, 12.3);
        assert!(snapshot.is_day());
        assert_eq!(snapshot.condition(), WeatherCode::Overcast);
        let local = snapshot.local_time().expect("ISO 8601 time");
        assert_eq!(local.date(), NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(local.hour(), 14);
    }

    #[test]
    fn weather_response_error_flag_wins() {
        let parsed: WeatherResponse = serde_json::from_str(
            r#"{"error": true, "reason": "Latitude must be in range of -90 to 90°. Given: 91.0."}"#,
        )
        .expect("valid envelope");

        let err = parsed.into_snapshot().unwrap_err();
        assert!(err.to_string().contains("Given: 91.0."));
    }

    #[test]
    fn weather_response_without_payload_is_transport_error() {
        let parsed: WeatherResponse = serde_json::from_str(r#"{"latitude": 1.0}"#).unwrap();
        let err = parsed.into_snapshot().unwrap_err();
        assert!(matches!(err, WeatherError::Transport(TransportError::MissingPayload)));
    }

    #[test]
    fn snapshot_time_accepts_seconds() {
        let snapshot: WeatherSnapshot = serde_json::from_str(
            r#"{"temperature": 1.0, "windspeed": 2.0, "winddirection": 3.0,
                "weathercode": 0, "is_day": 0, "time": "2024-03-01T14:00:30"}"#,
        )
        .unwrap();
        assert_eq!(snapshot.local_time().map(|t| t.second()), Some(30));
        assert!(!snapshot.is_day());
    }

    #[test]
    fn unexpected_time_format_does_not_fail_decoding() {
        let parsed: WeatherResponse = serde_json::from_str(
            r#"{"current_weather": {"temperature": 4.5, "windspeed": 2.0, "winddirection": 90.0,
                "weathercode": 61, "is_day": 1, "time": "Fri, 01 Mar 2024 14:00 GMT"}}"#,
        )
        .expect("time is kept as sent");

        let snapshot = parsed.into_snapshot().expect("payload present");
        assert_eq!(snapshot.time, "Fri, 01 Mar 2024 14:00 GMT");
        assert_eq!(snapshot.local_time(), None);
        assert_eq!(snapshot.condition(), WeatherCode::Rain);
    }

    #[test]
    fn wmo_codes_map_to_conditions() {
        assert_eq!(WeatherCode::from_wmo_code(0), WeatherCode::ClearSky);
        assert_eq!(WeatherCode::from_wmo_code(2), WeatherCode::PartlyCloudy);
        assert_eq!(WeatherCode::from_wmo_code(48), WeatherCode::Fog);
        assert_eq!(WeatherCode::from_wmo_code(81), WeatherCode::RainShowers);
        assert_eq!(WeatherCode::from_wmo_code(99), WeatherCode::Thunderstorm);
        assert_eq!(WeatherCode::from_wmo_code(42), WeatherCode::Unknown(42));
        assert_eq!(WeatherCode::from_wmo_code(42).to_string(), "Unknown");
    }
}
