use crate::{Coordinates, LocationCandidate, WeatherError, WeatherSnapshot};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod open_meteo;

pub use open_meteo::OpenMeteoProvider;

/// Source of geocoding results and current weather readings.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Resolve a free-text place name to candidate locations, in provider order.
    /// An empty vector means nothing matched.
    async fn search_locations(&self, query: &str) -> Result<Vec<LocationCandidate>, WeatherError>;

    async fn current_weather(&self, coords: Coordinates) -> Result<WeatherSnapshot, WeatherError>;
}
