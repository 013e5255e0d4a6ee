//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Endpoint configuration for the Open-Meteo services
//! - The `WeatherProvider` abstraction and its Open-Meteo implementation
//! - Shared domain models (location candidates, weather snapshots, envelopes)
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;

pub use config::ClientConfig;
pub use error::{TransportError, WeatherError};
pub use model::{Coordinates, LocationCandidate, WeatherCode, WeatherSnapshot};
pub use provider::{OpenMeteoProvider, WeatherProvider};
