//! Core library for the `weather-dashboard` CLI.
//!
//! This crate defines:
//! - Configuration handling (endpoints, suggestion limits, banner timers)
//! - The `WeatherApi` abstraction and its Open-Meteo client
//! - The dashboard state: as-you-type suggestions, submit-to-fetch
//! - The rotating fact banner
//!
//! It is used by `dashboard-cli`, but can also back other front ends.

pub mod banner;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod provider;
pub mod suggest;

#[cfg(test)]
mod testing;

pub use banner::{Banner, BannerState};
pub use config::{BannerConfig, Config};
pub use dashboard::{Dashboard, UiState};
pub use error::FetchError;
pub use model::{CurrentWeather, GeoMatch, Suggestion, WeatherCondition, WeatherResult};
pub use provider::{WeatherApi, api_from_config, openmeteo::OpenMeteoClient};
