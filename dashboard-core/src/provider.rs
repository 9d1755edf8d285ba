use crate::{
    Config,
    model::{CurrentWeather, GeoMatch},
    provider::openmeteo::OpenMeteoClient,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod openmeteo;

/// The two remote calls the dashboard depends on.
#[async_trait]
pub trait WeatherApi: Send + Sync + Debug {
    /// Up to `count` places matching `name`, in the service's ranking order.
    /// Zero matches is `Ok(vec![])`, not an error.
    async fn geocode(&self, name: &str, count: u32) -> anyhow::Result<Vec<GeoMatch>>;

    async fn current_weather(&self, latitude: f64, longitude: f64)
    -> anyhow::Result<CurrentWeather>;
}

/// Construct the Open-Meteo client described by `config`.
pub fn api_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherApi>> {
    let client = OpenMeteoClient::from_config(config)?;
    Ok(Arc::new(client))
}
