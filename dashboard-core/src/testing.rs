//! Scripted in-memory `WeatherApi` used by the dashboard tests.

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::Notify;

use crate::{
    model::{CurrentWeather, GeoMatch},
    provider::WeatherApi,
};

#[derive(Debug, Default)]
pub(crate) struct FakeApi {
    places: Mutex<HashMap<String, Vec<GeoMatch>>>,
    failing_geocode: Mutex<HashSet<String>>,
    forecast: Mutex<Option<CurrentWeather>>,
    geocode_gates: Mutex<HashMap<String, Arc<Notify>>>,
    forecast_gate: Mutex<Option<Arc<Notify>>>,
    geocode_calls: Mutex<Vec<(String, u32)>>,
    forecast_calls: Mutex<Vec<(f64, f64)>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_places(self, query: &str, places: Vec<GeoMatch>) -> Self {
        self.places.lock().insert(query.to_string(), places);
        self
    }

    pub fn with_failing_geocode(self, query: &str) -> Self {
        self.failing_geocode.lock().insert(query.to_string());
        self
    }

    /// Without this every forecast request fails.
    pub fn with_forecast(self, current: CurrentWeather) -> Self {
        *self.forecast.lock() = Some(current);
        self
    }

    /// Geocoding `query` blocks until the returned gate is notified.
    pub fn gate_geocode(&self, query: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.geocode_gates
            .lock()
            .insert(query.to_string(), Arc::clone(&gate));
        gate
    }

    pub fn gate_forecast(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.forecast_gate.lock() = Some(Arc::clone(&gate));
        gate
    }

    pub fn geocode_calls(&self) -> Vec<(String, u32)> {
        self.geocode_calls.lock().clone()
    }

    pub fn forecast_calls(&self) -> Vec<(f64, f64)> {
        self.forecast_calls.lock().clone()
    }
}

#[async_trait]
impl WeatherApi for FakeApi {
    async fn geocode(&self, name: &str, count: u32) -> Result<Vec<GeoMatch>> {
        self.geocode_calls.lock().push((name.to_string(), count));

        let gate = self.geocode_gates.lock().get(name).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if self.failing_geocode.lock().contains(name) {
            return Err(anyhow!("connection reset while geocoding {name}"));
        }

        let mut places = self.places.lock().get(name).cloned().unwrap_or_default();
        places.truncate(count as usize);
        Ok(places)
    }

    async fn current_weather(&self, latitude: f64, longitude: f64) -> Result<CurrentWeather> {
        self.forecast_calls.lock().push((latitude, longitude));

        let gate = self.forecast_gate.lock().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        self.forecast
            .lock()
            .clone()
            .ok_or_else(|| anyhow!("forecast service returned 503"))
    }
}

pub(crate) fn geo(id: u64, name: &str, country: &str, latitude: f64, longitude: f64) -> GeoMatch {
    GeoMatch {
        id,
        name: name.to_string(),
        latitude,
        longitude,
        country: country.to_string(),
    }
}

pub(crate) fn sunny(temperature: f64) -> CurrentWeather {
    CurrentWeather {
        temperature,
        windspeed: 7.5,
        winddirection: 180.0,
        weathercode: 0,
        time: Some("2026-10-18T12:00".to_string()),
        is_day: Some(1),
    }
}
