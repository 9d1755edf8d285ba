//! The dashboard component: city input, suggestions and the current reading.
//!
//! All state sits behind one mutex that is never held across an `.await`, so
//! a `Dashboard` can be shared (`Arc`) between an input handler and a submit
//! handler running concurrently.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::{
    Config,
    error::FetchError,
    model::{Suggestion, WeatherResult},
    provider::WeatherApi,
    suggest::{filter_suggestions, should_query},
};

/// Snapshot of everything the view renders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    pub city: String,
    pub suggestions: Vec<Suggestion>,
    pub suggestions_visible: bool,
    pub loading: bool,
    pub error: Option<String>,
    pub weather: Option<WeatherResult>,
}

impl UiState {
    fn clear_suggestions(&mut self) {
        self.suggestions.clear();
        self.suggestions_visible = false;
    }
}

#[derive(Debug, Default)]
struct Inner {
    ui: UiState,
    /// Sequence number of the latest input event; suggestion responses
    /// tagged with anything older are dropped.
    suggestion_seq: u64,
}

#[derive(Debug)]
pub struct Dashboard {
    api: Arc<dyn WeatherApi>,
    suggestion_count: u32,
    min_query_len: usize,
    inner: Mutex<Inner>,
}

impl Dashboard {
    pub fn new(api: Arc<dyn WeatherApi>, config: &Config) -> Self {
        Self {
            api,
            suggestion_count: config.suggestion_count,
            min_query_len: config.min_query_len,
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn state(&self) -> UiState {
        self.inner.lock().ui.clone()
    }

    /// Input change handler: stores the raw text and refreshes suggestions.
    ///
    /// Returns the suggestion list as it stands once this call finishes,
    /// which may belong to a newer input if this response arrived late.
    pub async fn set_city(&self, text: &str) -> Vec<Suggestion> {
        let seq = {
            let mut inner = self.inner.lock();
            inner.suggestion_seq += 1;
            inner.ui.city = text.to_string();

            if !should_query(text, self.min_query_len) {
                inner.ui.clear_suggestions();
                return Vec::new();
            }
            inner.suggestion_seq
        };

        let outcome = self.api.geocode(text, self.suggestion_count).await;

        let mut inner = self.inner.lock();
        if inner.suggestion_seq != seq {
            tracing::debug!(
                query = text,
                seq,
                latest = inner.suggestion_seq,
                "dropping stale suggestions"
            );
            return inner.ui.suggestions.clone();
        }

        match outcome {
            Ok(matches) => {
                let suggestions = filter_suggestions(text, matches);
                inner.ui.suggestions_visible = !suggestions.is_empty();
                inner.ui.suggestions = suggestions;
            }
            Err(err) => {
                tracing::debug!(query = text, error = ?err, "suggestion lookup failed");
                inner.ui.clear_suggestions();
            }
        }

        inner.ui.suggestions.clone()
    }

    /// Copy the chosen suggestion into the city field and close the panel.
    /// Does not fetch weather; submitting is a separate step.
    pub fn select_suggestion(&self, index: usize) -> Option<Suggestion> {
        let mut inner = self.inner.lock();
        let chosen = inner.ui.suggestions.get(index).cloned()?;

        // any lookup still in flight must not reopen the panel
        inner.suggestion_seq += 1;
        inner.ui.city = chosen.name.clone();
        inner.ui.clear_suggestions();

        Some(chosen)
    }

    /// Submit handler: geocode the current city, then fetch its weather.
    ///
    /// An empty (after trimming) city is a no-op and returns `Ok(None)`.
    pub async fn fetch_weather(&self) -> Result<Option<WeatherResult>, FetchError> {
        let city = {
            let mut inner = self.inner.lock();
            let city = inner.ui.city.trim().to_string();
            if city.is_empty() {
                return Ok(None);
            }
            inner.ui.loading = true;
            inner.ui.error = None;
            city
        };
        let mut loading = LoadingGuard {
            inner: &self.inner,
            armed: true,
        };

        let outcome = self.lookup(&city).await;

        // loading and the outcome change under one lock so no snapshot sees both
        let mut inner = self.inner.lock();
        inner.ui.loading = false;
        loading.armed = false;
        match &outcome {
            Ok(result) => {
                tracing::info!(city = %result.city, country = %result.country, "weather updated");
                inner.ui.weather = Some(result.clone());
            }
            Err(err) => {
                tracing::warn!(city = %city, error = %err.detail(), "weather lookup failed");
                inner.ui.weather = None;
                inner.ui.error = Some(err.to_string());
            }
        }

        outcome.map(Some)
    }

    /// Replace the city text without a suggestion lookup and submit it, as
    /// when a search arrives pre-filled.
    pub async fn submit_city(&self, city: &str) -> Result<Option<WeatherResult>, FetchError> {
        {
            let mut inner = self.inner.lock();
            inner.suggestion_seq += 1;
            inner.ui.city = city.to_string();
            inner.ui.clear_suggestions();
        }
        self.fetch_weather().await
    }

    async fn lookup(&self, city: &str) -> Result<WeatherResult, FetchError> {
        let place = self
            .api
            .geocode(city, 1)
            .await?
            .into_iter()
            .next()
            .ok_or(FetchError::CityNotFound)?;

        let current = self
            .api
            .current_weather(place.latitude, place.longitude)
            .await?;

        Ok(WeatherResult::new(&place, &current))
    }
}

/// Clears `loading` when the `fetch_weather` future is dropped mid-request.
/// Normal completion disarms it after clearing `loading` itself.
struct LoadingGuard<'a> {
    inner: &'a Mutex<Inner>,
    armed: bool,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            self.inner.lock().ui.loading = false;
        }
    }
}
