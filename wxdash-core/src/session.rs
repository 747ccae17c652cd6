//! Search orchestration and the state shown by the dashboard.
//!
//! A [`WeatherSession`] owns the [`SessionState`] and the [`SearchHistory`].
//! Callers only read clones of them; every mutation goes through the session.
//!
//! A search fetches current weather, then the forecast. The forecast is never
//! requested unless the current-weather call succeeded. If the forecast call
//! fails, the fresh current-weather snapshot is kept and only the forecast and
//! history updates are skipped.
//!
//! Overlapping searches are allowed. Each one takes a ticket from a
//! monotonically increasing counter, and results belonging to anything other
//! than the newest ticket are dropped, so the search started last wins
//! regardless of which response arrives last.

use std::{future::Future, time::Duration};

use parking_lot::Mutex;
use serde::{Serialize, Serializer, ser::SerializeStruct};
use tracing::{debug, info, instrument, warn};

use crate::{
    aggregate::aggregate_daily,
    config::DashboardSettings,
    error::ProviderError,
    history::SearchHistory,
    model::{CurrentWeather, DailyForecast},
    provider::WeatherProvider,
    suggest::SuggestionEngine,
    units::TemperatureUnit,
};

/// Message stored in [`SessionState::last_error`] for any failed search.
pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch weather data. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SessionState {
    pub current_weather: Option<CurrentWeather>,
    /// At most five days. Empty means there is no forecast to show.
    pub daily_forecast: Vec<DailyForecast>,
    pub unit: TemperatureUnit,
    pub phase: SessionPhase,
    pub last_error: Option<String>,
}

impl SessionState {
    pub fn is_loading(&self) -> bool {
        self.phase == SessionPhase::Loading
    }
}

// `is_loading` is derived from `phase` but still part of the serialized view.
impl Serialize for SessionState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SessionState", 6)?;
        state.serialize_field("current_weather", &self.current_weather)?;
        state.serialize_field("daily_forecast", &self.daily_forecast)?;
        state.serialize_field("unit", &self.unit)?;
        state.serialize_field("phase", &self.phase)?;
        state.serialize_field("is_loading", &self.is_loading())?;
        state.serialize_field("last_error", &self.last_error)?;
        state.end()
    }
}

/// How a single [`WeatherSession::search`] call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Completed,
    /// Current weather was stored but the forecast could not be fetched.
    PartialSuccess,
    Failed,
    /// A newer search started before this one finished; its results were dropped.
    Superseded,
}

#[derive(Debug)]
struct Inner {
    state: SessionState,
    history: SearchHistory,
    latest_ticket: u64,
}

#[derive(Debug)]
pub struct WeatherSession {
    provider: Box<dyn WeatherProvider>,
    settings: DashboardSettings,
    suggestions: SuggestionEngine,
    inner: Mutex<Inner>,
}

impl WeatherSession {
    /// Create an idle session. Nothing is fetched until [`search`](Self::search).
    pub fn new(provider: Box<dyn WeatherProvider>, settings: DashboardSettings) -> Self {
        let suggestions =
            SuggestionEngine::new(settings.popular_cities.clone(), settings.max_suggestions);

        Self {
            provider,
            suggestions,
            inner: Mutex::new(Inner {
                state: SessionState::default(),
                history: SearchHistory::new(settings.history_capacity),
                latest_ticket: 0,
            }),
            settings,
        }
    }

    /// Create a session and immediately look up the configured default city.
    pub async fn start(provider: Box<dyn WeatherProvider>, settings: DashboardSettings) -> Self {
        let session = Self::new(provider, settings);
        let city = session.settings.default_city.clone();
        session.search(&city).await;
        session
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    pub fn state(&self) -> SessionState {
        self.inner.lock().state.clone()
    }

    pub fn history(&self) -> Vec<String> {
        self.inner.lock().history.entries().to_vec()
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.inner.lock().state.unit
    }

    /// Autocomplete candidates for `input` from the history and the catalogue.
    pub fn suggest(&self, input: &str) -> Vec<String> {
        let inner = self.inner.lock();
        self.suggestions.suggest(input, inner.history.entries())
    }

    /// Switch between Celsius and Fahrenheit. Stored temperatures stay in Celsius.
    pub fn toggle_unit(&self) -> TemperatureUnit {
        let mut inner = self.inner.lock();
        inner.state.unit = inner.state.unit.toggled();
        debug!(unit = %inner.state.unit, "temperature unit toggled");
        inner.state.unit
    }

    pub fn clear_history(&self) {
        self.inner.lock().history.clear();
        debug!("search history cleared");
    }

    /// Fetch current weather and forecast for `city` and update the state.
    ///
    /// Provider failures never escape; they end up in
    /// [`SessionState::last_error`] as [`FETCH_ERROR_MESSAGE`].
    #[instrument(skip(self))]
    pub async fn search(&self, city: &str) -> SearchOutcome {
        let ticket = self.begin();

        let current = match self.bounded(self.provider.fetch_current(city)).await {
            Ok(current) => current,
            Err(err) => return self.fail(ticket, SearchOutcome::Failed, &err),
        };

        if !self.apply(ticket, |inner| inner.state.current_weather = Some(current)) {
            return self.superseded(ticket);
        }

        let samples = match self.bounded(self.provider.fetch_forecast(city)).await {
            Ok(samples) => samples,
            Err(err) => return self.fail(ticket, SearchOutcome::PartialSuccess, &err),
        };

        let daily = aggregate_daily(&samples, self.settings.day_boundary);

        let applied = self.apply(ticket, |inner| {
            inner.state.daily_forecast = daily;
            inner.state.phase = SessionPhase::Success;
            inner.state.last_error = None;
            inner.history.record(city);
        });

        if !applied {
            return self.superseded(ticket);
        }

        info!(samples = samples.len(), "weather search completed");
        SearchOutcome::Completed
    }

    fn begin(&self) -> u64 {
        let mut inner = self.inner.lock();
        inner.latest_ticket += 1;
        inner.state.phase = SessionPhase::Loading;
        inner.state.last_error = None;

        debug!(ticket = inner.latest_ticket, "search started");
        inner.latest_ticket
    }

    /// Run `update` only if `ticket` still belongs to the newest search.
    fn apply(&self, ticket: u64, update: impl FnOnce(&mut Inner)) -> bool {
        let mut inner = self.inner.lock();
        if inner.latest_ticket != ticket {
            return false;
        }

        update(&mut *inner);
        true
    }

    fn fail(&self, ticket: u64, outcome: SearchOutcome, err: &ProviderError) -> SearchOutcome {
        warn!(error = %err, timeout = err.is_timeout(), ?outcome, "weather search failed");

        let applied = self.apply(ticket, |inner| {
            inner.state.phase = SessionPhase::Error;
            inner.state.last_error = Some(FETCH_ERROR_MESSAGE.to_string());
        });

        if applied { outcome } else { self.superseded(ticket) }
    }

    fn superseded(&self, ticket: u64) -> SearchOutcome {
        debug!(ticket, "discarding results of superseded search");
        SearchOutcome::Superseded
    }

    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T, ProviderError>>,
    ) -> Result<T, ProviderError> {
        match self.settings.request_timeout() {
            Some(limit) => timeout(limit, call).await,
            None => call.await,
        }
    }
}

async fn timeout<T>(
    limit: Duration,
    call: impl Future<Output = Result<T, ProviderError>>,
) -> Result<T, ProviderError> {
    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| ProviderError::Timeout(limit))?
}
