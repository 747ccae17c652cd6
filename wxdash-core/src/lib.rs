//! Core library for the `wxdash` weather dashboard.
//!
//! This crate defines:
//! - The search session: fetch orchestration, loading/error state, unit toggle
//! - Forecast aggregation from 3-hourly samples into daily summaries
//! - Bounded search history and autocomplete suggestions
//! - Abstraction over weather providers, plus configuration on disk
//!
//! Rendering is left to the caller; `wxdash-cli` is one such front end.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod history;
pub mod model;
pub mod provider;
pub mod session;
pub mod suggest;
pub mod units;

pub use aggregate::{DayBoundary, aggregate_daily};
pub use config::{Config, DashboardSettings, ProviderConfig};
pub use error::{InvalidCity, ProviderError};
pub use history::SearchHistory;
pub use model::{Condition, CurrentWeather, DailyForecast, ForecastSample, validate_city};
pub use provider::{ProviderId, WeatherProvider};
pub use session::{SearchOutcome, SessionPhase, SessionState, WeatherSession};
pub use suggest::{SuggestionEngine, suggest};
pub use units::{TemperatureUnit, to_display};
