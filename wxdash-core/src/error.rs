use std::time::Duration;

use thiserror::Error;

/// Failure reported by a [`WeatherProvider`](crate::provider::WeatherProvider).
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Failed to reach {provider}: {source}")]
    Transport {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} request failed with status {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("Failed to parse {provider} response: {source}")]
    Parse {
        provider: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Weather request timed out after {0:?}")]
    Timeout(Duration),
}

impl ProviderError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, ProviderError::Timeout(_))
    }
}

/// Rejected city input, checked by the caller before a search is issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidCity {
    #[error("City name must be at least {min} characters")]
    TooShort { min: usize },

    #[error("City name must be at most {max} characters")]
    TooLong { max: usize },
}
