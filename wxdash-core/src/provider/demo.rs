//! Offline provider with generated data, for trying the dashboard without an API key.

use async_trait::async_trait;
use chrono::Utc;

use crate::{
    error::ProviderError,
    model::{Condition, CurrentWeather, ForecastSample},
};

use super::WeatherProvider;

const SAMPLE_COUNT: i64 = 40;
const SLOT_SECS: i64 = 3 * 3600;
const CONDITIONS: [(&str, &str, &str); 3] = [
    ("Clear", "clear sky", "01d"),
    ("Clouds", "scattered clouds", "03d"),
    ("Rain", "light rain", "10d"),
];

#[derive(Debug, Clone, Default)]
pub struct DemoProvider {
    start: Option<i64>,
}

impl DemoProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fix the first forecast slot instead of using the current time.
    pub fn starting_at(timestamp: i64) -> Self {
        Self { start: Some(timestamp) }
    }
}

fn condition(index: usize) -> Condition {
    let (main, description, icon) = CONDITIONS[index % CONDITIONS.len()];
    Condition {
        main: main.to_string(),
        description: description.to_string(),
        icon_code: icon.to_string(),
    }
}

#[async_trait]
impl WeatherProvider for DemoProvider {
    async fn fetch_current(&self, city: &str) -> Result<CurrentWeather, ProviderError> {
        Ok(CurrentWeather {
            location_name: city.to_string(),
            temperature_c: 28.0,
            feels_like_c: 30.0,
            humidity_pct: 75,
            pressure_hpa: 1012,
            wind_speed_mps: 3.5,
            condition: condition(2),
            observed_at: Some(Utc::now()),
        })
    }

    async fn fetch_forecast(&self, _city: &str) -> Result<Vec<ForecastSample>, ProviderError> {
        let start = self.start.unwrap_or_else(|| Utc::now().timestamp());

        // Diurnal-ish swing between 25 and 35 degrees.
        let samples = (0..SAMPLE_COUNT)
            .map(|i| {
                let phase = (i % 8) as f64;
                ForecastSample {
                    timestamp: start + i * SLOT_SECS,
                    temperature_c: 25.0 + (phase - 4.0).abs() * 2.5,
                    humidity_pct: 65 + (i % 5) as u8 * 4,
                    wind_speed_mps: 2.0 + (i % 4) as f64 * 0.75,
                    condition: condition((i / 8) as usize),
                }
            })
            .collect();

        Ok(samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{DayBoundary, aggregate_daily};

    // 2024-01-15T00:00:00Z
    const MIDNIGHT: i64 = 1_705_276_800;

    #[tokio::test]
    async fn forecast_has_forty_three_hour_slots() {
        let samples = DemoProvider::starting_at(MIDNIGHT).fetch_forecast("Jakarta").await.unwrap();

        assert_eq!(samples.len(), 40);
        assert!(samples.windows(2).all(|w| w[1].timestamp - w[0].timestamp == SLOT_SECS));
        assert!(samples.iter().all(|s| (25.0..=35.0).contains(&s.temperature_c)));
    }

    #[tokio::test]
    async fn forecast_aggregates_into_five_days() {
        let samples = DemoProvider::starting_at(MIDNIGHT).fetch_forecast("Jakarta").await.unwrap();
        let days = aggregate_daily(&samples, DayBoundary::Utc);

        assert_eq!(days.len(), 5);
        assert_eq!(days[0].min_temperature_c, 25.0);
        assert_eq!(days[0].max_temperature_c, 35.0);
        assert_eq!(days[1].condition.main, "Clouds");
    }

    #[tokio::test]
    async fn current_echoes_city() {
        let current = DemoProvider::new().fetch_current("Lisbon").await.unwrap();
        assert_eq!(current.location_name, "Lisbon");
        assert_eq!(current.condition.description, "light rain");
    }
}
