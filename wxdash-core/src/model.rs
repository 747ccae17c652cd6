use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    error::InvalidCity,
    units::{TemperatureUnit, to_display},
};

pub const CITY_MIN_CHARS: usize = 2;
pub const CITY_MAX_CHARS: usize = 50;

/// Weather condition as reported by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// Coarse group, e.g. "Rain" or "Clouds".
    pub main: String,
    pub description: String,
    pub icon_code: String,
}

impl Condition {
    pub fn unknown() -> Self {
        Self {
            main: "Unknown".to_string(),
            description: "Unknown".to_string(),
            icon_code: String::new(),
        }
    }
}

/// Current-weather snapshot. Replaced wholesale on every successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub location_name: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub wind_speed_mps: f64,
    pub condition: Condition,
    pub observed_at: Option<DateTime<Utc>>,
}

/// Rounded temperatures for the current snapshot in the requested unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentDisplay {
    pub temperature: i64,
    pub feels_like: i64,
}

impl CurrentWeather {
    pub fn display(&self, unit: TemperatureUnit) -> CurrentDisplay {
        CurrentDisplay {
            temperature: to_display(self.temperature_c, unit),
            feels_like: to_display(self.feels_like_c, unit),
        }
    }
}

/// One raw 3-hour forecast slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    pub timestamp: i64,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub condition: Condition,
}

impl ForecastSample {
    pub fn time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }
}

/// Per-day summary derived from [`ForecastSample`]s.
///
/// Condition, humidity and wind come from the first sample of the day;
/// temperatures are aggregated over all of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date_label: String,
    pub avg_temperature_c: f64,
    pub min_temperature_c: f64,
    pub max_temperature_c: f64,
    pub condition: Condition,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyDisplay {
    pub avg: i64,
    pub min: i64,
    pub max: i64,
}

impl DailyForecast {
    pub fn display(&self, unit: TemperatureUnit) -> DailyDisplay {
        DailyDisplay {
            avg: to_display(self.avg_temperature_c, unit),
            min: to_display(self.min_temperature_c, unit),
            max: to_display(self.max_temperature_c, unit),
        }
    }
}

/// Validate raw city input from the user and return it trimmed.
pub fn validate_city(input: &str) -> Result<&str, InvalidCity> {
    let city = input.trim();
    let len = city.chars().count();

    if len < CITY_MIN_CHARS {
        return Err(InvalidCity::TooShort { min: CITY_MIN_CHARS });
    }
    if len > CITY_MAX_CHARS {
        return Err(InvalidCity::TooLong { max: CITY_MAX_CHARS });
    }

    Ok(city)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn condition() -> Condition {
        Condition {
            main: "Clouds".into(),
            description: "broken clouds".into(),
            icon_code: "04d".into(),
        }
    }

    #[test]
    fn validate_city_trims_and_bounds() {
        assert_eq!(validate_city("  Oslo "), Ok("Oslo"));
        assert_eq!(validate_city(" a "), Err(InvalidCity::TooShort { min: 2 }));
        assert_eq!(validate_city(""), Err(InvalidCity::TooShort { min: 2 }));

        let long = "x".repeat(51);
        assert_eq!(validate_city(&long), Err(InvalidCity::TooLong { max: 50 }));
        assert!(validate_city(&"x".repeat(50)).is_ok());
    }

    #[test]
    fn validate_city_counts_characters_not_bytes() {
        // 2 chars, 4 bytes
        assert_eq!(validate_city("Åö"), Ok("Åö"));
    }

    #[test]
    fn all_display_call_sites_share_rounding() {
        for raw in [-12.5, -0.5, 0.5, 12.5, 22.49, 37.777] {
            let current = CurrentWeather {
                location_name: "X".into(),
                temperature_c: raw,
                feels_like_c: raw,
                humidity_pct: 50,
                pressure_hpa: 1013,
                wind_speed_mps: 1.0,
                condition: condition(),
                observed_at: None,
            };
            let day = DailyForecast {
                date_label: "Mon, Jan 1".into(),
                avg_temperature_c: raw,
                min_temperature_c: raw,
                max_temperature_c: raw,
                condition: condition(),
                humidity_pct: 50,
                wind_speed_mps: 1.0,
            };

            for unit in [TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit] {
                let expected = to_display(raw, unit);
                let c = current.display(unit);
                let d = day.display(unit);
                assert_eq!(c.temperature, expected);
                assert_eq!(c.feels_like, expected);
                assert_eq!(d.avg, expected);
                assert_eq!(d.min, expected);
                assert_eq!(d.max, expected);
            }
        }
    }
}
