//! Plain-text rendering of session state.

use std::fmt::Write;

use chrono::Local;
use wxdash_core::{CurrentWeather, DailyForecast, SessionState, TemperatureUnit};

pub fn current(weather: &CurrentWeather, unit: TemperatureUnit) -> String {
    let temps = weather.display(unit);
    let symbol = unit.symbol();
    let mut out = String::new();

    let _ = writeln!(out, "{}: {}", weather.location_name, weather.condition.description);
    let _ = writeln!(
        out,
        "  Temperature  {}{symbol} (feels like {}{symbol})",
        temps.temperature, temps.feels_like
    );
    let _ = writeln!(out, "  Humidity     {}%", weather.humidity_pct);
    let _ = writeln!(out, "  Wind         {} m/s", weather.wind_speed_mps);
    let _ = writeln!(out, "  Pressure     {} hPa", weather.pressure_hpa);
    if let Some(observed) = weather.observed_at {
        let _ = writeln!(out, "  Observed     {}", observed.with_timezone(&Local).format("%H:%M"));
    }

    out
}

/// Forecast table, or `None` when there is nothing to show.
pub fn forecast(days: &[DailyForecast], unit: TemperatureUnit) -> Option<String> {
    if days.is_empty() {
        return None;
    }

    let symbol = unit.symbol();
    let mut out = String::new();

    let _ = writeln!(out, "{}-Day Forecast", days.len());
    let _ = writeln!(
        out,
        "{:<12}  {:<20}  {:>6}  {:>15}  {:>8}  {:>9}",
        "Date", "Weather", "Avg", "Min / Max", "Humidity", "Wind"
    );

    for day in days {
        let temps = day.display(unit);
        let _ = writeln!(
            out,
            "{:<12}  {:<20}  {:>6}  {:>15}  {:>8}  {:>9}",
            day.date_label,
            day.condition.description,
            format!("{}{symbol}", temps.avg),
            format!("{}{symbol} / {}{symbol}", temps.min, temps.max),
            format!("{}%", day.humidity_pct),
            format!("{:.1} m/s", day.wind_speed_mps),
        );
    }

    Some(out)
}

pub fn state(state: &SessionState) -> String {
    let mut out = String::new();

    if let Some(error) = &state.last_error {
        let _ = writeln!(out, "! {error}\n");
    }
    if let Some(weather) = &state.current_weather {
        out.push_str(&current(weather, state.unit));
        out.push('\n');
    }
    if let Some(table) = forecast(&state.daily_forecast, state.unit) {
        out.push_str(&table);
    }

    out
}

pub fn history(entries: &[String]) -> String {
    if entries.is_empty() {
        return "No recent searches.".to_string();
    }

    let mut out = String::from("Recent searches:");
    for (i, city) in entries.iter().enumerate() {
        let _ = write!(out, "\n  {}. {city}", i + 1);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use wxdash_core::Condition;

    fn weather() -> CurrentWeather {
        CurrentWeather {
            location_name: "London".into(),
            temperature_c: 7.5,
            feels_like_c: 4.9,
            humidity_pct: 81,
            pressure_hpa: 1009,
            wind_speed_mps: 4.6,
            condition: Condition {
                main: "Rain".into(),
                description: "light rain".into(),
                icon_code: "10d".into(),
            },
            observed_at: None,
        }
    }

    fn day() -> DailyForecast {
        DailyForecast {
            date_label: "Mon, Jan 15".into(),
            avg_temperature_c: 23.0,
            min_temperature_c: 20.0,
            max_temperature_c: 26.0,
            condition: Condition {
                main: "Clear".into(),
                description: "clear sky".into(),
                icon_code: "01d".into(),
            },
            humidity_pct: 70,
            wind_speed_mps: 3.0,
        }
    }

    #[test]
    fn current_uses_rounded_temperatures() {
        let text = current(&weather(), TemperatureUnit::Celsius);
        assert!(text.contains("London: light rain"));
        assert!(text.contains("8°C (feels like 5°C)"));

        let text = current(&weather(), TemperatureUnit::Fahrenheit);
        // 7.5 °C = 45.5 °F, 4.9 °C = 40.82 °F
        assert!(text.contains("46°F (feels like 41°F)"));
    }

    #[test]
    fn forecast_rows_show_avg_min_max() {
        let text = forecast(&[day()], TemperatureUnit::Celsius).unwrap();
        assert!(text.starts_with("1-Day Forecast"));
        assert!(text.contains("Mon, Jan 15"));
        assert!(text.contains("23°C"));
        assert!(text.contains("20°C / 26°C"));
        assert!(text.contains("3.0 m/s"));
    }

    #[test]
    fn empty_forecast_is_hidden() {
        assert!(forecast(&[], TemperatureUnit::Celsius).is_none());
    }

    #[test]
    fn state_shows_error_and_partial_data() {
        let state = SessionState {
            current_weather: Some(weather()),
            last_error: Some("Failed to fetch weather data. Please try again.".into()),
            ..Default::default()
        };

        let text = super::state(&state);
        assert!(text.starts_with("! Failed to fetch weather data"));
        assert!(text.contains("London"));
        assert!(!text.contains("Forecast"));
    }

    #[test]
    fn history_lists_entries_in_order() {
        assert_eq!(history(&[]), "No recent searches.");
        assert_eq!(
            history(&["Paris".to_string(), "Tokyo".to_string()]),
            "Recent searches:\n  1. Paris\n  2. Tokyo"
        );
    }
}
