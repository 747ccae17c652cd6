//! Collapse 3-hourly forecast samples into per-day summaries.

use chrono::{DateTime, FixedOffset, Local, TimeZone, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::model::{Condition, DailyForecast, ForecastSample};

/// Maximum number of days emitted by [`aggregate_daily`].
pub const MAX_FORECAST_DAYS: usize = 5;

const DAY_LABEL_FORMAT: &str = "%a, %b %-d";

/// Timezone used to decide which calendar day a sample belongs to.
///
/// No special handling exists for DST transitions; a day that gains or loses
/// an hour simply has one sample more or less.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayBoundary {
    Utc,
    /// The machine's local timezone.
    #[default]
    Local,
    /// Fixed offset in seconds east of UTC.
    Offset(i32),
}

impl DayBoundary {
    /// Day grouping key, e.g. `"Mon, Jan 15"`. `None` if the timestamp or the
    /// offset is out of range.
    pub fn day_label(self, timestamp: i64) -> Option<String> {
        let utc = DateTime::<Utc>::from_timestamp(timestamp, 0)?;

        let label = match self {
            DayBoundary::Utc => format_in(&utc, &Utc),
            DayBoundary::Local => format_in(&utc, &Local),
            DayBoundary::Offset(secs) => format_in(&utc, &FixedOffset::east_opt(secs)?),
        };

        Some(label)
    }
}

fn format_in<Tz: TimeZone>(utc: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    utc.with_timezone(tz).format(DAY_LABEL_FORMAT).to_string()
}

#[derive(Debug)]
struct DayAccumulator {
    temps: Vec<f64>,
    condition: Condition,
    humidity_pct: u8,
    wind_speed_mps: f64,
}

impl DayAccumulator {
    fn first(sample: &ForecastSample) -> Self {
        Self {
            temps: Vec::with_capacity(8),
            condition: sample.condition.clone(),
            humidity_pct: sample.humidity_pct,
            wind_speed_mps: sample.wind_speed_mps,
        }
    }

    fn finish(self, date_label: String) -> DailyForecast {
        let count = self.temps.len() as f64;
        let sum: f64 = self.temps.iter().sum();
        let min = self.temps.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.temps.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        DailyForecast {
            date_label,
            avg_temperature_c: sum / count,
            min_temperature_c: min,
            max_temperature_c: max,
            condition: self.condition,
            humidity_pct: self.humidity_pct,
            wind_speed_mps: self.wind_speed_mps,
        }
    }
}

/// Group samples by calendar day and summarise each day.
///
/// Days are emitted in the order they are first seen in `samples`, and only
/// the first [`MAX_FORECAST_DAYS`] of them are kept. Input is not sorted, so
/// for unordered input these are not necessarily the earliest days.
pub fn aggregate_daily(samples: &[ForecastSample], boundary: DayBoundary) -> Vec<DailyForecast> {
    let mut days: IndexMap<String, DayAccumulator> = IndexMap::new();

    for sample in samples {
        let Some(label) = boundary.day_label(sample.timestamp) else {
            warn!(timestamp = sample.timestamp, "skipping forecast sample with invalid timestamp");
            continue;
        };

        days.entry(label)
            .or_insert_with(|| DayAccumulator::first(sample))
            .temps
            .push(sample.temperature_c);
    }

    debug!(samples = samples.len(), days = days.len(), "aggregated forecast");

    days.into_iter()
        .take(MAX_FORECAST_DAYS)
        .map(|(label, acc)| acc.finish(label))
        .collect()
}
