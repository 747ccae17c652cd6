use serde::{Deserialize, Serialize};

/// Unit used when presenting temperatures. State always stores Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn toggled(self) -> Self {
        match self {
            TemperatureUnit::Celsius => TemperatureUnit::Fahrenheit,
            TemperatureUnit::Fahrenheit => TemperatureUnit::Celsius,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }
}

impl std::fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TemperatureUnit::Celsius => "celsius",
            TemperatureUnit::Fahrenheit => "fahrenheit",
        })
    }
}

/// Convert a Celsius reading to the integer shown to the user.
///
/// Rounds half away from zero (`f64::round`). Every temperature on screen goes
/// through here so current, feels-like and daily values share one policy.
pub fn to_display(temp_c: f64, unit: TemperatureUnit) -> i64 {
    let value = match unit {
        TemperatureUnit::Celsius => temp_c,
        TemperatureUnit::Fahrenheit => temp_c * 9.0 / 5.0 + 32.0,
    };

    value.round() as i64
}
