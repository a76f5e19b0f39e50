//! Mapping from OpenWeather condition groups to display icons.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum WeatherIcon {
    Clear,
    Sunny,
    NightStorm,
    NightClear,
    Clouds,
    Rain,
    HeavyRain,
    Thunderstorm,
    Snow,
    Mist,
}

impl WeatherIcon {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherIcon::Clear => "clear",
            WeatherIcon::Sunny => "sunny",
            WeatherIcon::NightStorm => "night-storm",
            WeatherIcon::NightClear => "night-clear",
            WeatherIcon::Clouds => "clouds",
            WeatherIcon::Rain => "rain",
            WeatherIcon::HeavyRain => "heavy-rain",
            WeatherIcon::Thunderstorm => "thunderstorm",
            WeatherIcon::Snow => "snow",
            WeatherIcon::Mist => "mist",
        }
    }

    /// Terminal glyph for the icon.
    pub fn glyph(&self) -> &'static str {
        match self {
            // "clear" is drawn as partly cloudy, it is also the fallback icon
            WeatherIcon::Clear => "⛅",
            WeatherIcon::Sunny => "☀️",
            WeatherIcon::NightStorm => "⛈️",
            WeatherIcon::NightClear => "🌙",
            WeatherIcon::Clouds => "☁️",
            WeatherIcon::Rain => "🌧️",
            WeatherIcon::HeavyRain => "🌧️",
            WeatherIcon::Thunderstorm => "🌩️",
            WeatherIcon::Snow => "❄️",
            WeatherIcon::Mist => "🌫️",
        }
    }

    pub const fn all() -> &'static [WeatherIcon] {
        &[
            WeatherIcon::Clear,
            WeatherIcon::Sunny,
            WeatherIcon::NightStorm,
            WeatherIcon::NightClear,
            WeatherIcon::Clouds,
            WeatherIcon::Rain,
            WeatherIcon::HeavyRain,
            WeatherIcon::Thunderstorm,
            WeatherIcon::Snow,
            WeatherIcon::Mist,
        ]
    }
}

impl fmt::Display for WeatherIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve a condition label to its icon. Matching is exact and
/// case-sensitive; anything unknown gets [`WeatherIcon::Clear`].
///
/// "Sunny", "Night Storm", "NightClear" and "Heavy Rain" are never sent by
/// OpenWeather but are kept so callers with their own labels can use them.
pub fn classify(label: &str) -> WeatherIcon {
    match label {
        "Clear" => WeatherIcon::Clear,
        "Sunny" => WeatherIcon::Sunny,
        "Night Storm" => WeatherIcon::NightStorm,
        "NightClear" => WeatherIcon::NightClear,
        "Clouds" => WeatherIcon::Clouds,
        "Rain" | "Drizzle" => WeatherIcon::Rain,
        "Heavy Rain" => WeatherIcon::HeavyRain,
        "Thunderstorm" => WeatherIcon::Thunderstorm,
        "Snow" => WeatherIcon::Snow,
        "Mist" | "Haze" | "Fog" => WeatherIcon::Mist,
        _ => WeatherIcon::Clear,
    }
}
