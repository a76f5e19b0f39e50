//! Display model assembled from a session snapshot.

use serde::Serialize;
use std::fmt;

use crate::{
    condition::{WeatherIcon, classify},
    forecast::ForecastDay,
    model::CurrentConditions,
    session::{LookupStatus, WeatherSession},
};

pub const PLACEHOLDER_MESSAGE: &str = "Enter a city to get started";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum StatusLine {
    Loading,
    Error(String),
    Placeholder,
    /// A report is on screen.
    Ready,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentCard {
    pub icon: WeatherIcon,
    pub temperature: i64,
    pub location: String,
    pub description: String,
    pub feels_like: i64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub temp_min: i64,
    pub temp_max: i64,
}

impl From<&CurrentConditions> for CurrentCard {
    fn from(c: &CurrentConditions) -> Self {
        Self {
            icon: classify(&c.condition),
            temperature: round_temp(c.temperature_c),
            location: c.location_name.clone(),
            description: c.description.clone(),
            feels_like: round_temp(c.feels_like_c),
            humidity_pct: c.humidity_pct,
            wind_speed_mps: c.wind_speed_mps,
            temp_min: round_temp(c.temp_min_c),
            temp_max: round_temp(c.temp_max_c),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastCard {
    /// Short English weekday, e.g. "Mon".
    pub weekday: String,
    pub icon: WeatherIcon,
    pub description: String,
    pub temperature: i64,
}

impl From<&ForecastDay> for ForecastCard {
    fn from(day: &ForecastDay) -> Self {
        Self {
            weekday: day.date.format("%a").to_string(),
            icon: classify(&day.record.condition),
            description: day.record.description.clone(),
            temperature: round_temp(day.record.temperature_c),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderModel {
    pub status: StatusLine,
    pub current: Option<CurrentCard>,
    pub forecast: Vec<ForecastCard>,
    /// Suggestion labels, empty unless the panel is showing.
    pub suggestions: Vec<String>,
}

impl RenderModel {
    pub fn from_session(session: &WeatherSession) -> Self {
        let suggestions = if session.suggestions_visible() {
            session.suggestions().iter().map(|s| s.label()).collect()
        } else {
            Vec::new()
        };

        let (status, current, forecast) = match session.status() {
            LookupStatus::Idle => (StatusLine::Placeholder, None, Vec::new()),
            LookupStatus::Loading => (StatusLine::Loading, None, Vec::new()),
            LookupStatus::Failed(message) => (StatusLine::Error(message.clone()), None, Vec::new()),
            LookupStatus::Loaded(report) => (
                StatusLine::Ready,
                Some(CurrentCard::from(&report.current)),
                report.forecast.iter().map(ForecastCard::from).collect(),
            ),
        };

        Self { status, current, forecast, suggestions }
    }
}

impl fmt::Display for RenderModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.status {
            StatusLine::Loading => writeln!(f, "Loading...")?,
            StatusLine::Error(message) => writeln!(f, "{message}")?,
            StatusLine::Placeholder => writeln!(f, "{PLACEHOLDER_MESSAGE}")?,
            StatusLine::Ready => {}
        }

        if let Some(c) = &self.current {
            writeln!(f, "{} {}°C  {}", c.icon.glyph(), c.temperature, c.location)?;
            writeln!(f, "   {}", c.description)?;
            writeln!(f, "   Feels Like  {}°C", c.feels_like)?;
            writeln!(f, "   Humidity    {}%", c.humidity_pct)?;
            writeln!(f, "   Wind Speed  {} m/s", c.wind_speed_mps)?;
            writeln!(f, "   Min / Max   {}°C / {}°C", c.temp_min, c.temp_max)?;
        }

        if !self.forecast.is_empty() {
            writeln!(f)?;
            for day in &self.forecast {
                writeln!(
                    f,
                    "{:<4}{} {:>4}°C  {}",
                    day.weekday,
                    day.icon.glyph(),
                    day.temperature,
                    day.description
                )?;
            }
        }

        Ok(())
    }
}

/// Round to the nearest degree, halves going up (2.5 -> 3, -2.5 -> -2).
pub fn round_temp(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
