use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::forecast::ForecastSeries;

/// A place candidate returned by the geocoding lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceSuggestion {
    pub name: String,
    pub state: Option<String>,
    pub country: String,
}

impl PlaceSuggestion {
    /// Label shown in the suggestion list, e.g. "Springfield, Illinois, US".
    pub fn label(&self) -> String {
        match &self.state {
            Some(state) => format!("{}, {}, {}", self.name, state, self.country),
            None => format!("{}, {}", self.name, self.country),
        }
    }

    /// Query text a selection puts back into the search box.
    pub fn query(&self) -> String {
        format!("{}, {}", self.name, self.country)
    }
}

/// Current conditions for one location, metric units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub location_name: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    /// Primary condition group, e.g. "Clouds".
    pub condition: String,
    pub description: String,
}

/// One three-hourly entry of the forecast endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalRecord {
    pub timestamp: NaiveDateTime,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: Option<f64>,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub condition: String,
    pub description: String,
}

impl IntervalRecord {
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }
}

/// Result of a successful lookup. Current conditions and forecast only ever
/// exist together.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub current: CurrentConditions,
    pub forecast: ForecastSeries,
}
