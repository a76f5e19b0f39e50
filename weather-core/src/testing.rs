//! In-memory provider and fixtures for unit tests.

use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDateTime;
use parking_lot::Mutex;

use crate::{
    error::{Result, WeatherError},
    model::{CurrentConditions, IntervalRecord, PlaceSuggestion},
    provider::WeatherProvider,
};

pub(crate) fn place(name: &str, country: &str) -> PlaceSuggestion {
    PlaceSuggestion { name: name.to_string(), state: None, country: country.to_string() }
}

pub(crate) fn conditions(location: &str, condition: &str, temp: f64) -> CurrentConditions {
    CurrentConditions {
        location_name: location.to_string(),
        temperature_c: temp,
        feels_like_c: temp - 1.0,
        humidity_pct: 60,
        wind_speed_mps: 3.5,
        temp_min_c: temp - 2.0,
        temp_max_c: temp + 2.0,
        condition: condition.to_string(),
        description: condition.to_lowercase(),
    }
}

pub(crate) fn interval(ts: &str, condition: &str, temp: f64) -> IntervalRecord {
    IntervalRecord {
        timestamp: NaiveDateTime::parse_from_str(ts, "%Y-%m-%d %H:%M:%S")
            .expect("fixture timestamp"),
        temperature_c: temp,
        feels_like_c: temp,
        humidity_pct: 70,
        wind_speed_mps: Some(2.0),
        temp_min_c: temp,
        temp_max_c: temp,
        condition: condition.to_string(),
        description: condition.to_lowercase(),
    }
}

fn not_found() -> WeatherError {
    WeatherError::Api { cod: "404".into(), message: "city not found".into() }
}

/// Records every call as `"<endpoint>:<query>"`.
#[derive(Debug, Default)]
pub(crate) struct MockProvider {
    places: Vec<PlaceSuggestion>,
    fail_suggestions: bool,
    current: Option<CurrentConditions>,
    forecast: Option<Vec<IntervalRecord>>,
    latency: Duration,
    calls: Mutex<Vec<String>>,
}

impl MockProvider {
    pub(crate) fn with_places(mut self, places: Vec<PlaceSuggestion>) -> Self {
        self.places = places;
        self
    }

    pub(crate) fn failing_suggestions(mut self) -> Self {
        self.fail_suggestions = true;
        self
    }

    pub(crate) fn with_current(mut self, current: CurrentConditions) -> Self {
        self.current = Some(current);
        self
    }

    pub(crate) fn with_forecast(mut self, records: Vec<IntervalRecord>) -> Self {
        self.forecast = Some(records);
        self
    }

    /// Delay applied to current and forecast calls.
    pub(crate) fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn record(&self, endpoint: &str, query: &str) {
        self.calls.lock().push(format!("{endpoint}:{query}"));
    }
}

#[async_trait]
impl WeatherProvider for MockProvider {
    async fn suggest_places(&self, query: &str) -> Result<Vec<PlaceSuggestion>> {
        self.record("suggest", query);
        if self.fail_suggestions {
            return Err(not_found());
        }
        Ok(self.places.clone())
    }

    async fn current_conditions(&self, query: &str) -> Result<CurrentConditions> {
        self.record("current", query);
        tokio::time::sleep(self.latency).await;
        self.current.clone().ok_or_else(not_found)
    }

    async fn forecast(&self, query: &str) -> Result<Vec<IntervalRecord>> {
        self.record("forecast", query);
        tokio::time::sleep(self.latency).await;
        self.forecast.clone().ok_or_else(not_found)
    }
}
