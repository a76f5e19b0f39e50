use crate::{
    Config,
    error::Result,
    model::{CurrentConditions, IntervalRecord, PlaceSuggestion},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Maximum number of place candidates asked for and kept.
pub const SUGGESTION_LIMIT: usize = 5;

/// Remote source of place names, current conditions and forecasts.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Place candidates for free text, in the order the source returns them.
    async fn suggest_places(&self, query: &str) -> Result<Vec<PlaceSuggestion>>;

    async fn current_conditions(&self, query: &str) -> Result<CurrentConditions>;

    /// Raw three-hourly forecast records.
    async fn forecast(&self, query: &str) -> Result<Vec<IntervalRecord>>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> Result<OpenWeatherProvider> {
    let api_key = config.require_api_key()?;
    Ok(OpenWeatherProvider::with_base_url(api_key, &config.base_url))
}
