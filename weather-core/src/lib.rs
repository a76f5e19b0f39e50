//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration & API key handling
//! - The OpenWeather provider behind a [`WeatherProvider`] trait
//! - Forecast normalisation and condition-to-icon mapping
//! - Debounced place suggestions and the search session state
//!
//! It is used by `weather-cli`, but can also be reused by other front ends.

pub mod app;
pub mod condition;
pub mod config;
pub mod error;
pub mod forecast;
pub mod model;
pub mod pointer;
pub mod provider;
pub mod render;
pub mod session;
pub mod suggest;

#[cfg(test)]
pub(crate) mod testing;

pub use app::{WeatherApp, lookup};
pub use condition::{WeatherIcon, classify};
pub use config::Config;
pub use error::{LOOKUP_FAILED_MESSAGE, WeatherError};
pub use forecast::{ForecastDay, ForecastSeries, MAX_FORECAST_DAYS, normalize_forecast};
pub use model::{CurrentConditions, IntervalRecord, PlaceSuggestion, WeatherReport};
pub use pointer::{PointerEvent, PointerHub, Subscription};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use render::RenderModel;
pub use session::{LookupStatus, PanelVisibility, WeatherSession};
pub use suggest::{SuggestionFetcher, SuggestionUpdate};
