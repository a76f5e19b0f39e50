use reqwest::StatusCode;
use thiserror::Error;

/// Message shown to the user for every failed lookup, whatever went wrong.
pub const LOOKUP_FAILED_MESSAGE: &str = "City not found or API error!";

/// Errors produced while talking to the weather API.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error(
        "No OpenWeather API key configured.\n\
         Hint: run `weather configure` or set OPENWEATHER_API_KEY."
    )]
    MissingApiKey,

    #[error("Request to OpenWeather failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("OpenWeather request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to parse OpenWeather JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// The response parsed but its `cod` field did not signal success.
    #[error("OpenWeather returned code {cod}: {message}")]
    Api { cod: String, message: String },
}

pub type Result<T, E = WeatherError> = std::result::Result<T, E>;

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
