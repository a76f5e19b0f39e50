use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::{
    config::DEFAULT_BASE_URL,
    error::{Result, WeatherError, truncate_body},
    model::{CurrentConditions, IntervalRecord, PlaceSuggestion},
};

use super::{SUGGESTION_LIMIT, WeatherProvider};

const DT_TXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: String, base_url: &str) -> Self {
        Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// GET `path` and return the body as JSON.
    ///
    /// A non-2xx status is only an error when the body is not JSON; OpenWeather
    /// reports most failures as a JSON object with `cod` and `message`.
    async fn get_json(&self, path: &str, params: &[(&str, &str)]) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "requesting");

        let res = self
            .http
            .get(&url)
            .query(params)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        match serde_json::from_str::<Value>(&body) {
            Ok(value) => Ok(value),
            Err(_) if !status.is_success() => Err(WeatherError::Status {
                status,
                body: truncate_body(&body),
            }),
            Err(err) => Err(err.into()),
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self))]
    async fn suggest_places(&self, query: &str) -> Result<Vec<PlaceSuggestion>> {
        let limit = SUGGESTION_LIMIT.to_string();
        let value = self
            .get_json("/geo/1.0/direct", &[("q", query), ("limit", &limit)])
            .await?;

        if !value.is_array() {
            return Err(api_error(&value));
        }

        let places: Vec<OwPlace> = serde_json::from_value(value)?;

        // only candidates with a usable name
        Ok(places
            .into_iter()
            .filter_map(OwPlace::into_suggestion)
            .take(SUGGESTION_LIMIT)
            .collect())
    }

    #[instrument(skip(self))]
    async fn current_conditions(&self, query: &str) -> Result<CurrentConditions> {
        let value = self
            .get_json("/data/2.5/weather", &[("q", query), ("units", "metric")])
            .await?;

        // the current-weather endpoint reports `cod` as a number
        let parsed: OwCurrentResponse =
            parse_checked(value, |cod| cod.as_u64() == Some(200))?;
        let weather = first_weather(parsed.weather)?;

        Ok(CurrentConditions {
            location_name: parsed.name,
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.speed,
            temp_min_c: parsed.main.temp_min,
            temp_max_c: parsed.main.temp_max,
            condition: weather.main,
            description: weather.description,
        })
    }

    #[instrument(skip(self))]
    async fn forecast(&self, query: &str) -> Result<Vec<IntervalRecord>> {
        let value = self
            .get_json("/data/2.5/forecast", &[("q", query), ("units", "metric")])
            .await?;

        // ...and the forecast endpoint as a string
        let parsed: OwForecastResponse =
            parse_checked(value, |cod| cod.as_str() == Some("200"))?;

        debug!(records = parsed.list.len(), "forecast received");

        parsed
            .list
            .into_iter()
            .map(|entry| -> Result<IntervalRecord> {
                let weather = first_weather(entry.weather)?;
                Ok(IntervalRecord {
                    timestamp: entry.dt_txt,
                    temperature_c: entry.main.temp,
                    feels_like_c: entry.main.feels_like,
                    humidity_pct: entry.main.humidity,
                    wind_speed_mps: entry.wind.map(|w| w.speed),
                    temp_min_c: entry.main.temp_min,
                    temp_max_c: entry.main.temp_max,
                    condition: weather.main,
                    description: weather.description,
                })
            })
            .collect()
    }
}

fn parse_checked<T: DeserializeOwned>(value: Value, cod_ok: impl Fn(&Value) -> bool) -> Result<T> {
    match value.get("cod") {
        Some(cod) if cod_ok(cod) => Ok(serde_json::from_value(value)?),
        _ => Err(api_error(&value)),
    }
}

fn api_error(value: &Value) -> WeatherError {
    let cod = match value.get("cod") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "missing".to_string(),
    };
    let message = value
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("unexpected response")
        .to_string();

    WeatherError::Api { cod, message }
}

fn first_weather(list: Vec<OwWeather>) -> Result<OwWeather> {
    list.into_iter().next().ok_or_else(|| {
        WeatherError::Parse(serde::de::Error::custom("response contained no weather entry"))
    })
}

fn deserialize_dt_txt<'de, D>(deserializer: D) -> std::result::Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&raw, DT_TXT_FORMAT).map_err(serde::de::Error::custom)
}

#[derive(Debug, Deserialize)]
struct OwPlace {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    state: Option<String>,
    #[serde(default)]
    country: String,
}

impl OwPlace {
    fn into_suggestion(self) -> Option<PlaceSuggestion> {
        let name = self.name.filter(|n| !n.trim().is_empty())?;
        Some(PlaceSuggestion {
            name,
            state: self.state.filter(|s| !s.is_empty()),
            country: self.country,
        })
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    temp_min: f64,
    temp_max: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    #[serde(deserialize_with = "deserialize_dt_txt")]
    dt_txt: NaiveDateTime,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: Option<OwWind>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}
