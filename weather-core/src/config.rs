use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

use crate::error::WeatherError;

/// Environment variable that overrides the API key stored on disk.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// base_url = "https://api.openweathermap.org"
/// debounce_ms = 200
/// selection_delay_ms = 100
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,

    pub base_url: String,

    /// Quiet period before a suggestion lookup fires.
    pub debounce_ms: u64,

    /// Pause between picking a suggestion and the lookup it triggers.
    pub selection_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            debounce_ms: 200,
            selection_delay_ms: 100,
        }
    }
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-task", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key.trim().to_string());
    }

    /// Returns the API key, preferring `OPENWEATHER_API_KEY` over the file.
    pub fn api_key(&self) -> Option<String> {
        resolve_api_key(std::env::var(API_KEY_ENV).ok(), self.api_key.as_deref())
    }

    pub fn require_api_key(&self) -> Result<String, WeatherError> {
        self.api_key().ok_or(WeatherError::MissingApiKey)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn selection_delay(&self) -> Duration {
        Duration::from_millis(self.selection_delay_ms)
    }
}

fn resolve_api_key(from_env: Option<String>, from_file: Option<&str>) -> Option<String> {
    let non_blank = |s: &str| {
        let s = s.trim();
        (!s.is_empty()).then(|| s.to_string())
    };

    from_env.as_deref().and_then(non_blank).or_else(|| from_file.and_then(non_blank))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_widget_timings() {
        let cfg = Config::default();
        assert_eq!(cfg.debounce(), Duration::from_millis(200));
        assert_eq!(cfg.selection_delay(), Duration::from_millis(100));
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let cfg = Config::from_toml("api_key = \"KEY\"\ndebounce_ms = 50\n").unwrap();
        assert_eq!(cfg.api_key.as_deref(), Some("KEY"));
        assert_eq!(cfg.debounce_ms, 50);
        assert_eq!(cfg.selection_delay_ms, 100);
        assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn env_key_overrides_file_key() {
        let key = resolve_api_key(Some("ENV".into()), Some("FILE"));
        assert_eq!(key.as_deref(), Some("ENV"));
    }

    #[test]
    fn blank_env_key_is_ignored() {
        let key = resolve_api_key(Some("   ".into()), Some("FILE"));
        assert_eq!(key.as_deref(), Some("FILE"));
    }

    #[test]
    fn no_key_anywhere_is_none() {
        assert_eq!(resolve_api_key(None, None), None);
        assert_eq!(resolve_api_key(None, Some("")), None);
    }

    #[test]
    fn set_api_key_trims_whitespace() {
        let mut cfg = Config::default();
        cfg.set_api_key("  KEY \n".to_string());
        assert_eq!(cfg.api_key.as_deref(), Some("KEY"));
    }

    #[test]
    fn toml_roundtrip_keeps_settings() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".into());
        cfg.selection_delay_ms = 250;

        let text = toml::to_string_pretty(&cfg).unwrap();
        let back = Config::from_toml(&text).unwrap();
        assert_eq!(back.api_key.as_deref(), Some("KEY"));
        assert_eq!(back.selection_delay_ms, 250);
    }
}
