use std::fmt;

use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Select, Text};
use tracing::info;
use weather_core::{Config, OpenWeatherProvider, PlaceSuggestion, WeatherApp, provider_from_config};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Weather CLI")]
pub struct Cli {
    /// Log debug output to stderr (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key.
    Configure,

    /// Show current weather and forecast for a city.
    Show {
        /// City name, optionally with country code, e.g. "Paris, FR".
        city: String,
    },

    /// List place suggestions for a partial name.
    Suggest {
        query: String,
    },

    /// Search interactively with suggestions.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city } => {
                let app = build_app()?;
                app.set_query(&city);
                app.submit().await;
                print_report(&app);
                Ok(())
            }
            Command::Suggest { query } => {
                let app = build_app()?;
                app.query_changed(&query).await;

                let session = app.session();
                if session.suggestions().is_empty() {
                    println!("No matching places.");
                }
                for place in session.suggestions() {
                    println!("{}", place.label());
                }
                Ok(())
            }
            Command::Interactive => interactive(build_app()?).await,
        }
    }
}

fn build_app() -> anyhow::Result<WeatherApp<OpenWeatherProvider>> {
    let config = Config::load()?;
    let provider = provider_from_config(&config)?;
    Ok(WeatherApp::new(provider, &config))
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key);
    config.save()?;

    let path = Config::config_file_path()?;
    info!(path = %path.display(), "configuration saved");
    println!("Saved API key to {}", path.display());
    Ok(())
}

/// Entry in the suggestion picker.
enum Choice {
    Place(PlaceSuggestion),
    AsTyped(String),
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Choice::Place(place) => f.write_str(&place.label()),
            Choice::AsTyped(query) => write!(f, "Search \"{query}\""),
        }
    }
}

async fn interactive(app: WeatherApp<OpenWeatherProvider>) -> anyhow::Result<()> {
    println!("Enter a city to get started (empty input or Esc quits).");

    loop {
        let query = Text::new("City:")
            .with_placeholder("Search city...")
            .prompt_skippable()
            .context("Failed to read city")?;

        let Some(query) = query.filter(|q| !q.trim().is_empty()) else {
            return Ok(());
        };

        app.query_changed(&query).await;
        let session = app.session();

        if session.suggestions_visible() {
            let mut choices: Vec<Choice> =
                session.suggestions().iter().cloned().map(Choice::Place).collect();
            choices.push(Choice::AsTyped(query));

            match Select::new("Pick a place:", choices).prompt_skippable()? {
                Some(Choice::Place(place)) => {
                    app.select_suggestion(&place).await;
                }
                Some(Choice::AsTyped(_)) => {
                    app.submit().await;
                }
                None => continue,
            }
        } else {
            app.submit().await;
        }

        print_report(&app);
    }
}

fn print_report(app: &WeatherApp<OpenWeatherProvider>) {
    let model = app.render();
    print!("{model}");
    if model.current.is_some() {
        println!("\nUpdated {}", Local::now().format("%H:%M"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn show_takes_city_with_country() {
        let cli = Cli::try_parse_from(["weather", "show", "Paris, FR"]).unwrap();
        assert!(matches!(cli.command, Command::Show { ref city } if city == "Paris, FR"));
        assert!(!cli.verbose);
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::try_parse_from(["weather", "suggest", "Par", "--verbose"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn choice_labels() {
        let place = PlaceSuggestion { name: "Paris".into(), state: None, country: "FR".into() };
        assert_eq!(Choice::Place(place).to_string(), "Paris, FR");
        assert_eq!(Choice::AsTyped("Par".into()).to_string(), "Search \"Par\"");
    }
}
