use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use forecast_core::{City, Config, ForecastClient, ViewState, WeatherApp, window};
use inquire::{Select, Text};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Gyeonggi-do short-term forecast")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the service key and default city interactively.
    Configure,

    /// Show current conditions for a city.
    Show {
        /// City name or alias, e.g. "수원시" or "suwon". Prompts if absent
        /// and no default city is configured.
        city: Option<String>,

        /// Print the report as JSON instead of text.
        #[arg(long)]
        json: bool,
    },

    /// List supported cities and their forecast grid cells.
    Cities,

    /// Print the forecast issue window that would be requested now.
    Window,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, json } => show(city, json).await,
            Command::Cities => {
                for city in City::all() {
                    println!("{:<10} {:<12} {}", city.name(), city.slug(), city.grid());
                }
                Ok(())
            }
            Command::Window => {
                let now = Local::now().naive_local();
                let w = window::resolve(now);
                println!("base_date={} base_time={}", w.date, w.time);
                Ok(())
            }
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let key = Text::new("Service key (leave blank for the built-in demo key):")
        .with_initial_value(config.service_key.as_deref().unwrap_or_default())
        .prompt()
        .context("Service key prompt cancelled")?;
    config.set_service_key(&key);

    let city = prompt_city(config.default_city().ok().flatten())?;
    config.set_default_city(city);

    config.save()?;
    println!(
        "Saved configuration to {}",
        Config::config_file_path()?.display()
    );
    Ok(())
}

async fn show(city: Option<String>, json: bool) -> Result<()> {
    let config = Config::load()?;

    if let Ok(path) = Config::config_file_path() {
        tracing::debug!(path = %path.display(), "configuration loaded");
    }

    let city = match pick_city(city.as_deref(), &config)? {
        Some(city) => city,
        None => prompt_city(None)?,
    };

    let client = ForecastClient::new(config.client_settings())
        .context("Failed to set up forecast client")?;
    let app = WeatherApp::new(Box::new(client));
    let mut view = app.subscribe();

    // The request always leaves Idle, so this resolves once it has started.
    let started = async {
        let loading = view
            .wait_for(|state| *state != ViewState::Idle)
            .await
            .is_ok_and(|state| state.is_loading());
        if loading && !json {
            render::loading(city);
        }
    };

    let ((), result) = tokio::join!(started, app.request(city, Local::now().naive_local()));
    if let Err(err) = result {
        app.show_error(err.to_string());
    }

    let state = view.borrow().clone();
    if json {
        render::json(&state)
    } else {
        render::text(&state);
        Ok(())
    }
}

/// City from the command line, else the configured default. `None` means
/// the user still has to pick one.
fn pick_city(arg: Option<&str>, config: &Config) -> Result<Option<City>> {
    if let Some(name) = arg {
        let city = City::try_from(name)?;
        tracing::debug!(city = city.slug(), "city given on command line");
        return Ok(Some(city));
    }

    let city = config.default_city()?;
    if let Some(city) = city {
        tracing::debug!(city = city.slug(), "using configured default city");
    }
    Ok(city)
}

fn prompt_city(current: Option<City>) -> Result<City> {
    let cities = City::all().to_vec();
    let start = current
        .and_then(|c| cities.iter().position(|x| *x == c))
        .unwrap_or(0);

    Select::new("City:", cities)
        .with_starting_cursor(start)
        .prompt()
        .context("City selection cancelled")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_city_wins_over_default() {
        let mut cfg = Config::default();
        cfg.set_default_city(City::Suwon);

        assert_eq!(pick_city(Some("고양"), &cfg).unwrap(), Some(City::Goyang));
        assert_eq!(pick_city(None, &cfg).unwrap(), Some(City::Suwon));
    }

    #[test]
    fn no_city_anywhere_needs_a_prompt() {
        assert_eq!(pick_city(None, &Config::default()).unwrap(), None);
    }

    #[test]
    fn unknown_city_is_an_error() {
        let err = pick_city(Some("busan"), &Config::default()).unwrap_err();
        assert!(err.to_string().contains("Unknown city"));
    }
}
