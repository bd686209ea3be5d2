use anyhow::{Context, anyhow};
use clap::{Args, Parser, Subcommand};
use dashboard_core::{
    Config, Dashboard, Units, WeatherError, WeatherRequest, ZoneChoice, provider_from_config,
};
use inquire::{Password, PasswordDisplayMode, Select, Text};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-dashboard", version, about = "Current weather and 5-day forecast")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key, units and time zone.
    Configure,

    /// Show current conditions and the 5-day forecast for a city.
    Show(SearchArgs),

    /// Show only the 5-day forecast for a city.
    Forecast(SearchArgs),
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// City name; defaults to the last searched city.
    pub city: Option<String>,

    /// Unit system: metric or imperial.
    #[arg(long)]
    pub units: Option<Units>,

    /// Time zone for days and times: local, utc, city, or an offset like +02:00.
    #[arg(long = "tz")]
    pub zone: Option<ZoneChoice>,

    /// Print JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show(args) => search(args, false).await,
            Command::Forecast(args) => search(args, true).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    if api_key.trim().is_empty() {
        return Err(anyhow!("{}", WeatherError::MissingApiKey));
    }
    config.set_api_key(api_key);

    let start = Units::all().iter().position(|u| *u == config.units).unwrap_or(0);
    config.units = Select::new("Units:", Units::all().to_vec())
        .with_starting_cursor(start)
        .prompt()
        .context("Failed to read units")?;

    let zone = Text::new("Time zone (local, utc, city or +HH:MM):")
        .with_default(&config.timezone.to_string())
        .prompt()
        .context("Failed to read time zone")?;
    config.timezone = zone.parse()?;

    config.save()?;
    println!("Configuration saved to {}", Config::config_file_path()?.display());

    Ok(())
}

async fn search(args: SearchArgs, forecast_only: bool) -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let city = resolve_city(args.city.as_deref(), &config)?;
    let units = args.units.unwrap_or(config.units);
    let zone = args.zone.unwrap_or(config.timezone);

    let dashboard = Dashboard::new(provider_from_config(&config)?, zone);
    let request = WeatherRequest::new(city.clone(), units);

    let output = if forecast_only {
        let report = dashboard.load_forecast(&request).await.map_err(user_facing)?;
        if args.json {
            serde_json::to_string_pretty(&report)?
        } else {
            render::forecast(&report, units, zone)
        }
    } else {
        let view = dashboard.load(&request).await.map_err(user_facing)?;
        if args.json {
            serde_json::to_string_pretty(&view)?
        } else {
            render::dashboard(&view, zone)
        }
    };
    println!("{output}");

    if config.last_city.as_deref() != Some(city.as_str()) {
        config.remember_city(&city);
        if let Err(err) = config.save() {
            tracing::warn!("Could not remember last city: {err:#}");
        }
    }

    Ok(())
}

/// City to search: the trimmed argument, or the last searched city.
fn resolve_city(arg: Option<&str>, config: &Config) -> anyhow::Result<String> {
    match arg {
        Some(city) if city.trim().is_empty() => Err(anyhow!("Please enter a city name.")),
        Some(city) => Ok(city.trim().to_string()),
        None => Ok(config.city_or_default().to_string()),
    }
}

fn user_facing(err: WeatherError) -> anyhow::Error {
    tracing::debug!("Weather request failed: {err}");
    anyhow!(err.user_message())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_show_with_options() {
        let cli = Cli::try_parse_from([
            "weather-dashboard",
            "show",
            "Paris",
            "--units",
            "imperial",
            "--tz",
            "+01:00",
            "--json",
        ])
        .unwrap();

        let Command::Show(args) = cli.command else { panic!("expected show") };
        assert_eq!(args.city.as_deref(), Some("Paris"));
        assert_eq!(args.units, Some(Units::Imperial));
        assert_eq!(args.zone.map(|z| z.to_string()).as_deref(), Some("+01:00"));
        assert!(args.json);
    }

    #[test]
    fn city_is_optional() {
        let cli = Cli::try_parse_from(["weather-dashboard", "forecast"]).unwrap();
        let Command::Forecast(args) = cli.command else { panic!("expected forecast") };
        assert!(args.city.is_none());
        assert!(args.units.is_none());
    }

    #[test]
    fn rejects_unknown_units() {
        assert!(Cli::try_parse_from(["weather-dashboard", "show", "--units", "kelvin"]).is_err());
    }

    #[test]
    fn rejects_bad_zone() {
        assert!(Cli::try_parse_from(["weather-dashboard", "show", "--tz", "mars"]).is_err());
    }

    #[test]
    fn blank_city_is_rejected() {
        let err = resolve_city(Some("   "), &Config::default()).unwrap_err();
        assert_eq!(err.to_string(), "Please enter a city name.");
    }

    #[test]
    fn city_argument_is_trimmed() {
        let city = resolve_city(Some("  New York "), &Config::default()).unwrap();
        assert_eq!(city, "New York");
    }

    #[test]
    fn missing_city_uses_last_search() {
        let mut config = Config::default();
        assert_eq!(resolve_city(None, &config).unwrap(), "London");

        config.remember_city("Oslo");
        assert_eq!(resolve_city(None, &config).unwrap(), "Oslo");
    }

    #[test]
    fn user_facing_hides_details() {
        let err = user_facing(WeatherError::CityNotFound("Atlantis".into()));
        assert_eq!(err.to_string(), "City not found. Please try again.");
    }
}
