use crate::{
    Config, WeatherError,
    model::{CurrentConditions, ForecastFeed, WeatherRequest},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// A source of current conditions and 3-hourly forecasts.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current(&self, request: &WeatherRequest) -> Result<CurrentConditions, WeatherError>;

    async fn forecast(&self, request: &WeatherRequest) -> Result<ForecastFeed, WeatherError>;
}

/// Construct the OpenWeather provider from config (environment key wins).
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.resolve_api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "{}\n\
             Hint: run `weather-dashboard configure` or set OPENWEATHER_API_KEY.",
            WeatherError::MissingApiKey
        )
    })?;

    let provider = OpenWeatherProvider::new(api_key)?;
    Ok(Box::new(provider))
}

/// Trim a city name, rejecting blank input.
pub(crate) fn normalize_city(city: &str) -> Result<&str, WeatherError> {
    let trimmed = city.trim();
    if trimmed.is_empty() { Err(WeatherError::EmptyCity) } else { Ok(trimmed) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_works_when_key_configured() {
        let cfg = Config { api_key: Some("KEY".to_string()), ..Config::default() };
        assert!(provider_from_config(&cfg).is_ok());
    }

    #[test]
    fn normalize_city_trims() {
        assert_eq!(normalize_city("  Paris ").unwrap(), "Paris");
    }

    #[test]
    fn normalize_city_rejects_blank() {
        assert!(matches!(normalize_city("   "), Err(WeatherError::EmptyCity)));
    }
}
