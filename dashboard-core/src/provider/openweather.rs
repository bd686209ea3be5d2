use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, de::DeserializeOwned};
use std::time::Duration;

use crate::{
    WeatherError,
    model::{Condition, CurrentConditions, ForecastFeed, Observation, WeatherRequest},
    provider::normalize_city,
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

const CURRENT_PATH: &str = "/data/2.5/weather";
const FORECAST_PATH: &str = "/data/2.5/forecast";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: impl Into<String>) -> Result<Self, WeatherError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Point the provider at another host, e.g. a mock server.
    pub fn with_base_url(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, WeatherError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        request: &WeatherRequest,
    ) -> Result<T, WeatherError> {
        if self.api_key.trim().is_empty() {
            return Err(WeatherError::MissingApiKey);
        }
        let city = normalize_city(&request.city)?;

        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, city, units = %request.units, "Requesting OpenWeather data");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", request.units.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(WeatherError::CityNotFound(city.to_string()));
        }

        if !status.is_success() {
            tracing::warn!(%status, path, "OpenWeather request failed");
            return Err(WeatherError::Status { status, body: truncate_body(&body) });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    #[serde(default)]
    main: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Default, Deserialize)]
struct OwSys {
    country: Option<String>,
    sunrise: Option<i64>,
    sunset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    dt: i64,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    wind: OwWind,
    #[serde(default)]
    sys: OwSys,
    visibility: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    name: String,
    country: Option<String>,
    #[serde(default)]
    timezone: i32,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: OwCity,
    list: Vec<OwForecastEntry>,
}

fn observation(dt: i64, main: OwMain, weather: Vec<OwWeather>, wind: OwWind) -> Observation {
    let condition = weather.into_iter().next().map(|w| Condition {
        main: w.main,
        description: w.description,
        icon: w.icon,
    });

    Observation {
        timestamp: dt,
        temperature: main.temp,
        feels_like: main.feels_like,
        humidity_pct: main.humidity,
        pressure_hpa: main.pressure,
        wind_speed: wind.speed,
        condition,
    }
}

impl From<OwCurrentResponse> for CurrentConditions {
    fn from(parsed: OwCurrentResponse) -> Self {
        CurrentConditions {
            location_name: parsed.name,
            country: parsed.sys.country,
            observation: observation(parsed.dt, parsed.main, parsed.weather, parsed.wind),
            visibility_m: parsed.visibility,
            sunrise: parsed.sys.sunrise,
            sunset: parsed.sys.sunset,
        }
    }
}

impl From<OwForecastResponse> for ForecastFeed {
    fn from(parsed: OwForecastResponse) -> Self {
        ForecastFeed {
            city: parsed.city.name,
            country: parsed.city.country,
            timezone_offset_secs: parsed.city.timezone,
            entries: parsed
                .list
                .into_iter()
                .map(|e| observation(e.dt, e.main, e.weather, e.wind))
                .collect(),
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, request: &WeatherRequest) -> Result<CurrentConditions, WeatherError> {
        let parsed: OwCurrentResponse = self.get_json(CURRENT_PATH, request).await?;
        Ok(parsed.into())
    }

    async fn forecast(&self, request: &WeatherRequest) -> Result<ForecastFeed, WeatherError> {
        let parsed: OwForecastResponse = self.get_json(FORECAST_PATH, request).await?;
        tracing::debug!(entries = parsed.list.len(), "Received OpenWeather forecast feed");
        Ok(parsed.into())
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
