//! Core library for the `weather-dashboard` CLI.
//!
//! This crate defines:
//! - Daily forecast sampling (one representative sample per calendar day)
//! - Time zone selection for calendar days and displayed times
//! - The OpenWeather client behind a provider trait
//! - Configuration & credentials handling
//! - Shared domain models (requests, observations, dashboard views)
//!
//! It is used by `dashboard-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod provider;
pub mod sampler;
pub mod zone;

pub use config::Config;
pub use dashboard::{Dashboard, daily_forecast};
pub use error::{ParseError, WeatherError};
pub use model::{
    Condition, CurrentConditions, DashboardView, ForecastFeed, ForecastReport, Observation, Units,
    WeatherRequest,
};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use sampler::{FORECAST_DAYS, Timestamped, select_daily_representatives};
pub use zone::ZoneChoice;
