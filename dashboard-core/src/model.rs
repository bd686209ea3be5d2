use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{error::ParseError, sampler::Timestamped};

/// Unit system requested from the weather service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    pub fn temperature_symbol(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }

    pub fn wind_symbol(&self) -> &'static str {
        match self {
            Units::Metric => "m/s",
            Units::Imperial => "mph",
        }
    }

    pub const fn all() -> &'static [Units] {
        &[Units::Metric, Units::Imperial]
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Units {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "metric" | "c" | "celsius" => Ok(Units::Metric),
            "imperial" | "f" | "fahrenheit" => Ok(Units::Imperial),
            _ => Err(ParseError::Units(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeatherRequest {
    pub city: String,
    pub units: Units,
}

impl WeatherRequest {
    pub fn new(city: impl Into<String>, units: Units) -> Self {
        Self { city: city.into(), units }
    }
}

/// Sky condition as reported by the weather service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub main: String,
    pub description: String,
    pub icon: String,
}

impl Condition {
    pub fn icon_url(&self) -> Option<String> {
        if self.icon.is_empty() {
            return None;
        }
        Some(format!("https://openweathermap.org/img/wn/{}@2x.png", self.icon))
    }
}

/// One timestamped weather sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Unix seconds.
    pub timestamp: i64,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub wind_speed: f64,
    pub condition: Option<Condition>,
}

impl Timestamped for Observation {
    fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub location_name: String,
    pub country: Option<String>,
    pub observation: Observation,
    pub visibility_m: Option<u32>,
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
}

impl CurrentConditions {
    /// "London, GB", or just the name when the country is unknown.
    pub fn display_name(&self) -> String {
        match self.country.as_deref() {
            Some(country) if !country.is_empty() => format!("{}, {}", self.location_name, country),
            _ => self.location_name.clone(),
        }
    }
}

/// Raw forecast feed: one entry every three hours.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastFeed {
    pub city: String,
    pub country: Option<String>,
    pub timezone_offset_secs: i32,
    pub entries: Vec<Observation>,
}

/// Forecast reduced to one representative observation per day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastReport {
    pub city: String,
    pub country: Option<String>,
    pub timezone_offset_secs: i32,
    pub days: Vec<Observation>,
}

/// Everything the dashboard shows for one search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardView {
    pub units: Units,
    pub current: CurrentConditions,
    pub forecast: ForecastReport,
}
