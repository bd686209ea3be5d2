use reqwest::StatusCode;

/// Errors produced while fetching weather data.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("API key not found.")]
    MissingApiKey,

    #[error("City name is empty.")]
    EmptyCity,

    #[error("City '{0}' was not found by the weather service")]
    CityNotFound(String),

    #[error("Weather request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to parse weather response: {0}")]
    Parse(#[from] serde_json::Error),
}

impl WeatherError {
    /// Short message suitable for showing to the person who ran the search.
    pub fn user_message(&self) -> String {
        match self {
            WeatherError::MissingApiKey | WeatherError::EmptyCity => self.to_string(),
            WeatherError::CityNotFound(_) => "City not found. Please try again.".to_string(),
            _ => "An error occurred while fetching weather data.".to_string(),
        }
    }
}

/// Errors from parsing user-supplied settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Unknown units '{0}'. Supported units: metric, imperial.")]
    Units(String),

    #[error("Invalid time zone '{0}'. Use local, utc, city or an offset such as +02:00.")]
    Zone(String),
}
