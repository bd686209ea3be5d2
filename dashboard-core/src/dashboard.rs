//! Orchestration of one dashboard search: current conditions plus the
//! forecast feed, fetched together and reduced to a daily view.

use chrono::{FixedOffset, Local, Utc};

use crate::{
    WeatherError,
    model::{DashboardView, ForecastFeed, ForecastReport, Observation, WeatherRequest},
    provider::WeatherProvider,
    sampler::select_daily_representatives,
    zone::{ZoneChoice, city_offset},
};

#[derive(Debug)]
pub struct Dashboard {
    provider: Box<dyn WeatherProvider>,
    zone: ZoneChoice,
}

impl Dashboard {
    pub fn new(provider: Box<dyn WeatherProvider>, zone: ZoneChoice) -> Self {
        Self { provider, zone }
    }

    pub fn zone(&self) -> ZoneChoice {
        self.zone
    }

    /// Fetch current conditions and the forecast concurrently.
    pub async fn load(&self, request: &WeatherRequest) -> Result<DashboardView, WeatherError> {
        let (current, feed) =
            tokio::join!(self.provider.current(request), self.provider.forecast(request));

        // A 404 from either call means the city is unknown, whatever the other reports.
        let (current, feed) = match (current, feed) {
            (Err(err @ WeatherError::CityNotFound(_)), _)
            | (_, Err(err @ WeatherError::CityNotFound(_))) => return Err(err),
            (current, feed) => (current?, feed?),
        };
        let forecast = daily_forecast(feed, self.zone);

        tracing::info!(
            city = %current.display_name(),
            days = forecast.days.len(),
            "Loaded dashboard"
        );

        Ok(DashboardView { units: request.units, current, forecast })
    }

    /// Fetch only the forecast and reduce it to daily entries.
    pub async fn load_forecast(&self, request: &WeatherRequest) -> Result<ForecastReport, WeatherError> {
        let feed = self.provider.forecast(request).await?;
        Ok(daily_forecast(feed, self.zone))
    }
}

/// Reduce a 3-hourly feed to one observation per calendar day in `zone`.
pub fn daily_forecast(feed: ForecastFeed, zone: ZoneChoice) -> ForecastReport {
    if zone == ZoneChoice::City && FixedOffset::east_opt(feed.timezone_offset_secs).is_none() {
        tracing::warn!(
            "City UTC offset {}s is out of range, using UTC",
            feed.timezone_offset_secs
        );
    }

    let days = sample_entries(feed.entries, zone, feed.timezone_offset_secs);

    ForecastReport {
        city: feed.city,
        country: feed.country,
        timezone_offset_secs: feed.timezone_offset_secs,
        days,
    }
}

fn sample_entries(entries: Vec<Observation>, zone: ZoneChoice, city_offset_secs: i32) -> Vec<Observation> {
    match zone {
        ZoneChoice::Local => select_daily_representatives(entries, &Local),
        ZoneChoice::Utc => select_daily_representatives(entries, &Utc),
        ZoneChoice::City => select_daily_representatives(entries, &city_offset(city_offset_secs)),
        ZoneChoice::Fixed(offset) => select_daily_representatives(entries, &offset),
    }
}
