//! Plain-text rendering of dashboard views.

use std::fmt::Write;

use dashboard_core::{
    CurrentConditions, DashboardView, ForecastReport, Observation, Units, ZoneChoice,
};

const NOT_AVAILABLE: &str = "N/A";

pub fn format_temp(temp: f64, units: Units) -> String {
    let rounded = temp.round();
    // Values in (-0.5, 0) round to -0.0, which would print as "-0".
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded}{}", units.temperature_symbol())
}

pub fn format_wind(speed: f64, units: Units) -> String {
    format!("{speed:.1} {}", units.wind_symbol())
}

pub fn format_visibility(meters: Option<u32>) -> String {
    match meters {
        Some(m) => format!("{} km", (f64::from(m) / 1000.0).round()),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// `hh:mm AM/PM` in the chosen zone.
pub fn format_time(timestamp: Option<i64>, zone: ZoneChoice, city_offset_secs: i32) -> String {
    timestamp
        .and_then(|ts| zone.localize(ts, city_offset_secs))
        .map(|dt| dt.format("%I:%M %p").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn format_weekday(timestamp: i64, zone: ZoneChoice, city_offset_secs: i32, pattern: &str) -> String {
    zone.localize(timestamp, city_offset_secs)
        .map(|dt| dt.format(pattern).to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn description(observation: &Observation) -> &str {
    observation
        .condition
        .as_ref()
        .map(|c| c.description.as_str())
        .filter(|d| !d.is_empty())
        .unwrap_or(NOT_AVAILABLE)
}

pub fn dashboard(view: &DashboardView, zone: ZoneChoice) -> String {
    let mut out = current(&view.current, view.units, zone, view.forecast.timezone_offset_secs);
    out.push('\n');
    out.push_str(&forecast(&view.forecast, view.units, zone));
    out
}

fn current(current: &CurrentConditions, units: Units, zone: ZoneChoice, offset: i32) -> String {
    let obs = &current.observation;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} ({})",
        current.display_name(),
        format_weekday(obs.timestamp, zone, offset, "%A %-d")
    );
    let _ = writeln!(out, "  {}  {}", format_temp(obs.temperature, units), description(obs));

    let rows = [
        ("Feels like", format_temp(obs.feels_like, units)),
        ("Humidity", format!("{}%", obs.humidity_pct)),
        ("Wind", format_wind(obs.wind_speed, units)),
        ("Pressure", format!("{} hPa", obs.pressure_hpa)),
        ("Visibility", format_visibility(current.visibility_m)),
        ("Sunrise", format_time(current.sunrise, zone, offset)),
        ("Sunset", format_time(current.sunset, zone, offset)),
        ("Time", format_time(Some(obs.timestamp), zone, offset)),
    ];
    for (label, value) in rows {
        let _ = writeln!(out, "  {label:<11} {value}");
    }

    out
}

pub fn forecast(report: &ForecastReport, units: Units, zone: ZoneChoice) -> String {
    let mut out = String::from("5-Day Forecast\n");

    if report.days.is_empty() {
        out.push_str("  No forecast data available.\n");
        return out;
    }

    for day in &report.days {
        let _ = writeln!(
            out,
            "  {:<4} {:>6}  {}",
            format_weekday(day.timestamp, zone, report.timezone_offset_secs, "%a"),
            format_temp(day.temperature, units),
            description(day)
        );
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashboard_core::Condition;

    // 2024-03-13 12:00:00 UTC, a Wednesday.
    const NOON: i64 = 1_710_331_200;

    fn obs(timestamp: i64, temperature: f64) -> Observation {
        Observation {
            timestamp,
            temperature,
            feels_like: temperature - 1.0,
            humidity_pct: 81,
            pressure_hpa: 1012,
            wind_speed: 4.12,
            condition: Some(Condition {
                main: "Rain".into(),
                description: "light rain".into(),
                icon: "10d".into(),
            }),
        }
    }

    #[test]
    fn temperatures_are_rounded_with_symbol() {
        assert_eq!(format_temp(17.6, Units::Metric), "18°C");
        assert_eq!(format_temp(31.6, Units::Imperial), "32°F");
        assert_eq!(format_temp(-3.6, Units::Metric), "-4°C");
    }

    #[test]
    fn temperatures_just_below_zero_print_zero() {
        assert_eq!(format_temp(-0.4, Units::Metric), "0°C");
        assert_eq!(format_temp(-0.0, Units::Imperial), "0°F");
    }

    #[test]
    fn wind_has_one_decimal() {
        assert_eq!(format_wind(4.12, Units::Metric), "4.1 m/s");
        assert_eq!(format_wind(10.0, Units::Imperial), "10.0 mph");
    }

    #[test]
    fn visibility_in_whole_km() {
        assert_eq!(format_visibility(Some(10_000)), "10 km");
        assert_eq!(format_visibility(Some(8_600)), "9 km");
        assert_eq!(format_visibility(None), "N/A");
    }

    #[test]
    fn time_in_twelve_hour_clock() {
        assert_eq!(format_time(Some(NOON), ZoneChoice::Utc, 0), "12:00 PM");
        assert_eq!(format_time(Some(NOON), ZoneChoice::City, -5 * 3600), "07:00 AM");
        assert_eq!(format_time(None, ZoneChoice::Utc, 0), "N/A");
    }

    #[test]
    fn forecast_lists_short_weekdays() {
        let report = ForecastReport {
            city: "London".into(),
            country: Some("GB".into()),
            timezone_offset_secs: 0,
            days: vec![obs(NOON, 11.4), obs(NOON + 86_400, 13.5)],
        };

        let text = forecast(&report, Units::Metric, ZoneChoice::Utc);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "5-Day Forecast");
        assert!(lines[1].starts_with("  Wed"));
        assert!(lines[1].contains("11°C"));
        assert!(lines[2].starts_with("  Thu"));
        assert!(lines[2].contains("14°C"));
    }

    #[test]
    fn empty_forecast_says_so() {
        let report = ForecastReport {
            city: "London".into(),
            country: None,
            timezone_offset_secs: 0,
            days: Vec::new(),
        };
        assert!(forecast(&report, Units::Metric, ZoneChoice::Utc).contains("No forecast data"));
    }

    #[test]
    fn dashboard_shows_card_and_forecast() {
        let view = DashboardView {
            units: Units::Metric,
            current: CurrentConditions {
                location_name: "London".into(),
                country: Some("GB".into()),
                observation: obs(NOON, 11.4),
                visibility_m: Some(10_000),
                sunrise: Some(NOON - 6 * 3600),
                sunset: None,
            },
            forecast: ForecastReport {
                city: "London".into(),
                country: Some("GB".into()),
                timezone_offset_secs: 0,
                days: vec![obs(NOON, 11.4)],
            },
        };

        let text = dashboard(&view, ZoneChoice::Utc);
        assert!(text.starts_with("London, GB (Wednesday 13)"));
        assert!(text.contains("light rain"));
        assert!(text.contains("Humidity    81%"));
        assert!(text.contains("Pressure    1012 hPa"));
        assert!(text.contains("Sunrise     06:00 AM"));
        assert!(text.contains("Sunset      N/A"));
        assert!(text.contains("5-Day Forecast"));
    }
}
