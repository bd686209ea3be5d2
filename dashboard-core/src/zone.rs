use std::{fmt, str::FromStr};

use chrono::{DateTime, FixedOffset, Local, Offset, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Which time zone decides calendar days and displayed times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ZoneChoice {
    /// The time zone of the running process.
    #[default]
    Local,
    Utc,
    /// The UTC offset the forecast feed reports for the searched city.
    City,
    Fixed(FixedOffset),
}

impl ZoneChoice {
    /// Resolve the zone to the offset in effect at `timestamp`.
    ///
    /// `city_offset_secs` is only consulted for [`ZoneChoice::City`]; an
    /// offset chrono cannot represent falls back to UTC.
    pub fn offset_at(&self, timestamp: i64, city_offset_secs: i32) -> FixedOffset {
        match self {
            ZoneChoice::Local => Local.timestamp_opt(timestamp, 0).single().map_or_else(
                || Utc.fix(),
                |dt| dt.offset().fix(),
            ),
            ZoneChoice::Utc => Utc.fix(),
            ZoneChoice::City => city_offset(city_offset_secs),
            ZoneChoice::Fixed(offset) => *offset,
        }
    }

    /// `timestamp` as a date-time in this zone, `None` if out of range.
    pub fn localize(&self, timestamp: i64, city_offset_secs: i32) -> Option<DateTime<FixedOffset>> {
        let offset = self.offset_at(timestamp, city_offset_secs);
        DateTime::from_timestamp(timestamp, 0).map(|utc| utc.with_timezone(&offset))
    }
}

pub(crate) fn city_offset(secs: i32) -> FixedOffset {
    FixedOffset::east_opt(secs).unwrap_or_else(|| {
        tracing::debug!("City UTC offset {secs}s is out of range, using UTC");
        Utc.fix()
    })
}

impl fmt::Display for ZoneChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneChoice::Local => f.write_str("local"),
            ZoneChoice::Utc => f.write_str("utc"),
            ZoneChoice::City => f.write_str("city"),
            ZoneChoice::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}

impl FromStr for ZoneChoice {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        match trimmed.to_lowercase().as_str() {
            "local" => Ok(ZoneChoice::Local),
            "utc" | "z" => Ok(ZoneChoice::Utc),
            "city" => Ok(ZoneChoice::City),
            _ => parse_offset(trimmed)
                .map(ZoneChoice::Fixed)
                .ok_or_else(|| ParseError::Zone(s.to_string())),
        }
    }
}

impl TryFrom<String> for ZoneChoice {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ZoneChoice> for String {
    fn from(zone: ZoneChoice) -> Self {
        zone.to_string()
    }
}

/// Parse `+HH`, `+HH:MM` or `+HHMM` (and the `-` forms).
fn parse_offset(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = match s.as_bytes().first()? {
        b'+' => (1, &s[1..]),
        b'-' => (-1, &s[1..]),
        _ => return None,
    };

    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let (hours, minutes) = match digits.len() {
        1 | 2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };

    if hours > 23 || minutes > 59 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keywords() {
        assert_eq!("local".parse::<ZoneChoice>(), Ok(ZoneChoice::Local));
        assert_eq!("UTC".parse::<ZoneChoice>(), Ok(ZoneChoice::Utc));
        assert_eq!(" city ".parse::<ZoneChoice>(), Ok(ZoneChoice::City));
    }

    #[test]
    fn parses_offsets() {
        let expect = |secs: i32| -> Result<ZoneChoice, ParseError> {
            Ok(ZoneChoice::Fixed(FixedOffset::east_opt(secs).unwrap()))
        };

        assert_eq!("+02:00".parse::<ZoneChoice>(), expect(7200));
        assert_eq!("-0530".parse::<ZoneChoice>(), expect(-(5 * 3600 + 30 * 60)));
        assert_eq!("+9".parse::<ZoneChoice>(), expect(9 * 3600));
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", "mars", "+25:00", "+02:75", "02:00", "+2:3:4"] {
            assert_eq!(
                bad.parse::<ZoneChoice>(),
                Err(ParseError::Zone(bad.to_string())),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn display_round_trips() {
        for zone in ["local", "utc", "city", "+05:30", "-08:00"] {
            let parsed: ZoneChoice = zone.parse().unwrap();
            assert_eq!(parsed.to_string(), zone);
        }
    }

    #[test]
    fn city_zone_uses_feed_offset() {
        let offset = ZoneChoice::City.offset_at(0, 3600);
        assert_eq!(offset.local_minus_utc(), 3600);
    }

    #[test]
    fn invalid_city_offset_falls_back_to_utc() {
        let offset = ZoneChoice::City.offset_at(0, 200_000);
        assert_eq!(offset.local_minus_utc(), 0);
    }

    #[test]
    fn localize_applies_offset() {
        let zone: ZoneChoice = "+03:00".parse().unwrap();
        let dt = zone.localize(0, 0).unwrap();
        assert_eq!(dt.format("%Y-%m-%d %H:%M").to_string(), "1970-01-01 03:00");
    }
}
