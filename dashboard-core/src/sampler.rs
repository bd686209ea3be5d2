//! Daily forecast sampling.
//!
//! The forecast feed delivers one sample every three hours over several days.
//! For display we want a single sample per calendar day, preferably the one
//! closest to local noon. Calendar days are computed in an explicit time zone
//! so the result does not depend on ambient process state.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, TimeZone, Timelike, Utc};

/// Maximum number of days returned by [`select_daily_representatives`].
pub const FORECAST_DAYS: usize = 5;

/// Local hour a daily representative should be closest to.
pub const NOON_HOUR: u32 = 12;

const SECONDS_PER_DAY: i64 = 86_400;

/// Anything carrying a Unix timestamp (seconds) can be sampled.
pub trait Timestamped {
    fn timestamp(&self) -> i64;
}

/// Calendar date and hour of an instant, as seen in some time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalMoment {
    pub date: NaiveDate,
    pub hour: u32,
}

impl LocalMoment {
    /// Distance in hours between this moment's hour of day and noon.
    pub fn distance_to_noon(&self) -> u32 {
        self.hour.abs_diff(NOON_HOUR)
    }
}

/// Resolve `timestamp` to a local date and hour in `tz`.
///
/// Timestamps outside chrono's representable range saturate: they are clamped
/// one day inside the minimum/maximum instant (so that no UTC offset can push
/// them out of range) and the clamped instant supplies the date and hour.
pub fn local_moment<Tz: TimeZone>(timestamp: i64, tz: &Tz) -> LocalMoment {
    let utc = DateTime::from_timestamp(saturate(timestamp), 0).unwrap_or_default();
    let local = utc.with_timezone(tz);

    LocalMoment { date: local.date_naive(), hour: local.hour() }
}

fn saturate(timestamp: i64) -> i64 {
    let lo = DateTime::<Utc>::MIN_UTC.timestamp() + SECONDS_PER_DAY;
    let hi = DateTime::<Utc>::MAX_UTC.timestamp() - SECONDS_PER_DAY;
    timestamp.clamp(lo, hi)
}

/// Pick one observation per calendar day, at most [`FORECAST_DAYS`] days.
///
/// Days appear in the order their first observation appears in the input.
/// Within a day the observation whose local hour is closest to noon wins;
/// on a tie the earlier-seen observation is kept. Observations are moved
/// into the result untouched.
pub fn select_daily_representatives<T, Tz, I>(observations: I, tz: &Tz) -> Vec<T>
where
    T: Timestamped,
    Tz: TimeZone,
    I: IntoIterator<Item = T>,
{
    select_daily(observations, tz, FORECAST_DAYS)
}

/// Same as [`select_daily_representatives`] with a caller-chosen day limit.
pub fn select_daily<T, Tz, I>(observations: I, tz: &Tz, max_days: usize) -> Vec<T>
where
    T: Timestamped,
    Tz: TimeZone,
    I: IntoIterator<Item = T>,
{
    // Insertion-ordered map: `index` points into `days`.
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();
    let mut days: Vec<(u32, T)> = Vec::new();

    for candidate in observations {
        let moment = local_moment(candidate.timestamp(), tz);
        let distance = moment.distance_to_noon();

        match index.get(&moment.date) {
            None => {
                index.insert(moment.date, days.len());
                days.push((distance, candidate));
            }
            Some(&slot) => {
                if distance < days[slot].0 {
                    days[slot] = (distance, candidate);
                }
            }
        }
    }

    days.into_iter().take(max_days).map(|(_, observation)| observation).collect()
}
