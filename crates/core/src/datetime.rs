//! Local calendar arithmetic.
//!
//! Everything here works on wall-clock values in the practice timezone.
//! Timestamps carrying an explicit offset are converted into that timezone
//! once, at parse time; from then on only naive dates and times are compared.

use chrono::{
    DateTime, Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
};
use chrono_tz::Tz;

use crate::errors::CoreError;

/// Naive layouts accepted for timestamps without an offset.
const NAIVE_LAYOUTS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse an API timestamp into local wall-clock time.
///
/// RFC 3339 values (`2024-03-05T08:00:00.000Z`, `...+01:00`) are converted
/// into `tz`. Offset-less values are taken as already local. A bare date
/// means local midnight. Returns `None` for anything else.
pub fn parse_local_datetime(raw: &str, tz: &Tz) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
        return Some(with_offset.with_timezone(tz).naive_local());
    }

    for layout in NAIVE_LAYOUTS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, layout) {
            return Some(naive);
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}

/// Monday of the week containing `date`.
/// Sunday rolls back six days, every other weekday back `weekday - 1`.
pub fn monday_of(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// Shift `date` by `delta` calendar months, keeping the day-of-month and
/// letting it overflow into the following month when the target month is
/// shorter (Jan 31 + 1 month = Mar 2 or Mar 3).
///
/// Returns `None` only when the result leaves chrono's representable range.
pub fn add_months_with_rollover(date: NaiveDate, delta: i64) -> Option<NaiveDate> {
    let total = i64::from(date.year()) * 12 + i64::from(date.month0()) + delta;
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    let month = u32::try_from(total.rem_euclid(12)).ok()? + 1;
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    first.checked_add_days(Days::new(u64::from(date.day() - 1)))
}

/// The (year, month) that lies `months_back` months before `(year, month)`.
pub fn months_before(year: i32, month: u32, months_back: u32) -> (i32, u32) {
    let total = i64::from(year) * 12 + i64::from(month.clamp(1, 12) - 1) - i64::from(months_back);
    let y = total.div_euclid(12) as i32;
    let m = total.rem_euclid(12) as u32 + 1;
    (y, m)
}

/// First day of the month containing `date`.
pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Parse a time-of-day text field (`"9:30"`, `"09:30"`, `"09:30:00"`).
pub fn parse_time_of_day(text: &str) -> Result<NaiveTime, CoreError> {
    let trimmed = text.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M:%S"))
        .map_err(|_| CoreError::InvalidTime(format!("'{text}' is not a valid HH:MM time")))
}

/// Convert a local wall-clock instant to UTC.
///
/// Ambiguous local times (clocks turned back) resolve to the earlier
/// instant; times inside a DST gap do not exist and yield `None`.
pub fn local_to_utc(local: NaiveDateTime, tz: &Tz) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}
