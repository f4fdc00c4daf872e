//! German display names used by calendar headers, invoice periods and the
//! revenue chart.

use chrono::{Datelike, NaiveDate, Weekday};

const MONTH_NAMES: [&str; 12] = [
    "Januar", "Februar", "März", "April", "Mai", "Juni",
    "Juli", "August", "September", "Oktober", "November", "Dezember",
];

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mär", "Apr", "Mai", "Jun",
    "Jul", "Aug", "Sep", "Okt", "Nov", "Dez",
];

/// Full German month name for `month` in 1..=12.
/// Out-of-range values fall back to January.
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[month_index(month)]
}

/// Fixed 3-letter month abbreviation (chart axis labels).
pub fn month_abbreviation(month: u32) -> &'static str {
    MONTH_ABBREVIATIONS[month_index(month)]
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Montag",
        Weekday::Tue => "Dienstag",
        Weekday::Wed => "Mittwoch",
        Weekday::Thu => "Donnerstag",
        Weekday::Fri => "Freitag",
        Weekday::Sat => "Samstag",
        Weekday::Sun => "Sonntag",
    }
}

/// `"05. März 2024"`
pub fn long_date(date: NaiveDate) -> String {
    format!("{:02}. {} {}", date.day(), month_name(date.month()), date.year())
}

fn month_index(month: u32) -> usize {
    match month {
        1..=12 => (month - 1) as usize,
        _ => 0,
    }
}
