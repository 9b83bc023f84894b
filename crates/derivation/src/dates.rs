//! Calendar Date Handling

use chrono::NaiveDate;

/// The only accepted raw date layout
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Average Gregorian year length used for every duration
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Parse a `YYYY-MM-DD` date
///
/// chrono alone accepts single-digit months and days, so the shape is
/// checked first.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }

    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !digits_ok {
        return None;
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Duration between two dates in years, rounded to 2 decimals
pub fn years_between(start: NaiveDate, end: NaiveDate) -> f64 {
    let days = (end - start).num_days() as f64;
    round2(days / DAYS_PER_YEAR)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
