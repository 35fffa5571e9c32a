//! Month-key helpers shared by the fetch layer and the API surface.
//!
//! Budgets are keyed by a `YYYY-MM` string; transactions are filtered by a
//! [first day, last day] date range for the same month. Both derive from a
//! (year, month) pair, so the conversions live in one place.

use chrono::NaiveDate;

/// Formats a (year, month) pair as the canonical `YYYY-MM` budget key.
pub fn month_key(year: i32, month: u32) -> String {
    format!("{:04}-{:02}", year, month)
}

/// Parses a `YYYY-MM` key back into a (year, month) pair.
/// Returns `None` for anything that is not a valid month key.
pub fn parse_month_key(key: &str) -> Option<(i32, u32)> {
    let (year, month) = key.split_once('-')?;
    if year.len() != 4 || month.len() != 2 {
        return None;
    }
    let year: i32 = year.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }
    Some((year, month))
}

/// Returns the first and last day of the given month, inclusive.
/// `None` when the month is out of range.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let last = next_first.pred_opt()?;
    Some((first, last))
}
