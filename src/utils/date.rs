use crate::errors::{AppError, AppResult};
use chrono::{Datelike, Months, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

pub fn first_day_of_month(d: NaiveDate) -> NaiveDate {
    d.with_day(1).unwrap_or(d)
}

pub fn last_day_of_month(d: NaiveDate) -> NaiveDate {
    let first = first_day_of_month(d);
    first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(first)
}

/// Inclusive `[first, last]` bounds of the month containing `d`.
pub fn month_bounds(d: NaiveDate) -> (NaiveDate, NaiveDate) {
    (first_day_of_month(d), last_day_of_month(d))
}

/// Inclusive bounds of the month before the one containing `d`.
pub fn previous_month_bounds(d: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = first_day_of_month(d);
    let prev = first
        .checked_sub_months(Months::new(1))
        .unwrap_or(first);
    month_bounds(prev)
}

/// `{year}-{MM}` key; sorts chronologically as plain text.
pub fn month_key(d: NaiveDate) -> String {
    format!("{}-{:02}", d.year(), d.month())
}

/// Parse a date range expression.
///
/// Supports:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - YYYY:YYYY
/// - YYYY-MM:YYYY-MM
/// - YYYY-MM-DD:YYYY-MM-DD
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let invalid = || AppError::InvalidDate(r.to_string());

    let (start_raw, end_raw) = match r.split_once(':') {
        Some((s, e)) => (s.trim(), e.trim()),
        None => (r.trim(), r.trim()),
    };

    if start_raw.len() != end_raw.len() {
        return Err(invalid());
    }

    let start = period_start(start_raw).ok_or_else(invalid)?;
    let end = period_end(end_raw).ok_or_else(invalid)?;

    if start > end {
        return Err(invalid());
    }
    Ok((start, end))
}

fn period_start(p: &str) -> Option<NaiveDate> {
    match p.len() {
        4 => NaiveDate::from_ymd_opt(p.parse().ok()?, 1, 1),
        7 if p.as_bytes()[4] == b'-' => NaiveDate::from_ymd_opt(
            p.get(0..4)?.parse().ok()?,
            p.get(5..7)?.parse().ok()?,
            1,
        ),
        10 => parse_date(p),
        _ => None,
    }
}

fn period_end(p: &str) -> Option<NaiveDate> {
    match p.len() {
        4 => NaiveDate::from_ymd_opt(p.parse().ok()?, 12, 31),
        7 => period_start(p).map(last_day_of_month),
        10 => parse_date(p),
        _ => None,
    }
}
