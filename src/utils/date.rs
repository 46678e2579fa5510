use crate::errors::{AppError, AppResult};
use chrono::{Datelike, Days, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Like [`parse_date`], failing with `InvalidDate`.
pub fn require_date(s: &str) -> AppResult<NaiveDate> {
    parse_date(s).ok_or_else(|| AppError::InvalidDate(format!("'{}' (expected YYYY-MM-DD)", s)))
}

/// Parse `YYYY-MM` into (year, month). The month is range-checked by the
/// operations that use it.
pub fn parse_year_month(s: &str) -> AppResult<(i32, u32)> {
    let invalid = || AppError::InvalidPeriod(format!("'{}' (expected YYYY-MM)", s));
    let (y, m) = s.trim().split_once('-').ok_or_else(invalid)?;
    let year = y.parse::<i32>().map_err(|_| invalid())?;
    let month = m.parse::<u32>().map_err(|_| invalid())?;
    Ok((year, month))
}

/// First and last day of a calendar month.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((first, next.pred_opt()?))
}

pub fn year_bounds(year: i32) -> Option<(NaiveDate, NaiveDate)> {
    Some((
        NaiveDate::from_ymd_opt(year, 1, 1)?,
        NaiveDate::from_ymd_opt(year, 12, 31)?,
    ))
}

/// Monday of the week containing `date`.
pub fn week_start(date: NaiveDate) -> AppResult<NaiveDate> {
    let back = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(back))
        .ok_or_else(|| AppError::InvalidPeriod(format!("week of {}", date)))
}

/// Seven days starting at `start` (inclusive).
pub fn week_bounds(start: NaiveDate) -> AppResult<(NaiveDate, NaiveDate)> {
    let end = start
        .checked_add_days(Days::new(6))
        .ok_or_else(|| AppError::InvalidPeriod(format!("week starting {}", start)))?;
    Ok((start, end))
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "",
    }
}
