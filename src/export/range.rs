// src/export/range.rs

use crate::core::calculator::target::days_in_month;
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

/// Parse a `--range` expression into inclusive date bounds.
///
/// Accepted:
/// - `YYYY`, `YYYY-MM`, `YYYY-MM-DD`
/// - `YYYY:YYYY`, `YYYY-MM:YYYY-MM`, `YYYY-MM-DD:YYYY-MM-DD`
///
/// `None` and `all` mean no bounds.
pub fn parse_optional_range(r: Option<&str>) -> AppResult<Option<(NaiveDate, NaiveDate)>> {
    match r {
        None => Ok(None),
        Some(r) if r.trim().eq_ignore_ascii_case("all") => Ok(None),
        Some(r) => parse_range(r).map(Some),
    }
}

pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let r = r.trim();
    let (start, end) = match r.split_once(':') {
        Some((s, e)) => {
            let (s, e) = (s.trim(), e.trim());
            if s.len() != e.len() {
                return Err(invalid(r, "start and end must have the same format"));
            }
            (first_day(s)?, last_day(e)?)
        }
        None => (first_day(r)?, last_day(r)?),
    };

    if start > end {
        return Err(invalid(r, "start is after end"));
    }
    Ok((start, end))
}

fn first_day(p: &str) -> AppResult<NaiveDate> {
    match p.len() {
        4 => NaiveDate::from_ymd_opt(year_of(p)?, 1, 1).ok_or_else(|| invalid(p, "invalid year")),
        7 => {
            let (y, m) = year_month_of(p)?;
            NaiveDate::from_ymd_opt(y, m, 1).ok_or_else(|| invalid(p, "invalid month"))
        }
        10 => NaiveDate::parse_from_str(p, "%Y-%m-%d").map_err(|_| invalid(p, "invalid date")),
        _ => Err(invalid(p, "unsupported range format")),
    }
}

fn last_day(p: &str) -> AppResult<NaiveDate> {
    match p.len() {
        4 => NaiveDate::from_ymd_opt(year_of(p)?, 12, 31).ok_or_else(|| invalid(p, "invalid year")),
        7 => {
            let (y, m) = year_month_of(p)?;
            NaiveDate::from_ymd_opt(y, m, days_in_month(y, m))
                .ok_or_else(|| invalid(p, "invalid month"))
        }
        10 => NaiveDate::parse_from_str(p, "%Y-%m-%d").map_err(|_| invalid(p, "invalid date")),
        _ => Err(invalid(p, "unsupported range format")),
    }
}

fn year_of(p: &str) -> AppResult<i32> {
    p.parse().map_err(|_| invalid(p, "invalid year"))
}

fn year_month_of(p: &str) -> AppResult<(i32, u32)> {
    let (y, m) = p.split_once('-').ok_or_else(|| invalid(p, "expected YYYY-MM"))?;
    let y = year_of(y)?;
    let m: u32 = m.parse().map_err(|_| invalid(p, "invalid month"))?;
    Ok((y, m))
}

fn invalid(p: &str, why: &str) -> AppError {
    AppError::InvalidPeriod(format!("{} ({})", p, why))
}
