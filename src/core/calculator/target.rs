//! Target hours derived from a user's contract.

use crate::models::user::User;
use chrono::{Datelike, NaiveDate};

/// Weekly target: contract hours plus the special allotment.
pub fn weekly_target(user: &User) -> f64 {
    user.weekly_target()
}

/// Monthly target, pro-rated by the number of calendar days in the month.
///
/// `(weekly + additional) × (work_days_per_week × days_in_month / 7) / work_days_per_week`.
/// A contract without work days has no target.
pub fn monthly_target(user: &User, year: i32, month: u32) -> f64 {
    if user.work_days_per_week == 0 {
        return 0.0;
    }
    let wdpw = f64::from(user.work_days_per_week);
    let days = f64::from(days_in_month(year, month));
    let working_days = wdpw * days / 7.0;
    user.weekly_target() * working_days / wdpw
}

/// Number of days in the month; 0 for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return 0;
    };
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    match next {
        Some(n) => (n - first).num_days() as u32,
        None => 31 - first.day0(),
    }
}
