//! Read-side statistics returned by the aggregation engine.

use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeeklyStats {
    pub user_id: i64,
    pub user_name: String,
    pub week_start: NaiveDate,
    pub worked_hours: f64,
    pub target_hours: f64,
    pub overtime: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyStats {
    pub user_id: i64,
    pub user_name: String,
    pub year: i32,
    pub month: u32,
    pub worked_hours: f64,
    pub target_hours: f64,
    pub overtime: f64,
    pub sick_days: f64,
    pub vacation_days: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnualStats {
    pub user_id: i64,
    pub user_name: String,
    pub year: i32,
    pub instruction_hours: f64,
    pub training_days: f64,
    pub education_leave_days: f64,
    pub sick_days: f64,
    pub child_sick_days: f64,
    pub vacation_days: f64,
    pub previous_year_vacation_days: f64,
    pub internship_days: f64,
    pub observation_days: f64,
    pub vacation_entitlement: f64,
    pub vacation_remaining: f64,
}
