use crate::config::Config;
use crate::core::calculator::target::{monthly_target, weekly_target};
use crate::core::permissions::{self, Action};
use crate::db::entries::{SumColumn, SumFilter, sum_column};
use crate::db::pool::DbPool;
use crate::db::users;
use crate::errors::{AppError, AppResult};
use crate::models::entry_type::EntryType;
use crate::models::stats::{AnnualStats, MonthlyStats, WeeklyStats};
use crate::models::user::User;
use crate::models::work_subtype::WorkSubtype;
use crate::utils::date::{month_bounds, week_bounds, year_bounds};
use chrono::NaiveDate;
use rusqlite::Connection;

/// Read-only aggregation over the ledger. Every figure is a plain sum, so
/// an empty ledger yields zeros.
pub struct StatsLogic;

impl StatsLogic {
    /// Work hours of the seven days starting at `week_start` against the
    /// weekly target.
    pub fn weekly(
        pool: &mut DbPool,
        actor: &User,
        week_start: NaiveDate,
        user_id: i64,
    ) -> AppResult<WeeklyStats> {
        permissions::require_owner_or(actor, user_id, Action::ViewTeam)?;
        let user = load_user(&pool.conn, user_id)?;
        weekly_for(&pool.conn, &user, week_start)
    }

    pub fn monthly(
        pool: &mut DbPool,
        actor: &User,
        year: i32,
        month: u32,
        user_id: i64,
    ) -> AppResult<MonthlyStats> {
        permissions::require_owner_or(actor, user_id, Action::ViewTeam)?;
        let user = load_user(&pool.conn, user_id)?;
        monthly_for(&pool.conn, &user, year, month)
    }

    /// Per-category totals of one calendar year.
    pub fn annual(
        pool: &mut DbPool,
        cfg: &Config,
        actor: &User,
        user_id: i64,
        year: i32,
    ) -> AppResult<AnnualStats> {
        permissions::require_owner_or(actor, user_id, Action::ViewTeam)?;
        let user = load_user(&pool.conn, user_id)?;
        annual_for(&pool.conn, cfg, &user, year)
    }

    /// Weekly rows of all active users; staff get their own row only.
    pub fn weekly_team(
        pool: &mut DbPool,
        actor: &User,
        week_start: NaiveDate,
    ) -> AppResult<Vec<WeeklyStats>> {
        team(&pool.conn, actor)?
            .iter()
            .map(|u| weekly_for(&pool.conn, u, week_start))
            .collect()
    }

    pub fn monthly_team(
        pool: &mut DbPool,
        actor: &User,
        year: i32,
        month: u32,
    ) -> AppResult<Vec<MonthlyStats>> {
        team(&pool.conn, actor)?
            .iter()
            .map(|u| monthly_for(&pool.conn, u, year, month))
            .collect()
    }
}

fn team(conn: &Connection, actor: &User) -> AppResult<Vec<User>> {
    if permissions::allowed(actor.role, Action::ViewTeam) {
        users::list_users(conn, true)
    } else {
        Ok(vec![actor.clone()])
    }
}

fn weekly_for(conn: &Connection, user: &User, week_start: NaiveDate) -> AppResult<WeeklyStats> {
    let (start, end) = week_bounds(week_start)?;
    let worked = sum_column(
        conn,
        SumColumn::Hours,
        &SumFilter::new(user.id, start, end, EntryType::Work),
    )?;
    let target = weekly_target(user);

    Ok(WeeklyStats {
        user_id: user.id,
        user_name: user.full_name.clone(),
        week_start: start,
        worked_hours: worked,
        target_hours: target,
        overtime: worked - target,
    })
}

fn monthly_for(conn: &Connection, user: &User, year: i32, month: u32) -> AppResult<MonthlyStats> {
    let (start, end) = month_bounds(year, month)
        .ok_or_else(|| AppError::InvalidPeriod(format!("{:04}-{:02}", year, month)))?;

    let sum = |column, entry_type| {
        sum_column(conn, column, &SumFilter::new(user.id, start, end, entry_type))
    };

    let worked = sum(SumColumn::Hours, EntryType::Work)?;
    let target = monthly_target(user, year, month);

    Ok(MonthlyStats {
        user_id: user.id,
        user_name: user.full_name.clone(),
        year,
        month,
        worked_hours: worked,
        target_hours: target,
        overtime: worked - target,
        sick_days: sum(SumColumn::Days, EntryType::Sick)?,
        vacation_days: sum(SumColumn::Days, EntryType::Vacation)?,
    })
}

fn annual_for(conn: &Connection, cfg: &Config, user: &User, year: i32) -> AppResult<AnnualStats> {
    let (start, end) =
        year_bounds(year).ok_or_else(|| AppError::InvalidPeriod(format!("year {}", year)))?;

    let days = |entry_type| {
        sum_column(
            conn,
            SumColumn::Days,
            &SumFilter::new(user.id, start, end, entry_type),
        )
    };

    let instruction_hours = sum_column(
        conn,
        SumColumn::Hours,
        &SumFilter::new(user.id, start, end, EntryType::Work).subtype(WorkSubtype::Instruction),
    )?;
    let training_days = sum_column(
        conn,
        SumColumn::Days,
        &SumFilter::new(user.id, start, end, EntryType::Work).subtype(WorkSubtype::Training),
    )?;

    // carry-over vacation is booked in the first quarter
    let (q1_start, q1_end) = match (
        NaiveDate::from_ymd_opt(year, 1, 1),
        NaiveDate::from_ymd_opt(year, 3, 31),
    ) {
        (Some(s), Some(e)) => (s, e),
        _ => return Err(AppError::InvalidPeriod(format!("year {}", year))),
    };
    let previous_year_vacation_days = sum_column(
        conn,
        SumColumn::Days,
        &SumFilter::new(user.id, q1_start, q1_end, EntryType::Vacation)
            .marker(&cfg.carryover_marker),
    )?;

    let vacation_days = days(EntryType::Vacation)?;
    let vacation_entitlement = f64::from(user.vacation_days_per_year);

    Ok(AnnualStats {
        user_id: user.id,
        user_name: user.full_name.clone(),
        year,
        instruction_hours,
        training_days,
        education_leave_days: days(EntryType::EducationLeave)?,
        sick_days: days(EntryType::Sick)?,
        child_sick_days: days(EntryType::ChildSick)?,
        vacation_days,
        previous_year_vacation_days,
        internship_days: days(EntryType::Internship)?,
        observation_days: days(EntryType::Observation)?,
        vacation_entitlement,
        vacation_remaining: vacation_entitlement
            - (vacation_days - previous_year_vacation_days),
    })
}

fn load_user(conn: &Connection, id: i64) -> AppResult<User> {
    users::find_by_id(conn, id)?.ok_or_else(|| AppError::NotFound(format!("User #{}", id)))
}
