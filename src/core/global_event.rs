use crate::core::permissions::{self, Action};
use crate::db::db_utils::fmt_date;
use crate::db::global_events;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::global_event::{GlobalEvent, GlobalEventStats, GlobalEventType};
use crate::models::user::User;
use crate::utils::date::{month_bounds, year_bounds};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

pub struct GlobalEventLogic;

impl GlobalEventLogic {
    pub fn create(
        pool: &mut DbPool,
        actor: &User,
        date: NaiveDate,
        event_type: &str,
        description: Option<&str>,
    ) -> AppResult<GlobalEvent> {
        permissions::require(actor, Action::ManageGlobalEvents)?;
        let event_type = parse_type(event_type)?;

        if global_events::find_same_day_type(&pool.conn, date, event_type)?.is_some() {
            return Err(duplicate(date, event_type));
        }

        let id = global_events::insert_event(&pool.conn, date, event_type, description)?;
        ttlog(
            &pool.conn,
            "event_add",
            &fmt_date(&date),
            &format!("{} by {}", event_type.label(), actor.username),
        )?;
        load(pool, id)
    }

    pub fn update(
        pool: &mut DbPool,
        actor: &User,
        id: i64,
        date: NaiveDate,
        event_type: &str,
        description: Option<&str>,
    ) -> AppResult<GlobalEvent> {
        permissions::require(actor, Action::ManageGlobalEvents)?;
        let mut event = load(pool, id)?;
        let event_type = parse_type(event_type)?;

        if let Some(other) = global_events::find_same_day_type(&pool.conn, date, event_type)?
            && other.id != id
        {
            return Err(duplicate(date, event_type));
        }

        event.date = date;
        event.event_type = event_type;
        event.description = description.map(str::to_string);
        global_events::update_event(&pool.conn, &event)?;

        ttlog(
            &pool.conn,
            "event_edit",
            &fmt_date(&date),
            &format!("{} by {}", event_type.label(), actor.username),
        )?;
        Ok(event)
    }

    pub fn delete(pool: &mut DbPool, actor: &User, id: i64) -> AppResult<()> {
        permissions::require(actor, Action::ManageGlobalEvents)?;
        let event = load(pool, id)?;
        global_events::delete_event(&pool.conn, id)?;
        ttlog(
            &pool.conn,
            "event_del",
            &fmt_date(&event.date),
            &format!("{} deleted by {}", event.event_type.label(), actor.username),
        )?;
        Ok(())
    }

    pub fn get(pool: &mut DbPool, id: i64) -> AppResult<GlobalEvent> {
        load(pool, id)
    }

    pub fn list(
        pool: &mut DbPool,
        bounds: Option<(NaiveDate, NaiveDate)>,
        event_type: Option<&str>,
    ) -> AppResult<Vec<GlobalEvent>> {
        let event_type = event_type.map(parse_type).transpose()?;
        global_events::list_events(&pool.conn, bounds, event_type)
    }

    /// Events of a whole year, or of one month when `month` is given.
    pub fn calendar(
        pool: &mut DbPool,
        year: i32,
        month: Option<u32>,
    ) -> AppResult<Vec<GlobalEvent>> {
        let bounds = match month {
            Some(m) => month_bounds(year, m),
            None => year_bounds(year),
        }
        .ok_or_else(|| {
            AppError::InvalidPeriod(match month {
                Some(m) => format!("{:04}-{:02}", year, m),
                None => format!("year {}", year),
            })
        })?;
        global_events::list_events(&pool.conn, Some(bounds), None)
    }

    /// Count of a year's events by type and by month. Only types and months
    /// that actually occur are listed.
    pub fn stats(pool: &mut DbPool, actor: &User, year: i32) -> AppResult<GlobalEventStats> {
        permissions::require(actor, Action::ManageGlobalEvents)?;
        let events = Self::calendar(pool, year, None)?;

        let mut by_type: Vec<(GlobalEventType, i64)> = Vec::new();
        for t in GlobalEventType::ALL {
            let n = events.iter().filter(|e| e.event_type == t).count() as i64;
            if n > 0 {
                by_type.push((t, n));
            }
        }

        let mut by_month: BTreeMap<u32, i64> = BTreeMap::new();
        for e in &events {
            *by_month.entry(e.date.month()).or_default() += 1;
        }

        Ok(GlobalEventStats {
            year,
            total_events: events.len() as i64,
            by_type,
            by_month: by_month.into_iter().collect(),
        })
    }

    pub fn types() -> Vec<GlobalEventType> {
        GlobalEventType::ALL.to_vec()
    }
}

fn parse_type(code: &str) -> AppResult<GlobalEventType> {
    GlobalEventType::from_code(code).ok_or_else(|| {
        let allowed: Vec<&str> = GlobalEventType::ALL.iter().map(|t| t.to_db_str()).collect();
        AppError::Validation(format!(
            "invalid event type '{}', allowed: {}",
            code,
            allowed.join(", ")
        ))
    })
}

fn duplicate(date: NaiveDate, event_type: GlobalEventType) -> AppError {
    AppError::Conflict(format!(
        "an event of type '{}' already exists on {}",
        event_type.to_db_str(),
        fmt_date(&date)
    ))
}

fn load(pool: &mut DbPool, id: i64) -> AppResult<GlobalEvent> {
    global_events::find_event(&pool.conn, id)?
        .ok_or_else(|| AppError::NotFound(format!("Event #{}", id)))
}
