use crate::config::{Config, LockPolicy};
use crate::core::permissions::{self, Action};
use crate::db::entries;
use crate::db::locks;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::users;
use crate::errors::{AppError, AppResult};
use crate::models::time_entry::{EntryInput, TimeEntry};
use crate::models::user::User;
use chrono::{Datelike, NaiveDate};
use rusqlite::Connection;

/// Upper bound of hours a single booking may carry.
pub const MAX_HOURS_PER_ENTRY: f64 = 24.0;

/// Business logic of the time-entry ledger. Every write goes through here so
/// that the lock guard, the prep-time rule and the `is_locked` projection
/// always apply.
pub struct EntryLogic;

impl EntryLogic {
    /// Book a new entry for `owner_id`.
    pub fn create(
        pool: &mut DbPool,
        cfg: &Config,
        actor: &User,
        owner_id: i64,
        input: &EntryInput,
    ) -> AppResult<TimeEntry> {
        permissions::require_owner_or(actor, owner_id, Action::ManageOthersEntries)?;
        validate_input(input)?;

        let owner = load_user(&pool.conn, owner_id)?;
        let locked = guard_month(&pool.conn, cfg, actor, &owner, input.date)?;

        let mut entry = TimeEntry::new(owner.id, input);
        entry.is_locked = locked;
        entry.id = entries::insert_entry(&pool.conn, &entry)?;

        ttlog(
            &pool.conn,
            "add",
            &format!("entry #{}", entry.id),
            &format!(
                "{} {} {} for {} by {}",
                entry.date_str(),
                entry.entry_type.to_db_str(),
                amount(&entry),
                owner.username,
                actor.username
            ),
        )?;

        Ok(entry)
    }

    /// Replace the caller-supplied fields of an existing entry. Both the
    /// current month and the target month are checked against the locks.
    pub fn update(
        pool: &mut DbPool,
        cfg: &Config,
        actor: &User,
        entry_id: i64,
        input: &EntryInput,
    ) -> AppResult<TimeEntry> {
        let mut entry = load_entry(&pool.conn, entry_id)?;
        permissions::require_owner_or(actor, entry.user_id, Action::ManageOthersEntries)?;
        validate_input(input)?;

        let owner = load_user(&pool.conn, entry.user_id)?;
        guard_month(&pool.conn, cfg, actor, &owner, entry.date)?;
        let locked = guard_month(&pool.conn, cfg, actor, &owner, input.date)?;

        entry.apply(input);
        entry.is_locked = locked;
        entries::update_entry(&pool.conn, &entry)?;

        ttlog(
            &pool.conn,
            "edit",
            &format!("entry #{}", entry.id),
            &format!(
                "{} {} {} for {} by {}",
                entry.date_str(),
                entry.entry_type.to_db_str(),
                amount(&entry),
                owner.username,
                actor.username
            ),
        )?;

        Ok(entry)
    }

    pub fn delete(pool: &mut DbPool, cfg: &Config, actor: &User, entry_id: i64) -> AppResult<()> {
        let entry = load_entry(&pool.conn, entry_id)?;
        permissions::require_owner_or(actor, entry.user_id, Action::ManageOthersEntries)?;

        let owner = load_user(&pool.conn, entry.user_id)?;
        guard_month(&pool.conn, cfg, actor, &owner, entry.date)?;

        entries::delete_entry(&pool.conn, entry.id)?;

        ttlog(
            &pool.conn,
            "del",
            &format!("entry #{}", entry.id),
            &format!(
                "{} {} of {} deleted by {}",
                entry.date_str(),
                entry.entry_type.to_db_str(),
                owner.username,
                actor.username
            ),
        )?;

        Ok(())
    }

    pub fn get(pool: &mut DbPool, actor: &User, entry_id: i64) -> AppResult<TimeEntry> {
        let entry = load_entry(&pool.conn, entry_id)?;
        permissions::require_owner_or(actor, entry.user_id, Action::ViewTeam)?;
        Ok(entry)
    }

    /// Entries ordered by date. Staff always get their own entries only;
    /// leadership/admin see everybody unless `user_id` narrows it down.
    pub fn list(
        pool: &mut DbPool,
        actor: &User,
        user_id: Option<i64>,
        bounds: Option<(NaiveDate, NaiveDate)>,
    ) -> AppResult<Vec<TimeEntry>> {
        let user_filter = if permissions::allowed(actor.role, Action::ViewTeam) {
            user_id
        } else {
            if let Some(other) = user_id.filter(|id| *id != actor.id) {
                permissions::require_owner_or(actor, other, Action::ViewTeam)?;
            }
            Some(actor.id)
        };

        entries::list_entries(&pool.conn, user_filter, bounds)
    }
}

fn validate_input(input: &EntryInput) -> AppResult<()> {
    if !input.hours.is_finite() || input.hours < 0.0 {
        return Err(AppError::Validation(format!(
            "hours must be a non-negative number, got {}",
            input.hours
        )));
    }
    if input.hours > MAX_HOURS_PER_ENTRY {
        return Err(AppError::Validation(format!(
            "hours must not exceed {}, got {}",
            MAX_HOURS_PER_ENTRY, input.hours
        )));
    }
    if !input.days.is_finite() || input.days < 0.0 {
        return Err(AppError::Validation(format!(
            "days must be a non-negative number, got {}",
            input.days
        )));
    }
    if input.subtype.is_some() && !input.entry_type.is_work() {
        return Err(AppError::Validation(format!(
            "a subtype is only allowed on work entries, not on '{}'",
            input.entry_type.to_db_str()
        )));
    }
    Ok(())
}

/// Check the lock of `owner`'s month containing `date`.
///
/// Returns whether the month is locked, so the written row can carry the
/// flag. Staff are always rejected in a locked month; leadership and admins
/// only under [`LockPolicy::Strict`].
fn guard_month(
    conn: &Connection,
    cfg: &Config,
    actor: &User,
    owner: &User,
    date: NaiveDate,
) -> AppResult<bool> {
    let (year, month) = (date.year(), date.month());
    if !locks::is_locked(conn, owner.id, year, month)? {
        return Ok(false);
    }

    if actor.role.is_staff() || cfg.lock_policy == LockPolicy::Strict {
        tracing::debug!(
            actor = %actor.username,
            owner = %owner.username,
            year,
            month,
            "write rejected, month locked"
        );
        return Err(AppError::MonthLocked {
            user: owner.username.clone(),
            year,
            month,
        });
    }

    tracing::info!(
        actor = %actor.username,
        owner = %owner.username,
        year,
        month,
        "locked month modified under leadership override"
    );
    Ok(true)
}

fn load_user(conn: &Connection, id: i64) -> AppResult<User> {
    users::find_by_id(conn, id)?.ok_or_else(|| AppError::NotFound(format!("User #{}", id)))
}

fn load_entry(conn: &Connection, id: i64) -> AppResult<TimeEntry> {
    entries::find_entry(conn, id)?.ok_or_else(|| AppError::NotFound(format!("Entry #{}", id)))
}

fn amount(e: &TimeEntry) -> String {
    if e.entry_type.is_work() {
        format!("{:.2}h", e.hours)
    } else {
        format!("{}d", e.days)
    }
}
