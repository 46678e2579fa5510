use crate::config::Config;
use crate::core::permissions::{self, Action};
use crate::db::entries;
use crate::db::locks;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::users;
use crate::errors::{AppError, AppResult};
use crate::models::monthly_lock::{
    BulkLockError, BulkLockReport, LockFilter, LockStatus, MonthlyLock, ReminderReport,
};
use crate::models::user::User;
use crate::notify::{Notifier, log_failure, templates};
use crate::utils::date::month_bounds;
use chrono::NaiveDate;
use rusqlite::ErrorCode;

/// Monthly lock workflow: lock rows and their `is_locked` projection onto
/// the ledger are always written together in one transaction.
pub struct LockLogic;

impl LockLogic {
    /// Lock `(user_id, year, month)`.
    ///
    /// The user is notified (email and push) after the commit; delivery
    /// failures are logged and never undo the lock.
    pub fn lock(
        pool: &mut DbPool,
        cfg: &Config,
        notifier: &dyn Notifier,
        user_id: i64,
        year: i32,
        month: u32,
        actor: &User,
    ) -> AppResult<MonthlyLock> {
        permissions::require(actor, Action::LockMonth)?;
        let bounds = validate_period(cfg, year, month)?;
        lock_one(pool, notifier, user_id, year, month, bounds, actor)
    }

    /// Lock the period for every user in `user_ids`, or for all active users
    /// when the set is empty. Users that cannot be locked end up in
    /// `errors`; the batch carries on.
    pub fn bulk_lock(
        pool: &mut DbPool,
        cfg: &Config,
        notifier: &dyn Notifier,
        year: i32,
        month: u32,
        user_ids: &[i64],
        actor: &User,
    ) -> AppResult<BulkLockReport> {
        permissions::require(actor, Action::BulkLock)?;
        let bounds = validate_period(cfg, year, month)?;

        let targets: Vec<i64> = if user_ids.is_empty() {
            users::list_users(&pool.conn, true)?
                .into_iter()
                .map(|u| u.id)
                .collect()
        } else {
            user_ids.to_vec()
        };

        let mut report = BulkLockReport::default();
        for user_id in targets {
            match lock_one(pool, notifier, user_id, year, month, bounds, actor) {
                Ok(lock) => report.locked.push(lock),
                Err(e) => report.errors.push(BulkLockError {
                    user_id,
                    reason: e.to_string(),
                }),
            }
        }

        tracing::info!(
            year,
            month,
            locked = report.locked.len(),
            failed = report.errors.len(),
            "bulk lock finished"
        );
        Ok(report)
    }

    /// Remove a lock and clear `is_locked` on the entries it covered.
    pub fn unlock(pool: &mut DbPool, lock_id: i64, actor: &User) -> AppResult<()> {
        permissions::require(actor, Action::UnlockMonth)?;
        let lock = locks::find_lock_by_id(&pool.conn, lock_id)?
            .ok_or_else(|| AppError::NotFound(format!("Lock #{}", lock_id)))?;
        unlock_one(pool, &lock, actor)
    }

    /// Unlock every lock of the period, optionally only for `user_ids`.
    /// Returns the number of locks removed.
    pub fn bulk_unlock(
        pool: &mut DbPool,
        cfg: &Config,
        year: i32,
        month: u32,
        user_ids: &[i64],
        actor: &User,
    ) -> AppResult<usize> {
        permissions::require(actor, Action::BulkUnlock)?;
        validate_period(cfg, year, month)?;

        let filter = LockFilter {
            year: Some(year),
            month: Some(month),
            user_id: None,
        };
        let selected: Vec<MonthlyLock> = locks::list_locks(&pool.conn, &filter)?
            .into_iter()
            .filter(|l| user_ids.is_empty() || user_ids.contains(&l.user_id))
            .collect();

        for lock in &selected {
            unlock_one(pool, lock, actor)?;
        }
        Ok(selected.len())
    }

    /// Locks matching `filter`, newest period first. Staff only see their own.
    pub fn list(
        pool: &mut DbPool,
        actor: &User,
        filter: LockFilter,
    ) -> AppResult<Vec<MonthlyLock>> {
        let filter = if permissions::allowed(actor.role, Action::ViewLockStatus) {
            filter
        } else {
            LockFilter {
                user_id: Some(actor.id),
                ..filter
            }
        };
        locks::list_locks(&pool.conn, &filter)
    }

    /// Lock state of every active user for the period.
    pub fn status(
        pool: &mut DbPool,
        cfg: &Config,
        year: i32,
        month: u32,
        actor: &User,
    ) -> AppResult<Vec<LockStatus>> {
        permissions::require(actor, Action::ViewLockStatus)?;
        let (start, end) = validate_period(cfg, year, month)?;

        let mut out = Vec::new();
        for user in users::list_users(&pool.conn, true)? {
            let lock = locks::find_lock(&pool.conn, user.id, year, month)?;
            let entry_count = entries::count_entries(&pool.conn, user.id, start, end)?;

            let locked_by_name = match &lock {
                Some(l) => users::find_by_id(&pool.conn, l.locked_by)?.map(|u| u.full_name),
                None => None,
            };

            out.push(LockStatus {
                user_id: user.id,
                user_name: user.full_name,
                year,
                month,
                is_locked: lock.is_some(),
                lock_id: lock.as_ref().map(|l| l.id),
                locked_at: lock.as_ref().map(|l| l.locked_at.clone()),
                locked_by: lock.as_ref().map(|l| l.locked_by),
                locked_by_name,
                entry_count,
            });
        }
        Ok(out)
    }

    /// Remind every active user whose month is still open. A push follows
    /// only a delivered email. Users without an email address are reported
    /// as errors.
    #[allow(clippy::too_many_arguments)]
    pub fn send_reminders(
        pool: &mut DbPool,
        cfg: &Config,
        notifier: &dyn Notifier,
        year: i32,
        month: u32,
        days_until_deadline: Option<u32>,
        user_ids: &[i64],
        actor: &User,
    ) -> AppResult<ReminderReport> {
        permissions::require(actor, Action::SendReminders)?;
        validate_period(cfg, year, month)?;
        let days = days_until_deadline.unwrap_or(cfg.reminder_days);

        let mut report = ReminderReport::default();
        for user in users::list_users(&pool.conn, true)? {
            if !user_ids.is_empty() && !user_ids.contains(&user.id) {
                continue;
            }
            if locks::is_locked(&pool.conn, user.id, year, month)? {
                continue;
            }

            let Some(address) = user.email.as_deref().filter(|a| !a.trim().is_empty()) else {
                report
                    .errors
                    .push(format!("{}: no email address", user.full_name));
                continue;
            };

            let email = templates::reminder_email(&user, year, month, days);
            match notifier.send_email(address, &email) {
                Ok(()) => {
                    report.sent_count += 1;
                    let payload = templates::reminder_push(year, month, days);
                    if let Err(e) = notifier.send_push(user.id, &payload) {
                        log_failure("push", user.id, &e);
                    }
                }
                Err(e) => {
                    log_failure("email", user.id, &e);
                    report.errors.push(format!("{}: {}", user.full_name, e));
                }
            }
        }

        ttlog(
            &pool.conn,
            "remind",
            &format!("{:04}-{:02}", year, month),
            &format!(
                "{} reminder(s) sent, {} error(s) by {}",
                report.sent_count,
                report.errors.len(),
                actor.username
            ),
        )?;

        Ok(report)
    }
}

/// Year within the configured bounds and month 1..=12. Returns the first and
/// last day of the month.
pub fn validate_period(cfg: &Config, year: i32, month: u32) -> AppResult<(NaiveDate, NaiveDate)> {
    if year < cfg.min_year || year > cfg.max_year {
        return Err(AppError::InvalidPeriod(format!(
            "year {} outside {}..={}",
            year, cfg.min_year, cfg.max_year
        )));
    }
    if !(1..=12).contains(&month) {
        return Err(AppError::InvalidPeriod(format!("month {} outside 1..=12", month)));
    }
    month_bounds(year, month)
        .ok_or_else(|| AppError::InvalidPeriod(format!("{:04}-{:02}", year, month)))
}

fn lock_one(
    pool: &mut DbPool,
    notifier: &dyn Notifier,
    user_id: i64,
    year: i32,
    month: u32,
    (start, end): (NaiveDate, NaiveDate),
    actor: &User,
) -> AppResult<MonthlyLock> {
    let owner = users::find_by_id(&pool.conn, user_id)?
        .ok_or_else(|| AppError::NotFound(format!("User #{}", user_id)))?;

    let already_locked = || AppError::AlreadyLocked {
        user: owner.username.clone(),
        year,
        month,
    };

    if locks::find_lock(&pool.conn, owner.id, year, month)?.is_some() {
        return Err(already_locked());
    }

    let tx = pool.conn.transaction()?;
    let lock = match locks::insert_lock(&tx, owner.id, year, month, actor.id) {
        Ok(lock) => lock,
        Err(e) if is_unique_violation(&e) => return Err(already_locked()),
        Err(e) => return Err(e),
    };
    let touched = entries::set_locked_for_period(&tx, owner.id, start, end, true)?;
    ttlog(
        &tx,
        "lock",
        &format!("{} {:04}-{:02}", owner.username, year, month),
        &format!("locked by {}, {} entries", actor.username, touched),
    )?;
    tx.commit()?;

    tracing::info!(user = %owner.username, year, month, entries = touched, "month locked");

    notify_locked(notifier, &owner, year, month, actor);
    Ok(lock)
}

fn unlock_one(pool: &mut DbPool, lock: &MonthlyLock, actor: &User) -> AppResult<()> {
    let (start, end) = month_bounds(lock.year, lock.month)
        .ok_or_else(|| AppError::InvalidPeriod(format!("{:04}-{:02}", lock.year, lock.month)))?;

    let tx = pool.conn.transaction()?;
    locks::delete_lock(&tx, lock.id)?;
    let touched = entries::set_locked_for_period(&tx, lock.user_id, start, end, false)?;
    ttlog(
        &tx,
        "unlock",
        &format!("user #{} {:04}-{:02}", lock.user_id, lock.year, lock.month),
        &format!("unlocked by {}, {} entries", actor.username, touched),
    )?;
    tx.commit()?;

    tracing::info!(
        user_id = lock.user_id,
        year = lock.year,
        month = lock.month,
        entries = touched,
        "month unlocked"
    );
    Ok(())
}

fn notify_locked(notifier: &dyn Notifier, owner: &User, year: i32, month: u32, actor: &User) {
    if let Some(address) = owner.email.as_deref().filter(|a| !a.trim().is_empty()) {
        let email = templates::lock_email(owner, year, month, &actor.full_name);
        if let Err(e) = notifier.send_email(address, &email) {
            log_failure("email", owner.id, &e);
        }
    }

    if let Err(e) = notifier.send_push(owner.id, &templates::lock_push(year, month)) {
        log_failure("push", owner.id, &e);
    }
}

fn is_unique_violation(err: &AppError) -> bool {
    matches!(
        err,
        AppError::Db(rusqlite::Error::SqliteFailure(e, _))
            if e.code == ErrorCode::ConstraintViolation
    )
}

