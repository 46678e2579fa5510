use crate::core::permissions::{self, Action};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::users;
use crate::errors::{AppError, AppResult};
use crate::models::role::Role;
use crate::models::user::{NewUser, User, UserUpdate};

/// Username of the account `init` creates in an empty directory.
pub const BOOTSTRAP_ADMIN: &str = "admin";

pub struct UserLogic;

impl UserLogic {
    pub fn create(pool: &mut DbPool, actor: &User, new_user: &NewUser) -> AppResult<User> {
        permissions::require(actor, Action::CreateUser)?;
        validate_new(new_user)?;
        Self::insert(pool, new_user, &actor.username)
    }

    /// Seed an admin account when the directory is empty. Returns the new
    /// user, or `None` if users already exist.
    pub fn bootstrap(pool: &mut DbPool) -> AppResult<Option<User>> {
        if users::count_users(&pool.conn)? > 0 {
            return Ok(None);
        }
        let admin = NewUser::new(BOOTSTRAP_ADMIN, "Administrator", Role::Admin);
        Self::insert(pool, &admin, "init").map(Some)
    }

    fn insert(pool: &mut DbPool, new_user: &NewUser, by: &str) -> AppResult<User> {
        if users::find_by_username(&pool.conn, &new_user.username)?.is_some() {
            return Err(AppError::Conflict(format!(
                "username '{}' already exists",
                new_user.username
            )));
        }

        let id = users::insert_user(&pool.conn, new_user)?;
        ttlog(
            &pool.conn,
            "user_add",
            &new_user.username,
            &format!("{} ({}) created by {}", new_user.full_name, new_user.role.to_db_str(), by),
        )?;

        users::find_by_id(&pool.conn, id)?
            .ok_or_else(|| AppError::NotFound(format!("User #{}", id)))
    }

    /// Change contract data. Users may change their own name and email;
    /// everything else needs an admin.
    pub fn update(
        pool: &mut DbPool,
        actor: &User,
        user_id: i64,
        changes: &UserUpdate,
    ) -> AppResult<User> {
        let personal_only = changes.role.is_none()
            && changes.weekly_hours.is_none()
            && changes.additional_hours.is_none()
            && changes.work_days_per_week.is_none()
            && changes.vacation_days_per_year.is_none()
            && changes.is_active.is_none();

        if personal_only {
            permissions::require_owner_or(actor, user_id, Action::UpdateUser)?;
        } else {
            permissions::require(actor, Action::UpdateUser)?;
        }

        let mut user = Self::by_id(pool, user_id)?;

        if let Some(email) = &changes.email {
            user.email = if email.trim().is_empty() {
                None
            } else {
                Some(email.trim().to_string())
            };
        }
        if let Some(v) = &changes.full_name {
            user.full_name = v.trim().to_string();
        }
        if let Some(v) = changes.role {
            user.role = v;
        }
        if let Some(v) = changes.weekly_hours {
            user.weekly_hours = v;
        }
        if let Some(v) = changes.additional_hours {
            user.additional_hours = v;
        }
        if let Some(v) = changes.work_days_per_week {
            user.work_days_per_week = v;
        }
        if let Some(v) = changes.vacation_days_per_year {
            user.vacation_days_per_year = v;
        }
        if let Some(v) = changes.is_active {
            user.is_active = v;
        }

        validate_contract(
            &user.full_name,
            user.email.as_deref(),
            user.weekly_hours,
            user.additional_hours,
            user.work_days_per_week,
        )?;

        users::update_user(&pool.conn, &user)?;
        ttlog(
            &pool.conn,
            "user_edit",
            &user.username,
            &format!("updated by {}", actor.username),
        )?;
        Ok(user)
    }

    pub fn set_active(
        pool: &mut DbPool,
        actor: &User,
        user_id: i64,
        active: bool,
    ) -> AppResult<User> {
        let changes = UserUpdate {
            is_active: Some(active),
            ..UserUpdate::default()
        };
        Self::update(pool, actor, user_id, &changes)
    }

    pub fn list(pool: &mut DbPool, actor: &User, include_inactive: bool) -> AppResult<Vec<User>> {
        permissions::require(actor, Action::ListUsers)?;
        users::list_users(&pool.conn, !include_inactive)
    }

    pub fn by_id(pool: &mut DbPool, id: i64) -> AppResult<User> {
        users::find_by_id(&pool.conn, id)?
            .ok_or_else(|| AppError::NotFound(format!("User #{}", id)))
    }

    pub fn by_username(pool: &mut DbPool, username: &str) -> AppResult<User> {
        users::find_by_username(&pool.conn, username)?
            .ok_or_else(|| AppError::NotFound(format!("User '{}'", username)))
    }

    /// Username first, then full name (used by imports and `--user` flags).
    pub fn resolve(pool: &mut DbPool, name: &str) -> AppResult<User> {
        let name = name.trim();
        if let Some(u) = users::find_by_username(&pool.conn, name)? {
            return Ok(u);
        }
        users::find_by_full_name(&pool.conn, name)?
            .ok_or_else(|| AppError::NotFound(format!("User '{}'", name)))
    }
}

fn validate_new(u: &NewUser) -> AppResult<()> {
    let username = u.username.trim();
    if username.is_empty() || username.contains(char::is_whitespace) {
        return Err(AppError::Validation(format!(
            "invalid username '{}'",
            u.username
        )));
    }
    validate_contract(
        &u.full_name,
        u.email.as_deref(),
        u.weekly_hours,
        u.additional_hours,
        u.work_days_per_week,
    )
}

fn validate_contract(
    full_name: &str,
    email: Option<&str>,
    weekly_hours: f64,
    additional_hours: f64,
    work_days_per_week: u32,
) -> AppResult<()> {
    if full_name.trim().is_empty() {
        return Err(AppError::Validation("full name must not be empty".into()));
    }
    if let Some(e) = email
        && !e.contains('@')
    {
        return Err(AppError::Validation(format!("invalid email address '{}'", e)));
    }
    for (label, v) in [("weekly_hours", weekly_hours), ("additional_hours", additional_hours)] {
        if !v.is_finite() || v < 0.0 {
            return Err(AppError::Validation(format!(
                "{} must be a non-negative number, got {}",
                label, v
            )));
        }
    }
    if !(1..=7).contains(&work_days_per_week) {
        return Err(AppError::Validation(format!(
            "work_days_per_week must be between 1 and 7, got {}",
            work_days_per_week
        )));
    }
    Ok(())
}
