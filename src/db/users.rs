use crate::db::db_utils::{collect_rows, enum_column};
use crate::errors::AppResult;
use crate::models::role::Role;
use crate::models::user::{NewUser, User};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Row, params};

const USER_COLUMNS: &str = "id, username, email, full_name, role, is_active, weekly_hours,
     additional_hours, work_days_per_week, vacation_days_per_year, created_at";

pub fn map_user(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get("id")?,
        username: row.get("username")?,
        email: row.get("email")?,
        full_name: row.get("full_name")?,
        role: enum_column(row, "role", Role::from_db_str)?,
        is_active: row.get::<_, i32>("is_active")? == 1,
        weekly_hours: row.get("weekly_hours")?,
        additional_hours: row.get("additional_hours")?,
        work_days_per_week: row.get("work_days_per_week")?,
        vacation_days_per_year: row.get("vacation_days_per_year")?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_user(conn: &Connection, user: &NewUser) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO users (username, email, full_name, role, is_active, weekly_hours,
                            additional_hours, work_days_per_week, vacation_days_per_year,
                            created_at)
         VALUES (?1, ?2, ?3, ?4, 1, ?5, ?6, ?7, ?8, ?9)",
        params![
            user.username,
            user.email,
            user.full_name,
            user.role.to_db_str(),
            user.weekly_hours,
            user.additional_hours,
            user.work_days_per_week,
            user.vacation_days_per_year,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Update every mutable column of a user.
pub fn update_user(conn: &Connection, user: &User) -> AppResult<()> {
    conn.execute(
        "UPDATE users
         SET email = ?1, full_name = ?2, role = ?3, is_active = ?4, weekly_hours = ?5,
             additional_hours = ?6, work_days_per_week = ?7, vacation_days_per_year = ?8
         WHERE id = ?9",
        params![
            user.email,
            user.full_name,
            user.role.to_db_str(),
            if user.is_active { 1 } else { 0 },
            user.weekly_hours,
            user.additional_hours,
            user.work_days_per_week,
            user.vacation_days_per_year,
            user.id,
        ],
    )?;
    Ok(())
}

pub fn find_by_id(conn: &Connection, id: i64) -> AppResult<Option<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1");
    Ok(conn.query_row(&sql, [id], map_user).optional()?)
}

pub fn find_by_username(conn: &Connection, username: &str) -> AppResult<Option<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1");
    Ok(conn.query_row(&sql, [username], map_user).optional()?)
}

pub fn find_by_full_name(conn: &Connection, full_name: &str) -> AppResult<Option<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE full_name = ?1 ORDER BY id LIMIT 1");
    Ok(conn.query_row(&sql, [full_name], map_user).optional()?)
}

/// All users ordered by name; `active_only` hides deactivated accounts.
pub fn list_users(conn: &Connection, active_only: bool) -> AppResult<Vec<User>> {
    let sql = if active_only {
        format!("SELECT {USER_COLUMNS} FROM users WHERE is_active = 1 ORDER BY full_name, id")
    } else {
        format!("SELECT {USER_COLUMNS} FROM users ORDER BY full_name, id")
    };
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map([], map_user)?;
    Ok(collect_rows(rows)?)
}

pub fn count_users(conn: &Connection) -> AppResult<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?)
}
