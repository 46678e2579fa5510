use crate::db::db_utils::collect_rows;
use crate::errors::AppResult;
use crate::models::monthly_lock::{LockFilter, MonthlyLock};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Row, params};

const LOCK_COLUMNS: &str = "id, user_id, year, month, locked_at, locked_by";

pub fn map_lock(row: &Row) -> rusqlite::Result<MonthlyLock> {
    Ok(MonthlyLock {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        year: row.get("year")?,
        month: row.get("month")?,
        locked_at: row.get("locked_at")?,
        locked_by: row.get("locked_by")?,
    })
}

pub fn find_lock(
    conn: &Connection,
    user_id: i64,
    year: i32,
    month: u32,
) -> AppResult<Option<MonthlyLock>> {
    let sql = format!(
        "SELECT {LOCK_COLUMNS} FROM monthly_locks WHERE user_id = ?1 AND year = ?2 AND month = ?3"
    );
    Ok(conn
        .query_row(&sql, params![user_id, year, month], map_lock)
        .optional()?)
}

pub fn find_lock_by_id(conn: &Connection, id: i64) -> AppResult<Option<MonthlyLock>> {
    let sql = format!("SELECT {LOCK_COLUMNS} FROM monthly_locks WHERE id = ?1");
    Ok(conn.query_row(&sql, [id], map_lock).optional()?)
}

pub fn is_locked(conn: &Connection, user_id: i64, year: i32, month: u32) -> AppResult<bool> {
    let mut stmt = conn.prepare_cached(
        "SELECT 1 FROM monthly_locks WHERE user_id = ?1 AND year = ?2 AND month = ?3 LIMIT 1",
    )?;
    Ok(stmt.exists(params![user_id, year, month])?)
}

pub fn insert_lock(
    conn: &Connection,
    user_id: i64,
    year: i32,
    month: u32,
    locked_by: i64,
) -> AppResult<MonthlyLock> {
    let locked_at = Local::now().to_rfc3339();
    conn.execute(
        "INSERT INTO monthly_locks (user_id, year, month, locked_at, locked_by)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![user_id, year, month, locked_at, locked_by],
    )?;

    Ok(MonthlyLock {
        id: conn.last_insert_rowid(),
        user_id,
        year,
        month,
        locked_at,
        locked_by,
    })
}

pub fn delete_lock(conn: &Connection, id: i64) -> AppResult<()> {
    conn.execute("DELETE FROM monthly_locks WHERE id = ?1", [id])?;
    Ok(())
}

/// Locks matching the filter, most recent period first.
pub fn list_locks(conn: &Connection, filter: &LockFilter) -> AppResult<Vec<MonthlyLock>> {
    let sql = format!(
        "SELECT {LOCK_COLUMNS} FROM monthly_locks
         WHERE (?1 IS NULL OR year = ?1)
           AND (?2 IS NULL OR month = ?2)
           AND (?3 IS NULL OR user_id = ?3)
         ORDER BY year DESC, month DESC, user_id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![filter.year, filter.month, filter.user_id], map_lock)?;
    Ok(collect_rows(rows)?)
}
