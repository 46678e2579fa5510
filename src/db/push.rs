//! Push notification outbox / history.

use crate::db::db_utils::collect_rows;
use chrono::Local;
use rusqlite::{Connection, params};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct PushRow {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub body: String,
    pub payload: String,
    pub created_at: String,
}

pub fn insert_push(
    conn: &Connection,
    user_id: i64,
    title: &str,
    body: &str,
    payload: &str,
) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO push_notifications (user_id, title, body, payload, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![user_id, title, body, payload, Local::now().to_rfc3339()],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Notifications of one user, newest first.
pub fn list_for_user(conn: &Connection, user_id: i64) -> rusqlite::Result<Vec<PushRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, title, body, payload, created_at
         FROM push_notifications WHERE user_id = ?1 ORDER BY id DESC",
    )?;
    let rows = stmt.query_map([user_id], |row| {
        Ok(PushRow {
            id: row.get(0)?,
            user_id: row.get(1)?,
            title: row.get(2)?,
            body: row.get(3)?,
            payload: row.get(4)?,
            created_at: row.get(5)?,
        })
    })?;
    collect_rows(rows)
}
