use crate::db::db_utils::{collect_rows, date_column, enum_column, fmt_date};
use crate::errors::AppResult;
use crate::models::global_event::{GlobalEvent, GlobalEventType};
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Row, params};

const EVENT_COLUMNS: &str = "id, date, event_type, description, created_at";

pub fn map_global_event(row: &Row) -> rusqlite::Result<GlobalEvent> {
    Ok(GlobalEvent {
        id: row.get("id")?,
        date: date_column(row, "date")?,
        event_type: enum_column(row, "event_type", GlobalEventType::from_db_str)?,
        description: row.get("description")?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_event(
    conn: &Connection,
    date: NaiveDate,
    event_type: GlobalEventType,
    description: Option<&str>,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO global_events (date, event_type, description, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            fmt_date(&date),
            event_type.to_db_str(),
            description,
            Local::now().to_rfc3339()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_event(conn: &Connection, ev: &GlobalEvent) -> AppResult<()> {
    conn.execute(
        "UPDATE global_events SET date = ?1, event_type = ?2, description = ?3 WHERE id = ?4",
        params![
            fmt_date(&ev.date),
            ev.event_type.to_db_str(),
            ev.description,
            ev.id
        ],
    )?;
    Ok(())
}

pub fn delete_event(conn: &Connection, id: i64) -> AppResult<()> {
    conn.execute("DELETE FROM global_events WHERE id = ?1", [id])?;
    Ok(())
}

pub fn find_event(conn: &Connection, id: i64) -> AppResult<Option<GlobalEvent>> {
    let sql = format!("SELECT {EVENT_COLUMNS} FROM global_events WHERE id = ?1");
    Ok(conn.query_row(&sql, [id], map_global_event).optional()?)
}

pub fn find_same_day_type(
    conn: &Connection,
    date: NaiveDate,
    event_type: GlobalEventType,
) -> AppResult<Option<GlobalEvent>> {
    let sql = format!(
        "SELECT {EVENT_COLUMNS} FROM global_events WHERE date = ?1 AND event_type = ?2"
    );
    Ok(conn
        .query_row(
            &sql,
            params![fmt_date(&date), event_type.to_db_str()],
            map_global_event,
        )
        .optional()?)
}

/// Events in the range (optionally of one type), ordered by date ascending.
pub fn list_events(
    conn: &Connection,
    bounds: Option<(NaiveDate, NaiveDate)>,
    event_type: Option<GlobalEventType>,
) -> AppResult<Vec<GlobalEvent>> {
    let (start, end) = match bounds {
        Some((s, e)) => (Some(fmt_date(&s)), Some(fmt_date(&e))),
        None => (None, None),
    };
    let sql = format!(
        "SELECT {EVENT_COLUMNS} FROM global_events
         WHERE (?1 IS NULL OR date >= ?1)
           AND (?2 IS NULL OR date <= ?2)
           AND (?3 IS NULL OR event_type = ?3)
         ORDER BY date ASC, id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(
        params![start, end, event_type.map(|t| t.to_db_str())],
        map_global_event,
    )?;
    Ok(collect_rows(rows)?)
}
