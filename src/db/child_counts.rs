use crate::db::db_utils::{collect_rows, date_column, fmt_date};
use crate::errors::AppResult;
use crate::models::child_count::ChildCount;
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Row, params};

const COUNT_COLUMNS: &str = "id, date, time_slot, under_3_count, over_3_count, created_at";

pub fn map_child_count(row: &Row) -> rusqlite::Result<ChildCount> {
    Ok(ChildCount {
        id: row.get("id")?,
        date: date_column(row, "date")?,
        time_slot: row.get("time_slot")?,
        under_3_count: row.get("under_3_count")?,
        over_3_count: row.get("over_3_count")?,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_child_count(
    conn: &Connection,
    date: NaiveDate,
    time_slot: &str,
    under_3: u32,
    over_3: u32,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO child_counts (date, time_slot, under_3_count, over_3_count, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            fmt_date(&date),
            time_slot,
            under_3,
            over_3,
            Local::now().to_rfc3339()
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_child_count(conn: &Connection, c: &ChildCount) -> AppResult<()> {
    conn.execute(
        "UPDATE child_counts
         SET date = ?1, time_slot = ?2, under_3_count = ?3, over_3_count = ?4
         WHERE id = ?5",
        params![
            fmt_date(&c.date),
            c.time_slot,
            c.under_3_count,
            c.over_3_count,
            c.id
        ],
    )?;
    Ok(())
}

pub fn delete_child_count(conn: &Connection, id: i64) -> AppResult<()> {
    conn.execute("DELETE FROM child_counts WHERE id = ?1", [id])?;
    Ok(())
}

pub fn find_child_count(conn: &Connection, id: i64) -> AppResult<Option<ChildCount>> {
    let sql = format!("SELECT {COUNT_COLUMNS} FROM child_counts WHERE id = ?1");
    Ok(conn.query_row(&sql, [id], map_child_count).optional()?)
}

pub fn find_by_slot(
    conn: &Connection,
    date: NaiveDate,
    time_slot: &str,
) -> AppResult<Option<ChildCount>> {
    let sql =
        format!("SELECT {COUNT_COLUMNS} FROM child_counts WHERE date = ?1 AND time_slot = ?2");
    Ok(conn
        .query_row(&sql, params![fmt_date(&date), time_slot], map_child_count)
        .optional()?)
}

/// Records in the range, newest day first, slots ascending within a day.
pub fn list_child_counts(
    conn: &Connection,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<ChildCount>> {
    let (start, end) = match bounds {
        Some((s, e)) => (Some(fmt_date(&s)), Some(fmt_date(&e))),
        None => (None, None),
    };
    let sql = format!(
        "SELECT {COUNT_COLUMNS} FROM child_counts
         WHERE (?1 IS NULL OR date >= ?1) AND (?2 IS NULL OR date <= ?2)
         ORDER BY date DESC, time_slot ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![start, end], map_child_count)?;
    Ok(collect_rows(rows)?)
}
