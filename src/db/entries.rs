use crate::db::db_utils::{collect_rows, date_column, enum_column, fmt_date, opt_enum_column};
use crate::errors::AppResult;
use crate::models::entry_type::EntryType;
use crate::models::time_entry::TimeEntry;
use crate::models::work_subtype::WorkSubtype;
use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, Row, params};

const ENTRY_COLUMNS: &str = "id, user_id, date, entry_type, subtype, hours, days, prep_hours,
     description, is_locked, created_at, updated_at";

pub fn map_entry(row: &Row) -> rusqlite::Result<TimeEntry> {
    Ok(TimeEntry {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        date: date_column(row, "date")?,
        entry_type: enum_column(row, "entry_type", EntryType::from_db_str)?,
        subtype: opt_enum_column(row, "subtype", WorkSubtype::from_db_str)?,
        hours: row.get("hours")?,
        days: row.get("days")?,
        prep_hours: row.get("prep_hours")?,
        description: row.get("description")?,
        is_locked: row.get::<_, i32>("is_locked")? == 1,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

pub fn insert_entry(conn: &Connection, e: &TimeEntry) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO time_entries (user_id, date, entry_type, subtype, hours, days, prep_hours,
                                   description, is_locked, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            e.user_id,
            fmt_date(&e.date),
            e.entry_type.to_db_str(),
            e.subtype.map(|s| s.to_db_str()),
            e.hours,
            e.days,
            e.prep_hours,
            e.description,
            if e.is_locked { 1 } else { 0 },
            e.created_at,
            e.updated_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Update an entry (all fields except id, user and created_at)
pub fn update_entry(conn: &Connection, e: &TimeEntry) -> AppResult<()> {
    conn.execute(
        "UPDATE time_entries
         SET date = ?1, entry_type = ?2, subtype = ?3, hours = ?4, days = ?5,
             prep_hours = ?6, description = ?7, is_locked = ?8, updated_at = ?9
         WHERE id = ?10",
        params![
            fmt_date(&e.date),
            e.entry_type.to_db_str(),
            e.subtype.map(|s| s.to_db_str()),
            e.hours,
            e.days,
            e.prep_hours,
            e.description,
            if e.is_locked { 1 } else { 0 },
            e.updated_at,
            e.id,
        ],
    )?;
    Ok(())
}

pub fn delete_entry(conn: &Connection, id: i64) -> AppResult<()> {
    conn.execute("DELETE FROM time_entries WHERE id = ?1", [id])?;
    Ok(())
}

pub fn find_entry(conn: &Connection, id: i64) -> AppResult<Option<TimeEntry>> {
    let sql = format!("SELECT {ENTRY_COLUMNS} FROM time_entries WHERE id = ?1");
    Ok(conn.query_row(&sql, [id], map_entry).optional()?)
}

/// Entries ordered by date, optionally restricted to one user and a date range.
pub fn list_entries(
    conn: &Connection,
    user_id: Option<i64>,
    bounds: Option<(NaiveDate, NaiveDate)>,
) -> AppResult<Vec<TimeEntry>> {
    let (start, end) = match bounds {
        Some((s, e)) => (Some(fmt_date(&s)), Some(fmt_date(&e))),
        None => (None, None),
    };

    let sql = format!(
        "SELECT {ENTRY_COLUMNS} FROM time_entries
         WHERE (?1 IS NULL OR user_id = ?1)
           AND (?2 IS NULL OR date >= ?2)
           AND (?3 IS NULL OR date <= ?3)
         ORDER BY date ASC, id ASC"
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![user_id, start, end], map_entry)?;
    Ok(collect_rows(rows)?)
}

/// Set `is_locked` on every entry of `user_id` between `start` and `end`
/// (inclusive). Returns the number of rows touched.
pub fn set_locked_for_period(
    conn: &Connection,
    user_id: i64,
    start: NaiveDate,
    end: NaiveDate,
    locked: bool,
) -> AppResult<usize> {
    let n = conn.execute(
        "UPDATE time_entries SET is_locked = ?1
         WHERE user_id = ?2 AND date >= ?3 AND date <= ?4",
        params![
            if locked { 1 } else { 0 },
            user_id,
            fmt_date(&start),
            fmt_date(&end)
        ],
    )?;
    Ok(n)
}

pub fn count_entries(
    conn: &Connection,
    user_id: i64,
    start: NaiveDate,
    end: NaiveDate,
) -> AppResult<i64> {
    Ok(conn.query_row(
        "SELECT COUNT(*) FROM time_entries WHERE user_id = ?1 AND date >= ?2 AND date <= ?3",
        params![user_id, fmt_date(&start), fmt_date(&end)],
        |row| row.get(0),
    )?)
}

/// Numeric column that an aggregate sums.
#[derive(Debug, Clone, Copy)]
pub enum SumColumn {
    Hours,
    Days,
}

impl SumColumn {
    fn as_sql(&self) -> &'static str {
        match self {
            SumColumn::Hours => "hours",
            SumColumn::Days => "days",
        }
    }
}

/// Exact-match filter of one aggregate query.
#[derive(Debug, Clone)]
pub struct SumFilter<'a> {
    pub user_id: i64,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub entry_type: EntryType,
    pub subtype: Option<WorkSubtype>,
    /// Substring the description must contain, ignoring ASCII case.
    pub marker: Option<&'a str>,
}

impl<'a> SumFilter<'a> {
    pub fn new(user_id: i64, start: NaiveDate, end: NaiveDate, entry_type: EntryType) -> Self {
        Self {
            user_id,
            start,
            end,
            entry_type,
            subtype: None,
            marker: None,
        }
    }

    pub fn subtype(mut self, subtype: WorkSubtype) -> Self {
        self.subtype = Some(subtype);
        self
    }

    pub fn marker(mut self, marker: &'a str) -> Self {
        self.marker = Some(marker);
        self
    }
}

/// SUM over matching rows; an empty match yields 0.0, never NULL.
pub fn sum_column(conn: &Connection, column: SumColumn, f: &SumFilter<'_>) -> AppResult<f64> {
    let sql = format!(
        "SELECT COALESCE(SUM({col}), 0.0) FROM time_entries
         WHERE user_id = ?1
           AND date >= ?2 AND date <= ?3
           AND entry_type = ?4
           AND (?5 IS NULL OR subtype = ?5)
           AND (?6 IS NULL OR instr(lower(IFNULL(description, '')), lower(?6)) > 0)",
        col = column.as_sql()
    );

    let total: f64 = conn.query_row(
        &sql,
        params![
            f.user_id,
            fmt_date(&f.start),
            fmt_date(&f.end),
            f.entry_type.to_db_str(),
            f.subtype.map(|s| s.to_db_str()),
            f.marker,
        ],
        |row| row.get(0),
    )?;
    Ok(total)
}

/// True when the user already has an entry of this kind on `date`.
pub fn exists_same_kind(
    conn: &Connection,
    user_id: i64,
    date: NaiveDate,
    entry_type: EntryType,
    subtype: Option<WorkSubtype>,
) -> AppResult<bool> {
    let mut stmt = conn.prepare(
        "SELECT 1 FROM time_entries
         WHERE user_id = ?1 AND date = ?2 AND entry_type = ?3
           AND IFNULL(subtype, '') = IFNULL(?4, '')
         LIMIT 1",
    )?;
    Ok(stmt.exists(params![
        user_id,
        fmt_date(&date),
        entry_type.to_db_str(),
        subtype.map(|s| s.to_db_str()),
    ])?)
}
