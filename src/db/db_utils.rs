//! Column conversion helpers shared by the query modules.

use crate::errors::AppError;
use chrono::NaiveDate;
use rusqlite::Row;
use rusqlite::types::Type;

pub(crate) const DATE_FMT: &str = "%Y-%m-%d";

pub(crate) fn fmt_date(date: &NaiveDate) -> String {
    date.format(DATE_FMT).to_string()
}

/// Wrap a domain parse failure into the error rusqlite expects from a row mapper.
pub(crate) fn conversion_error(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, Type::Text, Box::new(err))
}

/// Read a `YYYY-MM-DD` TEXT column.
pub(crate) fn date_column(row: &Row, name: &str) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(name)?;
    NaiveDate::parse_from_str(&raw, DATE_FMT)
        .map_err(|_| conversion_error(0, AppError::InvalidDate(raw.clone())))
}

/// Read a TEXT column and map it through one of the `from_db_str` helpers.
pub(crate) fn enum_column<T>(
    row: &Row,
    name: &str,
    parse: fn(&str) -> Option<T>,
) -> rusqlite::Result<T> {
    let raw: String = row.get(name)?;
    parse(&raw).ok_or_else(|| {
        conversion_error(
            0,
            AppError::Validation(format!("invalid value '{}' in column {}", raw, name)),
        )
    })
}

/// Same as [`enum_column`] for nullable columns.
pub(crate) fn opt_enum_column<T>(
    row: &Row,
    name: &str,
    parse: fn(&str) -> Option<T>,
) -> rusqlite::Result<Option<T>> {
    let raw: Option<String> = row.get(name)?;
    match raw {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => parse(&s).map(Some).ok_or_else(|| {
            conversion_error(
                0,
                AppError::Validation(format!("invalid value '{}' in column {}", s, name)),
            )
        }),
    }
}

/// Collect a `query_map` iterator, stopping at the first row error.
pub(crate) fn collect_rows<T>(
    rows: impl Iterator<Item = rusqlite::Result<T>>,
) -> rusqlite::Result<Vec<T>> {
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
