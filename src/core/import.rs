use crate::config::Config;
use crate::core::entry::EntryLogic;
use crate::core::permissions::{self, Action};
use crate::db::entries::exists_same_kind;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::users;
use crate::errors::{AppError, AppResult};
use crate::models::entry_type::EntryType;
use crate::models::time_entry::EntryInput;
use crate::models::user::User;
use crate::models::work_subtype::WorkSubtype;
use crate::utils::date::parse_date;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One CSV row as written by users. Only `date`, `user`, `type` and `hours`
/// are required columns.
#[derive(Debug, Deserialize, Serialize)]
struct ImportRecord {
    date: String,
    user: String,
    #[serde(rename = "type")]
    entry_type: String,
    hours: Option<String>,
    #[serde(default)]
    subtype: Option<String>,
    #[serde(default)]
    days: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportReport {
    pub imported: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ImportReport {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

pub struct ImportLogic;

impl ImportLogic {
    /// Import time entries from a CSV file (`,` or `;` separated).
    ///
    /// Every row goes through [`EntryLogic::create`], so locks and the
    /// prep-time rule apply. Bad rows are reported and skipped.
    pub fn import_entries(
        pool: &mut DbPool,
        cfg: &Config,
        actor: &User,
        file: &str,
    ) -> AppResult<ImportReport> {
        permissions::require(actor, Action::Import)?;

        let content = fs::read_to_string(Path::new(file))?;
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(detect_delimiter(&content))
            .trim(csv::Trim::All)
            .from_reader(content.as_bytes());

        let headers = rdr.headers()?.clone();
        let missing: Vec<&str> = ["date", "user", "type", "hours"]
            .into_iter()
            .filter(|c| !headers.iter().any(|h| h == *c))
            .collect();
        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "missing columns: {}",
                missing.join(", ")
            )));
        }

        let mut report = ImportReport::default();
        for (index, record) in rdr.deserialize::<ImportRecord>().enumerate() {
            let line = index + 2;
            let record = match record {
                Ok(r) => r,
                Err(e) => {
                    report.errors.push(format!("line {}: {}", line, e));
                    continue;
                }
            };

            match import_row(pool, cfg, actor, &record, line, &mut report.warnings) {
                Ok(true) => report.imported += 1,
                Ok(false) => {}
                Err(e) => report.errors.push(format!("line {}: {}", line, e)),
            }
        }

        ttlog(
            &pool.conn,
            "import",
            file,
            &format!(
                "{} imported, {} error(s), {} warning(s) by {}",
                report.imported,
                report.errors.len(),
                report.warnings.len(),
                actor.username
            ),
        )?;

        Ok(report)
    }

    /// Write an example import file.
    pub fn write_template(file: &str) -> AppResult<()> {
        let mut wtr = csv::Writer::from_path(file)?;
        wtr.serialize(ImportRecord {
            date: "2024-01-15".into(),
            user: "anna".into(),
            entry_type: "work".into(),
            hours: Some("8.0".into()),
            subtype: Some("time_with_children".into()),
            days: Some("0".into()),
            description: Some("Example entry".into()),
        })?;
        wtr.flush()?;
        Ok(())
    }
}

/// Returns whether the row was imported; `Ok(false)` means skipped with a
/// warning.
fn import_row(
    pool: &mut DbPool,
    cfg: &Config,
    actor: &User,
    r: &ImportRecord,
    line: usize,
    warnings: &mut Vec<String>,
) -> AppResult<bool> {
    let date = parse_date(&r.date)
        .ok_or_else(|| AppError::InvalidDate(format!("'{}'", r.date)))?;

    let user = match users::find_by_username(&pool.conn, &r.user)? {
        Some(u) => u,
        None => users::find_by_full_name(&pool.conn, &r.user)?
            .ok_or_else(|| AppError::NotFound(format!("User '{}'", r.user)))?,
    };

    let entry_type = EntryType::from_code(&r.entry_type)
        .ok_or_else(|| AppError::Validation(format!("invalid type '{}'", r.entry_type)))?;

    let subtype = match r.subtype.as_deref().filter(|s| !s.is_empty()) {
        None => None,
        Some(code) => match WorkSubtype::from_code(code) {
            Some(s) if entry_type.is_work() => Some(s),
            _ => {
                warnings.push(format!("line {}: invalid subtype '{}' ignored", line, code));
                None
            }
        },
    };

    let hours = parse_number(r.hours.as_deref(), "hours")?;
    let days = parse_number(r.days.as_deref(), "days")?;

    if exists_same_kind(&pool.conn, user.id, date, entry_type, subtype)? {
        warnings.push(format!(
            "line {}: entry for {} on {} already exists",
            line, user.username, r.date
        ));
        return Ok(false);
    }

    let input = EntryInput {
        date,
        entry_type,
        subtype,
        hours,
        days,
        description: r.description.clone().filter(|d| !d.is_empty()),
    };
    EntryLogic::create(pool, cfg, actor, user.id, &input)?;
    Ok(true)
}

fn parse_number(raw: Option<&str>, label: &str) -> AppResult<f64> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(0.0),
        Some(s) => s
            .replace(',', ".")
            .parse::<f64>()
            .map_err(|_| AppError::Validation(format!("invalid {} '{}'", label, s))),
    }
}

/// `;` when the header line uses it and has no `,`.
fn detect_delimiter(content: &str) -> u8 {
    let header = content.lines().next().unwrap_or_default();
    if header.contains(';') && !header.contains(',') {
        b';'
    } else {
        b','
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn semicolon_files() {
        assert_eq!(detect_delimiter("date;user;type;hours\n"), b';');
        assert_eq!(detect_delimiter("date,user,type,hours\n"), b',');
    }

    #[test]
    fn decimal_comma() {
        assert_eq!(parse_number(Some("7,5"), "hours").unwrap(), 7.5);
        assert_eq!(parse_number(Some(""), "hours").unwrap(), 0.0);
        assert!(parse_number(Some("abc"), "hours").is_err());
    }
}
