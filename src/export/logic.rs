// src/export/logic.rs

use crate::core::permissions::{self, Action};
use crate::db::pool::DbPool;
use crate::db::{child_counts, entries, global_events, users};
use crate::errors::AppResult;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::{ChildCountExport, EntryExport, EventExport, ExportRow};
use crate::export::range::parse_optional_range;
use crate::export::xlsx::export_xlsx;
use crate::export::{ExportFormat, ExportKind};
use crate::models::user::User;
use crate::ui::messages::warning;
use std::collections::HashMap;
use std::path::Path;

/// High-level export logic.
pub struct ExportLogic;

impl ExportLogic {
    /// Export one dataset.
    ///
    /// - `file`: absolute output path; an existing file needs `force`
    /// - `range`: `None`, `"all"` or `YYYY`, `YYYY-MM`, `YYYY-MM-DD` and the
    ///   `start:end` forms of these
    ///
    /// Returns the number of exported rows.
    pub fn export(
        pool: &mut DbPool,
        actor: &User,
        kind: ExportKind,
        format: ExportFormat,
        file: &str,
        range: Option<&str>,
        force: bool,
    ) -> AppResult<usize> {
        permissions::require(actor, Action::Export)?;

        let path = Path::new(file);
        ensure_writable(path, force)?;
        let bounds = parse_optional_range(range)?;

        match kind {
            ExportKind::Entries => {
                let by_id: HashMap<i64, User> = users::list_users(&pool.conn, false)?
                    .into_iter()
                    .map(|u| (u.id, u))
                    .collect();
                let rows: Vec<EntryExport> = entries::list_entries(&pool.conn, None, bounds)?
                    .iter()
                    .map(|e| EntryExport::from_entry(e, &by_id))
                    .collect();
                write(&rows, kind, format, "Time entries", path)
            }
            ExportKind::ChildCounts => {
                let rows: Vec<ChildCountExport> =
                    child_counts::list_child_counts(&pool.conn, bounds)?
                        .iter()
                        .map(ChildCountExport::from)
                        .collect();
                write(&rows, kind, format, "Child counts", path)
            }
            ExportKind::Events => {
                let rows: Vec<EventExport> = global_events::list_events(&pool.conn, bounds, None)?
                    .iter()
                    .map(EventExport::from)
                    .collect();
                write(&rows, kind, format, "Global events", path)
            }
        }
    }
}

fn write<T: ExportRow>(
    rows: &[T],
    kind: ExportKind,
    format: ExportFormat,
    sheet: &str,
    path: &Path,
) -> AppResult<usize> {
    if rows.is_empty() {
        warning(format!("No {} found for selected range.", kind.label()));
        return Ok(0);
    }

    match format {
        ExportFormat::Csv => export_csv(rows, path)?,
        ExportFormat::Json => export_json(rows, path)?,
        ExportFormat::Xlsx => export_xlsx(rows, sheet, path)?,
    }
    Ok(rows.len())
}
