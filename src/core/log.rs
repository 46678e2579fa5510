use crate::db::log::{LogRow, load_log};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use ansi_term::Colour;
use regex::Regex;
use std::sync::LazyLock;

/// Width of the `operation (target)` column.
const OP_WIDTH_MAX: usize = 60;

static ANSI_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").ok());

fn strip_ansi(s: &str) -> String {
    match ANSI_RE.as_ref() {
        Some(re) => re.replace_all(s, "").into_owned(),
        None => s.to_string(),
    }
}

/// ANSI colour of an operation.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" | "child_add" | "event_add" | "user_add" => Colour::Green,
        "del" | "child_del" | "event_del" => Colour::Red,
        "edit" | "child_edit" | "event_edit" | "user_edit" => Colour::Yellow,
        "lock" => Colour::Cyan,
        "unlock" => Colour::Blue,
        "remind" => Colour::RGB(255, 153, 51),
        "migration_applied" => Colour::Purple,
        "init" | "import" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &mut DbPool) -> AppResult<()> {
        let rows = load_log(&pool.conn)?;

        if rows.is_empty() {
            println!("📜 Internal log is empty.");
            return Ok(());
        }

        let id_w = rows.iter().map(|r| r.id.to_string().len()).max().unwrap_or(1);
        let date_w = rows.iter().map(|r| display_date(r).len()).max().unwrap_or(10);
        let op_w = rows
            .iter()
            .map(|r| op_target(r).chars().count())
            .max()
            .unwrap_or(10)
            .min(OP_WIDTH_MAX);

        println!("📜 Internal log:\n");

        for row in &rows {
            let visible = truncate(&op_target(row), OP_WIDTH_MAX);
            let color = color_for_operation(&row.operation);

            // only the operation word is coloured
            let colored = match visible.split_once(' ') {
                Some((op, rest)) => format!("{} {}", color.paint(op), rest),
                None => color.paint(visible.as_str()).to_string(),
            };
            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&colored).chars().count()));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{} => {}",
                row.id,
                display_date(row),
                colored,
                padding,
                row.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}

fn display_date(row: &LogRow) -> String {
    chrono::DateTime::parse_from_rfc3339(&row.date)
        .map(|dt| dt.format("%FT%T%:z").to_string())
        .unwrap_or_else(|_| row.date.clone())
}

fn op_target(row: &LogRow) -> String {
    if row.target.is_empty() {
        row.operation.clone()
    } else {
        format!("{} ({})", row.operation, row.target)
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let mut t: String = s.chars().take(max - 3).collect();
        t.push_str("...");
        t
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_colour_codes() {
        let painted = Colour::Green.paint("lock").to_string();
        assert_eq!(strip_ansi(&painted), "lock");
    }

    #[test]
    fn long_targets_are_cut() {
        let s = "x".repeat(80);
        assert_eq!(truncate(&s, 60).chars().count(), 60);
        assert!(truncate(&s, 60).ends_with("..."));
    }
}
