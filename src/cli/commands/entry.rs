use crate::cli::commands::open_session;
use crate::cli::parser::{Commands, EntryCmd};
use crate::config::Config;
use crate::core::entry::EntryLogic;
use crate::errors::{AppError, AppResult};
use crate::export::range::parse_optional_range;
use crate::models::entry_type::EntryType;
use crate::models::time_entry::{EntryInput, TimeEntry};
use crate::models::work_subtype::WorkSubtype;
use crate::ui::messages::{info, success};
use crate::utils::colors::lock_marker;
use crate::utils::date::require_date;
use crate::utils::formatting::{fmt_days, fmt_hours, or_dash};
use crate::utils::table::Table;
use std::collections::HashMap;

pub fn handle(cmd: &Commands, cfg: &Config, actor: &str) -> AppResult<()> {
    let Commands::Entry { action } = cmd else {
        return Ok(());
    };
    let mut s = open_session(cfg, actor)?;

    match action {
        EntryCmd::Add {
            date,
            entry_type,
            subtype,
            hours,
            days,
            description,
            user,
        } => {
            let owner = s.user_or_self(user.as_deref())?;
            let input = EntryInput {
                date: require_date(date)?,
                entry_type: parse_type(entry_type)?,
                subtype: subtype.as_deref().map(parse_subtype).transpose()?,
                hours: *hours,
                days: *days,
                description: description.clone().filter(|d| !d.trim().is_empty()),
            };
            let entry = EntryLogic::create(&mut s.pool, cfg, &s.actor, owner, &input)?;
            success(format!(
                "Entry #{} saved: {} {} ({})",
                entry.id,
                entry.date_str(),
                entry.entry_type.label(),
                amount(&entry)
            ));
        }

        EntryCmd::Edit {
            id,
            date,
            entry_type,
            subtype,
            hours,
            days,
            description,
        } => {
            let current = EntryLogic::get(&mut s.pool, &s.actor, *id)?;
            let new_type = match entry_type {
                Some(t) => parse_type(t)?,
                None => current.entry_type,
            };
            let new_subtype = match subtype.as_deref() {
                Some("none") | Some("") => None,
                Some(code) => Some(parse_subtype(code)?),
                None if new_type.is_work() => current.subtype,
                None => None,
            };

            let input = EntryInput {
                date: match date {
                    Some(d) => require_date(d)?,
                    None => current.date,
                },
                entry_type: new_type,
                subtype: new_subtype,
                hours: hours.unwrap_or(current.hours),
                days: days.unwrap_or(current.days),
                description: match description {
                    Some(d) if d.trim().is_empty() => None,
                    Some(d) => Some(d.clone()),
                    None => current.description.clone(),
                },
            };
            let entry = EntryLogic::update(&mut s.pool, cfg, &s.actor, *id, &input)?;
            success(format!("Entry #{} updated ({})", entry.id, amount(&entry)));
        }

        EntryCmd::Del { id } => {
            EntryLogic::delete(&mut s.pool, cfg, &s.actor, *id)?;
            success(format!("Entry #{} deleted", id));
        }

        EntryCmd::List { period, user, all } => {
            let bounds = parse_optional_range(period.as_deref())?;
            let user_id = match (user, all) {
                (Some(name), _) => Some(s.user_id(name)?),
                (None, true) => None,
                (None, false) => Some(s.actor.id),
            };
            let entries = EntryLogic::list(&mut s.pool, &s.actor, user_id, bounds)?;
            if entries.is_empty() {
                info("No entries found.");
                return Ok(());
            }

            let names: HashMap<i64, String> = crate::db::users::list_users(&s.pool.conn, false)?
                .into_iter()
                .map(|u| (u.id, u.username))
                .collect();

            let mut table = Table::new(&[
                "id", "date", "user", "type", "subtype", "amount", "prep", "total", "status",
                "description",
            ]);
            let mut total = 0.0;
            for e in &entries {
                total += e.total_hours();
                table.add_row(vec![
                    e.id.to_string(),
                    e.date_str(),
                    names.get(&e.user_id).cloned().unwrap_or_else(|| e.user_id.to_string()),
                    e.entry_type.to_db_str().to_string(),
                    or_dash(e.subtype.map(|st| st.to_db_str())),
                    amount(e),
                    fmt_hours(e.prep_hours, false),
                    fmt_hours(e.total_hours(), false),
                    lock_marker(e.is_locked),
                    or_dash(e.description.as_deref()),
                ]);
            }
            table.print();
            println!("\n{} entries, {} booked in total", entries.len(), fmt_hours(total, false));
        }
    }

    Ok(())
}

fn parse_type(code: &str) -> AppResult<EntryType> {
    EntryType::from_code(code).ok_or_else(|| {
        let allowed: Vec<&str> = EntryType::ALL.iter().map(|t| t.to_db_str()).collect();
        AppError::Validation(format!(
            "invalid entry type '{}', allowed: {}",
            code,
            allowed.join(", ")
        ))
    })
}

fn parse_subtype(code: &str) -> AppResult<WorkSubtype> {
    WorkSubtype::from_code(code)
        .ok_or_else(|| AppError::Validation(format!("invalid work subtype '{}'", code)))
}

/// Hours for hour bookings, days for day bookings.
fn amount(e: &TimeEntry) -> String {
    if e.days > 0.0 && e.hours == 0.0 {
        fmt_days(e.days)
    } else {
        fmt_hours(e.hours, false)
    }
}
