use crate::cli::commands::open_session;
use crate::cli::parser::{Commands, LockCmd};
use crate::config::Config;
use crate::core::lock::LockLogic;
use crate::errors::AppResult;
use crate::models::monthly_lock::LockFilter;
use crate::notify::ChannelNotifier;
use crate::ui::messages::{info, success, warning};
use crate::utils::colors::lock_marker;
use crate::utils::date::{month_name, parse_year_month};
use crate::utils::formatting::or_dash;
use crate::utils::table::Table;
use std::collections::HashMap;

pub fn handle(cmd: &Commands, cfg: &Config, actor: &str) -> AppResult<()> {
    let Commands::Lock { action } = cmd else {
        return Ok(());
    };
    let mut s = open_session(cfg, actor)?;

    match action {
        LockCmd::Set { user, period } => {
            let (year, month) = parse_year_month(period)?;
            let user_id = s.user_id(user)?;
            let notifier = ChannelNotifier::from_config(cfg);
            let lock =
                LockLogic::lock(&mut s.pool, cfg, &notifier, user_id, year, month, &s.actor)?;
            success(format!(
                "{} {} locked for '{}' (lock #{})",
                month_name(month),
                year,
                user,
                lock.id
            ));
        }

        LockCmd::Bulk { period, users } => {
            let (year, month) = parse_year_month(period)?;
            let ids = s.user_ids(users)?;
            let notifier = ChannelNotifier::from_config(cfg);
            let report =
                LockLogic::bulk_lock(&mut s.pool, cfg, &notifier, year, month, &ids, &s.actor)?;

            success(format!(
                "{} {}: {} lock(s) created",
                month_name(month),
                year,
                report.locked.len()
            ));
            let names = usernames(&s.pool)?;
            for e in &report.errors {
                warning(format!("{}: {}", name_of(&names, e.user_id), e.reason));
            }
        }

        LockCmd::Release { id } => {
            LockLogic::unlock(&mut s.pool, *id, &s.actor)?;
            success(format!("Lock #{} released", id));
        }

        LockCmd::ReleaseBulk { period, users } => {
            let (year, month) = parse_year_month(period)?;
            let ids = s.user_ids(users)?;
            let n = LockLogic::bulk_unlock(&mut s.pool, cfg, year, month, &ids, &s.actor)?;
            success(format!("{} {}: {} lock(s) released", month_name(month), year, n));
        }

        LockCmd::List { year, month, user } => {
            let filter = LockFilter {
                year: *year,
                month: *month,
                user_id: user.as_deref().map(|u| s.user_id(u)).transpose()?,
            };
            let locks = LockLogic::list(&mut s.pool, &s.actor, filter)?;
            if locks.is_empty() {
                info("No locks found.");
                return Ok(());
            }
            let names = usernames(&s.pool)?;
            let mut table = Table::new(&["id", "period", "user", "locked at", "locked by"]);
            for l in &locks {
                table.add_row(vec![
                    l.id.to_string(),
                    format!("{:04}-{:02}", l.year, l.month),
                    name_of(&names, l.user_id),
                    l.locked_at.clone(),
                    name_of(&names, l.locked_by),
                ]);
            }
            table.print();
        }

        LockCmd::Status { period } => {
            let (year, month) = parse_year_month(period)?;
            let rows = LockLogic::status(&mut s.pool, cfg, year, month, &s.actor)?;
            println!("🔐 Lock status {} {}\n", month_name(month), year);
            let mut table = Table::new(&[
                "user",
                "status",
                "lock",
                "entries",
                "locked by",
                "locked at",
            ]);
            for r in &rows {
                table.add_row(vec![
                    r.user_name.clone(),
                    lock_marker(r.is_locked),
                    r.lock_id.map(|id| format!("#{id}")).unwrap_or_else(|| "-".into()),
                    r.entry_count.to_string(),
                    or_dash(r.locked_by_name.as_deref()),
                    or_dash(r.locked_at.as_deref()),
                ]);
            }
            table.print();
            let locked = rows.iter().filter(|r| r.is_locked).count();
            println!("\n{} of {} users locked", locked, rows.len());
        }

        LockCmd::Remind { period, days, users } => {
            let (year, month) = parse_year_month(period)?;
            let ids = s.user_ids(users)?;
            let notifier = ChannelNotifier::from_config(cfg);
            let report = LockLogic::send_reminders(
                &mut s.pool,
                cfg,
                &notifier,
                year,
                month,
                *days,
                &ids,
                &s.actor,
            )?;
            success(format!("{} reminder(s) sent", report.sent_count));
            for e in &report.errors {
                warning(e);
            }
        }
    }

    Ok(())
}

fn usernames(pool: &crate::db::pool::DbPool) -> AppResult<HashMap<i64, String>> {
    Ok(crate::db::users::list_users(&pool.conn, false)?
        .into_iter()
        .map(|u| (u.id, u.username))
        .collect())
}

fn name_of(names: &HashMap<i64, String>, id: i64) -> String {
    names.get(&id).cloned().unwrap_or_else(|| format!("#{id}"))
}
