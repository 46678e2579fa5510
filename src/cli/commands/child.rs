use crate::cli::commands::open_session;
use crate::cli::parser::{ChildCmd, Commands};
use crate::config::Config;
use crate::core::child_count::{ChildCountLogic, time_slots};
use crate::errors::AppResult;
use crate::export::range::parse_optional_range;
use crate::models::child_count::ChildCountInput;
use crate::ui::messages::{info, success};
use crate::utils::date::require_date;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config, actor: &str) -> AppResult<()> {
    let Commands::Child { action } = cmd else {
        return Ok(());
    };

    // slots need neither a database nor a user
    if matches!(action, ChildCmd::Slots) {
        println!("{}", time_slots().join("  "));
        return Ok(());
    }

    let mut s = open_session(cfg, actor)?;

    match action {
        ChildCmd::Add {
            date,
            slot,
            under_3,
            over_3,
        } => {
            let input = ChildCountInput {
                date: require_date(date)?,
                time_slot: slot.trim().to_string(),
                under_3_count: *under_3,
                over_3_count: *over_3,
            };
            let c = ChildCountLogic::create(&mut s.pool, &s.actor, &input)?;
            success(format!(
                "Child count #{} saved: {} {} ({} under 3, {} over 3)",
                c.id, c.date, c.time_slot, c.under_3_count, c.over_3_count
            ));
        }

        ChildCmd::Edit {
            id,
            date,
            slot,
            under_3,
            over_3,
        } => {
            let current = ChildCountLogic::get(&mut s.pool, *id)?;
            let input = ChildCountInput {
                date: match date {
                    Some(d) => require_date(d)?,
                    None => current.date,
                },
                time_slot: slot.clone().unwrap_or(current.time_slot),
                under_3_count: under_3.unwrap_or(current.under_3_count as i64),
                over_3_count: over_3.unwrap_or(current.over_3_count as i64),
            };
            let c = ChildCountLogic::update(&mut s.pool, &s.actor, *id, &input)?;
            success(format!("Child count #{} updated", c.id));
        }

        ChildCmd::Del { id } => {
            ChildCountLogic::delete(&mut s.pool, &s.actor, *id)?;
            success(format!("Child count #{} deleted", id));
        }

        ChildCmd::List { period } => {
            let bounds = parse_optional_range(period.as_deref())?;
            let counts = ChildCountLogic::list(&mut s.pool, bounds)?;
            if counts.is_empty() {
                info("No child counts found.");
                return Ok(());
            }
            let mut table = Table::new(&["id", "date", "slot", "under 3", "over 3", "total"]);
            for c in &counts {
                table.add_row(vec![
                    c.id.to_string(),
                    c.date.format("%Y-%m-%d").to_string(),
                    c.time_slot.clone(),
                    c.under_3_count.to_string(),
                    c.over_3_count.to_string(),
                    (c.under_3_count + c.over_3_count).to_string(),
                ]);
            }
            table.print();
        }

        ChildCmd::Stats { period, json } => {
            let bounds = parse_optional_range(period.as_deref())?;
            let stats = ChildCountLogic::stats(&mut s.pool, bounds)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
                return Ok(());
            }
            if stats.is_empty() {
                info("No child counts found.");
                return Ok(());
            }
            let mut table = Table::new(&[
                "date", "slot", "children", "staff u3", "staff o3", "staff total",
            ]);
            for st in &stats {
                table.add_row(vec![
                    st.date.format("%Y-%m-%d").to_string(),
                    st.time_slot.clone(),
                    st.total_children.to_string(),
                    st.required_staff_under_3.to_string(),
                    st.required_staff_over_3.to_string(),
                    st.total_required_staff.to_string(),
                ]);
            }
            table.print();
        }

        ChildCmd::Slots => {}
    }

    Ok(())
}
