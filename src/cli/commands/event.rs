use crate::cli::commands::open_session;
use crate::cli::parser::{Commands, EventCmd};
use crate::config::Config;
use crate::core::global_event::GlobalEventLogic;
use crate::errors::AppResult;
use crate::export::range::parse_optional_range;
use crate::models::global_event::{GlobalEvent, GlobalEventType};
use crate::ui::messages::{info, success};
use crate::utils::date::{month_name, require_date};
use crate::utils::formatting::or_dash;
use ansi_term::Colour;

/// Colour of an event type in listings.
fn colour_for(t: GlobalEventType) -> Colour {
    match t {
        GlobalEventType::Closure | GlobalEventType::Holiday => Colour::Red,
        GlobalEventType::EarlyClosureStaff | GlobalEventType::EarlyClosureEvent => Colour::Yellow,
        GlobalEventType::TeamDevelopment | GlobalEventType::StaffMeeting => Colour::Cyan,
        GlobalEventType::Maintenance => Colour::Purple,
        GlobalEventType::Other => Colour::White,
    }
}

pub fn handle(cmd: &Commands, cfg: &Config, actor: &str) -> AppResult<()> {
    let Commands::Event { action } = cmd else {
        return Ok(());
    };

    if matches!(action, EventCmd::Types) {
        for t in GlobalEventType::ALL {
            println!(
                "{} {}",
                colour_for(t).paint(format!("{:<22}", t.to_db_str())),
                t.label()
            );
        }
        return Ok(());
    }

    let mut s = open_session(cfg, actor)?;

    match action {
        EventCmd::Add {
            date,
            event_type,
            description,
        } => {
            let e = GlobalEventLogic::create(
                &mut s.pool,
                &s.actor,
                require_date(date)?,
                event_type,
                description.as_deref(),
            )?;
            success(format!("Event #{} saved: {} {}", e.id, e.date, e.event_type.label()));
        }

        EventCmd::Edit {
            id,
            date,
            event_type,
            description,
        } => {
            let current = GlobalEventLogic::get(&mut s.pool, *id)?;
            let date = match date {
                Some(d) => require_date(d)?,
                None => current.date,
            };
            let event_type = event_type
                .clone()
                .unwrap_or_else(|| current.event_type.to_db_str().to_string());
            let description = match description {
                Some(d) if d.trim().is_empty() => None,
                Some(d) => Some(d.clone()),
                None => current.description.clone(),
            };
            let e = GlobalEventLogic::update(
                &mut s.pool,
                &s.actor,
                *id,
                date,
                &event_type,
                description.as_deref(),
            )?;
            success(format!("Event #{} updated", e.id));
        }

        EventCmd::Del { id } => {
            GlobalEventLogic::delete(&mut s.pool, &s.actor, *id)?;
            success(format!("Event #{} deleted", id));
        }

        EventCmd::List { period, event_type } => {
            let bounds = parse_optional_range(period.as_deref())?;
            let events = GlobalEventLogic::list(&mut s.pool, bounds, event_type.as_deref())?;
            print_events(&events);
        }

        EventCmd::Calendar { year, month } => {
            let events = GlobalEventLogic::calendar(&mut s.pool, *year, *month)?;
            match month {
                Some(m) => println!("🗓️  {} {}\n", month_name(*m), year),
                None => println!("🗓️  {}\n", year),
            }
            print_events(&events);
        }

        EventCmd::Stats { year, json } => {
            let stats = GlobalEventLogic::stats(&mut s.pool, &s.actor, *year)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
                return Ok(());
            }
            println!("📊 {} events in {}\n", stats.total_events, stats.year);
            for (t, n) in &stats.by_type {
                println!("   {:<28} {:>3}", t.label(), n);
            }
            if !stats.by_month.is_empty() {
                println!();
                for (m, n) in &stats.by_month {
                    println!("   {:<28} {:>3}", month_name(*m), n);
                }
            }
        }

        EventCmd::Types => {}
    }

    Ok(())
}

fn print_events(events: &[GlobalEvent]) {
    if events.is_empty() {
        info("No events found.");
        return;
    }
    for e in events {
        let label = format!("{:<26}", e.event_type.label());
        println!(
            "#{:<4} {}  {}  {}",
            e.id,
            e.date.format("%a %Y-%m-%d"),
            colour_for(e.event_type).paint(label),
            or_dash(e.description.as_deref())
        );
    }
}
