use crate::cli::commands::{open_session, period_or_current};
use crate::cli::parser::{Commands, StatsCmd};
use crate::config::Config;
use crate::core::stats::StatsLogic;
use crate::errors::AppResult;
use crate::models::stats::{AnnualStats, MonthlyStats, WeeklyStats};
use crate::utils::colors::{colorize, color_for_balance};
use crate::utils::date::{month_name, require_date, today, week_start};
use crate::utils::formatting::{fmt_days, fmt_hours};
use crate::utils::table::Table;
use chrono::Datelike;
use serde::Serialize;

pub fn handle(cmd: &Commands, cfg: &Config, actor: &str) -> AppResult<()> {
    let Commands::Stats { action } = cmd else {
        return Ok(());
    };
    let mut s = open_session(cfg, actor)?;

    match action {
        StatsCmd::Week {
            date,
            user,
            team,
            json,
        } => {
            let day = match date {
                Some(d) => require_date(d)?,
                None => today(),
            };
            let start = week_start(day)?;
            let rows = if *team {
                StatsLogic::weekly_team(&mut s.pool, &s.actor, start)?
            } else {
                let id = s.user_or_self(user.as_deref())?;
                vec![StatsLogic::weekly(&mut s.pool, &s.actor, start, id)?]
            };
            if *json {
                return print_json(&rows);
            }
            println!("📅 Week starting {}\n", start.format("%Y-%m-%d"));
            print_weekly(&rows);
        }

        StatsCmd::Month {
            period,
            user,
            team,
            json,
        } => {
            let (year, month) = period_or_current(period.as_deref())?;
            let rows = if *team {
                StatsLogic::monthly_team(&mut s.pool, &s.actor, year, month)?
            } else {
                let id = s.user_or_self(user.as_deref())?;
                vec![StatsLogic::monthly(&mut s.pool, &s.actor, year, month, id)?]
            };
            if *json {
                return print_json(&rows);
            }
            println!("📅 {} {}\n", month_name(month), year);
            print_monthly(&rows);
        }

        StatsCmd::Year { year, user, json } => {
            let year = year.unwrap_or_else(|| today().year());
            let id = s.user_or_self(user.as_deref())?;
            let stats = StatsLogic::annual(&mut s.pool, cfg, &s.actor, id, year)?;
            if *json {
                return print_json(&stats);
            }
            print_annual(&stats);
        }
    }

    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn balance(v: f64) -> String {
    colorize(&fmt_hours(v, true), color_for_balance(v))
}

fn print_weekly(rows: &[WeeklyStats]) {
    let mut table = Table::new(&["user", "worked", "target", "overtime"]);
    for r in rows {
        table.add_row(vec![
            r.user_name.clone(),
            fmt_hours(r.worked_hours, false),
            fmt_hours(r.target_hours, false),
            balance(r.overtime),
        ]);
    }
    table.print();
}

fn print_monthly(rows: &[MonthlyStats]) {
    let mut table = Table::new(&["user", "worked", "target", "overtime", "sick", "vacation"]);
    for r in rows {
        table.add_row(vec![
            r.user_name.clone(),
            fmt_hours(r.worked_hours, false),
            fmt_hours(r.target_hours, false),
            balance(r.overtime),
            fmt_days(r.sick_days),
            fmt_days(r.vacation_days),
        ]);
    }
    table.print();
}

fn print_annual(a: &AnnualStats) {
    println!("📊 {} ({})\n", a.user_name, a.year);
    println!("   instruction        : {}", fmt_hours(a.instruction_hours, false));
    println!("   training           : {}", fmt_days(a.training_days));
    println!("   education leave    : {}", fmt_days(a.education_leave_days));
    println!("   sick               : {}", fmt_days(a.sick_days));
    println!("   child sick         : {}", fmt_days(a.child_sick_days));
    println!("   internship         : {}", fmt_days(a.internship_days));
    println!("   observation        : {}", fmt_days(a.observation_days));
    println!(
        "   vacation           : {} (of which {} from the previous year)",
        fmt_days(a.vacation_days),
        fmt_days(a.previous_year_vacation_days)
    );
    println!(
        "   vacation remaining : {} of {}",
        fmt_days(a.vacation_remaining),
        fmt_days(a.vacation_entitlement)
    );
}
