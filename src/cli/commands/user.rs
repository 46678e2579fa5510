use crate::cli::commands::open_session;
use crate::cli::parser::{Commands, UserCmd};
use crate::config::Config;
use crate::core::user::UserLogic;
use crate::errors::{AppError, AppResult};
use crate::models::role::Role;
use crate::models::user::{NewUser, User, UserUpdate};
use crate::ui::messages::{info, success};
use crate::utils::colors::{GREY, RESET};
use crate::utils::formatting::{fmt_hours, or_dash};
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config, actor: &str) -> AppResult<()> {
    let Commands::User { action } = cmd else {
        return Ok(());
    };
    let mut s = open_session(cfg, actor)?;

    match action {
        UserCmd::Add {
            username,
            full_name,
            role,
            email,
            weekly_hours,
            additional_hours,
            work_days_per_week,
            vacation_days,
        } => {
            let new_user = NewUser {
                username: username.trim().to_string(),
                email: email.clone().filter(|e| !e.trim().is_empty()),
                full_name: full_name.trim().to_string(),
                role: parse_role(role)?,
                weekly_hours: *weekly_hours,
                additional_hours: *additional_hours,
                work_days_per_week: *work_days_per_week,
                vacation_days_per_year: *vacation_days,
            };
            let user = UserLogic::create(&mut s.pool, &s.actor, &new_user)?;
            success(format!(
                "User '{}' ({}) created with id {}",
                user.username,
                user.role.to_db_str(),
                user.id
            ));
        }

        UserCmd::List { all } => {
            let users = UserLogic::list(&mut s.pool, &s.actor, *all)?;
            if users.is_empty() {
                info("No users found.");
                return Ok(());
            }
            let mut table = Table::new(&[
                "id", "username", "name", "role", "weekly", "days", "vacation", "email", "active",
            ]);
            for u in &users {
                table.add_row(vec![
                    u.id.to_string(),
                    u.username.clone(),
                    u.full_name.clone(),
                    u.role.to_db_str().to_string(),
                    fmt_hours(u.weekly_target(), false),
                    u.work_days_per_week.to_string(),
                    u.vacation_days_per_year.to_string(),
                    or_dash(u.email.as_deref()),
                    if u.is_active { "yes".into() } else { format!("{GREY}no{RESET}") },
                ]);
            }
            table.print();
        }

        UserCmd::Show { username } => {
            let user = match username {
                Some(name) => {
                    let id = s.user_id(name)?;
                    if id != s.actor.id && s.actor.role.is_staff() {
                        return Err(AppError::Permission(
                            "staff may only view their own record".into(),
                        ));
                    }
                    UserLogic::by_id(&mut s.pool, id)?
                }
                None => s.actor.clone(),
            };
            print_user(&user);
        }

        UserCmd::Update {
            username,
            full_name,
            email,
            role,
            weekly_hours,
            additional_hours,
            work_days_per_week,
            vacation_days,
        } => {
            let id = s.user_id(username)?;
            let changes = UserUpdate {
                email: email.clone(),
                full_name: full_name.clone(),
                role: role.as_deref().map(parse_role).transpose()?,
                weekly_hours: *weekly_hours,
                additional_hours: *additional_hours,
                work_days_per_week: *work_days_per_week,
                vacation_days_per_year: *vacation_days,
                is_active: None,
            };
            let user = UserLogic::update(&mut s.pool, &s.actor, id, &changes)?;
            success(format!("User '{}' updated", user.username));
        }

        UserCmd::Activate { username } | UserCmd::Deactivate { username } => {
            let active = matches!(action, UserCmd::Activate { .. });
            let id = s.user_id(username)?;
            let user = UserLogic::set_active(&mut s.pool, &s.actor, id, active)?;
            success(format!(
                "User '{}' {}",
                user.username,
                if active { "activated" } else { "deactivated" }
            ));
        }
    }

    Ok(())
}

fn parse_role(code: &str) -> AppResult<Role> {
    Role::from_code(code).ok_or_else(|| {
        AppError::Validation(format!(
            "invalid role '{}', allowed: staff, leadership, admin",
            code
        ))
    })
}

fn print_user(u: &User) {
    println!("👤 {} ({})", u.full_name, u.username);
    println!("   role            : {}", u.role.to_db_str());
    println!("   email           : {}", or_dash(u.email.as_deref()));
    println!(
        "   weekly hours    : {} + {} additional",
        fmt_hours(u.weekly_hours, false),
        fmt_hours(u.additional_hours, false)
    );
    println!("   days per week   : {}", u.work_days_per_week);
    println!("   vacation / year : {}", u.vacation_days_per_year);
    println!("   active          : {}", if u.is_active { "yes" } else { "no" });
}
