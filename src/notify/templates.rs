use super::{EmailMessage, PushPayload};
use crate::models::user::User;
use crate::utils::date::month_name;

pub const KIND_LOCKED: &str = "lock_notification";
pub const KIND_REMINDER: &str = "lock_reminder";

fn period(year: i32, month: u32) -> String {
    format!("{} {}", month_name(month), year)
}

pub fn lock_email(user: &User, year: i32, month: u32, locked_by: &str) -> EmailMessage {
    let p = period(year, month);
    EmailMessage {
        subject: format!("Time records for {p} locked"),
        body: format!(
            "Hello {},\n\n\
             your time records for {p} have been locked by {locked_by}.\n\
             Entries of this month can no longer be changed. Please contact \
             the leadership team if a correction is needed.\n",
            user.full_name
        ),
    }
}

pub fn lock_push(year: i32, month: u32) -> PushPayload {
    PushPayload {
        title: "Month locked".into(),
        body: format!("Your time records for {} are locked.", period(year, month)),
        kind: KIND_LOCKED.into(),
        year,
        month,
    }
}

pub fn reminder_email(
    user: &User,
    year: i32,
    month: u32,
    days_until_deadline: u32,
) -> EmailMessage {
    let p = period(year, month);
    EmailMessage {
        subject: format!("Reminder: complete your time records for {p}"),
        body: format!(
            "Hello {},\n\n\
             your time records for {p} will be locked in {days_until_deadline} day(s).\n\
             Please check that all working hours and absences are recorded.\n",
            user.full_name
        ),
    }
}

pub fn reminder_push(year: i32, month: u32, days_until_deadline: u32) -> PushPayload {
    PushPayload {
        title: "Time records reminder".into(),
        body: format!(
            "{} will be locked in {} day(s).",
            period(year, month),
            days_until_deadline
        ),
        kind: KIND_REMINDER.into(),
        year,
        month,
    }
}
