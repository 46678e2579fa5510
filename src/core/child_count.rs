use crate::core::calculator::staffing::required_staff;
use crate::core::permissions::{self, Action};
use crate::db::child_counts;
use crate::db::db_utils::fmt_date;
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::child_count::{ChildCount, ChildCountInput, ChildCountStats};
use crate::models::user::User;
use chrono::NaiveDate;

pub const MAX_UNDER_3: i64 = 30;
pub const MAX_OVER_3: i64 = 50;

/// Valid headcount slots: 08:00 to 16:00 in 30 minute steps.
pub fn time_slots() -> Vec<String> {
    let mut slots = Vec::new();
    for hour in 8..=16 {
        slots.push(format!("{:02}:00", hour));
        if hour < 16 {
            slots.push(format!("{:02}:30", hour));
        }
    }
    slots
}

pub struct ChildCountLogic;

impl ChildCountLogic {
    pub fn create(
        pool: &mut DbPool,
        actor: &User,
        input: &ChildCountInput,
    ) -> AppResult<ChildCount> {
        require_active(actor)?;
        let (under_3, over_3) = validate(input)?;

        if child_counts::find_by_slot(&pool.conn, input.date, &input.time_slot)?.is_some() {
            return Err(AppError::Conflict(format!(
                "child count for {} {} already exists",
                fmt_date(&input.date),
                input.time_slot
            )));
        }

        let id = child_counts::insert_child_count(
            &pool.conn,
            input.date,
            &input.time_slot,
            under_3,
            over_3,
        )?;
        ttlog(
            &pool.conn,
            "child_add",
            &format!("{} {}", fmt_date(&input.date), input.time_slot),
            &format!("under 3: {}, over 3: {} by {}", under_3, over_3, actor.username),
        )?;

        load(pool, id)
    }

    pub fn update(
        pool: &mut DbPool,
        actor: &User,
        id: i64,
        input: &ChildCountInput,
    ) -> AppResult<ChildCount> {
        require_active(actor)?;
        let mut record = load(pool, id)?;
        let (under_3, over_3) = validate(input)?;

        if let Some(other) = child_counts::find_by_slot(&pool.conn, input.date, &input.time_slot)?
            && other.id != id
        {
            return Err(AppError::Conflict(format!(
                "child count for {} {} already exists",
                fmt_date(&input.date),
                input.time_slot
            )));
        }

        record.date = input.date;
        record.time_slot = input.time_slot.clone();
        record.under_3_count = under_3;
        record.over_3_count = over_3;
        child_counts::update_child_count(&pool.conn, &record)?;

        ttlog(
            &pool.conn,
            "child_edit",
            &format!("{} {}", fmt_date(&record.date), record.time_slot),
            &format!("under 3: {}, over 3: {} by {}", under_3, over_3, actor.username),
        )?;
        Ok(record)
    }

    pub fn delete(pool: &mut DbPool, actor: &User, id: i64) -> AppResult<()> {
        permissions::require(actor, Action::ManageChildCounts)?;
        let record = load(pool, id)?;
        child_counts::delete_child_count(&pool.conn, id)?;
        ttlog(
            &pool.conn,
            "child_del",
            &format!("{} {}", fmt_date(&record.date), record.time_slot),
            &format!("deleted by {}", actor.username),
        )?;
        Ok(())
    }

    pub fn get(pool: &mut DbPool, id: i64) -> AppResult<ChildCount> {
        load(pool, id)
    }

    pub fn list(
        pool: &mut DbPool,
        bounds: Option<(NaiveDate, NaiveDate)>,
    ) -> AppResult<Vec<ChildCount>> {
        child_counts::list_child_counts(&pool.conn, bounds)
    }

    /// Every record of the range with the staff it requires.
    pub fn stats(
        pool: &mut DbPool,
        bounds: Option<(NaiveDate, NaiveDate)>,
    ) -> AppResult<Vec<ChildCountStats>> {
        Ok(child_counts::list_child_counts(&pool.conn, bounds)?
            .iter()
            .map(|c| {
                ChildCountStats::from_count(c, required_staff(c.under_3_count, c.over_3_count))
            })
            .collect())
    }
}

fn require_active(actor: &User) -> AppResult<()> {
    if actor.is_active {
        Ok(())
    } else {
        Err(AppError::Permission(format!(
            "user '{}' is deactivated",
            actor.username
        )))
    }
}

fn validate(input: &ChildCountInput) -> AppResult<(u32, u32)> {
    if input.under_3_count < 0 || input.over_3_count < 0 {
        return Err(AppError::Validation("child counts must not be negative".into()));
    }
    if input.under_3_count > MAX_UNDER_3 || input.over_3_count > MAX_OVER_3 {
        return Err(AppError::Validation(format!(
            "child counts too high (max {} under 3, {} over 3)",
            MAX_UNDER_3, MAX_OVER_3
        )));
    }
    if !time_slots().contains(&input.time_slot) {
        return Err(AppError::Validation(format!(
            "invalid time slot '{}', allowed: 08:00 to 16:00 in 30 minute steps",
            input.time_slot
        )));
    }
    Ok((input.under_3_count as u32, input.over_3_count as u32))
}

fn load(pool: &mut DbPool, id: i64) -> AppResult<ChildCount> {
    child_counts::find_child_count(&pool.conn, id)?
        .ok_or_else(|| AppError::NotFound(format!("Child count #{}", id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seventeen_slots() {
        let slots = time_slots();
        assert_eq!(slots.len(), 17);
        assert_eq!(slots.first().map(String::as_str), Some("08:00"));
        assert_eq!(slots.last().map(String::as_str), Some("16:00"));
        assert!(!slots.contains(&"16:30".to_string()));
    }
}
