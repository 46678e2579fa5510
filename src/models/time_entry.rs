use super::{entry_type::EntryType, work_subtype::WorkSubtype};
use crate::core::calculator::prep;
use chrono::{Datelike, Local, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct TimeEntry {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,                // ⇔ time_entries.date (TEXT "YYYY-MM-DD")
    pub entry_type: EntryType,          // ⇔ time_entries.entry_type
    pub subtype: Option<WorkSubtype>,   // ⇔ time_entries.subtype (work entries only)
    pub hours: f64,                     // hour-based bookings
    pub days: f64,                      // day-based bookings (0.5 = half day)
    pub prep_hours: f64,                // derived, never set directly
    pub description: Option<String>,
    pub is_locked: bool,                // projection of monthly_locks
    pub created_at: String,
    pub updated_at: String,
}

/// Caller-supplied fields of an entry (create and update).
#[derive(Debug, Clone, PartialEq)]
pub struct EntryInput {
    pub date: NaiveDate,
    pub entry_type: EntryType,
    pub subtype: Option<WorkSubtype>,
    pub hours: f64,
    pub days: f64,
    pub description: Option<String>,
}

impl EntryInput {
    pub fn work(date: NaiveDate, subtype: Option<WorkSubtype>, hours: f64) -> Self {
        Self {
            date,
            entry_type: EntryType::Work,
            subtype,
            hours,
            days: 0.0,
            description: None,
        }
    }

    pub fn absence(date: NaiveDate, entry_type: EntryType, days: f64) -> Self {
        Self {
            date,
            entry_type,
            subtype: None,
            hours: 0.0,
            days,
            description: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

impl TimeEntry {
    /// Build a new, unsaved entry (`id = 0`) for `user_id`.
    /// Prep time is derived immediately.
    pub fn new(user_id: i64, input: &EntryInput) -> Self {
        let now = Local::now().to_rfc3339();
        let mut entry = Self {
            id: 0,
            user_id,
            date: input.date,
            entry_type: input.entry_type,
            subtype: input.subtype,
            hours: input.hours,
            days: input.days,
            prep_hours: 0.0,
            description: input.description.clone(),
            is_locked: false,
            created_at: now.clone(),
            updated_at: now,
        };
        entry.calculate_prep_time();
        entry
    }

    /// Overwrite the caller-supplied fields and re-derive prep time.
    pub fn apply(&mut self, input: &EntryInput) {
        self.date = input.date;
        self.entry_type = input.entry_type;
        self.subtype = input.subtype;
        self.hours = input.hours;
        self.days = input.days;
        self.description = input.description.clone();
        self.updated_at = Local::now().to_rfc3339();
        self.calculate_prep_time();
    }

    /// Must run whenever entry_type, subtype or hours change.
    pub fn calculate_prep_time(&mut self) {
        self.prep_hours = prep::prep_hours(self.entry_type, self.subtype, self.hours);
    }

    pub fn total_hours(&self) -> f64 {
        self.hours + self.prep_hours
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> u32 {
        self.date.month()
    }

    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}
