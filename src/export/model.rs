// src/export/model.rs

use crate::core::calculator::staffing::required_staff;
use crate::db::db_utils::fmt_date;
use crate::models::child_count::ChildCount;
use crate::models::global_event::GlobalEvent;
use crate::models::time_entry::TimeEntry;
use crate::models::user::User;
use serde::Serialize;
use std::collections::HashMap;

/// Flat row shared by the CSV / JSON / XLSX writers.
pub trait ExportRow: Serialize {
    fn headers() -> Vec<&'static str>;
    fn to_row(&self) -> Vec<String>;
}

#[derive(Serialize, Clone, Debug)]
pub struct EntryExport {
    pub id: i64,
    pub date: String,
    pub user: String,
    pub full_name: String,
    pub entry_type: String,
    pub subtype: String,
    pub hours: f64,
    pub prep_hours: f64,
    pub total_hours: f64,
    pub days: f64,
    pub description: String,
    pub locked: bool,
}

impl EntryExport {
    /// `users` maps user id to (username, full name).
    pub fn from_entry(e: &TimeEntry, users: &HashMap<i64, User>) -> Self {
        let (user, full_name) = users
            .get(&e.user_id)
            .map(|u| (u.username.clone(), u.full_name.clone()))
            .unwrap_or_else(|| (format!("#{}", e.user_id), String::new()));

        Self {
            id: e.id,
            date: e.date_str(),
            user,
            full_name,
            entry_type: e.entry_type.to_db_str().to_string(),
            subtype: e.subtype.map(|s| s.to_db_str().to_string()).unwrap_or_default(),
            hours: e.hours,
            prep_hours: e.prep_hours,
            total_hours: e.total_hours(),
            days: e.days,
            description: e.description.clone().unwrap_or_default(),
            locked: e.is_locked,
        }
    }
}

impl ExportRow for EntryExport {
    fn headers() -> Vec<&'static str> {
        vec![
            "id",
            "date",
            "user",
            "full_name",
            "entry_type",
            "subtype",
            "hours",
            "prep_hours",
            "total_hours",
            "days",
            "description",
            "locked",
        ]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.date.clone(),
            self.user.clone(),
            self.full_name.clone(),
            self.entry_type.clone(),
            self.subtype.clone(),
            self.hours.to_string(),
            self.prep_hours.to_string(),
            self.total_hours.to_string(),
            self.days.to_string(),
            self.description.clone(),
            if self.locked { "yes" } else { "no" }.to_string(),
        ]
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct ChildCountExport {
    pub id: i64,
    pub date: String,
    pub time_slot: String,
    pub under_3_count: u32,
    pub over_3_count: u32,
    pub total_children: u32,
    pub required_staff_under_3: u32,
    pub required_staff_over_3: u32,
    pub total_required_staff: u32,
}

impl From<&ChildCount> for ChildCountExport {
    fn from(c: &ChildCount) -> Self {
        let staff = required_staff(c.under_3_count, c.over_3_count);
        Self {
            id: c.id,
            date: fmt_date(&c.date),
            time_slot: c.time_slot.clone(),
            under_3_count: c.under_3_count,
            over_3_count: c.over_3_count,
            total_children: c.under_3_count + c.over_3_count,
            required_staff_under_3: staff.under_3,
            required_staff_over_3: staff.over_3,
            total_required_staff: staff.total(),
        }
    }
}

impl ExportRow for ChildCountExport {
    fn headers() -> Vec<&'static str> {
        vec![
            "id",
            "date",
            "time_slot",
            "under_3_count",
            "over_3_count",
            "total_children",
            "required_staff_under_3",
            "required_staff_over_3",
            "total_required_staff",
        ]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.date.clone(),
            self.time_slot.clone(),
            self.under_3_count.to_string(),
            self.over_3_count.to_string(),
            self.total_children.to_string(),
            self.required_staff_under_3.to_string(),
            self.required_staff_over_3.to_string(),
            self.total_required_staff.to_string(),
        ]
    }
}

#[derive(Serialize, Clone, Debug)]
pub struct EventExport {
    pub id: i64,
    pub date: String,
    pub event_type: String,
    pub label: String,
    pub description: String,
}

impl From<&GlobalEvent> for EventExport {
    fn from(e: &GlobalEvent) -> Self {
        Self {
            id: e.id,
            date: fmt_date(&e.date),
            event_type: e.event_type.to_db_str().to_string(),
            label: e.event_type.label().to_string(),
            description: e.description.clone().unwrap_or_default(),
        }
    }
}

impl ExportRow for EventExport {
    fn headers() -> Vec<&'static str> {
        vec!["id", "date", "event_type", "label", "description"]
    }

    fn to_row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            self.date.clone(),
            self.event_type.clone(),
            self.label.clone(),
            self.description.clone(),
        ]
    }
}
