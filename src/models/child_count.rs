use crate::core::calculator::staffing::StaffingRequirement;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ChildCount {
    pub id: i64,
    pub date: NaiveDate,
    pub time_slot: String, // "08:00", "08:30", ... "16:00"
    pub under_3_count: u32,
    pub over_3_count: u32,
    pub created_at: String,
}

/// Caller-supplied fields of a headcount record.
#[derive(Debug, Clone)]
pub struct ChildCountInput {
    pub date: NaiveDate,
    pub time_slot: String,
    pub under_3_count: i64,
    pub over_3_count: i64,
}

/// Headcount of one slot with the staff it requires.
#[derive(Debug, Clone, Serialize)]
pub struct ChildCountStats {
    pub date: NaiveDate,
    pub time_slot: String,
    pub under_3_count: u32,
    pub over_3_count: u32,
    pub total_children: u32,
    pub required_staff_under_3: u32,
    pub required_staff_over_3: u32,
    pub total_required_staff: u32,
}

impl ChildCountStats {
    pub fn from_count(count: &ChildCount, staffing: StaffingRequirement) -> Self {
        Self {
            date: count.date,
            time_slot: count.time_slot.clone(),
            under_3_count: count.under_3_count,
            over_3_count: count.over_3_count,
            total_children: count.under_3_count + count.over_3_count,
            required_staff_under_3: staffing.under_3,
            required_staff_over_3: staffing.over_3,
            total_required_staff: staffing.total(),
        }
    }
}
