use chrono::NaiveDate;
use serde::Serialize;

/// Facility-wide calendar event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GlobalEventType {
    EarlyClosureStaff, // closing early for lack of staff
    EarlyClosureEvent, // closing early for an afternoon event
    Closure,
    TeamDevelopment,
    StaffMeeting,
    Maintenance,
    Holiday,
    Other,
}

impl GlobalEventType {
    pub const ALL: [GlobalEventType; 8] = [
        GlobalEventType::EarlyClosureStaff,
        GlobalEventType::EarlyClosureEvent,
        GlobalEventType::Closure,
        GlobalEventType::TeamDevelopment,
        GlobalEventType::StaffMeeting,
        GlobalEventType::Maintenance,
        GlobalEventType::Holiday,
        GlobalEventType::Other,
    ];

    pub fn to_db_str(&self) -> &'static str {
        match self {
            GlobalEventType::EarlyClosureStaff => "early_closure_staff",
            GlobalEventType::EarlyClosureEvent => "early_closure_event",
            GlobalEventType::Closure => "closure",
            GlobalEventType::TeamDevelopment => "team_development",
            GlobalEventType::StaffMeeting => "staff_meeting",
            GlobalEventType::Maintenance => "maintenance",
            GlobalEventType::Holiday => "holiday",
            GlobalEventType::Other => "other",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.to_db_str() == s)
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::from_db_str(&super::normalize_code(code))
    }

    pub fn label(&self) -> &'static str {
        match self {
            GlobalEventType::EarlyClosureStaff => "Early closure (staff shortage)",
            GlobalEventType::EarlyClosureEvent => "Early closure (event)",
            GlobalEventType::Closure => "Closure day",
            GlobalEventType::TeamDevelopment => "Team development",
            GlobalEventType::StaffMeeting => "Staff meeting",
            GlobalEventType::Maintenance => "Maintenance/renovation",
            GlobalEventType::Holiday => "Public holiday",
            GlobalEventType::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GlobalEvent {
    pub id: i64,
    pub date: NaiveDate,
    pub event_type: GlobalEventType,
    pub description: Option<String>,
    pub created_at: String,
}

/// Yearly overview: counts by type and by month.
#[derive(Debug, Clone, Serialize)]
pub struct GlobalEventStats {
    pub year: i32,
    pub total_events: i64,
    pub by_type: Vec<(GlobalEventType, i64)>,
    pub by_month: Vec<(u32, i64)>,
}
