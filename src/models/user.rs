use super::role::Role;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: Option<String>,
    pub full_name: String,
    pub role: Role,
    pub is_active: bool,
    pub weekly_hours: f64,
    pub additional_hours: f64, // special allotment on top of the contract
    pub work_days_per_week: u32,
    pub vacation_days_per_year: u32,
    pub created_at: String,
}

/// Fields accepted when creating a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: Option<String>,
    pub full_name: String,
    pub role: Role,
    pub weekly_hours: f64,
    pub additional_hours: f64,
    pub work_days_per_week: u32,
    pub vacation_days_per_year: u32,
}

impl NewUser {
    pub fn new(username: &str, full_name: &str, role: Role) -> Self {
        Self {
            username: username.to_string(),
            email: None,
            full_name: full_name.to_string(),
            role,
            weekly_hours: 0.0,
            additional_hours: 0.0,
            work_days_per_week: 5,
            vacation_days_per_year: 32,
        }
    }
}

/// Partial update of a user's contract data; `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<Role>,
    pub weekly_hours: Option<f64>,
    pub additional_hours: Option<f64>,
    pub work_days_per_week: Option<u32>,
    pub vacation_days_per_year: Option<u32>,
    pub is_active: Option<bool>,
}

impl User {
    /// Weekly target: contract hours plus the special allotment.
    pub fn weekly_target(&self) -> f64 {
        self.weekly_hours + self.additional_hours
    }
}
